//! Unit tests for hit-test acquisition state and the reticle pose policy.

use bevy::prelude::*;

use super::{HitTestState, first_resolvable_pose};
use crate::xr::{
    HitTestResult, REQUIRED_FEATURES, ReferenceSpace, ReferenceSpaceKind, SimulatedRuntime,
    XrRuntime,
};

fn acquire_source(runtime: &SimulatedRuntime) -> crate::xr::HitTestSource {
    let space = runtime
        .request_reference_space(ReferenceSpaceKind::Viewer)
        .unwrap();
    runtime.request_hit_test_source(space).unwrap()
}

// HitTestState transitions

#[test]
fn test_initial_state_wants_request() {
    let state = HitTestState::default();
    assert!(state.should_request());
    assert!(state.source().is_none());
}

#[test]
fn test_requested_flag_blocks_second_request() {
    let mut state = HitTestState::default();
    state.mark_requested();
    assert!(!state.should_request());
    assert!(state.source().is_none());
}

#[test]
fn test_acquired_source_blocks_request() {
    let runtime = SimulatedRuntime::new();
    runtime.begin_session(REQUIRED_FEATURES).unwrap();
    let source = acquire_source(&runtime);

    let mut state = HitTestState::default();
    state.mark_requested();
    state.acquire(source);
    assert!(!state.should_request());
    assert_eq!(state.source(), Some(source));
}

#[test]
fn test_failed_acquisition_never_retries() {
    // On failure only the flag stays set; should_request must remain false
    let mut state = HitTestState::default();
    state.mark_requested();
    assert!(state.source().is_none());
    assert!(!state.should_request());
}

#[test]
fn test_reset_restarts_the_handshake() {
    let runtime = SimulatedRuntime::new();
    runtime.begin_session(REQUIRED_FEATURES).unwrap();
    let source = acquire_source(&runtime);

    let mut state = HitTestState::default();
    state.mark_requested();
    state.acquire(source);

    state.reset();
    assert!(state.should_request());
    assert!(state.source().is_none());
}

// Pose policy

#[test]
fn test_no_results_gives_no_pose() {
    assert_eq!(first_resolvable_pose(&[], ReferenceSpace::LOCAL), None);
}

#[test]
fn test_first_result_pose_is_used() {
    let m = Mat4::from_translation(Vec3::new(0.5, 0.0, -1.0));
    let results = vec![HitTestResult::resolved(m)];
    assert_eq!(first_resolvable_pose(&results, ReferenceSpace::LOCAL), Some(m));
}

#[test]
fn test_unresolvable_first_result_hides_even_with_later_results() {
    // Platform order is authoritative: the second result is never consulted
    let results = vec![
        HitTestResult::unresolved(),
        HitTestResult::resolved(Mat4::IDENTITY),
    ];
    assert_eq!(first_resolvable_pose(&results, ReferenceSpace::LOCAL), None);
}

#[test]
fn test_transform_matches_pose_matrix() {
    let m = Mat4::from_translation(Vec3::new(1.0, 0.0, -2.0));
    let pose = first_resolvable_pose(&[HitTestResult::resolved(m)], ReferenceSpace::LOCAL).unwrap();
    let transform = Transform::from_matrix(pose);
    assert_eq!(transform.translation, Vec3::new(1.0, 0.0, -2.0));
    assert_eq!(transform.rotation, Quat::IDENTITY);
}

// End-to-end against the simulated runtime

#[test]
fn test_session_scenario_place_track_reset() {
    let runtime = SimulatedRuntime::new();
    let mut state = HitTestState::default();

    // Session 1: handshake, track, end
    runtime.begin_session(REQUIRED_FEATURES).unwrap();
    state.mark_requested();
    state.acquire(acquire_source(&runtime));

    runtime.set_viewer_ray(Vec3::new(0.0, 1.6, 0.0), Vec3::new(0.2, -1.0, -0.5));
    let results = runtime.hit_test(state.source().unwrap());
    let pose = first_resolvable_pose(&results, ReferenceSpace::LOCAL).unwrap();
    assert!(pose.to_scale_rotation_translation().2.y.abs() < 1e-5);

    runtime.end_session();
    state.reset();

    // Old handle is dead even while the state machine restarts
    assert!(state.should_request());

    // Session 2: the handshake runs again and yields a fresh working source
    runtime.begin_session(REQUIRED_FEATURES).unwrap();
    state.mark_requested();
    state.acquire(acquire_source(&runtime));
    runtime.set_viewer_ray(Vec3::new(0.0, 1.6, 0.0), Vec3::NEG_Y);
    let results = runtime.hit_test(state.source().unwrap());
    assert!(first_resolvable_pose(&results, ReferenceSpace::LOCAL).is_some());
}
