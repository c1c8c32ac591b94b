//! Unit tests for the select-outcome and placement rules.

use bevy::prelude::*;

use super::{SelectOutcome, placement_translation, select_outcome};
use crate::constants::HOLOGRAM_RADIUS;
use crate::demo::DemoKind;

#[test]
fn test_hidden_reticle_ignores_select() {
    assert_eq!(select_outcome(false, false), SelectOutcome::Ignored);
    assert_eq!(select_outcome(false, true), SelectOutcome::Ignored);
}

#[test]
fn test_first_valid_select_places() {
    assert_eq!(select_outcome(true, false), SelectOutcome::Place);
}

#[test]
fn test_later_valid_selects_move() {
    assert_eq!(select_outcome(true, true), SelectOutcome::Move);
}

#[test]
fn test_object_count_stays_at_one() {
    // Simulate a session's worth of selects against the decision table:
    // the object is created exactly once, then only moved.
    let mut placed = false;
    let mut created = 0;

    for visible in [false, true, true, false, true] {
        match select_outcome(visible, placed) {
            SelectOutcome::Place => {
                created += 1;
                placed = true;
            }
            SelectOutcome::Move => assert!(placed),
            SelectOutcome::Ignored => {}
        }
    }

    assert_eq!(created, 1);
    assert!(placed);
}

#[test]
fn test_cube_sits_on_the_hit_point() {
    let hit = Vec3::new(0.5, 0.0, -1.2);
    assert_eq!(placement_translation(DemoKind::Placement, hit), hit);
}

#[test]
fn test_hologram_floats_above_the_hit_point() {
    let hit = Vec3::new(0.5, 0.0, -1.2);
    let target = placement_translation(DemoKind::Hologram, hit);
    assert_eq!(target, hit + Vec3::Y * HOLOGRAM_RADIUS);
}

#[test]
fn test_moving_a_hologram_keeps_its_lift() {
    // Place at one point, then move to another: both taps resolve through
    // the same rule, so the shell stays lifted by its radius.
    let placed = placement_translation(DemoKind::Hologram, Vec3::new(0.0, 0.0, -1.0));
    let moved = placement_translation(DemoKind::Hologram, Vec3::new(1.0, 0.0, -2.0));
    assert_eq!(placed.y, HOLOGRAM_RADIUS);
    assert_eq!(moved.y, HOLOGRAM_RADIUS);
}
