//! Hit-test acquisition and reticle tracking.
//!
//! Once a session is active, exactly one asynchronous request chain runs:
//! viewer reference space, then a hit-test source anchored to it. The
//! `requested` flag is set synchronously before the chain is spawned so a
//! second chain can never start. On failure the source stays unset for the
//! rest of the session and the reticle simply never shows.
//!
//! Every frame with an acquired source, the runtime is queried and the first
//! result (platform order, no re-ranking) drives the reticle: resolvable
//! pose means visible with the pose transform, anything else means hidden.

#[cfg(test)]
mod tests;

use std::f32::consts::FRAC_PI_2;

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::constants::{RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS, RETICLE_SEGMENTS};
use crate::theme::RETICLE_COLOR;
use crate::ui::DebugLog;
use crate::xr::{
    ArSessionState, HitTestResult, HitTestSource, ReferenceSpace, ReferenceSpaceKind,
    SessionEnded, XrError, XrRuntimeHandle,
};

/// Marker for the placement reticle entity
#[derive(Component)]
pub struct Reticle;

/// Hit-test source acquisition state: unrequested → requested → acquired.
///
/// Reset at session end so the next session re-runs the handshake.
#[derive(Resource, Default)]
pub struct HitTestState {
    source: Option<HitTestSource>,
    requested: bool,
}

impl HitTestState {
    /// True when no request chain has been issued for this session
    pub fn should_request(&self) -> bool {
        !self.requested && self.source.is_none()
    }

    /// Record that the request chain has been spawned
    pub fn mark_requested(&mut self) {
        self.requested = true;
    }

    /// Store the acquired source handle
    pub fn acquire(&mut self, source: HitTestSource) {
        self.source = Some(source);
    }

    pub fn source(&self) -> Option<HitTestSource> {
        self.source
    }

    /// Session-end reset; the next session starts from scratch
    pub fn reset(&mut self) {
        self.source = None;
        self.requested = false;
    }
}

/// Background task running the two-step handshake, stamped with the
/// session generation it was issued for
#[derive(Component)]
struct HitTestSourceTask {
    generation: u64,
    task: Task<Result<HitTestSource, XrError>>,
}

/// Pose policy: take the first result as returned by the platform and
/// resolve it against the given space. A second result is never consulted,
/// even when the first does not resolve.
pub fn first_resolvable_pose(results: &[HitTestResult], space: ReferenceSpace) -> Option<Mat4> {
    let hit = results.first()?;
    hit.pose(space)
}

/// Spawn the reticle: a flat white ring, hidden until a surface is hit
fn spawn_reticle(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    let ring = Annulus::new(RETICLE_INNER_RADIUS, RETICLE_OUTER_RADIUS)
        .mesh()
        .resolution(RETICLE_SEGMENTS)
        .build()
        // Bake the ring flat so the pose transform can be applied directly
        .rotated_by(Quat::from_rotation_x(-FRAC_PI_2));

    let material = StandardMaterial {
        base_color: RETICLE_COLOR,
        unlit: true,
        double_sided: true,
        cull_mode: None,
        ..default()
    };

    commands.spawn((
        Reticle,
        Mesh3d(meshes.add(ring)),
        MeshMaterial3d(materials.add(material)),
        Transform::IDENTITY,
        Visibility::Hidden,
    ));
}

/// Issue the one-shot acquisition chain once a session is active
fn acquire_hit_test_source(
    mut commands: Commands,
    session: Res<ArSessionState>,
    runtime: Res<XrRuntimeHandle>,
    mut state: ResMut<HitTestState>,
) {
    if !session.active || !state.should_request() {
        return;
    }

    // Guard before the chain resolves so it can never run twice
    state.mark_requested();

    let generation = session.request_generation;
    let runtime = runtime.0.clone();
    let task_pool = AsyncComputeTaskPool::get();
    let task = task_pool.spawn(async move {
        let space = runtime.request_reference_space(ReferenceSpaceKind::Viewer)?;
        runtime.request_hit_test_source(space)
    });
    commands.spawn(HitTestSourceTask { generation, task });
}

/// Poll the acquisition chain and store the source handle
fn poll_hit_test_source(
    mut commands: Commands,
    session: Res<ArSessionState>,
    mut state: ResMut<HitTestState>,
    mut debug_log: ResMut<DebugLog>,
    mut tasks: Query<(Entity, &mut HitTestSourceTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        if !session.is_current_session(task.generation) {
            // The issuing session ended before the chain resolved; the
            // handle is dead even if another session is active by now
            debug!("Discarding hit test source from an ended session");
            continue;
        }

        match result {
            Ok(source) => {
                state.acquire(source);
                debug!("Hit test source acquired");
                debug_log.push("Hit test source acquired".to_string());
            }
            Err(e) => {
                // No retry: the marker stays hidden for this session
                error!("Error requesting hit test source: {}", e);
                debug_log.push(format!("Hit test failed: {}", e));
            }
        }
    }
}

/// Per-frame reticle update from this frame's hit-test results
fn update_reticle(
    session: Res<ArSessionState>,
    state: Res<HitTestState>,
    runtime: Res<XrRuntimeHandle>,
    mut query: Query<(&mut Transform, &mut Visibility), With<Reticle>>,
) {
    let Ok((mut transform, mut visibility)) = query.single_mut() else {
        return;
    };

    let pose = if session.active {
        state
            .source()
            .and_then(|source| {
                first_resolvable_pose(&runtime.0.hit_test(source), ReferenceSpace::LOCAL)
            })
    } else {
        None
    };

    let new_visibility = match pose {
        Some(matrix) => {
            *transform = Transform::from_matrix(matrix);
            Visibility::Inherited
        }
        None => Visibility::Hidden,
    };

    if *visibility != new_visibility {
        *visibility = new_visibility;
    }
}

/// Session-end reset: hide the reticle and clear acquisition state
fn reset_on_session_end(
    mut events: MessageReader<SessionEnded>,
    mut state: ResMut<HitTestState>,
    mut query: Query<&mut Visibility, With<Reticle>>,
) {
    for _ in events.read() {
        state.reset();
        for mut visibility in query.iter_mut() {
            if *visibility != Visibility::Hidden {
                *visibility = Visibility::Hidden;
            }
        }
    }
}

pub struct ReticlePlugin;

impl Plugin for ReticlePlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<HitTestState>()
            .add_systems(Startup, spawn_reticle)
            .add_systems(
                Update,
                (
                    acquire_hit_test_source,
                    poll_hit_test_source,
                    update_reticle,
                    reset_on_session_end,
                )
                    .chain(),
            );
    }
}
