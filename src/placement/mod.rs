//! Select-input handling and object placement.
//!
//! A "select" is a discrete tap while an AR session is active. If the
//! reticle is visible, the first select creates the mode's object at the
//! reticle pose; every later select moves the same object. Selects while
//! the reticle is hidden do nothing. Only the pose translation is applied,
//! so the placed object never inherits the reticle's orientation.

#[cfg(test)]
mod tests;

use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::{CUBE_SIZE, HOLOGRAM_RADIUS};
use crate::demo::{CurrentDemo, DemoKind};
use crate::hologram::spawn_hologram;
use crate::reticle::Reticle;
use crate::theme::CUBE_COLOR;
use crate::ui::DebugLog;
use crate::xr::ArSessionState;

/// Discrete select input (tap / primary click) during an AR session
#[derive(Message)]
pub struct SelectInput;

/// Marker for the single placed object of the active demo mode
#[derive(Component)]
pub struct PlacedObject;

/// What a select event does given the current scene state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SelectOutcome {
    /// No valid surface under the reticle
    Ignored,
    /// First valid select: create the object
    Place,
    /// Later valid select: move the existing object
    Move,
}

/// Decide the effect of a select event.
///
/// Creation is monotonic within a session: once an object exists it is only
/// ever moved, never duplicated or removed.
pub fn select_outcome(reticle_visible: bool, object_placed: bool) -> SelectOutcome {
    match (reticle_visible, object_placed) {
        (false, _) => SelectOutcome::Ignored,
        (true, false) => SelectOutcome::Place,
        (true, true) => SelectOutcome::Move,
    }
}

/// Translation for the active mode's object at a hit point.
///
/// The hologram shell is lifted by its radius so it floats on the surface;
/// the cube sits centered on the hit point. Place and move both go through
/// here, so moving an object never changes its height offset.
pub fn placement_translation(kind: DemoKind, surface_point: Vec3) -> Vec3 {
    match kind {
        DemoKind::Hologram => surface_point + Vec3::Y * HOLOGRAM_RADIUS,
        _ => surface_point,
    }
}

/// Translate taps into select messages, suppressed over UI
fn read_select_input(
    mouse_button: Res<ButtonInput<MouseButton>>,
    touches: Res<Touches>,
    session: Res<ArSessionState>,
    current: Res<CurrentDemo>,
    mut contexts: EguiContexts,
    mut select_events: MessageWriter<SelectInput>,
) {
    if !current.kind.uses_ar() || !session.active {
        return;
    }

    let tapped = mouse_button.just_pressed(MouseButton::Left) || touches.any_just_pressed();
    if !tapped {
        return;
    }

    // Don't place if tapping on UI
    if let Ok(ctx) = contexts.ctx_mut()
        && ctx.is_pointer_over_area()
    {
        return;
    }

    select_events.write(SelectInput);
}

/// Spawn the translucent green cube of the placement demo
fn spawn_cube(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    at: Vec3,
) {
    commands.spawn((
        PlacedObject,
        Mesh3d(meshes.add(Cuboid::new(CUBE_SIZE, CUBE_SIZE, CUBE_SIZE))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: CUBE_COLOR,
            alpha_mode: AlphaMode::Blend,
            ..default()
        })),
        Transform::from_translation(at),
    ));
}

/// Apply select events: create once, then move
fn handle_select(
    mut commands: Commands,
    mut events: MessageReader<SelectInput>,
    current: Res<CurrentDemo>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    reticle_query: Query<(&Transform, &Visibility), With<Reticle>>,
    mut placed_query: Query<&mut Transform, (With<PlacedObject>, Without<Reticle>)>,
    mut debug_log: ResMut<DebugLog>,
) {
    for _ in events.read() {
        let Ok((reticle_transform, visibility)) = reticle_query.single() else {
            continue;
        };

        let reticle_visible = *visibility != Visibility::Hidden;
        let target = placement_translation(current.kind, reticle_transform.translation);

        match select_outcome(reticle_visible, !placed_query.is_empty()) {
            SelectOutcome::Ignored => {}
            SelectOutcome::Move => {
                if let Ok(mut transform) = placed_query.single_mut() {
                    transform.translation = target;
                    debug!("Placed object moved to {:?}", target);
                    debug_log.push("Object moved".to_string());
                }
            }
            SelectOutcome::Place => {
                match current.kind {
                    DemoKind::Placement => {
                        spawn_cube(&mut commands, &mut meshes, &mut materials, target);
                        debug_log.push("Cube placed".to_string());
                    }
                    DemoKind::Hologram => {
                        let hologram =
                            spawn_hologram(&mut commands, &mut meshes, &mut materials, target);
                        commands.entity(hologram).insert(PlacedObject);
                        debug_log.push("Hologram placed".to_string());
                    }
                    // Orbit mode has no session, so no select events arrive
                    DemoKind::Orbit => {}
                }
                info!("Placed object at {:?}", target);
            }
        }
    }
}

pub struct PlacementPlugin;

impl Plugin for PlacementPlugin {
    fn build(&self, app: &mut App) {
        app.add_message::<SelectInput>()
            .add_systems(Update, (read_select_input, handle_select).chain());
    }
}
