//! Non-AR orbit viewer.
//!
//! The particle sphere sits at the origin; the camera orbits it with a slow
//! automatic spin, mouse-drag orbit, and scroll zoom.

use bevy::input::mouse::{MouseMotion, MouseScrollUnit, MouseWheel};
use bevy::prelude::*;
use bevy_egui::EguiContexts;

use crate::constants::{
    ORBIT_AUTO_SPIN_SPEED, ORBIT_MAX_DISTANCE, ORBIT_MIN_DISTANCE, ORBIT_PITCH_LIMIT,
};
use crate::demo::{CurrentDemo, DemoKind};
use crate::stage::StageCamera;

/// Drag sensitivity in radians per pixel
const ORBIT_SENSITIVITY: f32 = 0.005;

/// Orbit camera parameters around the origin
#[derive(Resource)]
pub struct OrbitCameraState {
    pub yaw: f32,
    pub pitch: f32,
    pub distance: f32,
}

impl Default for OrbitCameraState {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: 0.35,
            distance: 3.0,
        }
    }
}

impl OrbitCameraState {
    /// Apply a drag delta, clamping pitch away from the poles
    pub fn orbit(&mut self, delta_x: f32, delta_y: f32) {
        self.yaw -= delta_x * ORBIT_SENSITIVITY;
        self.pitch = (self.pitch + delta_y * ORBIT_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    /// Apply a zoom step, clamping the orbit distance
    pub fn zoom(&mut self, amount: f32) {
        self.distance = (self.distance - amount).clamp(ORBIT_MIN_DISTANCE, ORBIT_MAX_DISTANCE);
    }

    /// Camera position for the current orbit parameters
    pub fn eye_position(&self) -> Vec3 {
        Vec3::new(
            self.distance * self.pitch.cos() * self.yaw.sin(),
            self.distance * self.pitch.sin(),
            self.distance * self.pitch.cos() * self.yaw.cos(),
        )
    }
}

/// Whether a mouse drag should orbit the camera
pub fn drag_allowed(kind: DemoKind, dragging: bool, over_ui: bool) -> bool {
    kind == DemoKind::Orbit && dragging && !over_ui
}

fn orbit_drag(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    current: Res<CurrentDemo>,
    mut contexts: EguiContexts,
    mut orbit: ResMut<OrbitCameraState>,
) {
    // Don't orbit while dragging on UI
    let over_ui = contexts
        .ctx_mut()
        .map(|ctx| ctx.is_pointer_over_area())
        .unwrap_or(false);

    if !drag_allowed(current.kind, mouse_button.pressed(MouseButton::Left), over_ui) {
        mouse_motion.clear();
        return;
    }

    for event in mouse_motion.read() {
        orbit.orbit(event.delta.x, event.delta.y);
    }
}

fn orbit_zoom(
    mut scroll_events: MessageReader<MouseWheel>,
    current: Res<CurrentDemo>,
    mut orbit: ResMut<OrbitCameraState>,
) {
    if current.kind != DemoKind::Orbit {
        scroll_events.clear();
        return;
    }

    for event in scroll_events.read() {
        let amount = match event.unit {
            MouseScrollUnit::Line => event.y * 0.3,
            MouseScrollUnit::Pixel => event.y * 0.005,
        };
        orbit.zoom(amount);
    }
}

fn orbit_auto_spin(
    time: Res<Time>,
    mouse_button: Res<ButtonInput<MouseButton>>,
    current: Res<CurrentDemo>,
    mut orbit: ResMut<OrbitCameraState>,
) {
    if current.kind != DemoKind::Orbit || mouse_button.pressed(MouseButton::Left) {
        return;
    }

    orbit.yaw += ORBIT_AUTO_SPIN_SPEED * time.delta_secs();
}

fn apply_orbit(
    current: Res<CurrentDemo>,
    orbit: Res<OrbitCameraState>,
    mut camera_query: Query<&mut Transform, With<StageCamera>>,
) {
    if current.kind != DemoKind::Orbit {
        return;
    }

    let Ok(mut transform) = camera_query.single_mut() else {
        return;
    };

    *transform = Transform::from_translation(orbit.eye_position()).looking_at(Vec3::ZERO, Vec3::Y);
}

pub struct OrbitPlugin;

impl Plugin for OrbitPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<OrbitCameraState>().add_systems(
            Update,
            (orbit_drag, orbit_zoom, orbit_auto_spin, apply_orbit).chain(),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_drag_only_orbits_off_the_ui() {
        assert!(drag_allowed(DemoKind::Orbit, true, false));
        assert!(!drag_allowed(DemoKind::Orbit, true, true));
        assert!(!drag_allowed(DemoKind::Orbit, false, false));
        assert!(!drag_allowed(DemoKind::Placement, true, false));
        assert!(!drag_allowed(DemoKind::Hologram, true, false));
    }

    #[test]
    fn test_zoom_clamps_to_distance_limits() {
        let mut orbit = OrbitCameraState::default();
        orbit.zoom(100.0);
        assert_eq!(orbit.distance, ORBIT_MIN_DISTANCE);
        orbit.zoom(-100.0);
        assert_eq!(orbit.distance, ORBIT_MAX_DISTANCE);
    }

    #[test]
    fn test_orbit_clamps_pitch() {
        let mut orbit = OrbitCameraState::default();
        orbit.orbit(0.0, 10_000.0);
        assert_eq!(orbit.pitch, ORBIT_PITCH_LIMIT);
        orbit.orbit(0.0, -20_000.0);
        assert_eq!(orbit.pitch, -ORBIT_PITCH_LIMIT);
    }

    #[test]
    fn test_eye_position_distance() {
        let orbit = OrbitCameraState {
            yaw: 1.2,
            pitch: 0.4,
            distance: 3.0,
        };
        assert!((orbit.eye_position().length() - 3.0).abs() < 1e-5);
    }

    #[test]
    fn test_eye_position_at_zero_angles_is_on_z_axis() {
        let orbit = OrbitCameraState {
            yaw: 0.0,
            pitch: 0.0,
            distance: 2.0,
        };
        let eye = orbit.eye_position();
        assert!((eye - Vec3::new(0.0, 0.0, 2.0)).length() < 1e-6);
    }
}
