//! Scene bootstrap: camera, lights, and the simulated floor.
//!
//! The camera doubles as the AR viewer; in AR modes the right mouse button
//! aims it (the desktop stand-in for moving the device), which is where the
//! simulated runtime's hit-test ray comes from.

mod viewport;

use bevy::input::mouse::MouseMotion;
use bevy::prelude::*;

use crate::constants::{
    CAMERA_FAR, CAMERA_FOV_DEGREES, CAMERA_NEAR, ORBIT_PITCH_LIMIT, VIEWER_EYE_HEIGHT,
};
use crate::demo::CurrentDemo;
use crate::theme;

/// Mouse-look sensitivity in radians per pixel
const LOOK_SENSITIVITY: f32 = 0.003;

/// Initial downward pitch so the floor is in view
const INITIAL_PITCH: f32 = -0.4;

/// The stage camera; in AR modes its pose is the viewer pose
#[derive(Component)]
pub struct StageCamera {
    pub yaw: f32,
    pub pitch: f32,
}

impl Default for StageCamera {
    fn default() -> Self {
        Self {
            yaw: 0.0,
            pitch: INITIAL_PITCH,
        }
    }
}

fn spawn_stage(
    mut commands: Commands,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
) {
    commands.spawn((
        Camera3d::default(),
        StageCamera::default(),
        Projection::Perspective(PerspectiveProjection {
            fov: CAMERA_FOV_DEGREES.to_radians(),
            near: CAMERA_NEAR,
            far: CAMERA_FAR,
            ..default()
        }),
        Transform::from_xyz(0.0, VIEWER_EYE_HEIGHT, 0.0)
            .with_rotation(Quat::from_euler(EulerRot::YXZ, 0.0, INITIAL_PITCH, 0.0)),
    ));

    // Two directional lights approximate a sky/ground hemisphere light
    commands.spawn((
        DirectionalLight {
            color: theme::SKY_LIGHT_COLOR,
            illuminance: 8_000.0,
            ..default()
        },
        Transform::from_xyz(0.5, 1.0, 0.25).looking_at(Vec3::ZERO, Vec3::Y),
    ));
    commands.spawn((
        DirectionalLight {
            color: theme::GROUND_LIGHT_COLOR,
            illuminance: 2_000.0,
            ..default()
        },
        Transform::from_xyz(-0.5, -1.0, -0.25).looking_at(Vec3::ZERO, Vec3::Y),
    ));

    // Stand-in for the camera passthrough: a dark floor to aim at
    commands.spawn((
        Mesh3d(meshes.add(Plane3d::default().mesh().size(20.0, 20.0))),
        MeshMaterial3d(materials.add(StandardMaterial {
            base_color: theme::FLOOR_COLOR,
            perceptual_roughness: 1.0,
            ..default()
        })),
        Transform::IDENTITY,
    ));
}

/// Right-drag mouse look for AR modes
fn camera_look(
    mouse_button: Res<ButtonInput<MouseButton>>,
    mut mouse_motion: MessageReader<MouseMotion>,
    current: Res<CurrentDemo>,
    mut camera_query: Query<(&mut Transform, &mut StageCamera)>,
) {
    if !current.kind.uses_ar() || !mouse_button.pressed(MouseButton::Right) {
        mouse_motion.clear();
        return;
    }

    let Ok((mut transform, mut camera)) = camera_query.single_mut() else {
        return;
    };

    for event in mouse_motion.read() {
        camera.yaw -= event.delta.x * LOOK_SENSITIVITY;
        camera.pitch = (camera.pitch - event.delta.y * LOOK_SENSITIVITY)
            .clamp(-ORBIT_PITCH_LIMIT, ORBIT_PITCH_LIMIT);
    }

    transform.rotation = Quat::from_euler(EulerRot::YXZ, camera.yaw, camera.pitch, 0.0);
}

pub struct StagePlugin;

impl Plugin for StagePlugin {
    fn build(&self, app: &mut App) {
        app.insert_resource(ClearColor(theme::CLEAR_COLOR))
            .add_systems(Startup, spawn_stage)
            .add_systems(Update, (camera_look, viewport::handle_resize));
    }
}
