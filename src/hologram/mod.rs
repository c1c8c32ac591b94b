//! Particle-sphere holograms.
//!
//! Particles are sampled uniformly over a sphere shell with the closed-form
//! mapping (theta = 2πu, y = 2v − 1) and spawned as small unlit meshes under
//! a root entity. The root spins slowly around the vertical axis.

use std::f32::consts::TAU;

use bevy::prelude::*;
use rand::Rng;

use crate::constants::{
    HOLOGRAM_RADIUS, HOLOGRAM_SPIN_SPEED, PARTICLE_COUNT, PARTICLE_RADIUS,
};
use crate::theme::HOLOGRAM_COLOR;

/// Marker for a spinning hologram root
#[derive(Component)]
pub struct HologramRoot;

/// Sample a uniformly distributed point on the unit sphere shell
pub fn sample_unit_sphere_point(rng: &mut impl Rng) -> Vec3 {
    let u: f32 = rng.gen_range(0.0..1.0);
    let v: f32 = rng.gen_range(0.0..1.0);

    let theta = TAU * u;
    let y = 2.0 * v - 1.0;
    let ring = (1.0 - y * y).sqrt();

    Vec3::new(ring * theta.cos(), y, ring * theta.sin())
}

/// Spawn a particle sphere and return its root entity.
///
/// Shared by the AR hologram and the orbit viewer, which differ only in
/// scale, color, and the components added to the root afterwards.
pub fn spawn_particle_sphere(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    transform: Transform,
    shell_radius: f32,
    particle_radius: f32,
    color: Color,
) -> Entity {
    let particle_mesh = meshes.add(Sphere::new(particle_radius));
    let particle_material = materials.add(StandardMaterial {
        base_color: color,
        unlit: true,
        ..default()
    });

    let mut rng = rand::thread_rng();

    commands
        .spawn((transform, Visibility::default()))
        .with_children(|parent| {
            for _ in 0..PARTICLE_COUNT {
                let position = sample_unit_sphere_point(&mut rng) * shell_radius;
                parent.spawn((
                    Mesh3d(particle_mesh.clone()),
                    MeshMaterial3d(particle_material.clone()),
                    Transform::from_translation(position),
                ));
            }
        })
        .id()
}

/// Spawn the AR hologram with its center at the given point.
///
/// Callers decide the placement height; the placement module lifts the
/// center so the shell floats on the hit surface.
pub fn spawn_hologram(
    commands: &mut Commands,
    meshes: &mut Assets<Mesh>,
    materials: &mut Assets<StandardMaterial>,
    at: Vec3,
) -> Entity {
    let root = spawn_particle_sphere(
        commands,
        meshes,
        materials,
        Transform::from_translation(at),
        HOLOGRAM_RADIUS,
        PARTICLE_RADIUS,
        HOLOGRAM_COLOR,
    );
    commands.entity(root).insert(HologramRoot);
    root
}

/// Spin hologram roots around the vertical axis
fn spin_holograms(time: Res<Time>, mut query: Query<&mut Transform, With<HologramRoot>>) {
    for mut transform in query.iter_mut() {
        transform.rotate_y(HOLOGRAM_SPIN_SPEED * time.delta_secs());
    }
}

pub struct HologramPlugin;

impl Plugin for HologramPlugin {
    fn build(&self, app: &mut App) {
        app.add_systems(Update, spin_holograms);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::StdRng;

    #[test]
    fn test_samples_lie_on_unit_shell() {
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..1000 {
            let p = sample_unit_sphere_point(&mut rng);
            assert!((p.length() - 1.0).abs() < 1e-4);
        }
    }

    #[test]
    fn test_samples_cover_both_hemispheres() {
        let mut rng = StdRng::seed_from_u64(42);
        let upper = (0..2000)
            .filter(|_| sample_unit_sphere_point(&mut rng).y > 0.0)
            .count();
        // Uniform shell sampling puts roughly half the points in each
        // hemisphere; allow a wide margin for a seeded run
        assert!(upper > 800 && upper < 1200, "upper hemisphere: {}", upper);
    }

    #[test]
    fn test_vertical_range_is_covered() {
        let mut rng = StdRng::seed_from_u64(3);
        let mut min_y: f32 = 1.0;
        let mut max_y: f32 = -1.0;
        for _ in 0..2000 {
            let y = sample_unit_sphere_point(&mut rng).y;
            min_y = min_y.min(y);
            max_y = max_y.max(y);
        }
        assert!(min_y < -0.9);
        assert!(max_y > 0.9);
    }
}
