//! Demo mode selection and switching.
//!
//! Three demo modes share the same stage: AR cube placement, AR particle
//! hologram, and a non-AR orbiting particle-sphere viewer. The active mode
//! is a resource; systems that only apply to one mode guard on it.

use bevy::prelude::*;
use serde::{Deserialize, Serialize};

use crate::hologram::spawn_particle_sphere;
use crate::placement::PlacedObject;
use crate::theme;
use crate::xr::EndSessionRequest;
use crate::{constants, ui::DebugLog};

/// The three demo variants
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum DemoKind {
    /// AR hit-test reticle, tap to place or move a cube
    #[default]
    Placement,
    /// AR hit-test reticle, tap to place or move a spinning particle hologram
    Hologram,
    /// Non-AR particle sphere with an orbiting camera
    Orbit,
}

impl DemoKind {
    pub fn label(&self) -> &'static str {
        match self {
            DemoKind::Placement => "Cube placement",
            DemoKind::Hologram => "Hologram",
            DemoKind::Orbit => "Orbit viewer",
        }
    }

    /// Whether this mode drives an AR session
    pub fn uses_ar(&self) -> bool {
        !matches!(self, DemoKind::Orbit)
    }
}

/// Resource tracking the active demo mode
#[derive(Resource, Default)]
pub struct CurrentDemo {
    pub kind: DemoKind,
}

/// Marker for the orbit-viewer particle sphere
#[derive(Component)]
pub struct OrbitSphere;

/// Tear down mode-owned entities and stand up the new mode's scene whenever
/// the active demo changes (including the initial value applied from config).
fn apply_demo_change(
    mut commands: Commands,
    current: Res<CurrentDemo>,
    mut meshes: ResMut<Assets<Mesh>>,
    mut materials: ResMut<Assets<StandardMaterial>>,
    placed_query: Query<Entity, With<PlacedObject>>,
    orbit_query: Query<Entity, With<OrbitSphere>>,
    mut end_events: MessageWriter<EndSessionRequest>,
    mut debug_log: ResMut<DebugLog>,
) {
    if !current.is_changed() {
        return;
    }

    for entity in placed_query.iter() {
        commands.entity(entity).despawn();
    }
    for entity in orbit_query.iter() {
        commands.entity(entity).despawn();
    }

    // Any active session belongs to the previous mode
    end_events.write(EndSessionRequest);

    if current.kind == DemoKind::Orbit {
        let sphere = spawn_particle_sphere(
            &mut commands,
            &mut meshes,
            &mut materials,
            Transform::IDENTITY,
            constants::ORBIT_SPHERE_RADIUS,
            constants::ORBIT_PARTICLE_RADIUS,
            theme::ORBIT_PARTICLE_COLOR,
        );
        commands.entity(sphere).insert(OrbitSphere);
    }

    debug_log.push(format!("Demo mode: {}", current.kind.label()));
    info!("Switched demo mode to {:?}", current.kind);
}

pub struct DemoPlugin;

impl Plugin for DemoPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<CurrentDemo>()
            .add_systems(Update, apply_demo_change);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_mode_is_placement() {
        assert_eq!(DemoKind::default(), DemoKind::Placement);
    }

    #[test]
    fn test_ar_usage_per_mode() {
        assert!(DemoKind::Placement.uses_ar());
        assert!(DemoKind::Hologram.uses_ar());
        assert!(!DemoKind::Orbit.uses_ar());
    }

    #[test]
    fn test_mode_labels_are_distinct() {
        let labels = [
            DemoKind::Placement.label(),
            DemoKind::Hologram.label(),
            DemoKind::Orbit.label(),
        ];
        assert_ne!(labels[0], labels[1]);
        assert_ne!(labels[1], labels[2]);
        assert_ne!(labels[0], labels[2]);
    }
}
