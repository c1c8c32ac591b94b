//! Centralized color theme for the application.
//!
//! This module provides all colors used by the demo scenes and UI.
//! Modify values here to change the application's color scheme.

use bevy::prelude::Color;

// ============================================================================
// Scene Colors
// ============================================================================

/// Background clear color (stand-in for the camera passthrough in AR)
pub const CLEAR_COLOR: Color = Color::srgb(0.02, 0.02, 0.04);

/// Simulated floor plane
pub const FLOOR_COLOR: Color = Color::srgb(0.12, 0.12, 0.14);

/// Sky-side fill light (upper hemisphere)
pub const SKY_LIGHT_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Ground-side fill light (lower hemisphere)
pub const GROUND_LIGHT_COLOR: Color = Color::srgb(0.73, 0.73, 1.0);

// ============================================================================
// Object Colors
// ============================================================================

/// White reticle ring
pub const RETICLE_COLOR: Color = Color::srgb(1.0, 1.0, 1.0);

/// Translucent green placed cube
pub const CUBE_COLOR: Color = Color::srgba(0.0, 1.0, 0.0, 0.8);

/// Cyan hologram particles
pub const HOLOGRAM_COLOR: Color = Color::srgb(0.3, 0.9, 1.0);

/// Warm white orbit-viewer particles
pub const ORBIT_PARTICLE_COLOR: Color = Color::srgb(1.0, 0.95, 0.85);
