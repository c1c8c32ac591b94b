//! Centralized constants used across the application.
//!
//! This module contains magic numbers and configuration values that are used
//! in multiple places or would benefit from being named constants.

/// Default window width in pixels
pub const DEFAULT_WINDOW_WIDTH: f32 = 1280.0;

/// Default window height in pixels
pub const DEFAULT_WINDOW_HEIGHT: f32 = 800.0;

/// Vertical field of view of the stage camera, in degrees
pub const CAMERA_FOV_DEGREES: f32 = 70.0;

/// Near clip plane of the stage camera, in meters
pub const CAMERA_NEAR: f32 = 0.01;

/// Far clip plane of the stage camera, in meters
pub const CAMERA_FAR: f32 = 20.0;

/// Viewer eye height above the floor plane, in meters
pub const VIEWER_EYE_HEIGHT: f32 = 1.6;

/// Inner radius of the reticle ring, in meters
pub const RETICLE_INNER_RADIUS: f32 = 0.05;

/// Outer radius of the reticle ring, in meters
pub const RETICLE_OUTER_RADIUS: f32 = 0.07;

/// Segment count of the reticle ring mesh
pub const RETICLE_SEGMENTS: u32 = 32;

/// Edge length of the placed cube, in meters
pub const CUBE_SIZE: f32 = 0.2;

/// Number of particles in a hologram sphere
pub const PARTICLE_COUNT: usize = 600;

/// Radius of an individual hologram particle, in meters
pub const PARTICLE_RADIUS: f32 = 0.004;

/// Shell radius of the placed hologram sphere, in meters
pub const HOLOGRAM_RADIUS: f32 = 0.15;

/// Hologram spin rate around the vertical axis, in radians per second
pub const HOLOGRAM_SPIN_SPEED: f32 = 0.6;

/// Shell radius of the orbit-viewer particle sphere, in meters
pub const ORBIT_SPHERE_RADIUS: f32 = 1.0;

/// Radius of an orbit-viewer particle, in meters
pub const ORBIT_PARTICLE_RADIUS: f32 = 0.012;

/// Automatic yaw rate of the orbit camera, in radians per second
pub const ORBIT_AUTO_SPIN_SPEED: f32 = 0.15;

/// Orbit camera distance limits, in meters
pub const ORBIT_MIN_DISTANCE: f32 = 1.5;
pub const ORBIT_MAX_DISTANCE: f32 = 8.0;

/// Orbit camera pitch limit above/below the horizon, in radians
pub const ORBIT_PITCH_LIMIT: f32 = 1.4;

/// Maximum number of lines kept in the debug overlay
pub const DEBUG_LOG_CAPACITY: usize = 12;

/// Default simulated latency of each platform handshake step, in milliseconds
pub const DEFAULT_HANDSHAKE_LATENCY_MS: u64 = 150;
