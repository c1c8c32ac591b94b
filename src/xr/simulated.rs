//! Simulated desktop AR runtime.
//!
//! Stands in for a real platform runtime so the demos run anywhere: the
//! "detected surface" is the y = 0 floor plane, and hit-testing intersects
//! the current viewer ray with it. The handshake steps sleep briefly to
//! mimic platform latency; they are only called from the async task pool.

use std::sync::Mutex;
use std::time::Duration;

use bevy::prelude::*;

use super::runtime::{
    HitTestResult, HitTestSource, ReferenceSpace, ReferenceSpaceKind, SessionFeatures, XrError,
    XrRuntime,
};

/// Rays pointing away from the floor by less than this slope never hit
const FLOOR_SLOPE_EPSILON: f32 = 1e-4;

/// Intersections farther than this are treated as no hit
const MAX_HIT_DISTANCE: f32 = 20.0;

struct Inner {
    supported: bool,
    latency: Duration,
    session_active: bool,
    session_generation: u64,
    next_source_id: u64,
    viewer_ray: Option<(Vec3, Vec3)>,
}

pub struct SimulatedRuntime {
    inner: Mutex<Inner>,
}

impl Default for SimulatedRuntime {
    fn default() -> Self {
        Self {
            inner: Mutex::new(Inner {
                supported: true,
                latency: Duration::ZERO,
                session_active: false,
                session_generation: 0,
                next_source_id: 0,
                viewer_ray: None,
            }),
        }
    }
}

impl SimulatedRuntime {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_supported(&self, supported: bool) {
        self.lock().supported = supported;
    }

    pub fn set_latency(&self, latency: Duration) {
        self.lock().latency = latency;
    }

    /// Feed the current viewer ray (origin, direction), once per frame
    pub fn set_viewer_ray(&self, origin: Vec3, direction: Vec3) {
        self.lock().viewer_ray = Some((origin, direction.normalize_or_zero()));
    }

    fn lock(&self) -> std::sync::MutexGuard<'_, Inner> {
        // Lock holders never panic, so poisoning cannot occur
        self.inner.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn latency(&self) -> Duration {
        self.lock().latency
    }
}

/// Intersect a ray with the y = 0 floor plane.
///
/// Returns the intersection point for downward-facing rays hitting within
/// range, `None` otherwise.
pub fn floor_intersection(origin: Vec3, direction: Vec3) -> Option<Vec3> {
    if direction.y >= -FLOOR_SLOPE_EPSILON {
        return None;
    }

    let t = -origin.y / direction.y;
    if t < 0.0 || t > MAX_HIT_DISTANCE {
        return None;
    }

    Some(origin + direction * t)
}

impl XrRuntime for SimulatedRuntime {
    fn supports_session(&self, features: SessionFeatures) -> bool {
        // The simulated platform offers every feature it knows about
        let _ = features;
        self.lock().supported
    }

    fn begin_session(&self, features: SessionFeatures) -> Result<(), XrError> {
        if !self.supports_session(features) {
            return Err(XrError::NotSupported);
        }

        std::thread::sleep(self.latency());

        let mut inner = self.lock();
        inner.session_active = true;
        inner.session_generation += 1;
        Ok(())
    }

    fn end_session(&self) {
        self.lock().session_active = false;
    }

    fn request_reference_space(
        &self,
        kind: ReferenceSpaceKind,
    ) -> Result<ReferenceSpace, XrError> {
        if !self.lock().session_active {
            return Err(XrError::ReferenceSpace("no active session".into()));
        }

        std::thread::sleep(self.latency());
        Ok(ReferenceSpace { kind })
    }

    fn request_hit_test_source(&self, space: ReferenceSpace) -> Result<HitTestSource, XrError> {
        if space.kind != ReferenceSpaceKind::Viewer {
            return Err(XrError::HitTestSource(
                "hit-test sources must be anchored to the viewer space".into(),
            ));
        }

        std::thread::sleep(self.latency());

        let mut inner = self.lock();
        if !inner.session_active {
            return Err(XrError::NoSession);
        }

        inner.next_source_id += 1;
        Ok(HitTestSource {
            id: inner.next_source_id,
            session: inner.session_generation,
        })
    }

    fn hit_test(&self, source: HitTestSource) -> Vec<HitTestResult> {
        let inner = self.lock();

        // Stale handles from an ended session yield nothing
        if !inner.session_active || source.session != inner.session_generation {
            return Vec::new();
        }

        let Some((origin, direction)) = inner.viewer_ray else {
            return Vec::new();
        };

        match floor_intersection(origin, direction) {
            Some(point) => vec![HitTestResult::resolved(Mat4::from_translation(point))],
            None => Vec::new(),
        }
    }
}
