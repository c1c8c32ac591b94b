//! Platform AR runtime abstraction.
//!
//! The demo logic depends on a small set of platform operations: a support
//! probe, session begin/end, the two-step reference-space → hit-test-source
//! handshake, a per-frame hit-test query, and pose resolution. Everything
//! else (tracking, rendering integration) belongs to the platform.

use std::sync::Arc;

use bevy::prelude::*;
use thiserror::Error;

/// Feature flags declared when requesting a session
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SessionFeatures {
    /// Surface hit-testing against detected real-world geometry
    pub hit_test: bool,
    /// 2D UI overlay composited over the camera image
    pub overlay: bool,
}

/// The feature set every AR demo mode requests
pub const REQUIRED_FEATURES: SessionFeatures = SessionFeatures {
    hit_test: true,
    overlay: true,
};

/// Coordinate frames poses can be expressed against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReferenceSpaceKind {
    /// Tracks the viewer's head pose; hit-test rays originate here
    Viewer,
    /// World-stabilized frame near the session origin; rendering happens here
    Local,
}

/// An acquired reference space handle
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceSpace {
    pub kind: ReferenceSpaceKind,
}

impl ReferenceSpace {
    pub const LOCAL: ReferenceSpace = ReferenceSpace {
        kind: ReferenceSpaceKind::Local,
    };
}

/// Opaque handle yielding per-frame surface intersections.
///
/// Handles are tied to the session they were acquired in; the runtime
/// returns no results for a handle from an ended session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HitTestSource {
    pub(crate) id: u64,
    pub(crate) session: u64,
}

/// A single surface intersection for the current frame
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct HitTestResult {
    transform: Option<Mat4>,
}

impl HitTestResult {
    /// A result whose pose resolves in the local reference space
    pub fn resolved(transform: Mat4) -> Self {
        Self {
            transform: Some(transform),
        }
    }

    /// A result whose pose cannot be resolved this frame
    #[allow(dead_code)]
    pub fn unresolved() -> Self {
        Self { transform: None }
    }

    /// Resolve this result's pose against a reference space.
    ///
    /// Returns `None` when the platform could not compute a pose for this
    /// frame, or when asked for a space poses are not expressed in.
    pub fn pose(&self, space: ReferenceSpace) -> Option<Mat4> {
        if space.kind != ReferenceSpaceKind::Local {
            return None;
        }
        self.transform
    }
}

/// Errors surfaced by the platform runtime
#[derive(Debug, Clone, Error)]
pub enum XrError {
    #[error("AR is not supported on this platform")]
    NotSupported,
    #[error("no active AR session")]
    NoSession,
    #[error("reference space request failed: {0}")]
    ReferenceSpace(String),
    #[error("hit test source request failed: {0}")]
    HitTestSource(String),
}

/// The platform AR runtime seam.
///
/// Implementations must be callable from background tasks; the handshake
/// methods may block and are only invoked from the async task pool.
pub trait XrRuntime: Send + Sync + 'static {
    /// Probe whether a session with the given features can be created
    fn supports_session(&self, features: SessionFeatures) -> bool;

    /// Create an AR session with the given features
    fn begin_session(&self, features: SessionFeatures) -> Result<(), XrError>;

    /// Tear down the active session, if any
    fn end_session(&self);

    /// Request a reference space from the active session
    fn request_reference_space(&self, kind: ReferenceSpaceKind)
    -> Result<ReferenceSpace, XrError>;

    /// Request a hit-test source anchored to the given space
    fn request_hit_test_source(&self, space: ReferenceSpace) -> Result<HitTestSource, XrError>;

    /// Query this frame's intersections for an acquired source.
    ///
    /// Results are ordered by the platform (nearest first); callers take
    /// the first result as returned and do not re-rank.
    fn hit_test(&self, source: HitTestSource) -> Vec<HitTestResult>;
}

/// Shared handle to the platform runtime, cloneable into background tasks
#[derive(Resource, Clone)]
pub struct XrRuntimeHandle(pub Arc<dyn XrRuntime>);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolved_pose_in_local_space() {
        let m = Mat4::from_translation(Vec3::new(1.0, 2.0, 3.0));
        let hit = HitTestResult::resolved(m);
        assert_eq!(hit.pose(ReferenceSpace::LOCAL), Some(m));
    }

    #[test]
    fn test_unresolved_pose_is_none() {
        let hit = HitTestResult::unresolved();
        assert_eq!(hit.pose(ReferenceSpace::LOCAL), None);
    }

    #[test]
    fn test_pose_against_viewer_space_is_none() {
        let hit = HitTestResult::resolved(Mat4::IDENTITY);
        let viewer = ReferenceSpace {
            kind: ReferenceSpaceKind::Viewer,
        };
        assert_eq!(hit.pose(viewer), None);
    }
}
