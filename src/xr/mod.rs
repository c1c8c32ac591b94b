//! Platform AR abstraction: the [`XrRuntime`] trait, the simulated desktop
//! runtime, and session lifecycle systems.

mod runtime;
mod session;
mod simulated;

pub use runtime::{
    HitTestResult, HitTestSource, REQUIRED_FEATURES, ReferenceSpace, ReferenceSpaceKind,
    SessionFeatures, XrError, XrRuntime, XrRuntimeHandle,
};
pub use session::{
    ArSessionState, EndSessionRequest, SessionEnded, SessionStarted, SimulatedRuntimeHandle,
    StartSessionRequest,
};
pub use simulated::SimulatedRuntime;

use std::sync::Arc;

use bevy::prelude::*;

pub struct XrPlugin;

impl Plugin for XrPlugin {
    fn build(&self, app: &mut App) {
        let simulated = Arc::new(SimulatedRuntime::new());

        app.insert_resource(SimulatedRuntimeHandle(simulated.clone()))
            .insert_resource(XrRuntimeHandle(simulated))
            .init_resource::<ArSessionState>()
            .add_message::<StartSessionRequest>()
            .add_message::<EndSessionRequest>()
            .add_message::<SessionStarted>()
            .add_message::<SessionEnded>()
            .add_systems(Startup, session::configure_runtime)
            .add_systems(PreUpdate, session::feed_viewer_ray)
            .add_systems(
                Update,
                (
                    session::begin_session_system,
                    session::poll_begin_session,
                    session::end_session_system,
                ),
            );
    }
}
