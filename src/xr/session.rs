//! AR session lifecycle.
//!
//! Session begin runs on the async task pool (the platform call may block);
//! the poll system applies the outcome. Session end is synchronous and
//! announces itself with [`SessionEnded`] so dependent state (hit-test
//! source, reticle) can reset.

use bevy::prelude::*;
use bevy::tasks::{AsyncComputeTaskPool, Task};
use futures_lite::future;

use crate::stage::StageCamera;
use crate::ui::DebugLog;

use super::runtime::{REQUIRED_FEATURES, XrError, XrRuntimeHandle};
use super::simulated::SimulatedRuntime;

/// Main resource tracking the AR session state
#[derive(Resource, Default)]
pub struct ArSessionState {
    /// Result of the startup support probe
    pub supported: bool,
    /// An AR session is currently running
    pub active: bool,
    /// A session request is in flight
    pub pending: bool,
    /// Monotonic stamp identifying the latest session request. Background
    /// tasks carry the stamp they were spawned under; a mismatch means the
    /// task outlived its request and its result must be discarded.
    pub request_generation: u64,
}

impl ArSessionState {
    /// Record a new session request and return its generation stamp
    pub fn begin_request(&mut self) -> u64 {
        self.pending = true;
        self.request_generation = self.request_generation.wrapping_add(1);
        self.request_generation
    }

    /// A begin task with this stamp answers the request still in flight
    pub fn is_current_request(&self, generation: u64) -> bool {
        self.pending && generation == self.request_generation
    }

    /// A task with this stamp belongs to the session that is still active
    pub fn is_current_session(&self, generation: u64) -> bool {
        self.active && generation == self.request_generation
    }
}

/// Message requesting a new AR session (from the UI entry button)
#[derive(Message)]
pub struct StartSessionRequest;

/// Message requesting the active session end
#[derive(Message)]
pub struct EndSessionRequest;

/// Message announcing a session became active
#[derive(Message)]
pub struct SessionStarted;

/// Message announcing the session ended
#[derive(Message)]
pub struct SessionEnded;

/// Background task for the session begin call, stamped with the request
/// generation it was spawned for
#[derive(Component)]
pub(super) struct BeginSessionTask {
    generation: u64,
    task: Task<Result<(), XrError>>,
}

/// Concrete handle to the simulated runtime, for desktop-only plumbing
/// (support toggle, latency, per-frame viewer ray)
#[derive(Resource, Clone)]
pub struct SimulatedRuntimeHandle(pub std::sync::Arc<SimulatedRuntime>);

/// Startup system: apply config to the simulated runtime, then probe support
pub(super) fn configure_runtime(
    config: Res<crate::config::AppConfig>,
    simulated: Res<SimulatedRuntimeHandle>,
    runtime: Res<XrRuntimeHandle>,
    mut session: ResMut<ArSessionState>,
    mut debug_log: ResMut<DebugLog>,
) {
    simulated.0.set_supported(config.data.ar_supported);
    simulated.0.set_latency(std::time::Duration::from_millis(
        config.data.handshake_latency_ms,
    ));

    session.supported = runtime.0.supports_session(REQUIRED_FEATURES);
    if !session.supported {
        warn!("AR is not supported on this platform");
        debug_log.push("AR not supported".to_string());
    }
}

/// Feed the current viewer ray into the simulated runtime, once per frame
pub(super) fn feed_viewer_ray(
    simulated: Res<SimulatedRuntimeHandle>,
    camera_query: Query<&GlobalTransform, With<StageCamera>>,
) {
    let Ok(camera) = camera_query.single() else {
        return;
    };

    simulated
        .0
        .set_viewer_ray(camera.translation(), *camera.forward());
}

/// Start a session when requested, unless one is already active or pending
pub(super) fn begin_session_system(
    mut commands: Commands,
    mut events: MessageReader<StartSessionRequest>,
    runtime: Res<XrRuntimeHandle>,
    mut session: ResMut<ArSessionState>,
) {
    for _ in events.read() {
        if session.active || session.pending || !session.supported {
            continue;
        }

        let generation = session.begin_request();
        debug!(
            "Requesting AR session (hit-test: {}, dom overlay: {})",
            REQUIRED_FEATURES.hit_test, REQUIRED_FEATURES.overlay
        );

        let runtime = runtime.0.clone();
        let task_pool = AsyncComputeTaskPool::get();
        let task = task_pool.spawn(async move { runtime.begin_session(REQUIRED_FEATURES) });
        commands.spawn(BeginSessionTask { generation, task });
    }
}

/// Poll the pending session request
pub(super) fn poll_begin_session(
    mut commands: Commands,
    runtime: Res<XrRuntimeHandle>,
    mut session: ResMut<ArSessionState>,
    mut started: MessageWriter<SessionStarted>,
    mut debug_log: ResMut<DebugLog>,
    mut tasks: Query<(Entity, &mut BeginSessionTask)>,
) {
    for (entity, mut task) in tasks.iter_mut() {
        let Some(result) = future::block_on(future::poll_once(&mut task.task)) else {
            continue;
        };
        commands.entity(entity).despawn();

        if !session.is_current_request(task.generation) {
            // The request was abandoned or superseded before it resolved.
            // If it still opened a platform session and no newer one is
            // running, close it so nothing leaks.
            if result.is_ok() && !session.active {
                runtime.0.end_session();
            }
            continue;
        }

        session.pending = false;
        match result {
            Ok(()) => {
                session.active = true;
                started.write(SessionStarted);
                info!("AR session started");
            }
            Err(e) => {
                error!("Failed to start AR session: {}", e);
                debug_log.push(format!("Session failed: {}", e));
            }
        }
    }
}

/// End the active session on request
pub(super) fn end_session_system(
    mut events: MessageReader<EndSessionRequest>,
    runtime: Res<XrRuntimeHandle>,
    mut session: ResMut<ArSessionState>,
    mut ended: MessageWriter<SessionEnded>,
) {
    for _ in events.read() {
        // Abandon an in-flight request as well
        session.pending = false;

        if !session.active {
            continue;
        }

        runtime.0.end_session();
        session.active = false;
        ended.write(SessionEnded);
        info!("AR session ended");
    }
}
