mod ar_button;
mod debug_overlay;

use bevy::prelude::*;
use bevy_egui::EguiPrimaryContextPass;

use crate::constants::DEBUG_LOG_CAPACITY;
use crate::xr::{SessionEnded, SessionStarted};

/// On-screen debug log, mirroring notable events (session lifecycle,
/// acquisition outcome, placement) into a capped overlay.
#[derive(Resource, Default)]
pub struct DebugLog {
    lines: Vec<String>,
}

impl DebugLog {
    /// Append a line, dropping the oldest once the cap is reached
    pub fn push(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
        if self.lines.len() > DEBUG_LOG_CAPACITY {
            self.lines.remove(0);
        }
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }
}

/// Mirror session lifecycle messages into the overlay log
fn log_session_lifecycle(
    mut started: MessageReader<SessionStarted>,
    mut ended: MessageReader<SessionEnded>,
    mut debug_log: ResMut<DebugLog>,
) {
    for _ in started.read() {
        debug_log.push("AR session started".to_string());
    }
    for _ in ended.read() {
        debug_log.push("AR session ended".to_string());
    }
}

pub struct UiPlugin;

impl Plugin for UiPlugin {
    fn build(&self, app: &mut App) {
        app.init_resource::<DebugLog>()
            .add_systems(Update, log_session_lifecycle)
            .add_systems(
                EguiPrimaryContextPass,
                (ar_button::session_panel, debug_overlay::overlay_panel),
            );
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_log_starts_empty() {
        let log = DebugLog::default();
        assert!(log.lines().is_empty());
    }

    #[test]
    fn test_debug_log_keeps_insertion_order() {
        let mut log = DebugLog::default();
        log.push("first");
        log.push("second");
        assert_eq!(log.lines(), ["first".to_string(), "second".to_string()]);
    }

    #[test]
    fn test_debug_log_caps_line_count() {
        let mut log = DebugLog::default();
        for i in 0..(DEBUG_LOG_CAPACITY + 5) {
            log.push(format!("line {}", i));
        }
        assert_eq!(log.lines().len(), DEBUG_LOG_CAPACITY);
        // Oldest lines are dropped first
        assert_eq!(log.lines()[0], "line 5");
    }

    #[test]
    fn test_lifecycle_messages_reach_the_log() {
        let mut app = App::new();
        app.add_message::<SessionStarted>()
            .add_message::<SessionEnded>()
            .init_resource::<DebugLog>()
            .add_systems(Update, log_session_lifecycle);

        app.world_mut().write_message(SessionStarted);
        app.update();
        app.world_mut().write_message(SessionEnded);
        app.update();

        let log = app.world().resource::<DebugLog>();
        assert_eq!(
            log.lines(),
            ["AR session started".to_string(), "AR session ended".to_string()]
        );
    }
}
