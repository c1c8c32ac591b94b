//! AR entry button and demo mode selector.
//!
//! Shows "Start AR" when a session can be created, "Stop AR" while one is
//! running, and a disabled "AR not supported" label when the platform probe
//! failed.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::config::{AppConfig, SaveConfigRequest};
use crate::demo::{CurrentDemo, DemoKind};
use crate::xr::{ArSessionState, EndSessionRequest, StartSessionRequest};

const MODES: [DemoKind; 3] = [DemoKind::Placement, DemoKind::Hologram, DemoKind::Orbit];

pub fn session_panel(
    mut contexts: EguiContexts,
    session: Res<ArSessionState>,
    mut current: ResMut<CurrentDemo>,
    mut config: ResMut<AppConfig>,
    mut start_events: MessageWriter<StartSessionRequest>,
    mut end_events: MessageWriter<EndSessionRequest>,
    mut save_events: MessageWriter<SaveConfigRequest>,
) -> Result {
    let ctx = contexts.ctx_mut()?;

    egui::Window::new("session-panel")
        .anchor(egui::Align2::CENTER_BOTTOM, [0.0, -16.0])
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .show(ctx, |ui| {
            ui.horizontal(|ui| {
                let mut selected = current.kind;
                egui::ComboBox::from_id_salt("demo-mode")
                    .selected_text(selected.label())
                    .show_ui(ui, |ui| {
                        for kind in MODES {
                            ui.selectable_value(&mut selected, kind, kind.label());
                        }
                    });

                // Only write the resource on an actual change; the demo
                // switcher reacts to change detection
                if selected != current.kind {
                    current.kind = selected;
                    config.data.demo = selected;
                    config.dirty = true;
                    save_events.write(SaveConfigRequest);
                }

                ui.separator();

                if !current.kind.uses_ar() {
                    ui.label("Drag to orbit, scroll to zoom");
                } else if !session.supported {
                    ui.add_enabled(false, egui::Button::new("AR not supported"));
                } else if session.active {
                    if ui.button("Stop AR").clicked() {
                        end_events.write(EndSessionRequest);
                    }
                } else if session.pending {
                    ui.add_enabled(false, egui::Button::new("Starting..."));
                } else if ui.button("Start AR").clicked() {
                    start_events.write(StartSessionRequest);
                }
            });
        });

    Ok(())
}
