//! Translucent on-screen overlay listing recent debug events.

use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use super::DebugLog;

pub fn overlay_panel(mut contexts: EguiContexts, debug_log: Res<DebugLog>) -> Result {
    let ctx = contexts.ctx_mut()?;

    if debug_log.lines().is_empty() {
        return Ok(());
    }

    egui::Window::new("debug-overlay")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .title_bar(false)
        .collapsible(false)
        .resizable(false)
        .interactable(false)
        .frame(
            egui::Frame::window(&ctx.style())
                .fill(egui::Color32::from_black_alpha(180)),
        )
        .show(ctx, |ui| {
            for line in debug_log.lines() {
                ui.colored_label(egui::Color32::LIGHT_GREEN, egui::RichText::new(line).monospace());
            }
        });

    Ok(())
}
