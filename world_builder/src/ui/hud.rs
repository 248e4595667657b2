//! HUD overlay: object count, cursor mode, request status, FPS.

use bevy::diagnostic::{DiagnosticsStore, FrameTimeDiagnosticsPlugin};
use bevy::prelude::*;
use bevy_egui::{egui, EguiContexts};

use crate::camera::ExplorerMode;
use crate::chain::RequestState;
use crate::store::WorldStore;
use crate::ui::SelectedObject;

pub fn hud_plugin(app: &mut App) {
    app.add_plugins(FrameTimeDiagnosticsPlugin)
        .add_systems(Update, hud_overlay_system);
}

fn hud_overlay_system(
    mut contexts: EguiContexts,
    store: Res<WorldStore>,
    mode: Res<ExplorerMode>,
    selected: Res<SelectedObject>,
    request: Res<RequestState>,
    diagnostics: Res<DiagnosticsStore>,
) {
    let fps = diagnostics
        .get(&FrameTimeDiagnosticsPlugin::FPS)
        .and_then(|d| d.smoothed())
        .unwrap_or(0.0);

    egui::Window::new("Genesis Frame")
        .anchor(egui::Align2::LEFT_TOP, [10.0, 10.0])
        .resizable(false)
        .collapsible(false)
        .title_bar(false)
        .frame(
            egui::Frame::default()
                .fill(egui::Color32::from_rgba_premultiplied(15, 15, 25, 210))
                .inner_margin(egui::Margin::same(12))
                .corner_radius(egui::CornerRadius::same(6)),
        )
        .show(contexts.ctx_mut(), |ui| {
            ui.style_mut().override_text_style = Some(egui::TextStyle::Monospace);
            ui.visuals_mut().override_text_color = Some(egui::Color32::from_rgb(200, 220, 240));

            ui.label(
                egui::RichText::new("Genesis Frame")
                    .size(16.0)
                    .color(egui::Color32::from_rgb(100, 220, 180)),
            );
            ui.add_space(4.0);

            ui.label(format!("Objects  {}", store.0.len()));
            let mode_line = if mode.active {
                "Mode     explorer (Tab to walk)"
            } else {
                "Mode     walk (Tab to explore)"
            };
            ui.label(mode_line);
            match &selected.id {
                Some(id) => ui.label(format!("Selected {id}")),
                None => ui.label("Selected -"),
            };
            ui.add_space(4.0);

            ui.separator();
            ui.label(format!("Chain    {}", request.status_line()));
            ui.label(format!("FPS      {fps:.0}"));
        });
}
