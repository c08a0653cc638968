use eframe::egui;

use crate::ui::state::StoreHandle;

/// Bottom panel showing the database health plus a manual reconnect button.
/// The handle rate-limits the actual liveness query.
pub struct StatusBar;

impl StatusBar {
    pub fn show(ctx: &egui::Context, store: &mut StoreHandle) {
        egui::TopBottomPanel::bottom("status_bar").show(ctx, |ui| {
            ui.horizontal(|ui| {
                if store.probe_health() {
                    ui.colored_label(egui::Color32::GREEN, "● Database connected");
                } else {
                    ui.colored_label(egui::Color32::RED, "● Database unavailable");
                    if let Some(err) = &store.last_error {
                        ui.label(err);
                    }
                    if ui.button("Retry connection").clicked() {
                        store.retry();
                    }
                }
            });
        });
    }
}
