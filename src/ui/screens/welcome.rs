use crate::ui::state::{AppState, Screen};
use eframe::egui;

pub struct WelcomeScreen;

impl WelcomeScreen {
    pub fn show(ui: &mut egui::Ui, app: &mut AppState) {
        ui.vertical_centered(|ui| {
            ui.add_space(100.0);
            ui.heading("Product Manager");
            ui.add_space(20.0);

            if ui.button("Manage Products").clicked() {
                app.current_screen = Screen::Products;
            }

            ui.add_space(10.0);

            if ui.button("Import / Export").clicked() {
                app.current_screen = Screen::ImportExport;
            }

            ui.add_space(10.0);

            if ui.button("Currency Converter").clicked() {
                app.current_screen = Screen::Currency;
            }

            if !app.store.healthy() {
                ui.add_space(30.0);
                ui.colored_label(
                    egui::Color32::RED,
                    "Database unavailable — product operations are disabled",
                );
                if let Some(err) = &app.store.last_error {
                    ui.label(err);
                }
                if ui.button("Retry connection").clicked() {
                    app.store.retry();
                }
            }
        });
    }
}
