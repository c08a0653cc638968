use eframe::egui;
use log::info;
use std::path::Path;

use crate::import_export::{self, ExportSelection};
use crate::models::ImportResult;
use crate::ui::{
    components::{FilePicker, OutputWindow, StatusBar},
    state::{AppState, ImportExportState, Screen},
};

pub struct ImportExportScreen;

impl ImportExportScreen {
    pub fn show(ctx: &egui::Context, app: &mut AppState, state: &mut ImportExportState) {
        StatusBar::show(ctx, &mut app.store);

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.horizontal(|ui| {
                if ui.button("← Back to Welcome Screen").clicked() {
                    app.current_screen = Screen::Welcome;
                }
            });
            ui.add_space(10.0);

            ui.heading("Import / Export");
            ui.add_space(10.0);

            Self::show_import_section(ui, app, state);
            ui.add_space(10.0);
            Self::show_export_section(ui, app, state);

            if !state.status.is_empty() {
                ui.add_space(8.0);
                ui.label(&state.status);
            }

            if let Some(result) = &state.result {
                ui.add_space(10.0);
                Self::show_import_result(ui, result);
            }
        });

        if state.preview_open {
            let title = state.preview_title.clone();
            let file_name = state.preview_file_name.clone();
            let mut window = OutputWindow::new(
                &title,
                &mut state.preview_content,
                &mut state.preview_open,
                &file_name,
            );
            if let Some(status) = window.show(ctx) {
                state.status = status;
            }
        }
    }

    fn show_import_section(ui: &mut egui::Ui, app: &AppState, state: &mut ImportExportState) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Import Products").strong());
            ui.add_space(6.0);

            FilePicker::new("File:", &mut state.file_path)
                .with_filter("Spreadsheets", &["csv", "xlsx"])
                .show(ui);

            ui.horizontal(|ui| {
                if ui.button("Import").clicked() {
                    Self::run_import(app, state);
                }
                if ui.button("Download Template").clicked() {
                    state.preview_title = "Import Template".to_string();
                    state.preview_content = import_export::import_template();
                    state.preview_file_name = "products_template.csv".to_string();
                    state.preview_open = true;
                }
            });
        });
    }

    fn run_import(app: &AppState, state: &mut ImportExportState) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };
        if state.file_path.trim().is_empty() {
            state.status = "Please select a file to import".to_string();
            return;
        }

        let path = Path::new(state.file_path.trim());
        let data = match std::fs::read(path) {
            Ok(data) => data,
            Err(e) => {
                state.status = format!("Failed to read {}: {e}", path.display());
                return;
            }
        };

        info!("Importing products from {}", path.display());
        let is_xlsx = path
            .extension()
            .map(|ext| ext.eq_ignore_ascii_case("xlsx"))
            .unwrap_or(false);
        let result = if is_xlsx {
            import_export::import_xlsx(conn, &data)
        } else {
            import_export::import_csv(conn, &data)
        };

        match result {
            Ok(result) => {
                state.status = String::new();
                state.result = Some(result);
            }
            Err(e) => state.status = format!("Import failed: {e}"),
        }
    }

    fn show_export_section(ui: &mut egui::Ui, app: &AppState, state: &mut ImportExportState) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Export Products").strong());
            ui.add_space(6.0);

            ui.horizontal(|ui| {
                ui.radio_value(&mut state.scope_all, true, "All products");
                ui.radio_value(
                    &mut state.scope_all,
                    false,
                    format!("Selected ({})", app.selected_ids.len()),
                );
            });

            ui.horizontal(|ui| {
                if ui.button("Export CSV").clicked() {
                    Self::export_csv(app, state);
                }
                if ui.button("Export XLSX").clicked() {
                    Self::export_xlsx(app, state);
                }
            });
        });
    }

    fn selection(app: &AppState, state: &ImportExportState) -> ExportSelection {
        if state.scope_all {
            ExportSelection::All
        } else {
            let mut ids: Vec<i64> = app.selected_ids.iter().copied().collect();
            ids.sort_unstable();
            ExportSelection::Ids(ids)
        }
    }

    fn export_csv(app: &AppState, state: &mut ImportExportState) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };

        match import_export::export_csv(conn, &Self::selection(app, state)) {
            Ok(content) => {
                state.preview_title = "CSV Export".to_string();
                state.preview_content = content;
                state.preview_file_name = format!(
                    "products_{}.csv",
                    chrono::Local::now().format("%Y-%m-%d")
                );
                state.preview_open = true;
                state.status = String::new();
            }
            Err(e) => state.status = format!("Export failed: {e}"),
        }
    }

    /// XLSX is binary, so it skips the preview window and goes straight to a
    /// save dialog.
    fn export_xlsx(app: &AppState, state: &mut ImportExportState) {
        let conn = match app.store.conn() {
            Ok(conn) => conn,
            Err(msg) => {
                state.status = msg;
                return;
            }
        };

        let bytes = match import_export::export_xlsx(conn, &Self::selection(app, state)) {
            Ok(bytes) => bytes,
            Err(e) => {
                state.status = format!("Export failed: {e}");
                return;
            }
        };

        let suggested = format!("products_{}.xlsx", chrono::Local::now().format("%Y-%m-%d"));
        match rfd::FileDialog::new()
            .set_file_name(&suggested)
            .add_filter("Excel Files", &["xlsx"])
            .save_file()
        {
            Some(path) => {
                state.status = match std::fs::write(&path, &bytes) {
                    Ok(()) => format!("Saved to {}", path.display()),
                    Err(e) => format!("Error saving file: {e}"),
                };
            }
            None => state.status = "Export operation cancelled".to_string(),
        }
    }

    fn show_import_result(ui: &mut egui::Ui, result: &ImportResult) {
        ui.group(|ui| {
            ui.label(egui::RichText::new("Import Result").strong());
            ui.horizontal(|ui| {
                ui.colored_label(
                    egui::Color32::GREEN,
                    format!("{} imported", result.success_count),
                );
                if result.error_count > 0 {
                    ui.colored_label(
                        egui::Color32::RED,
                        format!("{} rejected", result.error_count),
                    );
                }
            });

            if !result.errors.is_empty() {
                ui.add_space(6.0);
                egui::ScrollArea::vertical()
                    .max_height(200.0)
                    .show(ui, |ui| {
                        for error in &result.errors {
                            let text = match (&error.field, &error.value) {
                                (Some(field), Some(value)) if !value.is_empty() => format!(
                                    "Row {}: {} — {} (got \"{}\")",
                                    error.row, field, error.message, value
                                ),
                                (Some(field), _) => {
                                    format!("Row {}: {} — {}", error.row, field, error.message)
                                }
                                _ if error.row == 0 => error.message.clone(),
                                _ => format!("Row {}: {}", error.row, error.message),
                            };
                            ui.colored_label(egui::Color32::RED, text);
                        }
                    });
            }
        });
    }
}
