use eframe::egui;

/// Floating preview window for generated text documents (CSV exports, the
/// import template) with a save action.
pub struct OutputWindow<'a> {
    title: &'a str,
    content: &'a mut String,
    open: &'a mut bool,
    /// Suggested name in the save dialog, e.g. `products_2024-01-15.csv`
    file_name: &'a str,
}

impl<'a> OutputWindow<'a> {
    pub fn new(
        title: &'a str,
        content: &'a mut String,
        open: &'a mut bool,
        file_name: &'a str,
    ) -> Self {
        Self {
            title,
            content,
            open,
            file_name,
        }
    }

    /// Shows the window. Returns a status message when the user saved (or
    /// cancelled the save dialog).
    pub fn show(&mut self, ctx: &egui::Context) -> Option<String> {
        let mut status = None;
        egui::Window::new(self.title)
            .default_size([780.0, 560.0])
            .show(ctx, |ui| {
                egui::ScrollArea::vertical()
                    .max_height(ui.available_height() - 40.0)
                    .show(ui, |ui| {
                        ui.add(
                            egui::TextEdit::multiline(self.content)
                                .desired_width(f32::INFINITY)
                                .desired_rows(20)
                                .font(egui::TextStyle::Monospace),
                        );
                    });

                ui.horizontal(|ui| {
                    if ui.button("Close").clicked() {
                        *self.open = false;
                    }
                    if ui.button("Save to File").clicked() {
                        match rfd::FileDialog::new()
                            .set_file_name(self.file_name)
                            .add_filter("CSV Files", &["csv"])
                            .save_file()
                        {
                            Some(path) => {
                                status = Some(match std::fs::write(&path, &self.content) {
                                    Ok(()) => format!("Saved to {}", path.display()),
                                    Err(e) => format!("Error saving file: {e}"),
                                });
                            }
                            None => status = Some("Save operation cancelled".to_string()),
                        }
                    }
                });
            });
        status
    }
}
