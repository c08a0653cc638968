use eframe::egui;

/// "Browse" button plus an editable path field. The dialog filter covers the
/// spreadsheet formats the importers accept.
pub struct FilePicker<'a> {
    label: &'a str,
    path: &'a mut String,
    filter_name: &'a str,
    extensions: &'a [&'a str],
}

impl<'a> FilePicker<'a> {
    pub fn new(label: &'a str, path: &'a mut String) -> Self {
        Self {
            label,
            path,
            filter_name: "All Files",
            extensions: &["*"],
        }
    }

    pub fn with_filter(mut self, name: &'a str, extensions: &'a [&'a str]) -> Self {
        self.filter_name = name;
        self.extensions = extensions;
        self
    }

    /// Shows the picker. Returns `true` if a file was just selected through
    /// the dialog.
    pub fn show(&mut self, ui: &mut egui::Ui) -> bool {
        let mut picked = false;
        ui.horizontal(|ui| {
            ui.label(self.label);
            if ui.button("Browse").clicked() {
                if let Some(path) = rfd::FileDialog::new()
                    .add_filter(self.filter_name, self.extensions)
                    .pick_file()
                {
                    *self.path = path.display().to_string();
                    picked = true;
                }
            }
            ui.text_edit_singleline(self.path);
        });
        picked
    }
}
