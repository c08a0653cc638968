mod file_picker;
mod output_window;
mod status_bar;

pub use file_picker::FilePicker;
pub use output_window::OutputWindow;
pub use status_bar::StatusBar;
