use eframe::{self, egui};
use egui::ViewportBuilder;
use log::{debug, info};
use tokio::runtime::Runtime;

use crate::currency::CurrencyService;
use crate::db;

use super::{
    screens::{CurrencyScreen, ImportExportScreen, ProductsScreen, WelcomeScreen},
    state::{AppState, CurrencyState, ImportExportState, ProductsState, Screen, StoreHandle},
};

pub struct ProductManagerApp {
    app_state: AppState,
    products_state: ProductsState,
    import_export_state: ImportExportState,
    currency_state: CurrencyState,
    last_screen: Screen,
}

impl Default for ProductManagerApp {
    fn default() -> Self {
        info!("Initializing Product Manager");

        debug!("Creating Tokio runtime");
        let runtime = Runtime::new().expect("Failed to create Tokio runtime");

        Self {
            app_state: AppState {
                current_screen: Screen::Welcome,
                store: StoreHandle::open(db::default_db_path()),
                selected_ids: Default::default(),
                currency: CurrencyService::new(),
                runtime,
            },
            products_state: ProductsState::default(),
            import_export_state: ImportExportState::default(),
            currency_state: CurrencyState::default(),
            last_screen: Screen::Welcome,
        }
    }
}

impl eframe::App for ProductManagerApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // An import may have grown the table while another screen was
        // active, so the product listing reloads on screen entry.
        if self.last_screen != self.app_state.current_screen {
            if self.app_state.current_screen == Screen::Products {
                self.products_state.listing = None;
            }
            self.last_screen = self.app_state.current_screen;
        }

        match self.app_state.current_screen {
            Screen::Welcome => {
                egui::CentralPanel::default().show(ctx, |ui| {
                    WelcomeScreen::show(ui, &mut self.app_state);
                });
            }
            Screen::Products => {
                ProductsScreen::show(ctx, &mut self.app_state, &mut self.products_state);
            }
            Screen::ImportExport => {
                ImportExportScreen::show(ctx, &mut self.app_state, &mut self.import_export_state);
            }
            Screen::Currency => {
                CurrencyScreen::show(ctx, &mut self.app_state, &mut self.currency_state);
            }
        }
    }
}

pub fn launch_gui() -> Result<(), eframe::Error> {
    let options = eframe::NativeOptions {
        viewport: ViewportBuilder::default().with_inner_size([900.0, 650.0]),
        ..Default::default()
    };

    eframe::run_native(
        "Product Manager",
        options,
        Box::new(|_cc| Ok(Box::new(ProductManagerApp::default()))),
    )
}
