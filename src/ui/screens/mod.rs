mod currency;
mod import_export;
mod products;
mod welcome;

pub use currency::CurrencyScreen;
pub use import_export::ImportExportScreen;
pub use products::ProductsScreen;
pub use welcome::WelcomeScreen;
