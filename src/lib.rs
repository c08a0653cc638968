pub mod currency;
pub mod db;
pub mod error;
pub mod import_export;
pub mod models;
pub mod repository;
pub mod ui;

// Re-export commonly used items
pub use currency::{CurrencyService, RateCache};
pub use error::{AppError, AppResult};
pub use import_export::{
    export_csv, export_xlsx, import_csv, import_template, import_xlsx, ExportSelection,
};
pub use models::{
    Conversion, CurrencyInfo, ImportError, ImportResult, NewProduct, Product, ProductPage,
    ProductQuery, RatesSnapshot, SortColumn, SortOrder,
};
pub use repository::{create_product, delete_product, get_product, list_products, update_product};
