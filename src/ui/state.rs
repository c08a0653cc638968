use crate::currency::CurrencyService;
use crate::db;
use crate::models::{Conversion, ImportResult, ProductPage, RatesSnapshot, SortColumn, SortOrder};
use rusqlite::Connection;
use std::collections::HashSet;
use std::path::PathBuf;
use std::time::{Duration, Instant};

/// How often the status bar re-probes an open connection
const HEALTH_PROBE_INTERVAL: Duration = Duration::from_secs(5);

#[derive(Clone, Copy, PartialEq)]
pub enum Screen {
    Welcome,
    Products,
    ImportExport,
    Currency,
}

/// The product store plus its health state. A failed open leaves the app
/// running; every operation goes through [`StoreHandle::conn`] and reports
/// the stored error instead.
pub struct StoreHandle {
    pub conn: Option<Connection>,
    pub last_error: Option<String>,
    pub path: PathBuf,
    last_probe: Option<(Instant, bool)>,
}

impl StoreHandle {
    /// Opens the store with the startup retry loop.
    pub fn open(path: PathBuf) -> Self {
        match db::open_with_retry(&path, db::DB_RETRY_ATTEMPTS, db::DB_RETRY_DELAY) {
            Ok(conn) => Self {
                conn: Some(conn),
                last_error: None,
                path,
                last_probe: None,
            },
            Err(e) => {
                log::error!("Failed to open product database: {}", e);
                Self {
                    conn: None,
                    last_error: Some(e.to_string()),
                    path,
                    last_probe: None,
                }
            }
        }
    }

    /// One manual reconnect attempt, wired to the status bar button.
    pub fn retry(&mut self) {
        self.last_probe = None;
        match db::open_db(&self.path) {
            Ok(conn) => {
                log::info!("Database connection restored");
                self.conn = Some(conn);
                self.last_error = None;
            }
            Err(e) => {
                log::error!("Database retry failed: {}", e);
                self.last_error = Some(e.to_string());
            }
        }
    }

    pub fn healthy(&self) -> bool {
        self.conn.is_some()
    }

    /// Health as shown in the status bar. The underlying SELECT 1 runs at
    /// most once per probe interval, not on every rendered frame.
    pub fn probe_health(&mut self) -> bool {
        let Some(conn) = &self.conn else {
            return false;
        };
        if let Some((at, ok)) = self.last_probe {
            if at.elapsed() < HEALTH_PROBE_INTERVAL {
                return ok;
            }
        }
        let ok = db::health_check(conn).is_ok();
        self.last_probe = Some((Instant::now(), ok));
        ok
    }

    /// The connection for an operation, or the user-facing message to show
    /// instead.
    pub fn conn(&self) -> Result<&Connection, String> {
        match &self.conn {
            Some(conn) => Ok(conn),
            None => Err(match &self.last_error {
                Some(e) => format!("Database unavailable: {}", e),
                None => "Database unavailable".to_string(),
            }),
        }
    }
}

/// State shared by every screen.
pub struct AppState {
    pub current_screen: Screen,
    pub store: StoreHandle,
    /// Products ticked in the table, exported by the "Selected" scope
    pub selected_ids: HashSet<i64>,
    pub currency: CurrencyService,
    pub runtime: tokio::runtime::Runtime,
}

/// Form fields for creating a product. Numbers stay text until submit so
/// the user can type freely.
#[derive(Default)]
pub struct ProductForm {
    pub name: String,
    pub price: String,
    pub category: String,
    pub stock: String,
    pub description: String,
    pub image_url: String,
}

#[derive(Clone)]
pub struct EditForm {
    pub id: i64,
    pub name: String,
    pub price: String,
}

pub struct ProductsState {
    pub search: String,
    pub sort: SortColumn,
    pub order: SortOrder,
    pub page: i64,
    pub page_size: i64,
    /// Currently displayed page; None triggers a reload on the next frame
    pub listing: Option<ProductPage>,
    pub form: ProductForm,
    pub edit: Option<EditForm>,
    pub status: String,
}

impl Default for ProductsState {
    fn default() -> Self {
        Self {
            search: String::new(),
            sort: SortColumn::CreatedAt,
            order: SortOrder::Desc,
            page: 1,
            page_size: 10,
            listing: None,
            form: ProductForm::default(),
            edit: None,
            status: String::new(),
        }
    }
}

pub struct ImportExportState {
    pub file_path: String,
    pub result: Option<ImportResult>,
    /// true exports the whole table, false the ticked selection
    pub scope_all: bool,
    pub preview_open: bool,
    pub preview_title: String,
    pub preview_content: String,
    pub preview_file_name: String,
    pub status: String,
}

impl Default for ImportExportState {
    fn default() -> Self {
        Self {
            file_path: String::new(),
            result: None,
            scope_all: true,
            preview_open: false,
            preview_title: String::new(),
            preview_content: String::new(),
            preview_file_name: String::new(),
            status: String::new(),
        }
    }
}

pub struct CurrencyState {
    pub amount: String,
    pub from: &'static str,
    pub to: &'static str,
    pub conversion: Option<Conversion>,
    pub rates: Option<RatesSnapshot>,
    pub status: String,
}

impl Default for CurrencyState {
    fn default() -> Self {
        Self {
            amount: "1.00".to_string(),
            from: "USD",
            to: "EUR",
            conversion: None,
            rates: None,
            status: String::new(),
        }
    }
}
