//! Local SQLite database holding the product inventory.
//!
//! The GUI opens the database once at startup through [`open_with_retry`]
//! and keeps the connection for the lifetime of the process. A failed
//! startup leaves the application running with the store marked
//! unavailable; the status bar offers a manual retry.

use rusqlite::Connection;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Result type for database operations
pub type DbResult<T> = Result<T, rusqlite::Error>;

/// How often startup retries opening the database
pub const DB_RETRY_ATTEMPTS: u32 = 3;

/// Pause between startup attempts
pub const DB_RETRY_DELAY: Duration = Duration::from_secs(2);

/// Returns the default path of the product database file.
pub fn default_db_path() -> PathBuf {
    dirs::data_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("product_manager")
        .join("products.db")
}

/// Opens (or creates) the product database and initialises the schema.
pub fn open_db(path: &Path) -> DbResult<Connection> {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).ok();
    }
    log::info!("Product DB: {}", path.display());
    let conn = Connection::open(path)?;
    init_schema(&conn)?;
    Ok(conn)
}

/// Creates the `products` table if it does not already exist.
pub fn init_schema(conn: &Connection) -> DbResult<()> {
    conn.execute_batch(
        "CREATE TABLE IF NOT EXISTS products (
            id          INTEGER PRIMARY KEY AUTOINCREMENT,
            name        TEXT NOT NULL,
            price       REAL NOT NULL,
            category    TEXT,
            stock       INTEGER NOT NULL DEFAULT 0,
            description TEXT,
            image_url   TEXT,
            created_at  TEXT NOT NULL DEFAULT (datetime('now')),
            updated_at  TEXT
        );
        CREATE INDEX IF NOT EXISTS idx_products_name ON products(name);",
    )
}

/// Cheap liveness probe, used by the status bar before mutating calls.
pub fn health_check(conn: &Connection) -> DbResult<()> {
    conn.query_row("SELECT 1", [], |row| row.get::<_, i64>(0))
        .map(|_| ())
}

/// Opens the database, retrying a fixed number of times with a pause
/// between attempts. Returns the last error when every attempt fails.
pub fn open_with_retry(path: &Path, attempts: u32, delay: Duration) -> DbResult<Connection> {
    let mut last_err = rusqlite::Error::InvalidPath(path.to_path_buf());
    for attempt in 1..=attempts.max(1) {
        match open_db(path) {
            Ok(conn) => return Ok(conn),
            Err(e) => {
                log::warn!(
                    "Database initialisation attempt {}/{} failed: {}",
                    attempt,
                    attempts.max(1),
                    e
                );
                last_err = e;
                if attempt < attempts {
                    std::thread::sleep(delay);
                }
            }
        }
    }
    Err(last_err)
}
