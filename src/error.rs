use std::fmt;

/// Unified error type for database, network and file-format operations
#[derive(Debug)]
pub enum AppError {
    /// HTTP request failed (network error, timeout, etc.)
    Network(reqwest::Error),
    /// Failed to parse a JSON response
    Parse(serde_json::Error),
    /// HTTP error status code
    HttpStatus(reqwest::StatusCode),
    /// SQLite operation failed
    Database(rusqlite::Error),
    /// CSV encoding or decoding failed
    Csv(csv::Error),
    /// XLSX encoding or decoding failed
    Spreadsheet(String),
    /// File I/O error
    Io(std::io::Error),
    /// No product row with the given id
    ProductNotFound(i64),
    /// Rate document for `from` has no entry for `to`
    RateNotFound { from: String, to: String },
    /// Conversion amounts must be zero or positive
    InvalidAmount(f64),
    /// Rate document contained no usable rates map
    EmptyRates(String),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::Network(e) => write!(f, "Network error: {}", e),
            AppError::Parse(e) => write!(f, "Parse error: {}", e),
            AppError::HttpStatus(status) => write!(f, "HTTP error: {}", status),
            AppError::Database(e) => write!(f, "Database error: {}", e),
            AppError::Csv(e) => write!(f, "CSV error: {}", e),
            AppError::Spreadsheet(msg) => write!(f, "Spreadsheet error: {}", msg),
            AppError::Io(e) => write!(f, "I/O error: {}", e),
            AppError::ProductNotFound(id) => write!(f, "Product with id {} not found", id),
            AppError::RateNotFound { from, to } => {
                write!(f, "Exchange rate from {} to {} not found", from, to)
            }
            AppError::InvalidAmount(amount) => {
                write!(f, "Amount must be positive, got {}", amount)
            }
            AppError::EmptyRates(base) => {
                write!(f, "No exchange rates found in API response for {}", base)
            }
        }
    }
}

impl std::error::Error for AppError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            AppError::Network(e) => Some(e),
            AppError::Parse(e) => Some(e),
            AppError::Database(e) => Some(e),
            AppError::Csv(e) => Some(e),
            AppError::Io(e) => Some(e),
            _ => None,
        }
    }
}

impl From<reqwest::Error> for AppError {
    fn from(err: reqwest::Error) -> Self {
        AppError::Network(err)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Parse(err)
    }
}

impl From<rusqlite::Error> for AppError {
    fn from(err: rusqlite::Error) -> Self {
        AppError::Database(err)
    }
}

impl From<csv::Error> for AppError {
    fn from(err: csv::Error) -> Self {
        AppError::Csv(err)
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        AppError::Io(err)
    }
}

impl From<calamine::XlsxError> for AppError {
    fn from(err: calamine::XlsxError) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

impl From<rust_xlsxwriter::XlsxError> for AppError {
    fn from(err: rust_xlsxwriter::XlsxError) -> Self {
        AppError::Spreadsheet(err.to_string())
    }
}

/// Result type alias for application operations
pub type AppResult<T> = Result<T, AppError>;
