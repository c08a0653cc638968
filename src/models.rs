use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// A product row as stored in the database
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: f64,
    pub category: Option<String>,
    pub stock: i64,
    pub description: Option<String>,
    #[serde(rename = "imageUrl")]
    pub image_url: Option<String>,
    #[serde(rename = "createdAt")]
    pub created_at: String,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<String>,
}

/// The insertable subset of a product. Empty optional fields are stored
/// as NULL rather than empty strings.
#[derive(Debug, Clone, Default)]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    pub category: String,
    pub stock: i64,
    pub description: String,
    pub image_url: String,
}

/// Columns a product listing can be ordered by
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortColumn {
    Id,
    Name,
    Price,
    Stock,
    CreatedAt,
}

impl SortColumn {
    /// Returns the SQL column name. Only these fixed fragments ever reach
    /// an ORDER BY clause.
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortColumn::Id => "id",
            SortColumn::Name => "name",
            SortColumn::Price => "price",
            SortColumn::Stock => "stock",
            SortColumn::CreatedAt => "created_at",
        }
    }

    /// Returns the display label for sort selectors
    pub fn label(&self) -> &'static str {
        match self {
            SortColumn::Id => "ID",
            SortColumn::Name => "Name",
            SortColumn::Price => "Price",
            SortColumn::Stock => "Stock",
            SortColumn::CreatedAt => "Created",
        }
    }

    /// Returns all sortable columns
    pub fn all() -> &'static [SortColumn] {
        &[
            SortColumn::Id,
            SortColumn::Name,
            SortColumn::Price,
            SortColumn::Stock,
            SortColumn::CreatedAt,
        ]
    }
}

/// Listing sort direction
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortOrder {
    Asc,
    Desc,
}

impl SortOrder {
    pub fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            SortOrder::Asc => "Ascending",
            SortOrder::Desc => "Descending",
        }
    }
}

/// Parameters for a paginated product listing
#[derive(Debug, Clone)]
pub struct ProductQuery {
    /// 1-based page number
    pub page: i64,
    pub page_size: i64,
    /// Case-insensitive name substring filter
    pub search: Option<String>,
    pub sort: SortColumn,
    pub order: SortOrder,
}

impl Default for ProductQuery {
    fn default() -> Self {
        Self {
            page: 1,
            page_size: 10,
            search: None,
            sort: SortColumn::CreatedAt,
            order: SortOrder::Desc,
        }
    }
}

/// One page of products plus the totals needed for pagination controls
#[derive(Debug, Clone, Serialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    #[serde(rename = "totalCount")]
    pub total_count: i64,
    pub page: i64,
    #[serde(rename = "pageSize")]
    pub page_size: i64,
    #[serde(rename = "totalPages")]
    pub total_pages: i64,
}

/// A single import failure. `row` is the 2-based spreadsheet row for data
/// errors and 0 for file-level errors.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ImportError {
    pub row: usize,
    pub field: Option<String>,
    pub message: String,
    pub value: Option<String>,
}

impl ImportError {
    pub fn new(row: usize, field: &str, message: impl Into<String>, value: &str) -> Self {
        Self {
            row,
            field: Some(field.to_string()),
            message: message.into(),
            value: Some(value.to_string()),
        }
    }

    /// An error about the file as a whole rather than a data row
    pub fn file_level(message: impl Into<String>) -> Self {
        Self {
            row: 0,
            field: None,
            message: message.into(),
            value: None,
        }
    }
}

/// Outcome of a bulk import: created products plus per-row failures
#[derive(Debug, Clone, Default, Serialize)]
pub struct ImportResult {
    #[serde(rename = "successCount")]
    pub success_count: usize,
    #[serde(rename = "errorCount")]
    pub error_count: usize,
    pub errors: Vec<ImportError>,
    pub imported: Vec<Product>,
}

/// A currency offered in the conversion selectors
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CurrencyInfo {
    pub code: &'static str,
    pub symbol: &'static str,
    pub name: &'static str,
}

/// Result of a single currency conversion
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Conversion {
    pub amount: f64,
    #[serde(rename = "fromCurrency")]
    pub from_currency: String,
    #[serde(rename = "toCurrency")]
    pub to_currency: String,
    #[serde(rename = "convertedAmount")]
    pub converted_amount: f64,
    #[serde(rename = "exchangeRate")]
    pub exchange_rate: f64,
    #[serde(rename = "conversionDate")]
    pub conversion_date: String,
}

/// All rates for one base currency, as fetched (or cached)
#[derive(Debug, Clone, Serialize)]
pub struct RatesSnapshot {
    pub date: String,
    pub base: String,
    pub rates: HashMap<String, f64>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_listing_query_is_newest_first() {
        let query = ProductQuery::default();
        assert_eq!(query.page, 1);
        assert_eq!(query.page_size, 10);
        assert_eq!(query.search, None);
        assert_eq!(query.sort, SortColumn::CreatedAt);
        assert_eq!(query.order, SortOrder::Desc);
    }
}
