//! Bulk import and export of the product table (CSV and XLSX).
//!
//! Imports run row by row: a row that fails validation is skipped and
//! recorded in the result, valid rows are inserted immediately. File-level
//! problems (empty input, unreadable workbook) come back as a single row-0
//! error result rather than a hard failure. Exports render either the whole
//! table or an explicit id selection.

mod csv_io;
mod row;
mod xlsx_io;

pub use csv_io::EXPORT_HEADERS;
pub use row::IMPORT_HEADERS;
pub use xlsx_io::SHEET_NAME;

use crate::error::AppResult;
use crate::models::{ImportError, ImportResult, Product, ProductQuery};
use crate::repository;
use rusqlite::Connection;

/// Which products an export covers
#[derive(Debug, Clone, PartialEq)]
pub enum ExportSelection {
    All,
    Ids(Vec<i64>),
}

/// Upper bound of rows fetched for a full-table export
const EXPORT_PAGE_SIZE: i64 = 10_000;

/// Exports the selected products as a CSV document.
pub fn export_csv(conn: &Connection, selection: &ExportSelection) -> AppResult<String> {
    let products = products_for_export(conn, selection)?;
    log::info!("Exporting {} products to CSV", products.len());
    csv_io::build_csv(&products)
}

/// Exports the selected products as XLSX workbook bytes.
pub fn export_xlsx(conn: &Connection, selection: &ExportSelection) -> AppResult<Vec<u8>> {
    let products = products_for_export(conn, selection)?;
    log::info!("Exporting {} products to XLSX", products.len());
    xlsx_io::build_xlsx(&products)
}

/// Imports products from CSV bytes.
pub fn import_csv(conn: &Connection, data: &[u8]) -> AppResult<ImportResult> {
    let rows = csv_io::read_rows(data)?;
    if rows.is_empty() {
        return Ok(file_level_result("CSV file is empty or contains only headers"));
    }
    Ok(import_rows(conn, &rows))
}

/// Imports products from XLSX workbook bytes.
pub fn import_xlsx(conn: &Connection, data: &[u8]) -> AppResult<ImportResult> {
    let rows = match xlsx_io::read_rows(data) {
        Ok(rows) => rows,
        Err(message) => return Ok(file_level_result(message)),
    };
    if rows.is_empty() {
        return Ok(file_level_result(
            "XLSX file is empty or contains only headers",
        ));
    }
    Ok(import_rows(conn, &rows))
}

/// A ready-to-edit CSV with the import headers and two example rows.
pub fn import_template() -> String {
    "Name,Price,Category,Stock,Description,Image URL\n\
     Example Product,29.99,Electronics,10,Example product description,https://example.com/image.jpg\n\
     Another Product,49.90,Home & Garden,5,Another example product,\n"
        .to_string()
}

fn file_level_result(message: impl Into<String>) -> ImportResult {
    ImportResult {
        error_count: 1,
        errors: vec![ImportError::file_level(message)],
        ..Default::default()
    }
}

fn import_rows(conn: &Connection, rows: &[Vec<String>]) -> ImportResult {
    let mut result = ImportResult::default();
    for (index, fields) in rows.iter().enumerate() {
        let row_num = index + 2;
        match row::parse_row(fields, row_num) {
            Ok(new) => match repository::create_product(conn, &new) {
                Ok(product) => {
                    result.success_count += 1;
                    result.imported.push(product);
                }
                Err(e) => {
                    log::warn!("Import row {} failed to insert: {}", row_num, e);
                    result.error_count += 1;
                    result.errors.push(ImportError {
                        row: row_num,
                        field: None,
                        message: format!("Failed to save product: {}", e),
                        value: None,
                    });
                }
            },
            Err(errors) => {
                result.error_count += 1;
                result.errors.extend(errors);
            }
        }
    }
    log::info!(
        "Import finished: {} created, {} rows rejected",
        result.success_count,
        result.error_count
    );
    result
}

fn products_for_export(conn: &Connection, selection: &ExportSelection) -> AppResult<Vec<Product>> {
    match selection {
        ExportSelection::All => {
            let page = repository::list_products(
                conn,
                &ProductQuery {
                    page: 1,
                    page_size: EXPORT_PAGE_SIZE,
                    ..Default::default()
                },
            )?;
            Ok(page.products)
        }
        ExportSelection::Ids(ids) => {
            let mut products = Vec::with_capacity(ids.len());
            for &id in ids {
                match repository::get_product(conn, id) {
                    Ok(product) => products.push(product),
                    Err(e) => log::warn!("Skipping product {} for export: {}", id, e),
                }
            }
            Ok(products)
        }
    }
}

#[cfg(test)]
#[path = "import_export_tests.rs"]
mod tests;
