//! Per-row field validation shared by the CSV and XLSX importers.

use crate::models::{ImportError, NewProduct};

/// Columns an import file must provide, in this order
pub const IMPORT_HEADERS: [&str; 6] = [
    "Name",
    "Price",
    "Category",
    "Stock",
    "Description",
    "Image URL",
];

/// Minimum number of fields a data row must carry
pub const MIN_FIELDS: usize = IMPORT_HEADERS.len();

/// Exported sheets prepend an `ID` column and append the timestamps. A
/// header row starting with `ID` marks that layout, so the application's
/// own exports can be re-imported without editing.
pub(super) fn is_export_header(first_cell: &str) -> bool {
    first_cell.trim().eq_ignore_ascii_case("id")
}

/// Reduces an export-layout row to the import columns: the leading id is
/// dropped and the trailing timestamps fall off the end.
pub(super) fn strip_export_columns(fields: Vec<String>) -> Vec<String> {
    fields.into_iter().skip(1).take(MIN_FIELDS).collect()
}

/// Validates one data row. `row_num` is the spreadsheet row number (the
/// header is row 1, so data rows start at 2). Every failing field is
/// reported; a row with any error is skipped by the caller.
pub fn parse_row(fields: &[String], row_num: usize) -> Result<NewProduct, Vec<ImportError>> {
    if fields.len() < MIN_FIELDS {
        return Err(vec![ImportError {
            row: row_num,
            field: None,
            message: format!(
                "Incomplete record, expected at least {} fields, got {}",
                MIN_FIELDS,
                fields.len()
            ),
            value: None,
        }]);
    }

    let mut errors = Vec::new();

    let name = fields[0].trim();
    if name.is_empty() {
        errors.push(ImportError::new(row_num, "name", "Name is required", name));
    }

    let price_raw = fields[1].trim();
    let price = match price_raw.parse::<f64>() {
        Ok(p) if p >= 0.0 => p,
        Ok(_) => {
            errors.push(ImportError::new(
                row_num,
                "price",
                "Price must be positive",
                price_raw,
            ));
            0.0
        }
        Err(_) => {
            errors.push(ImportError::new(
                row_num,
                "price",
                "Price must be a valid number",
                price_raw,
            ));
            0.0
        }
    };

    let stock_raw = fields[3].trim();
    let stock = match stock_raw.parse::<i64>() {
        Ok(s) if s >= 0 => s,
        Ok(_) => {
            errors.push(ImportError::new(
                row_num,
                "stock",
                "Stock must be non-negative",
                stock_raw,
            ));
            0
        }
        Err(_) => {
            errors.push(ImportError::new(
                row_num,
                "stock",
                "Stock must be a valid integer",
                stock_raw,
            ));
            0
        }
    };

    if !errors.is_empty() {
        return Err(errors);
    }

    Ok(NewProduct {
        name: name.to_string(),
        price,
        category: fields[2].trim().to_string(),
        stock,
        description: fields[4].trim().to_string(),
        image_url: fields[5].trim().to_string(),
    })
}
