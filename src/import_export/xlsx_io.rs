//! XLSX rendition of the product table.

use crate::error::AppResult;
use crate::models::Product;
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

use super::csv_io::EXPORT_HEADERS;
use super::row::{is_export_header, strip_export_columns, MIN_FIELDS};

/// Worksheet name used by exports
pub const SHEET_NAME: &str = "Products";

/// Builds an XLSX workbook with one `Products` sheet.
pub(super) fn build_xlsx(products: &[Product]) -> AppResult<Vec<u8>> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (col, header) in EXPORT_HEADERS.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }

    for (i, product) in products.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_number(row, 0, product.id as f64)?;
        worksheet.write_string(row, 1, product.name.as_str())?;
        worksheet.write_number(row, 2, product.price)?;
        worksheet.write_string(row, 3, product.category.as_deref().unwrap_or(""))?;
        worksheet.write_number(row, 4, product.stock as f64)?;
        worksheet.write_string(row, 5, product.description.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 6, product.image_url.as_deref().unwrap_or(""))?;
        worksheet.write_string(row, 7, product.created_at.as_str())?;
        worksheet.write_string(row, 8, product.updated_at.as_deref().unwrap_or(""))?;
    }

    Ok(workbook.save_to_buffer()?)
}

/// Extracts string rows from the first worksheet, each padded to the
/// import column count. A header row starting with `ID` marks one of our
/// own exports, whose extra columns are stripped. Errors are user-facing
/// messages the caller turns into a file-level import result.
pub(super) fn read_rows(data: &[u8]) -> Result<Vec<Vec<String>>, String> {
    if data.is_empty() {
        return Err("Empty file data provided".to_string());
    }

    let mut workbook = Xlsx::new(Cursor::new(data))
        .map_err(|e| format!("Invalid XLSX file format: {}", e))?;

    let Some(sheet) = workbook.sheet_names().first().cloned() else {
        return Err("XLSX file contains no sheets".to_string());
    };

    let range = workbook
        .worksheet_range(&sheet)
        .map_err(|e| format!("Failed to read worksheet {}: {}", sheet, e))?;

    let mut cell_rows = range.rows();
    let export_layout = cell_rows
        .next()
        .and_then(|header| header.first())
        .map(|cell| is_export_header(&cell_to_string(cell)))
        .unwrap_or(false);

    let mut rows: Vec<Vec<String>> = Vec::new();
    for cells in cell_rows {
        let mut fields: Vec<String> = cells.iter().map(cell_to_string).collect();
        if export_layout {
            fields = strip_export_columns(fields);
        }
        if fields.len() < MIN_FIELDS {
            fields.resize(MIN_FIELDS, String::new());
        }
        rows.push(fields);
    }
    Ok(rows)
}

/// Spreadsheet cells carry typed values; imports work on the text the user
/// would see, so whole-number floats print without a decimal point.
fn cell_to_string(cell: &Data) -> String {
    match cell {
        Data::Empty => String::new(),
        Data::String(s) => s.clone(),
        Data::Float(f) if f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", *f as i64),
        Data::Float(f) => f.to_string(),
        Data::Int(i) => i.to_string(),
        Data::Bool(b) => b.to_string(),
        other => other.to_string(),
    }
}
