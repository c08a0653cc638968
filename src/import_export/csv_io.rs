//! CSV rendition of the product table.

use crate::error::{AppError, AppResult};
use crate::models::Product;

/// Column order of exported product sheets (CSV and XLSX)
pub const EXPORT_HEADERS: [&str; 9] = [
    "ID",
    "Name",
    "Price",
    "Category",
    "Stock",
    "Description",
    "Image URL",
    "Created At",
    "Updated At",
];

/// Renders products as a CSV document with the export header row.
pub(super) fn build_csv(products: &[Product]) -> AppResult<String> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    writer.write_record(EXPORT_HEADERS)?;
    for product in products {
        writer.write_record(&export_record(product))?;
    }
    let bytes = writer
        .into_inner()
        .map_err(|e| AppError::Csv(e.into_error().into()))?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn export_record(product: &Product) -> [String; 9] {
    [
        product.id.to_string(),
        product.name.clone(),
        format!("{:.2}", product.price),
        product.category.clone().unwrap_or_default(),
        product.stock.to_string(),
        product.description.clone().unwrap_or_default(),
        product.image_url.clone().unwrap_or_default(),
        product.created_at.clone(),
        product.updated_at.clone().unwrap_or_default(),
    ]
}

/// Splits CSV bytes into trimmed field rows. The header row decides the
/// layout: a leading `ID` column marks one of our own exports, whose extra
/// columns are stripped. An input without data rows comes back empty.
pub(super) fn read_rows(data: &[u8]) -> AppResult<Vec<Vec<String>>> {
    let mut reader = csv::ReaderBuilder::new()
        .flexible(true)
        .trim(csv::Trim::All)
        .from_reader(data);

    let export_layout = reader
        .headers()?
        .get(0)
        .map(super::row::is_export_header)
        .unwrap_or(false);

    let mut rows = Vec::new();
    for record in reader.records() {
        let record = record?;
        let fields: Vec<String> = record.iter().map(|field| field.to_string()).collect();
        rows.push(if export_layout {
            super::row::strip_export_columns(fields)
        } else {
            fields
        });
    }
    Ok(rows)
}
