use super::*;
use crate::db::init_schema;
use crate::models::NewProduct;
use calamine::{Data, Reader, Xlsx};
use rust_xlsxwriter::Workbook;
use std::io::Cursor;

fn test_conn() -> Connection {
    let conn = Connection::open_in_memory().unwrap();
    init_schema(&conn).unwrap();
    conn
}

fn seed_product(conn: &Connection, name: &str, price: f64, stock: i64) -> Product {
    repository::create_product(
        conn,
        &NewProduct {
            name: name.to_string(),
            price,
            category: "Seeded".to_string(),
            stock,
            description: String::new(),
            image_url: String::new(),
        },
    )
    .unwrap()
}

// CSV import

#[test]
fn import_csv_creates_products() {
    let conn = test_conn();
    let data = "Name,Price,Category,Stock,Description,Image URL\n\
                Desk Lamp,29.99,Electronics,10,A small lamp,https://example.com/l.jpg\n\
                Mug,9.50,,0,,\n";

    let result = import_csv(&conn, data.as_bytes()).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 0);
    assert!(result.errors.is_empty());
    assert_eq!(result.imported[0].name, "Desk Lamp");
    assert_eq!(result.imported[1].category, None);
    assert_eq!(result.imported[1].stock, 0);

    let stored = repository::get_product(&conn, result.imported[0].id).unwrap();
    assert_eq!(stored.image_url.as_deref(), Some("https://example.com/l.jpg"));
}

#[test]
fn import_csv_skips_bad_rows_and_records_errors() {
    let conn = test_conn();
    let data = "Name,Price,Category,Stock,Description,Image URL\n\
                Good,10.00,Cat,5,,\n\
                Bad Price,abc,Cat,5,,\n\
                ,5.00,Cat,1,,\n";

    let result = import_csv(&conn, data.as_bytes()).unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.error_count, 2);
    assert_eq!(result.errors.len(), 2);
    assert_eq!(result.errors[0].row, 3);
    assert_eq!(result.errors[0].field.as_deref(), Some("price"));
    assert_eq!(result.errors[1].row, 4);
    assert_eq!(result.errors[1].field.as_deref(), Some("name"));

    // Only the valid row landed in the table.
    let page = repository::list_products(&conn, &ProductQuery::default()).unwrap();
    assert_eq!(page.total_count, 1);
    assert_eq!(page.products[0].name, "Good");
}

#[test]
fn import_csv_flags_incomplete_records() {
    let conn = test_conn();
    let data = "Name,Price,Category,Stock,Description,Image URL\nOnly Name,2.00\n";

    let result = import_csv(&conn, data.as_bytes()).unwrap();

    assert_eq!(result.success_count, 0);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 2);
    assert!(result.errors[0].message.contains("Incomplete record"));
}

#[test]
fn import_csv_empty_input_is_file_level_error() {
    let conn = test_conn();
    let result = import_csv(&conn, b"").unwrap();

    assert_eq!(result.success_count, 0);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 0);
    assert!(result.errors[0].message.contains("empty or contains only headers"));
}

#[test]
fn import_csv_header_only_is_file_level_error() {
    let conn = test_conn();
    let result = import_csv(&conn, b"Name,Price,Category,Stock,Description,Image URL\n").unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 0);
}

#[test]
fn import_records_insert_failures_per_row() {
    let conn = test_conn();
    conn.execute_batch("DROP TABLE products;").unwrap();
    let data = "Name,Price,Category,Stock,Description,Image URL\nLamp,5.00,,1,,\n";

    let result = import_csv(&conn, data.as_bytes()).unwrap();

    assert_eq!(result.success_count, 0);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 2);
    assert!(result.errors[0].message.starts_with("Failed to save product"));
}

#[test]
fn template_is_directly_importable() {
    let conn = test_conn();
    let template = import_template();
    assert!(template.starts_with("Name,Price,Category,Stock,Description,Image URL\n"));

    let result = import_csv(&conn, template.as_bytes()).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.imported[0].name, "Example Product");
    assert_eq!(result.imported[1].category.as_deref(), Some("Home & Garden"));
    assert_eq!(result.imported[1].image_url, None);
}

#[test]
fn import_csv_accepts_export_layout() {
    let conn = test_conn();
    seed_product(&conn, "Desk Lamp", 5.0, 3);
    let doc = export_csv(&conn, &ExportSelection::All).unwrap();

    // The leading ID column and the trailing timestamps are stripped.
    let result = import_csv(&conn, doc.as_bytes()).unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.imported[0].name, "Desk Lamp");
    assert_eq!(result.imported[0].stock, 3);
    assert_eq!(result.imported[0].category.as_deref(), Some("Seeded"));
    assert_ne!(result.imported[0].id, 1);
}

#[test]
fn import_xlsx_accepts_export_layout() {
    let conn = test_conn();
    seed_product(&conn, "Monitor", 249.5, 2);
    let bytes = export_xlsx(&conn, &ExportSelection::All).unwrap();

    let result = import_xlsx(&conn, &bytes).unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.error_count, 0);
    assert_eq!(result.imported[0].name, "Monitor");
    assert_eq!(result.imported[0].price, 249.5);
    assert_eq!(result.imported[0].stock, 2);
}

// CSV export

#[test]
fn export_csv_renders_header_and_formatted_rows() {
    let conn = test_conn();
    seed_product(&conn, "Desk Lamp", 5.0, 3);

    let doc = export_csv(&conn, &ExportSelection::All).unwrap();
    let mut lines = doc.lines();

    assert_eq!(
        lines.next(),
        Some("ID,Name,Price,Category,Stock,Description,Image URL,Created At,Updated At")
    );
    let data_row = lines.next().unwrap();
    // Price carries two decimals; empty optionals stay empty.
    assert!(data_row.starts_with("1,Desk Lamp,5.00,Seeded,3,,,"));
    assert_eq!(lines.next(), None);
}

#[test]
fn export_csv_by_ids_keeps_order_and_skips_missing() {
    let conn = test_conn();
    let first = seed_product(&conn, "First", 1.0, 1);
    let second = seed_product(&conn, "Second", 2.0, 1);

    let doc = export_csv(&conn, &ExportSelection::Ids(vec![second.id, 999, first.id])).unwrap();
    let lines: Vec<&str> = doc.lines().collect();

    assert_eq!(lines.len(), 3);
    assert!(lines[1].contains("Second"));
    assert!(lines[2].contains("First"));
}

#[test]
fn export_csv_of_empty_table_is_header_only() {
    let conn = test_conn();
    let doc = export_csv(&conn, &ExportSelection::All).unwrap();
    assert_eq!(doc.lines().count(), 1);
}

// XLSX export

#[test]
fn export_xlsx_writes_products_sheet() {
    let conn = test_conn();
    seed_product(&conn, "Desk Lamp", 29.99, 10);

    let bytes = export_xlsx(&conn, &ExportSelection::All).unwrap();
    let mut workbook = Xlsx::new(Cursor::new(bytes)).unwrap();
    assert_eq!(workbook.sheet_names(), vec!["Products".to_string()]);

    let range = workbook.worksheet_range("Products").unwrap();
    let rows: Vec<_> = range.rows().collect();
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0][1], Data::String("Name".to_string()));
    assert_eq!(rows[1][0], Data::Float(1.0));
    assert_eq!(rows[1][1], Data::String("Desk Lamp".to_string()));
    assert_eq!(rows[1][2], Data::Float(29.99));
    assert_eq!(rows[1][4], Data::Float(10.0));
}

// XLSX import

#[test]
fn import_xlsx_reads_typed_cells() {
    let conn = test_conn();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in IMPORT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    sheet.write_string(1, 0, "Desk Lamp").unwrap();
    sheet.write_number(1, 1, 29.99).unwrap();
    sheet.write_string(1, 2, "Electronics").unwrap();
    sheet.write_number(1, 3, 10.0).unwrap();
    sheet.write_string(1, 4, "A small lamp").unwrap();
    sheet.write_string(1, 5, "https://example.com/l.jpg").unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let result = import_xlsx(&conn, &bytes).unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.error_count, 0);
    let product = &result.imported[0];
    assert_eq!(product.name, "Desk Lamp");
    assert_eq!(product.price, 29.99);
    // Whole-number cells must round-trip into integer stock.
    assert_eq!(product.stock, 10);
}

#[test]
fn import_xlsx_short_rows_are_padded_then_validated() {
    let conn = test_conn();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    sheet.write_string(0, 0, "Name").unwrap();
    sheet.write_string(0, 1, "Price").unwrap();
    sheet.write_string(1, 0, "Mug").unwrap();
    sheet.write_number(1, 1, 9.5).unwrap();
    let bytes = workbook.save_to_buffer().unwrap();

    let result = import_xlsx(&conn, &bytes).unwrap();

    // Padding fills the missing cells, but the required stock column is
    // still empty, so the row fails validation instead of being truncated.
    assert_eq!(result.success_count, 0);
    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 2);
    assert_eq!(result.errors[0].field.as_deref(), Some("stock"));
}

#[test]
fn import_xlsx_empty_bytes_is_file_level_error() {
    let conn = test_conn();
    let result = import_xlsx(&conn, b"").unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 0);
    assert_eq!(result.errors[0].message, "Empty file data provided");
}

#[test]
fn import_xlsx_garbage_bytes_is_file_level_error() {
    let conn = test_conn();
    let result = import_xlsx(&conn, b"this is not a zip archive").unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 0);
    assert!(result.errors[0].message.contains("Invalid XLSX file format"));
}

#[test]
fn import_xlsx_header_only_is_file_level_error() {
    let conn = test_conn();
    let mut workbook = Workbook::new();
    let sheet = workbook.add_worksheet();
    for (col, header) in IMPORT_HEADERS.iter().enumerate() {
        sheet.write_string(0, col as u16, *header).unwrap();
    }
    let bytes = workbook.save_to_buffer().unwrap();

    let result = import_xlsx(&conn, &bytes).unwrap();

    assert_eq!(result.error_count, 1);
    assert_eq!(result.errors[0].row, 0);
    assert!(result.errors[0].message.contains("empty or contains only headers"));
}
