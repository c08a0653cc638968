use product_manager::db::open_db;
use product_manager::models::{NewProduct, ProductQuery};
use product_manager::{
    create_product, export_csv, export_xlsx, import_csv, import_template, import_xlsx,
    list_products, ExportSelection,
};
use rusqlite::Connection;
use std::io::Write;
use tempfile::{tempdir, NamedTempFile};

// Test fixtures

fn sample_product(name: &str, price: f64) -> NewProduct {
    NewProduct {
        name: name.to_string(),
        price,
        category: "Office".to_string(),
        stock: 4,
        description: format!("{name} description"),
        image_url: String::new(),
    }
}

fn open_temp_db(dir: &tempfile::TempDir, file: &str) -> Connection {
    open_db(&dir.path().join(file)).unwrap()
}

fn all_products(conn: &Connection) -> Vec<product_manager::Product> {
    list_products(conn, &ProductQuery::default()).unwrap().products
}

#[test]
fn csv_export_then_import_recreates_products() {
    let dir = tempdir().unwrap();
    let source = open_temp_db(&dir, "source.db");
    let target = open_temp_db(&dir, "target.db");

    create_product(&source, &sample_product("Desk Lamp", 29.99)).unwrap();
    create_product(&source, &sample_product("Office Chair", 120.0)).unwrap();

    // Export to a real file, as the GUI save action would.
    let csv = export_csv(&source, &ExportSelection::All).unwrap();
    let mut file = NamedTempFile::new().unwrap();
    write!(file, "{csv}").unwrap();

    // The importer recognizes the export's header row and strips the
    // ID/Created At/Updated At columns it adds.
    let data = std::fs::read(file.path()).unwrap();
    let result = import_csv(&target, &data).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 0);

    let imported = all_products(&target);
    assert_eq!(imported.len(), 2);
    let lamp = imported.iter().find(|p| p.name == "Desk Lamp").unwrap();
    assert_eq!(lamp.price, 29.99);
    assert_eq!(lamp.category.as_deref(), Some("Office"));
    assert_eq!(lamp.stock, 4);
}

#[test]
fn xlsx_export_then_import_recreates_products() {
    let dir = tempdir().unwrap();
    let source = open_temp_db(&dir, "source.db");
    let target = open_temp_db(&dir, "target.db");

    create_product(&source, &sample_product("Monitor", 249.5)).unwrap();
    create_product(
        &source,
        &NewProduct {
            name: "Bare Minimum".to_string(),
            price: 1.0,
            ..Default::default()
        },
    )
    .unwrap();

    let bytes = export_xlsx(&source, &ExportSelection::All).unwrap();
    let path = dir.path().join("products.xlsx");
    std::fs::write(&path, &bytes).unwrap();

    let data = std::fs::read(&path).unwrap();
    let result = import_xlsx(&target, &data).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 0);

    let imported = all_products(&target);
    let monitor = imported.iter().find(|p| p.name == "Monitor").unwrap();
    assert_eq!(monitor.price, 249.5);
    let bare = imported.iter().find(|p| p.name == "Bare Minimum").unwrap();
    assert_eq!(bare.category, None);
    assert_eq!(bare.stock, 0);
}

#[test]
fn selected_ids_export_round_trips_only_the_selection() {
    let dir = tempdir().unwrap();
    let source = open_temp_db(&dir, "source.db");
    let target = open_temp_db(&dir, "target.db");

    let keep = create_product(&source, &sample_product("Keep Me", 10.0)).unwrap();
    create_product(&source, &sample_product("Leave Me", 20.0)).unwrap();

    // A stale id (already deleted elsewhere) is skipped, not fatal.
    let csv = export_csv(&source, &ExportSelection::Ids(vec![keep.id, 9999])).unwrap();
    let result = import_csv(&target, csv.as_bytes()).unwrap();

    assert_eq!(result.success_count, 1);
    assert_eq!(result.imported[0].name, "Keep Me");
    assert_eq!(all_products(&target).len(), 1);
}

#[test]
fn template_saved_to_disk_imports_cleanly() {
    let dir = tempdir().unwrap();
    let conn = open_temp_db(&dir, "target.db");

    let path = dir.path().join("products_template.csv");
    std::fs::write(&path, import_template()).unwrap();

    let data = std::fs::read(&path).unwrap();
    let result = import_csv(&conn, &data).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 0);
    let names: Vec<String> = all_products(&conn).into_iter().map(|p| p.name).collect();
    assert!(names.contains(&"Example Product".to_string()));
}

#[test]
fn partially_bad_file_imports_good_rows_and_reports_the_rest() {
    let dir = tempdir().unwrap();
    let conn = open_temp_db(&dir, "target.db");

    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "Name,Price,Category,Stock,Description,Image URL\n\
         Good Row,19.99,Kitchen,2,,\n\
         ,not-a-price,Kitchen,-1,,\n\
         Another Good Row,5.00,,1,,\n"
    )
    .unwrap();

    let data = std::fs::read(file.path()).unwrap();
    let result = import_csv(&conn, &data).unwrap();

    assert_eq!(result.success_count, 2);
    assert_eq!(result.error_count, 1);
    // The bad row reports every failing field against its spreadsheet row.
    assert!(result.errors.iter().all(|e| e.row == 3));
    assert!(result.errors.len() >= 3);
    assert_eq!(all_products(&conn).len(), 2);
}
