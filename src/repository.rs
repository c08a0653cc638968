//! CRUD and listing queries over the `products` table.
//!
//! All functions take an explicit connection so callers (and tests) decide
//! where the database lives. Search, ordering and pagination happen in SQL;
//! the ORDER BY fragment is assembled from the [`SortColumn`]/[`SortOrder`]
//! whitelists only, never from user text.

use crate::error::{AppError, AppResult};
use crate::models::{NewProduct, Product, ProductPage, ProductQuery, SortColumn, SortOrder};
use rusqlite::{params, Connection, OptionalExtension, Row};

fn row_to_product(row: &Row) -> rusqlite::Result<Product> {
    Ok(Product {
        id: row.get(0)?,
        name: row.get(1)?,
        price: row.get(2)?,
        category: row.get(3)?,
        stock: row.get(4)?,
        description: row.get(5)?,
        image_url: row.get(6)?,
        created_at: row.get(7)?,
        updated_at: row.get(8)?,
    })
}

fn null_if_empty(s: &str) -> Option<&str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed)
    }
}

/// Inserts a product and returns the stored row, including the
/// database-assigned id and creation timestamp.
pub fn create_product(conn: &Connection, new: &NewProduct) -> AppResult<Product> {
    let mut stmt = conn.prepare_cached(
        "INSERT INTO products (name, price, category, stock, description, image_url)
         VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
    )?;
    stmt.execute(params![
        new.name.trim(),
        new.price,
        null_if_empty(&new.category),
        new.stock,
        null_if_empty(&new.description),
        null_if_empty(&new.image_url),
    ])?;
    let id = conn.last_insert_rowid();
    log::debug!("Created product {} ({})", id, new.name.trim());
    get_product(conn, id)
}

/// Fetches one product by id.
pub fn get_product(conn: &Connection, id: i64) -> AppResult<Product> {
    let mut stmt = conn.prepare_cached(
        "SELECT id, name, price, category, stock, description, image_url,
                created_at, updated_at
         FROM products WHERE id = ?1",
    )?;
    stmt.query_row(params![id], row_to_product)
        .optional()?
        .ok_or(AppError::ProductNotFound(id))
}

/// Returns one page of products plus totals. Out-of-range page numbers and
/// sizes are clamped to sane values rather than rejected.
pub fn list_products(conn: &Connection, query: &ProductQuery) -> AppResult<ProductPage> {
    let page = query.page.max(1);
    let page_size = query.page_size.max(1);
    let offset = (page - 1) * page_size;

    let pattern = query
        .search
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(|s| format!("%{}%", s));

    // Secondary id sort keeps pages stable when the sort column has ties.
    let order_sql = format!(
        "ORDER BY {} {}, id ASC",
        query.sort.as_sql(),
        query.order.as_sql()
    );

    let (total_count, products) = match &pattern {
        Some(like) => {
            let total: i64 = conn.query_row(
                "SELECT COUNT(*) FROM products WHERE name LIKE ?1",
                params![like],
                |row| row.get(0),
            )?;
            let sql = format!(
                "SELECT id, name, price, category, stock, description, image_url,
                        created_at, updated_at
                 FROM products WHERE name LIKE ?1 {} LIMIT ?2 OFFSET ?3",
                order_sql
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt
                .query_map(params![like, page_size, offset], row_to_product)?
                .collect::<Result<Vec<_>, _>>()?;
            (total, rows)
        }
        None => {
            let total: i64 =
                conn.query_row("SELECT COUNT(*) FROM products", [], |row| row.get(0))?;
            let sql = format!(
                "SELECT id, name, price, category, stock, description, image_url,
                        created_at, updated_at
                 FROM products {} LIMIT ?1 OFFSET ?2",
                order_sql
            );
            let mut stmt = conn.prepare_cached(&sql)?;
            let rows = stmt
                .query_map(params![page_size, offset], row_to_product)?
                .collect::<Result<Vec<_>, _>>()?;
            (total, rows)
        }
    };

    Ok(ProductPage {
        products,
        total_count,
        page,
        page_size,
        total_pages: (total_count + page_size - 1) / page_size,
    })
}

/// Updates name and price of an existing product and refreshes its
/// `updated_at` timestamp.
pub fn update_product(conn: &Connection, id: i64, name: &str, price: f64) -> AppResult<Product> {
    let affected = conn.execute(
        "UPDATE products SET name = ?1, price = ?2, updated_at = datetime('now') WHERE id = ?3",
        params![name.trim(), price, id],
    )?;
    if affected == 0 {
        return Err(AppError::ProductNotFound(id));
    }
    get_product(conn, id)
}

/// Deletes a product by id.
pub fn delete_product(conn: &Connection, id: i64) -> AppResult<()> {
    let affected = conn.execute("DELETE FROM products WHERE id = ?1", params![id])?;
    if affected == 0 {
        return Err(AppError::ProductNotFound(id));
    }
    log::debug!("Deleted product {}", id);
    Ok(())
}
