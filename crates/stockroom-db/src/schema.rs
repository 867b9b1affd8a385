//! # Table Schema
//!
//! Creates the `products` table used by [`TableStore`](crate::TableStore).
//!
//! There is no versioned migration history: the single table is created with
//! `IF NOT EXISTS` every time a pool is opened.
//!
//! ## Table Layout
//! ```text
//! products
//! ├── id          TEXT PRIMARY KEY   UUID v4
//! ├── name        TEXT NOT NULL      lowercase product name
//! ├── quantity    INTEGER NOT NULL
//! ├── unit_price  INTEGER NOT NULL
//! └── created_at  TEXT NOT NULL      RFC 3339
//! ```
//!
//! `total_price` is not stored; queries compute `quantity * unit_price`.
//! Name uniqueness is enforced by the inventory layer, not by an index.

use sqlx::SqlitePool;
use tracing::info;

use crate::error::{DbError, DbResult};

const CREATE_PRODUCTS: &str = r#"
CREATE TABLE IF NOT EXISTS products (
    id          TEXT PRIMARY KEY NOT NULL,
    name        TEXT NOT NULL,
    quantity    INTEGER NOT NULL,
    unit_price  INTEGER NOT NULL,
    created_at  TEXT NOT NULL
)
"#;

const CREATE_NAME_INDEX: &str =
    "CREATE INDEX IF NOT EXISTS idx_products_name ON products (name)";

/// Creates the products table and its name index if they are missing.
///
/// Idempotent: safe to run on every connect.
pub async fn ensure_schema(pool: &SqlitePool) -> DbResult<()> {
    info!("Ensuring products table exists");

    for statement in [CREATE_PRODUCTS, CREATE_NAME_INDEX] {
        sqlx::query(statement)
            .execute(pool)
            .await
            .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    }

    Ok(())
}

/// Returns true if the products table exists.
///
/// For diagnostics.
pub async fn products_table_exists(pool: &SqlitePool) -> DbResult<bool> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM sqlite_master WHERE type = 'table' AND name = 'products'",
    )
    .fetch_one(pool)
    .await?;

    Ok(count > 0)
}
