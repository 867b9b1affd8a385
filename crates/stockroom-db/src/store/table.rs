//! # Table Store
//!
//! Keeps products as rows of the SQLite `products` table.
//!
//! ## Query Shape
//! ```text
//! SELECT name, quantity, unit_price,
//!        quantity * unit_price AS total_price   ← derived, never stored
//! FROM products
//! ORDER BY rowid                                ← storage (insertion) order
//! ```
//!
//! Name sorts run in SQL with `ORDER BY name <ASC|DESC>, rowid`. SQLite's
//! default BINARY collation compares bytes, and the `rowid` tiebreak keeps
//! equal names in storage order for both directions.

use async_trait::async_trait;
use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use stockroom_core::{Product, SortOrder};
use tracing::{debug, error};
use uuid::Uuid;

use crate::error::{DbError, DbResult};
use crate::store::{Located, RecordStore};

const SELECT_PRODUCTS: &str = r#"
    SELECT
        name,
        quantity,
        unit_price,
        quantity * unit_price AS total_price
    FROM products
"#;

#[derive(Debug, FromRow)]
struct LocatedRow {
    position: i64,
    #[sqlx(flatten)]
    product: Product,
}

/// Record store backed by the SQLite `products` table.
#[derive(Debug, Clone)]
pub struct TableStore {
    pool: SqlitePool,
}

impl TableStore {
    /// Creates a new TableStore.
    pub fn new(pool: SqlitePool) -> Self {
        TableStore { pool }
    }
}

fn log_failure(operation: &'static str) -> impl Fn(DbError) -> DbError {
    move |e| {
        error!(operation, error = %e, "Table store operation failed");
        e
    }
}

#[async_trait]
impl RecordStore for TableStore {
    fn location(&self) -> String {
        "sqlite table `products`".to_string()
    }

    async fn append(&self, product: &Product) -> DbResult<()> {
        debug!(name = %product.name, "Inserting product row");

        sqlx::query(
            r#"
            INSERT INTO products (id, name, quantity, unit_price, created_at)
            VALUES (?1, ?2, ?3, ?4, ?5)
            "#,
        )
        .bind(generate_row_id())
        .bind(&product.name)
        .bind(product.quantity)
        .bind(product.unit_price)
        .bind(Utc::now())
        .execute(&self.pool)
        .await
        .map_err(DbError::from)
        .map_err(log_failure("append"))?;

        Ok(())
    }

    async fn read_all(&self) -> DbResult<Vec<Product>> {
        let query = format!("{} ORDER BY rowid", SELECT_PRODUCTS);

        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)
            .map_err(log_failure("read_all"))?;

        debug!(count = products.len(), "Read product rows");
        Ok(products)
    }

    async fn rewrite_all(&self, products: &[Product]) -> DbResult<()> {
        debug!(count = products.len(), "Rewriting products table");

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
            .map_err(log_failure("rewrite_all"))?;

        sqlx::query("DELETE FROM products")
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)
            .map_err(log_failure("rewrite_all"))?;

        let now = Utc::now();
        for product in products {
            sqlx::query(
                r#"
                INSERT INTO products (id, name, quantity, unit_price, created_at)
                VALUES (?1, ?2, ?3, ?4, ?5)
                "#,
            )
            .bind(generate_row_id())
            .bind(&product.name)
            .bind(product.quantity)
            .bind(product.unit_price)
            .bind(now)
            .execute(&mut *tx)
            .await
            .map_err(DbError::from)
            .map_err(log_failure("rewrite_all"))?;
        }

        // Dropping `tx` on any early return above rolls it back.
        tx.commit()
            .await
            .map_err(|e| DbError::TransactionFailed(e.to_string()))
            .map_err(log_failure("rewrite_all"))?;

        Ok(())
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<Located>> {
        let row = sqlx::query_as::<_, LocatedRow>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM products AS earlier WHERE earlier.rowid < p.rowid)
                    AS position,
                p.name,
                p.quantity,
                p.unit_price,
                p.quantity * p.unit_price AS total_price
            FROM products AS p
            WHERE p.name = ?1
            ORDER BY p.rowid
            LIMIT 1
            "#,
        )
        .bind(name)
        .fetch_optional(&self.pool)
        .await
        .map_err(DbError::from)
        .map_err(log_failure("find_by_name"))?;

        Ok(row.map(|row| Located {
            position: row.position as usize,
            product: row.product,
        }))
    }

    async fn sorted_by_name(&self, order: SortOrder) -> DbResult<Vec<Product>> {
        let query = format!("{} ORDER BY name {}, rowid", SELECT_PRODUCTS, order.as_sql());

        let products = sqlx::query_as::<_, Product>(&query)
            .fetch_all(&self.pool)
            .await
            .map_err(DbError::from)
            .map_err(log_failure("sorted_by_name"))?;

        Ok(products)
    }
}

/// Generates a new row ID.
pub fn generate_row_id() -> String {
    Uuid::new_v4().to_string()
}

// =============================================================================
// Unit Tests
// =============================================================================
