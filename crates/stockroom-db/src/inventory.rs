//! # Inventory Operations
//!
//! Add, remove and search products on top of any [`RecordStore`].
//!
//! ## Add / Remove Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  add("Widget", 4, 10)                                                  │
//! │     │ normalize + validate ──► "widget"   (ValidationError → stop)     │
//! │     │ ── write gate ────────────────────────────────────────────┐      │
//! │     │ find_by_name("widget") ──► Some? → AlreadyExists          │      │
//! │     │ append(Product { total_price: 40, .. })                    │      │
//! │     │ ──────────────────────────────────────────────────────────┘      │
//! │                                                                         │
//! │  remove("widget")                                                      │
//! │     │ ── write gate ────────────────────────────────────────────┐      │
//! │     │ read_all ──► locate first match ──► None? → NotFound       │      │
//! │     │ rewrite_all(all records except that one)                   │      │
//! │     │ ──────────────────────────────────────────────────────────┘      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The write gate is a scoped `tokio::sync::Mutex` guard: it is released when
//! the guard drops, on success and on every error path.

use stockroom_core::validation::{
    normalize_name, validate_quantity, validate_total, validate_unit_price,
};
use stockroom_core::{InventorySummary, Product, SortOrder};
use tokio::sync::Mutex;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::store::{locate, RecordStore};

/// Product operations over a record store.
#[derive(Debug)]
pub struct Inventory<S> {
    store: S,
    write_gate: Mutex<()>,
}

impl<S: RecordStore> Inventory<S> {
    /// Wraps a store.
    pub fn new(store: S) -> Self {
        Inventory {
            store,
            write_gate: Mutex::new(()),
        }
    }

    /// The underlying store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Unwraps the underlying store.
    pub fn into_store(self) -> S {
        self.store
    }

    /// True if a product named `name` (after normalization) is stored.
    pub async fn exists(&self, name: &str) -> DbResult<bool> {
        let name = normalize_name(name)?;
        Ok(self.store.find_by_name(&name).await?.is_some())
    }

    /// Adds a new product.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the stored product, total included
    /// * `Err(DbError::Validation)` - bad name, negative number or a total
    ///   that overflows `i64`
    /// * `Err(DbError::AlreadyExists)` - name already taken
    pub async fn add(&self, name: &str, quantity: i64, unit_price: i64) -> DbResult<Product> {
        let name = normalize_name(name)?;
        validate_quantity(quantity)?;
        validate_unit_price(unit_price)?;
        validate_total(quantity, unit_price)?;

        let _gate = self.write_gate.lock().await;

        if self.store.find_by_name(&name).await?.is_some() {
            debug!(name = %name, "Add rejected, product exists");
            return Err(DbError::already_exists(name));
        }

        let product = Product::new(name, quantity, unit_price);
        self.store.append(&product).await?;

        info!(
            name = %product.name,
            quantity = product.quantity,
            unit_price = product.unit_price,
            "Product added"
        );
        Ok(product)
    }

    /// Removes the first product named `name`.
    ///
    /// ## Returns
    /// * `Ok(Product)` - the removed product
    /// * `Err(DbError::NotFound)` - no such product
    pub async fn remove(&self, name: &str) -> DbResult<Product> {
        let name = normalize_name(name)?;

        let _gate = self.write_gate.lock().await;

        let mut products = self.store.read_all().await?;
        let Some(located) = locate(products.clone(), &name) else {
            debug!(name = %name, "Remove found nothing");
            return Err(DbError::not_found("Product", name));
        };

        products.remove(located.position);
        self.store.rewrite_all(&products).await?;

        info!(name = %located.product.name, "Product removed");
        Ok(located.product)
    }

    /// Looks up a product by name without mutating anything.
    pub async fn search(&self, name: &str) -> DbResult<Product> {
        let name = normalize_name(name)?;

        match self.store.find_by_name(&name).await? {
            Some(located) => Ok(located.product),
            None => {
                debug!(name = %name, "Search found nothing");
                Err(DbError::not_found("Product", name))
            }
        }
    }

    /// All products in storage order.
    pub async fn list(&self) -> DbResult<Vec<Product>> {
        self.store.read_all().await
    }

    /// All products sorted by name.
    pub async fn sorted(&self, order: SortOrder) -> DbResult<Vec<Product>> {
        self.store.sorted_by_name(order).await
    }

    /// Product count, total quantity and total capital.
    pub async fn summary(&self) -> DbResult<InventorySummary> {
        let products = self.store.read_all().await?;
        Ok(InventorySummary::from_products(&products))
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};
    use crate::store::table::TableStore;
    use stockroom_core::ValidationError;

    async fn inventory() -> Inventory<TableStore> {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        Inventory::new(db.products())
    }

    #[tokio::test]
    async fn test_add_normalizes_name() {
        let inventory = inventory().await;
        let product = inventory.add("  Widget ", 4, 10).await.unwrap();

        assert_eq!(product.name, "widget");
        assert_eq!(product.total_price, 40);
        assert!(inventory.exists("WIDGET").await.unwrap());
        assert_eq!(inventory.search("Widget").await.unwrap(), product);
    }

    #[tokio::test]
    async fn test_invalid_input_never_reaches_store() {
        let inventory = inventory().await;

        assert!(matches!(
            inventory.add("", 1, 1).await,
            Err(DbError::Validation(_))
        ));
        assert!(matches!(
            inventory.add("pen", -1, 1).await,
            Err(DbError::Validation(_))
        ));
        assert!(matches!(
            inventory.add("pen", 1, -1).await,
            Err(DbError::Validation(_))
        ));
        assert!(matches!(
            inventory.add("big", i64::MAX, 2).await,
            Err(DbError::Validation(ValidationError::TooLarge { .. }))
        ));
        assert!(matches!(
            inventory.add("x\nb", 9, 9).await,
            Err(DbError::Validation(ValidationError::ControlCharacter { .. }))
        ));

        assert!(inventory.list().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_remove_only_first_duplicate() {
        let inventory = inventory().await;
        // Duplicates can only come from outside the inventory layer.
        inventory.store().append(&Product::new("pear", 1, 1)).await.unwrap();
        inventory.store().append(&Product::new("pear", 2, 1)).await.unwrap();

        let removed = inventory.remove("pear").await.unwrap();
        assert_eq!(removed.quantity, 1);

        let remaining = inventory.list().await.unwrap();
        assert_eq!(remaining, vec![Product::new("pear", 2, 1)]);
    }

    #[tokio::test]
    async fn test_summary() {
        let inventory = inventory().await;
        inventory.add("a", 2, 5).await.unwrap();
        inventory.add("b", 3, 1).await.unwrap();

        let summary = inventory.summary().await.unwrap();
        assert_eq!(summary.product_count, 2);
        assert_eq!(summary.total_quantity, 5);
        assert_eq!(summary.total_capital, 13);
    }
}
