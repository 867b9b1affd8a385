//! # Record Stores
//!
//! The persistence abstraction for product records and its two backends.
//!
//! ## Store Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    One Contract, Two Backends                           │
//! │                                                                         │
//! │  Inventory (add / remove / search)                                     │
//! │       │                                                                 │
//! │       │  store.find_by_name("widget")                                   │
//! │       ▼                                                                 │
//! │  dyn RecordStore                                                        │
//! │  ├── append(&product)                                                   │
//! │  ├── read_all()                                                         │
//! │  ├── rewrite_all(&products)                                             │
//! │  ├── find_by_name(name)                                                 │
//! │  └── sorted_by_name(order)                                              │
//! │       │                                    │                            │
//! │       ▼                                    ▼                            │
//! │  FileStore                           TableStore                         │
//! │  inventory.txt                       SQLite `products`                  │
//! │  name,qty,price,total\n              total computed in SELECT           │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! [`Backend`] picks one of the two at construction time from a
//! [`BackendKind`].

pub mod file;
pub mod table;

use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use stockroom_core::{sort_by_name, Product, SortOrder};
use tracing::info;

use crate::error::DbResult;
use crate::pool::{Database, DbConfig};
use file::FileStore;
use table::TableStore;

// =============================================================================
// Contract
// =============================================================================

/// A product located in a store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Located {
    /// Zero-based position in storage order.
    pub position: usize,
    /// The stored product.
    pub product: Product,
}

/// Durable, ordered collection of product records.
///
/// Names are compared exactly; callers normalize them first. Every method
/// re-reads current state, nothing is cached between calls.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// Human-readable location of the store, for logs.
    fn location(&self) -> String;

    /// Adds one record at the end of the store.
    async fn append(&self, product: &Product) -> DbResult<()>;

    /// Returns every record in storage order.
    ///
    /// A store that was never written yields an empty vector.
    async fn read_all(&self) -> DbResult<Vec<Product>>;

    /// Replaces the whole store with exactly `products`.
    async fn rewrite_all(&self, products: &[Product]) -> DbResult<()>;

    /// Finds the first record whose name equals `name`.
    async fn find_by_name(&self, name: &str) -> DbResult<Option<Located>> {
        let products = self.read_all().await?;
        Ok(locate(products, name))
    }

    /// Returns all records ordered by name.
    async fn sorted_by_name(&self, order: SortOrder) -> DbResult<Vec<Product>> {
        let mut products = self.read_all().await?;
        sort_by_name(&mut products, order);
        Ok(products)
    }
}

/// Linear scan for the first product named `name`.
pub fn locate(products: Vec<Product>, name: &str) -> Option<Located> {
    products
        .into_iter()
        .enumerate()
        .find(|(_, product)| product.name == name)
        .map(|(position, product)| Located { position, product })
}

// =============================================================================
// Backend Selection
// =============================================================================

/// Which store implementation to use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BackendKind {
    /// Flat delimited text file.
    #[default]
    File,
    /// SQLite table.
    Table,
}

impl fmt::Display for BackendKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BackendKind::File => write!(f, "file"),
            BackendKind::Table => write!(f, "table"),
        }
    }
}

impl FromStr for BackendKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "file" => Ok(BackendKind::File),
            "table" | "sqlite" => Ok(BackendKind::Table),
            other => Err(format!("unknown backend '{}', expected file or table", other)),
        }
    }
}

/// The store chosen at startup.
#[derive(Debug)]
pub enum Backend {
    File(FileStore),
    Table { db: Database, store: TableStore },
}

impl Backend {
    /// Opens the store of the given kind at `path`.
    ///
    /// The file backend does not touch the disk until the first operation;
    /// the table backend connects and creates its table immediately.
    pub async fn open(kind: BackendKind, path: impl Into<PathBuf>) -> DbResult<Self> {
        let path = path.into();
        info!(backend = %kind, path = %path.display(), "Opening record store");

        match kind {
            BackendKind::File => Ok(Backend::File(FileStore::new(path))),
            BackendKind::Table => {
                let db = Database::new(DbConfig::new(path)).await?;
                let store = db.products();
                Ok(Backend::Table { db, store })
            }
        }
    }

    /// Which kind of backend this is.
    pub fn kind(&self) -> BackendKind {
        match self {
            Backend::File(_) => BackendKind::File,
            Backend::Table { .. } => BackendKind::Table,
        }
    }

    /// Releases the backend's resources.
    pub async fn close(&self) {
        if let Backend::Table { db, .. } = self {
            db.close().await;
        }
    }

    fn store(&self) -> &dyn RecordStore {
        match self {
            Backend::File(store) => store,
            Backend::Table { store, .. } => store,
        }
    }
}

#[async_trait]
impl RecordStore for Backend {
    fn location(&self) -> String {
        self.store().location()
    }

    async fn append(&self, product: &Product) -> DbResult<()> {
        self.store().append(product).await
    }

    async fn read_all(&self) -> DbResult<Vec<Product>> {
        self.store().read_all().await
    }

    async fn rewrite_all(&self, products: &[Product]) -> DbResult<()> {
        self.store().rewrite_all(products).await
    }

    async fn find_by_name(&self, name: &str) -> DbResult<Option<Located>> {
        self.store().find_by_name(name).await
    }

    async fn sorted_by_name(&self, order: SortOrder) -> DbResult<Vec<Product>> {
        self.store().sorted_by_name(order).await
    }
}

// =============================================================================
// Unit Tests
// =============================================================================
