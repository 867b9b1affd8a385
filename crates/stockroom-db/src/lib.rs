//! # stockroom-db: Record Stores for Stockroom
//!
//! This crate persists product records. It provides one contract,
//! [`RecordStore`], with a flat-file and a SQLite implementation, and the
//! [`Inventory`] operations that run on top of either.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Data Flow                              │
//! │                                                                         │
//! │  Session command ("add", "remove", "sort asc", ...)                    │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    stockroom-db (THIS CRATE)                    │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Inventory   │    │    Stores     │    │   Database   │  │   │
//! │  │   │(inventory.rs) │───►│  (store/*)    │───►│  (pool.rs)   │  │   │
//! │  │   │               │    │               │    │              │  │   │
//! │  │   │ add / remove  │    │ FileStore     │    │ SqlitePool   │  │   │
//! │  │   │ search / list │    │ TableStore    │    │ schema.rs    │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  inventory.txt                      shop.db (SQLite)                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`store`] - `RecordStore` trait, `FileStore`, `TableStore`, `Backend`
//! - [`inventory`] - product operations with the write gate
//! - [`pool`] - SQLite pool creation and configuration
//! - [`schema`] - products table creation
//! - [`error`] - storage error types
//!
//! ## Usage
//!
//! ```rust,ignore
//! use stockroom_db::{Backend, BackendKind, Inventory};
//!
//! let backend = Backend::open(BackendKind::File, "inventory.txt").await?;
//! let inventory = Inventory::new(backend);
//!
//! inventory.add("Widget", 4, 10).await?;
//! let widget = inventory.search("widget").await?;
//! assert_eq!(widget.total_price, 40);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod inventory;
pub mod pool;
pub mod schema;
pub mod store;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use inventory::Inventory;
pub use pool::{Database, DbConfig};

// Store re-exports for convenience
pub use store::file::FileStore;
pub use store::table::TableStore;
pub use store::{Backend, BackendKind, Located, RecordStore};
