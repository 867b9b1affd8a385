//! # stockroom-core: Pure Product Logic for Stockroom
//!
//! This crate holds everything about a product record that does not need a
//! disk: the record type itself, the derived total, input validation, the
//! flat-file line codec, name sorting and the table renderer.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Stockroom Architecture                           │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    apps/cli (Session)                           │   │
//! │  │    login ──► menu ──► add / remove / search / show / sort       │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ stockroom-core (THIS CRATE) ★                   │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐  ┌───────────┐  │   │
//! │  │   │   types   │  │  record   │  │  display  │  │ validation│  │   │
//! │  │   │  Product  │  │ line codec│  │  tables   │  │  parsing  │  │   │
//! │  │   │ SortOrder │  │           │  │  summary  │  │   rules   │  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘  └───────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO TERMINAL • PURE FUNCTIONS          │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 stockroom-db (Record Stores)                    │   │
//! │  │            inventory.txt  |  SQLite `products` table            │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - `Product`, `SortOrder`, `compute_total`, name sorting
//! - [`record`] - `name,quantity,unit_price,total_price` line codec
//! - [`display`] - row/table formatting and inventory summary
//! - [`validation`] - input parsing and business rules
//! - [`error`] - domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use stockroom_core::{compute_total, Product};
//!
//! let product = Product::new("widget", 4, 10);
//! assert_eq!(product.total_price, compute_total(4, 10));
//! assert_eq!(product.total_price, 40);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod display;
pub mod error;
pub mod record;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use display::InventorySummary;
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Width of the product name column in rendered tables.
///
/// Longer names are truncated in the table only; the stored name is untouched.
pub const NAME_COLUMN_WIDTH: usize = 20;

/// Width of the quantity column in rendered tables.
pub const QUANTITY_COLUMN_WIDTH: usize = 10;

/// Maximum product name length accepted on input (in characters).
pub const MAX_NAME_LENGTH: usize = 200;

/// Field separator of the flat-file format.
pub const FIELD_SEPARATOR: char = ',';
