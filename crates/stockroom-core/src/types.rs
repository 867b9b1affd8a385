//! # Domain Types
//!
//! Core domain types used throughout Stockroom.
//!
//! ## Product Record
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Product                                         │
//! │                                                                         │
//! │   name         "widget"   lowercase, unique key                         │
//! │   quantity     4          non-negative count                            │
//! │   unit_price   10         non-negative, currency minor unit             │
//! │   total_price  40         derived: quantity × unit_price                │
//! │                                                                         │
//! │   Flat file:  stores total_price redundantly                            │
//! │   Table:      recomputes total_price in the SELECT                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::cmp::Ordering;
use std::fmt;

use serde::{Deserialize, Serialize};

// =============================================================================
// Product
// =============================================================================

/// One product in the inventory.
///
/// Always build through [`Product::new`] when persisting, so `total_price`
/// matches `quantity * unit_price` at write time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
pub struct Product {
    /// Lowercase product name; the unique key.
    pub name: String,

    /// Number of units on hand.
    pub quantity: i64,

    /// Price of one unit.
    pub unit_price: i64,

    /// `quantity * unit_price`.
    pub total_price: i64,
}

impl Product {
    /// Creates a product, deriving its total price.
    pub fn new(name: impl Into<String>, quantity: i64, unit_price: i64) -> Self {
        Product {
            name: name.into(),
            quantity,
            unit_price,
            total_price: compute_total(quantity, unit_price),
        }
    }

    /// Checks the derived total against the stored one.
    ///
    /// Only hand-edited files can make this false.
    #[inline]
    pub fn has_consistent_total(&self) -> bool {
        self.total_price == compute_total(self.quantity, self.unit_price)
    }
}

impl fmt::Display for Product {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Name: {}\nQuantity: {}\nPrice: ${}\nTotal Price: ${}",
            self.name, self.quantity, self.unit_price, self.total_price
        )
    }
}

/// Total price of `quantity` units at `unit_price` each.
///
/// Saturates instead of overflowing; negative inputs are rejected by
/// validation before they get here.
#[inline]
pub const fn compute_total(quantity: i64, unit_price: i64) -> i64 {
    quantity.saturating_mul(unit_price)
}

// =============================================================================
// Sort Order
// =============================================================================

/// Direction of a name sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortOrder {
    #[default]
    Ascending,
    Descending,
}

impl SortOrder {
    /// Maps the `descending` flag used by callers that think in booleans.
    #[inline]
    pub const fn from_descending(descending: bool) -> Self {
        if descending {
            SortOrder::Descending
        } else {
            SortOrder::Ascending
        }
    }

    /// SQL keyword for `ORDER BY`.
    #[inline]
    pub const fn as_sql(&self) -> &'static str {
        match self {
            SortOrder::Ascending => "ASC",
            SortOrder::Descending => "DESC",
        }
    }
}

/// Compares two names byte-wise in the given direction.
#[inline]
pub fn compare_names(a: &str, b: &str, order: SortOrder) -> Ordering {
    match order {
        SortOrder::Ascending => a.as_bytes().cmp(b.as_bytes()),
        SortOrder::Descending => b.as_bytes().cmp(a.as_bytes()),
    }
}

/// Sorts products by name in place.
///
/// The sort is stable: products with equal names keep their storage order in
/// both directions.
pub fn sort_by_name(products: &mut [Product], order: SortOrder) {
    products.sort_by(|a, b| compare_names(&a.name, &b.name, order));
}

// =============================================================================
// Unit Tests
// =============================================================================
