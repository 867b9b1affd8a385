//! # Display Module
//!
//! Renders products as a fixed-width text table.
//!
//! ## Layout
//! ```text
//! Product Name        Quantity  Price	Total Price
//! -------------------------------------------
//! apple               3         $2	$6
//! dell xps            1         $2100	$2100
//! -------------------------------------------
//! Total number of products: 4
//! Total capital: $2106
//! ```

use serde::{Deserialize, Serialize};

use crate::types::Product;
use crate::{NAME_COLUMN_WIDTH, QUANTITY_COLUMN_WIDTH};

// =============================================================================
// Summary
// =============================================================================

/// Aggregates over a set of products.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct InventorySummary {
    /// Number of distinct products.
    pub product_count: usize,
    /// Sum of quantities.
    pub total_quantity: i64,
    /// Sum of total prices.
    pub total_capital: i64,
}

impl InventorySummary {
    /// Computes the summary of a product slice.
    pub fn from_products(products: &[Product]) -> Self {
        products.iter().fold(InventorySummary::default(), |acc, p| {
            InventorySummary {
                product_count: acc.product_count + 1,
                total_quantity: acc.total_quantity.saturating_add(p.quantity),
                total_capital: acc.total_capital.saturating_add(p.total_price),
            }
        })
    }
}

// =============================================================================
// Formatting
// =============================================================================

/// Column header line.
pub fn header() -> String {
    format!(
        "{:<name_w$}{:<qty_w$}Price\tTotal Price",
        "Product Name",
        "Quantity",
        name_w = NAME_COLUMN_WIDTH,
        qty_w = QUANTITY_COLUMN_WIDTH,
    )
}

/// Formats one product as a table row.
///
/// Names longer than [`NAME_COLUMN_WIDTH`] are cut so the columns stay
/// aligned; a name that exactly fills the column is followed directly by the
/// quantity.
pub fn format_row(product: &Product) -> String {
    let name: String = product.name.chars().take(NAME_COLUMN_WIDTH).collect();
    format!(
        "{:<name_w$}{:<qty_w$}${}\t${}",
        name,
        product.quantity,
        product.unit_price,
        product.total_price,
        name_w = NAME_COLUMN_WIDTH,
        qty_w = QUANTITY_COLUMN_WIDTH,
    )
}

/// Formats products as a full table with header and totals footer.
pub fn format_table(products: &[Product]) -> String {
    let header = header();
    let dashes = "-".repeat(header.len());

    let mut out = String::new();
    out.push_str(&header);
    out.push('\n');
    out.push_str(&dashes);
    out.push('\n');

    if products.is_empty() {
        out.push_str("No products.\n");
        return out;
    }

    for product in products {
        out.push_str(&format_row(product));
        out.push('\n');
    }

    let summary = InventorySummary::from_products(products);
    out.push_str(&dashes);
    out.push('\n');
    out.push_str(&format!(
        "Total number of products: {}\n",
        summary.total_quantity
    ));
    out.push_str(&format!("Total capital: ${}\n", summary.total_capital));
    out
}

// =============================================================================
// Unit Tests
// =============================================================================
