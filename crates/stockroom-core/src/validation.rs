//! # Validation Module
//!
//! Input parsing and validation for product fields.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Session (apps/cli)                                           │
//! │  └── Reads raw text lines from the terminal                            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: THIS MODULE                                                  │
//! │  ├── normalize_name: trim + lowercase                                  │
//! │  ├── parse_quantity / parse_unit_price: text → i64                     │
//! │  └── reject empty names and negative numbers                           │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Inventory (stockroom-db)                                     │
//! │  └── name uniqueness check before append                               │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use stockroom_core::validation::{normalize_name, parse_quantity};
//!
//! assert_eq!(normalize_name("  Dell XPS ").unwrap(), "dell xps");
//! assert_eq!(parse_quantity("12").unwrap(), 12);
//! assert!(parse_quantity("twelve").is_err());
//! ```

use crate::error::ValidationError;
use crate::MAX_NAME_LENGTH;

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be empty after trimming
/// - Must be at most [`MAX_NAME_LENGTH`] characters
/// - Must not contain control characters (a line break would split the
///   stored record in two)
pub fn validate_product_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_NAME_LENGTH {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_NAME_LENGTH,
        });
    }

    if name.chars().any(char::is_control) {
        return Err(ValidationError::ControlCharacter {
            field: "name".to_string(),
        });
    }

    Ok(())
}

/// Validates and normalizes a product name to its storage key.
///
/// Names are compared case-sensitively by the stores, so every caller goes
/// through this before a lookup or insert.
pub fn normalize_name(name: &str) -> ValidationResult<String> {
    validate_product_name(name)?;
    Ok(name.trim().to_lowercase())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a quantity.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: out of stock)
pub fn validate_quantity(quantity: i64) -> ValidationResult<()> {
    if quantity < 0 {
        return Err(ValidationError::Negative {
            field: "quantity".to_string(),
        });
    }

    Ok(())
}

/// Validates a unit price.
///
/// ## Rules
/// - Must be non-negative (zero is allowed: free items)
pub fn validate_unit_price(unit_price: i64) -> ValidationResult<()> {
    if unit_price < 0 {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Checks that `quantity * unit_price` fits in an `i64` and returns it.
pub fn validate_total(quantity: i64, unit_price: i64) -> ValidationResult<i64> {
    quantity
        .checked_mul(unit_price)
        .ok_or_else(|| ValidationError::TooLarge {
            field: "total price".to_string(),
        })
}

/// Parses a quantity typed by the user.
pub fn parse_quantity(input: &str) -> ValidationResult<i64> {
    let quantity = parse_whole_number("quantity", input)?;
    validate_quantity(quantity)?;
    Ok(quantity)
}

/// Parses a unit price typed by the user.
pub fn parse_unit_price(input: &str) -> ValidationResult<i64> {
    let unit_price = parse_whole_number("price", input)?;
    validate_unit_price(unit_price)?;
    Ok(unit_price)
}

fn parse_whole_number(field: &str, input: &str) -> ValidationResult<i64> {
    input
        .trim()
        .parse::<i64>()
        .map_err(|_| ValidationError::InvalidNumber {
            field: field.to_string(),
            value: input.trim().to_string(),
        })
}

// =============================================================================
// Unit Tests
// =============================================================================
