//! # Error Types
//!
//! Domain-specific error types for stockroom-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  stockroom-core errors (this file)                                     │
//! │  ├── CoreError        - Malformed stored records                       │
//! │  └── ValidationError  - Rejected user input (bad name, bad number)     │
//! │                                                                         │
//! │  stockroom-db errors (separate crate)                                  │
//! │  └── DbError          - Storage failures, AlreadyExists, NotFound      │
//! │                                                                         │
//! │  CLI errors (in app)                                                   │
//! │  └── CliError         - Config, auth and startup failures              │
//! │                                                                         │
//! │  Flow: ValidationError → DbError → Session message                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include context in error messages (field, offending value)
//! 3. Errors are enum variants, never String
//! 4. Each error variant maps to a user-facing message

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// A stored line could not be decoded into a product.
    ///
    /// ## When This Occurs
    /// - The file was edited by hand and a field is missing
    /// - A product name contained the field separator
    /// - A numeric field is not an integer
    #[error("Malformed record '{line}': {reason}")]
    MalformedRecord { line: String, reason: String },

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

impl CoreError {
    /// Creates a MalformedRecord error for the given line.
    pub fn malformed(line: impl Into<String>, reason: impl Into<String>) -> Self {
        CoreError::MalformedRecord {
            line: line.into(),
            reason: reason.into(),
        }
    }
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any store interaction, so a rejected input never touches
/// the persisted records.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Text that should have been a whole number.
    #[error("{field} must be a whole number, got '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// Field contains a control character such as a line break.
    #[error("{field} must not contain control characters")]
    ControlCharacter { field: String },

    /// Derived value does not fit in an `i64`.
    #[error("{field} is too large")]
    TooLarge { field: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::malformed("apple,1", "expected 4 fields, found 2");
        assert_eq!(
            err.to_string(),
            "Malformed record 'apple,1': expected 4 fields, found 2"
        );
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::InvalidNumber {
            field: "quantity".to_string(),
            value: "ten".to_string(),
        };
        assert_eq!(err.to_string(), "quantity must be a whole number, got 'ten'");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Negative {
            field: "price".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}
