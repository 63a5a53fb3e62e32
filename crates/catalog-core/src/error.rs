//! # Error Types
//!
//! Domain-specific error types for catalog-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  catalog-core errors (this file)                                       │
//! │  └── ValidationError  - Rejected filters, sorts and field values       │
//! │                                                                         │
//! │  catalog-db errors (separate crate)                                    │
//! │  └── DbError          - InvalidArgument / NotFound / storage failures  │
//! │                                                                         │
//! │  Flow: ValidationError → DbError::InvalidArgument → calling layer      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Design Principles
//! 1. Use `thiserror` for derive macros (not manual impl)
//! 2. Include the offending value in error messages
//! 3. Errors are enum variants, never String

use thiserror::Error;

// =============================================================================
// Validation Error
// =============================================================================

/// Input validation errors.
///
/// Raised before any query is issued, so a rejected argument never costs a
/// database round-trip.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    /// Filter token is neither a category nor `in_stock`.
    #[error("invalid filter applied: {0}")]
    InvalidFilter(String),

    /// Sort token is not a sortable column.
    #[error("invalid sort applied: {0}")]
    InvalidSort(String),

    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Numeric value is out of range.
    #[error("{field} must be between {min} and {max}")]
    OutOfRange { field: String, min: i64, max: i64 },

    /// Value must not be negative.
    #[error("{field} must not be negative")]
    Negative { field: String },

    /// A partial update carried no fields at all.
    #[error("update contains no fields")]
    EmptyPatch,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_error_message() {
        let err = ValidationError::InvalidFilter("nonexistent_category".to_string());
        assert_eq!(err.to_string(), "invalid filter applied: nonexistent_category");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::Required {
            field: "name".to_string(),
        };
        assert_eq!(err.to_string(), "name is required");

        let err = ValidationError::Negative {
            field: "inventory".to_string(),
        };
        assert_eq!(err.to_string(), "inventory must not be negative");
    }
}
