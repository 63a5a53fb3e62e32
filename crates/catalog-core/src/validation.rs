//! # Validation Module
//!
//! Input validation for catalog operations.
//!
//! ## Validation Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Layers                                  │
//! │                                                                         │
//! │  Layer 1: Calling application (HTTP handlers)                          │
//! │  ├── Deserialization, auth                                             │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 2: catalog-db repository                                        │
//! │  └── THIS MODULE: limits, patch fields, search query length            │
//! │           │                                                             │
//! │           ▼                                                             │
//! │  Layer 3: Database (PostgreSQL)                                        │
//! │  ├── NOT NULL constraints                                              │
//! │  ├── CHECK (inventory >= 0)                                            │
//! │  └── product_category enum                                             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use catalog_core::validation::{validate_inventory, validate_search_query};
//!
//! assert!(validate_inventory(12).is_ok());
//! assert_eq!(validate_search_query("  lamp ").unwrap(), "lamp");
//! ```

use rust_decimal::Decimal;

use crate::error::ValidationError;
use crate::types::ProductPatch;
use crate::{MAX_DESCRIPTION_LENGTH, MAX_NAME_LENGTH, MAX_SEARCH_QUERY_LENGTH};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// String Validators
// =============================================================================

/// Validates a product name.
///
/// ## Rules
/// - Must not be blank
/// - At most 200 characters
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_product_name;
///
/// assert!(validate_product_name("Desk Lamp").is_ok());
/// assert!(validate_product_name("   ").is_err());
/// ```
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

    Ok(())
}

/// Validates a description. Empty is allowed.
pub fn validate_description(description: &str) -> ValidationResult<()> {
    if description.chars().count() > MAX_DESCRIPTION_LENGTH {
        return Err(ValidationError::TooLong {
            field: "description".to_string(),
            max: MAX_DESCRIPTION_LENGTH,
        });
    }

    Ok(())
}

/// Validates a search query.
///
/// ## Rules
/// - Can be blank (search returns nothing)
/// - At most 100 characters
///
/// ## Returns
/// The trimmed query string.
pub fn validate_search_query(query: &str) -> ValidationResult<String> {
    let query = query.trim();

    if query.chars().count() > MAX_SEARCH_QUERY_LENGTH {
        return Err(ValidationError::TooLong {
            field: "query".to_string(),
            max: MAX_SEARCH_QUERY_LENGTH,
        });
    }

    Ok(query.to_string())
}

// =============================================================================
// Numeric Validators
// =============================================================================

/// Validates a price.
///
/// Zero is allowed (free items).
///
/// ## Example
/// ```rust
/// use catalog_core::validation::validate_price;
/// use rust_decimal::Decimal;
///
/// assert!(validate_price(Decimal::new(1099, 2)).is_ok());
/// assert!(validate_price(Decimal::ZERO).is_ok());
/// assert!(validate_price(Decimal::new(-1, 0)).is_err());
/// ```
pub fn validate_price(price: Decimal) -> ValidationResult<()> {
    if price.is_sign_negative() && !price.is_zero() {
        return Err(ValidationError::Negative {
            field: "price".to_string(),
        });
    }

    Ok(())
}

/// Validates an absolute inventory count.
pub fn validate_inventory(inventory: i32) -> ValidationResult<()> {
    if inventory < 0 {
        return Err(ValidationError::Negative {
            field: "inventory".to_string(),
        });
    }

    Ok(())
}

/// Validates a page size.
pub fn validate_limit(limit: u32) -> ValidationResult<()> {
    if limit == 0 {
        return Err(ValidationError::OutOfRange {
            field: "limit".to_string(),
            min: 1,
            max: i64::from(u32::MAX),
        });
    }

    Ok(())
}

// =============================================================================
// Patch Validator
// =============================================================================

/// Validates every field present on a patch.
///
/// An empty patch is rejected: there would be nothing to write and no way
/// to distinguish "not found" from "nothing changed".
pub fn validate_patch(patch: &ProductPatch) -> ValidationResult<()> {
    if patch.is_empty() {
        return Err(ValidationError::EmptyPatch);
    }

    if let Some(name) = &patch.name {
        validate_product_name(name)?;
    }
    if let Some(description) = &patch.description {
        validate_description(description)?;
    }
    if let Some(price) = patch.price {
        validate_price(price)?;
    }
    if let Some(inventory) = patch.inventory {
        validate_inventory(inventory)?;
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Category;

    #[test]
    fn test_validate_product_name() {
        assert!(validate_product_name("USB-C Cable").is_ok());
        assert!(validate_product_name("").is_err());
        assert!(validate_product_name(&"A".repeat(201)).is_err());
        assert!(validate_product_name(&"A".repeat(200)).is_ok());
    }

    #[test]
    fn test_validate_search_query() {
        assert_eq!(validate_search_query("  toaster ").unwrap(), "toaster");
        assert_eq!(validate_search_query("   ").unwrap(), "");
        assert!(validate_search_query(&"q".repeat(101)).is_err());
    }

    #[test]
    fn test_validate_inventory() {
        assert!(validate_inventory(0).is_ok());
        assert!(validate_inventory(250).is_ok());
        assert!(validate_inventory(-1).is_err());
    }

    #[test]
    fn test_validate_limit() {
        assert!(validate_limit(1).is_ok());
        assert!(validate_limit(0).is_err());
    }

    #[test]
    fn test_validate_patch() {
        assert_eq!(
            validate_patch(&ProductPatch::new()),
            Err(ValidationError::EmptyPatch)
        );
        assert!(validate_patch(&ProductPatch::new().description("")).is_ok());
        assert!(validate_patch(&ProductPatch::new().price(Decimal::ZERO)).is_ok());
        assert!(validate_patch(&ProductPatch::new().category(Category::Home)).is_ok());
        assert!(validate_patch(&ProductPatch::new().name(" ")).is_err());
        assert!(validate_patch(&ProductPatch::new().price(Decimal::new(-500, 2))).is_err());
        assert!(validate_patch(&ProductPatch::new().inventory(0)).is_ok());
        assert_eq!(
            validate_patch(&ProductPatch::new().inventory(-1)),
            Err(ValidationError::Negative {
                field: "inventory".to_string()
            })
        );
    }
}
