//! # Domain Types
//!
//! Core domain types of the product catalog.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌─────────────────┐   ┌─────────────────┐   ┌─────────────────┐       │
//! │  │    Product      │   │    Category     │   │  ProductPatch   │       │
//! │  │  ─────────────  │   │  ─────────────  │   │  ─────────────  │       │
//! │  │  id (BIGINT)    │   │  Electronics    │   │  name?          │       │
//! │  │  name           │   │  Clothing       │   │  description?   │       │
//! │  │  category       │   │  Home           │   │  category?      │       │
//! │  │  price (NUMERIC)│   │  Books          │   │  price?         │       │
//! │  │  inventory      │   │  Toys           │   └─────────────────┘       │
//! │  │  is_deleted     │   │  Misc           │                              │
//! │  └─────────────────┘   └─────────────────┘                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Server-Managed Fields
//! `id`, `created_at` and `updated_at` are assigned by PostgreSQL. Nothing in
//! this workspace writes them directly.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;

// =============================================================================
// Category
// =============================================================================

/// Product category.
///
/// Stored as the PostgreSQL enum `product_category`. The lowercase token is
/// both the database label and the accepted `filter` value of a listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(
    feature = "sqlx",
    sqlx(type_name = "product_category", rename_all = "lowercase")
)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Category {
    Electronics,
    Clothing,
    Home,
    Books,
    Toys,
    Misc,
}

impl Category {
    /// Every category, in declaration order.
    pub const ALL: [Category; 6] = [
        Category::Electronics,
        Category::Clothing,
        Category::Home,
        Category::Books,
        Category::Toys,
        Category::Misc,
    ];

    /// Returns the lowercase token used by the database and by filters.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Category::Electronics => "electronics",
            Category::Clothing => "clothing",
            Category::Home => "home",
            Category::Books => "books",
            Category::Toys => "toys",
            Category::Misc => "misc",
        }
    }

    /// Returns the human-readable name.
    ///
    /// Must stay in sync with the `category_to_text` SQL function, which is
    /// what fuzzy search actually scores against.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Category::Electronics => "Electronics",
            Category::Clothing => "Clothing",
            Category::Home => "Home",
            Category::Books => "Books",
            Category::Toys => "Toys",
            Category::Misc => "Miscellaneous",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = ValidationError;

    /// Parses an exact lowercase token (`"books"`, `"misc"`, ...).
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .into_iter()
            .find(|c| c.as_str() == s)
            .ok_or_else(|| ValidationError::InvalidFilter(s.to_string()))
    }
}

// =============================================================================
// Product
// =============================================================================

/// A product row as persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[cfg_attr(feature = "sqlx", derive(sqlx::FromRow))]
#[ts(export)]
pub struct Product {
    /// Primary key, assigned by the database.
    pub id: i64,

    /// Display name.
    pub name: String,

    /// Free-form description (may be empty).
    pub description: String,

    pub category: Category,

    /// Unit price (NUMERIC(12,2)).
    #[ts(as = "String")]
    pub price: Decimal,

    /// Units on hand. Never negative.
    pub inventory: i32,

    /// Soft-delete flag. Once set it is never cleared.
    pub is_deleted: bool,

    #[ts(as = "String")]
    pub created_at: DateTime<Utc>,

    #[ts(as = "String")]
    pub updated_at: DateTime<Utc>,
}

impl Product {
    /// Checks if at least one unit is on hand.
    #[inline]
    pub fn in_stock(&self) -> bool {
        self.inventory > 0
    }
}

// =============================================================================
// Product Patch
// =============================================================================

/// A partial update of a product's general fields.
///
/// ## Absent vs. Zero
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────┐
/// │  price: None            → column untouched                          │
/// │  price: Some(0.00)      → price set to 0.00 (free item)             │
/// │  description: Some("")  → description cleared                       │
/// │  inventory: Some(0)     → marked out of stock                       │
/// └─────────────────────────────────────────────────────────────────────┘
/// ```
///
/// Soft delete is one-way and only reachable through the repository's
/// delete operation, so `is_deleted` never appears here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ProductPatch {
    pub name: Option<String>,
    pub description: Option<String>,
    pub category: Option<Category>,
    #[ts(as = "Option<String>")]
    pub price: Option<Decimal>,
    pub inventory: Option<i32>,
}

impl ProductPatch {
    /// Creates an empty patch.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the name.
    pub fn name(mut self, name: impl Into<String>) -> Self {
        self.name = Some(name.into());
        self
    }

    /// Sets the description.
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Sets the category.
    pub fn category(mut self, category: Category) -> Self {
        self.category = Some(category);
        self
    }

    /// Sets the price.
    pub fn price(mut self, price: Decimal) -> Self {
        self.price = Some(price);
        self
    }

    /// Sets the inventory count.
    pub fn inventory(mut self, inventory: i32) -> Self {
        self.inventory = Some(inventory);
        self
    }

    /// Checks if the patch would change nothing.
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.description.is_none()
            && self.category.is_none()
            && self.price.is_none()
            && self.inventory.is_none()
    }
}

/// Full replacement of every caller-writable field from an existing product.
impl From<&Product> for ProductPatch {
    fn from(product: &Product) -> Self {
        ProductPatch {
            name: Some(product.name.clone()),
            description: Some(product.description.clone()),
            category: Some(product.category),
            price: Some(product.price),
            inventory: Some(product.inventory),
        }
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_category_tokens_round_trip() {
        for category in Category::ALL {
            assert_eq!(category.as_str().parse::<Category>().unwrap(), category);
        }
    }

    #[test]
    fn test_category_rejects_display_name() {
        assert!("Electronics".parse::<Category>().is_err());
        assert!("miscellaneous".parse::<Category>().is_err());
        assert!("".parse::<Category>().is_err());
    }

    #[test]
    fn test_category_serializes_lowercase() {
        let json = serde_json::to_string(&Category::Misc).unwrap();
        assert_eq!(json, "\"misc\"");
        assert_eq!(Category::Misc.display_name(), "Miscellaneous");
    }

    #[test]
    fn test_patch_builder() {
        let patch = ProductPatch::new().name("Desk Lamp").price(Decimal::ZERO);
        assert_eq!(patch.name.as_deref(), Some("Desk Lamp"));
        assert_eq!(patch.price, Some(Decimal::ZERO));
        assert!(patch.category.is_none());
        assert!(!patch.is_empty());
        assert!(ProductPatch::new().is_empty());
        assert!(!ProductPatch::new().inventory(0).is_empty());
    }

    #[test]
    fn test_patch_from_product_covers_all_fields() {
        let now = Utc::now();
        let product = Product {
            id: 7,
            name: "Paperback".to_string(),
            description: String::new(),
            category: Category::Books,
            price: Decimal::new(1299, 2),
            inventory: 0,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };

        let patch = ProductPatch::from(&product);
        assert_eq!(patch.description.as_deref(), Some(""));
        assert_eq!(patch.category, Some(Category::Books));
        assert_eq!(patch.price, Some(Decimal::new(1299, 2)));
        assert_eq!(patch.inventory, Some(0));
        assert!(!product.in_stock());
    }
}
