//! # catalog-core: Pure Domain Types for the Product Catalog
//!
//! This crate holds the catalog's domain types and validation rules as pure
//! code with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Catalog Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │             Calling application (HTTP, auth)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ catalog-core (THIS CRATE) ★                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌───────────┐                  │   │
//! │  │   │   types   │  │   query   │  │ validation│                  │   │
//! │  │   │  Product  │  │ ListQuery │  │   rules   │                  │   │
//! │  │   │  Category │  │  Filter   │  │   checks  │                  │   │
//! │  │   │  Patch    │  │  Sort     │  │           │                  │   │
//! │  │   └───────────┘  └───────────┘  └───────────┘                  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                  catalog-db (Database Layer)                    │   │
//! │  │        PostgreSQL queries, migrations, ProductRepository        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Product, Category, ProductPatch)
//! - [`query`] - Listing filters, sorts and pages
//! - [`error`] - Domain error types
//! - [`validation`] - Field and argument validation
//!
//! ## Example Usage
//!
//! ```rust
//! use catalog_core::{ListQuery, ProductFilter, SortDirection};
//!
//! let query = ListQuery::from_raw(10, 0, "price", "in_stock", "desc").unwrap();
//! assert_eq!(query.filter, Some(ProductFilter::InStock));
//! assert_eq!(query.sort.unwrap().direction, SortDirection::Desc);
//!
//! assert!(ListQuery::from_raw(10, 0, "", "nonexistent_category", "").is_err());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod query;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::ValidationError;
pub use query::*;
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Maximum characters in a product name.
pub const MAX_NAME_LENGTH: usize = 200;

/// Maximum characters in a product description.
pub const MAX_DESCRIPTION_LENGTH: usize = 2000;

/// Maximum characters in a fuzzy search query.
///
/// Trigram similarity against a very long query is meaningless and costly.
pub const MAX_SEARCH_QUERY_LENGTH: usize = 100;

/// Minimum similarity for a name or description match.
pub const TEXT_SIMILARITY_THRESHOLD: f32 = 0.1;

/// Minimum similarity for a category match.
///
/// Category names are short fixed tokens, so a low threshold would match
/// almost any query.
pub const CATEGORY_SIMILARITY_THRESHOLD: f32 = 0.4;
