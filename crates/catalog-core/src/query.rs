//! # Listing Parameters
//!
//! Typed filter, sort and paging parameters for product listings.
//!
//! ## Whitelisting
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  Raw tokens (from a query string)                                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ListQuery::from_raw(limit, offset, sort, filter, direction)           │
//! │       │                                                                 │
//! │       ├── filter "books"      → Some(ProductFilter::Category(Books))    │
//! │       ├── filter "in_stock"   → Some(ProductFilter::InStock)            │
//! │       ├── filter ""           → None                                    │
//! │       ├── filter "bogus"      → Err(InvalidFilter)                      │
//! │       │                                                                 │
//! │       ├── sort "price"/"name" → Some(Sort { field, direction })         │
//! │       ├── sort ""             → None                                    │
//! │       └── sort "bogus"        → Err(InvalidSort)                        │
//! │                                                                         │
//! │  Only the enum variants below ever reach SQL. Column names come from    │
//! │  `SortField::column`, never from caller input.                          │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::str::FromStr;

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::ValidationError;
use crate::types::{Category, Product};
use crate::validation::{validate_limit, ValidationResult};

/// Filter token selecting products with inventory on hand.
pub const IN_STOCK_FILTER: &str = "in_stock";

// =============================================================================
// Filter
// =============================================================================

/// Restriction applied on top of the `is_deleted = false` base predicate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProductFilter {
    /// `category = $n`
    Category(Category),
    /// `inventory > 0`
    InStock,
}

impl ProductFilter {
    /// Parses an optional filter token. Empty means "no filter".
    pub fn parse_optional(token: &str) -> ValidationResult<Option<Self>> {
        if token.is_empty() {
            return Ok(None);
        }
        token.parse().map(Some)
    }
}

impl FromStr for ProductFilter {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s == IN_STOCK_FILTER {
            return Ok(ProductFilter::InStock);
        }
        s.parse::<Category>()
            .map(ProductFilter::Category)
            .map_err(|_| ValidationError::InvalidFilter(s.to_string()))
    }
}

// =============================================================================
// Sort
// =============================================================================

/// Column a listing may be sorted by.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortField {
    Name,
    Price,
}

impl SortField {
    /// SQL column for this field.
    pub const fn column(&self) -> &'static str {
        match self {
            SortField::Name => "name",
            SortField::Price => "price",
        }
    }
}

impl FromStr for SortField {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "name" => Ok(SortField::Name),
            "price" => Ok(SortField::Price),
            other => Err(ValidationError::InvalidSort(other.to_string())),
        }
    }
}

/// Sort direction. Ascending unless explicitly `desc`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Asc,
    Desc,
}

impl SortDirection {
    /// Lenient parse: `"desc"` is descending, anything else ascending.
    pub fn from_token(token: &str) -> Self {
        if token == "desc" {
            SortDirection::Desc
        } else {
            SortDirection::Asc
        }
    }

    /// SQL keyword.
    pub const fn keyword(&self) -> &'static str {
        match self {
            SortDirection::Asc => "ASC",
            SortDirection::Desc => "DESC",
        }
    }
}

/// Caller-requested primary ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Sort {
    pub field: SortField,
    pub direction: SortDirection,
}

impl Sort {
    pub fn asc(field: SortField) -> Self {
        Sort {
            field,
            direction: SortDirection::Asc,
        }
    }

    pub fn desc(field: SortField) -> Self {
        Sort {
            field,
            direction: SortDirection::Desc,
        }
    }

    /// Parses an optional sort token plus direction. Empty sort means none;
    /// the direction is ignored in that case.
    pub fn parse_optional(sort: &str, direction: &str) -> ValidationResult<Option<Self>> {
        if sort.is_empty() {
            return Ok(None);
        }
        Ok(Some(Sort {
            field: sort.parse()?,
            direction: SortDirection::from_token(direction),
        }))
    }
}

// =============================================================================
// List Query
// =============================================================================

/// Validated parameters for one page of a product listing.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ListQuery {
    /// Maximum rows in the page (at least 1).
    pub limit: u32,
    /// Rows to skip. Zero means no OFFSET clause.
    pub offset: u32,
    pub sort: Option<Sort>,
    pub filter: Option<ProductFilter>,
}

impl ListQuery {
    /// First page of `limit` rows, unsorted and unfiltered.
    pub fn new(limit: u32) -> Self {
        ListQuery {
            limit,
            offset: 0,
            sort: None,
            filter: None,
        }
    }

    pub fn offset(mut self, offset: u32) -> Self {
        self.offset = offset;
        self
    }

    pub fn sort(mut self, sort: Sort) -> Self {
        self.sort = Some(sort);
        self
    }

    pub fn filter(mut self, filter: ProductFilter) -> Self {
        self.filter = Some(filter);
        self
    }

    /// Builds a query from raw string tokens.
    ///
    /// The filter is checked before the sort, so a request with both invalid
    /// reports the filter.
    pub fn from_raw(
        limit: u32,
        offset: u32,
        sort: &str,
        filter: &str,
        direction: &str,
    ) -> ValidationResult<Self> {
        let filter = ProductFilter::parse_optional(filter)?;
        let sort = Sort::parse_optional(sort, direction)?;
        let query = ListQuery {
            limit,
            offset,
            sort,
            filter,
        };
        query.validate()?;
        Ok(query)
    }

    /// Checks the paging bounds.
    pub fn validate(&self) -> ValidationResult<()> {
        validate_limit(self.limit)
    }
}

/// One page of a listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
#[ts(export)]
pub struct ListPage {
    pub products: Vec<Product>,
    /// Size of the whole filtered set, independent of paging.
    pub total: u64,
    /// Offset to request for the following page.
    pub next_offset: u64,
}

impl ListPage {
    /// Assembles a page, deriving `next_offset` from the rows returned.
    pub fn new(products: Vec<Product>, total: u64, offset: u32) -> Self {
        let next_offset = u64::from(offset) + products.len() as u64;
        ListPage {
            products,
            total,
            next_offset,
        }
    }

    /// Checks whether rows remain past this page.
    pub fn has_more(&self) -> bool {
        self.next_offset < self.total
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filter_tokens() {
        assert_eq!(
            ProductFilter::parse_optional("toys").unwrap(),
            Some(ProductFilter::Category(Category::Toys))
        );
        assert_eq!(
            ProductFilter::parse_optional("in_stock").unwrap(),
            Some(ProductFilter::InStock)
        );
        assert_eq!(ProductFilter::parse_optional("").unwrap(), None);
    }

    #[test]
    fn test_unknown_filter_is_rejected() {
        let err = ProductFilter::parse_optional("nonexistent_category").unwrap_err();
        assert_eq!(
            err,
            ValidationError::InvalidFilter("nonexistent_category".to_string())
        );
    }

    #[test]
    fn test_sort_tokens() {
        assert_eq!(
            Sort::parse_optional("price", "desc").unwrap(),
            Some(Sort::desc(SortField::Price))
        );
        assert_eq!(
            Sort::parse_optional("name", "").unwrap(),
            Some(Sort::asc(SortField::Name))
        );
        assert_eq!(Sort::parse_optional("", "desc").unwrap(), None);
        assert!(matches!(
            Sort::parse_optional("inventory", "asc"),
            Err(ValidationError::InvalidSort(_))
        ));
    }

    #[test]
    fn test_direction_defaults_to_ascending() {
        assert_eq!(SortDirection::from_token("desc"), SortDirection::Desc);
        assert_eq!(SortDirection::from_token("DESC"), SortDirection::Asc);
        assert_eq!(SortDirection::from_token("sideways"), SortDirection::Asc);
        assert_eq!(SortDirection::from_token(""), SortDirection::Asc);
    }

    #[test]
    fn test_from_raw_checks_filter_first() {
        let err = ListQuery::from_raw(10, 0, "bogus", "bogus", "").unwrap_err();
        assert!(matches!(err, ValidationError::InvalidFilter(_)));
    }

    #[test]
    fn test_from_raw_rejects_zero_limit() {
        assert!(ListQuery::from_raw(0, 0, "", "", "").is_err());
    }

    #[test]
    fn test_from_raw_example() {
        let query = ListQuery::from_raw(10, 0, "price", "in_stock", "asc").unwrap();
        assert_eq!(
            query,
            ListQuery::new(10)
                .sort(Sort::asc(SortField::Price))
                .filter(ProductFilter::InStock)
        );
    }

    #[test]
    fn test_page_next_offset() {
        let page = ListPage::new(Vec::new(), 15, 10);
        assert_eq!(page.next_offset, 10);
        assert!(page.has_more());

        let page = ListPage::new(Vec::new(), 0, 0);
        assert_eq!(page.next_offset, 0);
        assert!(!page.has_more());
    }
}
