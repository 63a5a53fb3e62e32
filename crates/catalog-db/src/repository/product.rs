//! # Product Repository
//!
//! Database operations for products.
//!
//! ## Key Operations
//! - Paged listing with whitelisted filter and sort
//! - Lookup, partial update, inventory update, soft delete
//! - Fuzzy search using pg_trgm `similarity()`
//!
//! ## Listing Order
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  ORDER BY [price|name ASC|DESC,]  updated_at DESC,  id ASC             │
//! │            └── requested ──────┘  └──── always appended ────┘           │
//! │                                                                         │
//! │  The trailing id makes every row's position unique, so walking         │
//! │  offsets 0, 10, 20, ... visits each live row exactly once.             │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Fuzzy Search
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  User types: "elektronic"                                              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  similarity(name, q)                        >= 0.1  ─┐                  │
//! │  similarity(description, q)                 >= 0.1  ─┼─ any → match     │
//! │  similarity(category_to_text(category), q)  >= 0.4  ─┘                  │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ORDER BY GREATEST(all three) DESC  (best field wins, no blending)     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Reads go to the read pool, writes to the write pool. Nothing here runs in
//! a transaction: `update` writes then re-reads, and a concurrent writer or a
//! lagging replica can show through in the returned row.

use catalog_core::validation::{validate_inventory, validate_patch, validate_search_query};
use catalog_core::{
    ListPage, ListQuery, Product, ProductFilter, ProductPatch, Sort,
    CATEGORY_SIMILARITY_THRESHOLD, TEXT_SIMILARITY_THRESHOLD,
};
use sqlx::{PgPool, Postgres, QueryBuilder};
use tracing::debug;

use crate::error::{DbError, DbResult};

const ENTITY: &str = "Product";

/// Column list shared by every row-returning statement.
const PRODUCT_COLUMNS: &str =
    "id, name, description, category, price, inventory, is_deleted, created_at, updated_at";

/// Tiebreak appended to every listing order.
const STABLE_ORDER: &str = "updated_at DESC, id ASC";

const SEARCH_SQL: &str = r#"
    SELECT id, name, description, category, price, inventory, is_deleted, created_at, updated_at
    FROM products
    WHERE
        (
            similarity(name, $1) >= $2 OR
            similarity(description, $1) >= $2 OR
            similarity(category_to_text(category), $1) >= $3
        )
        AND is_deleted = FALSE
    ORDER BY
        GREATEST(
            similarity(name, $1),
            similarity(description, $1),
            similarity(category_to_text(category), $1)
        ) DESC,
        id ASC
"#;

/// Repository for product database operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ProductRepository::new(read_pool, write_pool);
///
/// let page = repo.list(10, 0, "price", "in_stock", "asc").await?;
/// let product = repo.get_by_id(42).await?;
/// repo.update_inventory(42, 7).await?;
/// ```
#[derive(Debug, Clone)]
pub struct ProductRepository {
    read: PgPool,
    write: PgPool,
}

impl ProductRepository {
    /// Creates a new ProductRepository over a read pool and a write pool.
    ///
    /// Passing the same pool twice is fine when there is no replica.
    pub fn new(read: PgPool, write: PgPool) -> Self {
        ProductRepository { read, write }
    }

    /// Lists live products from raw filter/sort tokens.
    ///
    /// ## Arguments
    /// * `limit` - Page size (at least 1)
    /// * `offset` - Rows to skip
    /// * `sort` - `""`, `"name"` or `"price"`
    /// * `filter` - `""`, a category token, or `"in_stock"`
    /// * `direction` - `"desc"` for descending, anything else ascending
    ///
    /// ## Returns
    /// * `Ok(ListPage)` - rows, filtered total, next offset
    /// * `Err(DbError::InvalidArgument)` - unknown filter or sort
    pub async fn list(
        &self,
        limit: u32,
        offset: u32,
        sort: &str,
        filter: &str,
        direction: &str,
    ) -> DbResult<ListPage> {
        let query = ListQuery::from_raw(limit, offset, sort, filter, direction)?;
        self.list_with(&query).await
    }

    /// Lists live products for an already-typed query.
    pub async fn list_with(&self, query: &ListQuery) -> DbResult<ListPage> {
        query.validate()?;

        debug!(
            limit = query.limit,
            offset = query.offset,
            sort = ?query.sort,
            filter = ?query.filter,
            "Listing products"
        );

        let mut count = build_count_query(query.filter);
        let total: i64 = count.build_query_scalar().fetch_one(&self.read).await?;

        let mut page = build_list_query(query);
        let products: Vec<Product> = page.build_query_as().fetch_all(&self.read).await?;

        debug!(count = products.len(), total, "Listing returned products");
        Ok(ListPage::new(products, total.max(0) as u64, query.offset))
    }

    /// Gets a product by its ID, including soft-deleted rows.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Product found
    /// * `Err(DbError::NotFound)` - No row with that ID
    pub async fn get_by_id(&self, id: i64) -> DbResult<Product> {
        sqlx::query_as::<_, Product>(&format!(
            "SELECT {} FROM products WHERE id = $1",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.read)
        .await?
        .ok_or_else(|| DbError::not_found(ENTITY, id))
    }

    /// Applies a partial update and returns the row as now persisted.
    ///
    /// Only fields present on `patch` are written. Timestamps are left to
    /// the database trigger.
    ///
    /// ## Returns
    /// * `Ok(Product)` - Re-read from the read pool after the write
    /// * `Err(DbError::InvalidArgument)` - Empty or invalid patch
    /// * `Err(DbError::NotFound)` - No row with that ID
    pub async fn update(&self, id: i64, patch: &ProductPatch) -> DbResult<Product> {
        validate_patch(patch)?;

        debug!(id, ?patch, "Updating product");

        let mut statement = build_update_query(id, patch);
        let result = statement.build().execute(&self.write).await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        self.get_by_id(id).await
    }

    /// Sets the absolute inventory count. No other column is touched.
    ///
    /// ## Returns
    /// * `Ok(())` - Update successful
    /// * `Err(DbError::InvalidArgument)` - Negative count
    /// * `Err(DbError::NotFound)` - No row with that ID
    pub async fn update_inventory(&self, id: i64, inventory: i32) -> DbResult<()> {
        validate_inventory(inventory)?;

        debug!(id, inventory, "Updating inventory");

        let result = sqlx::query("UPDATE products SET inventory = $2 WHERE id = $1")
            .bind(id)
            .bind(inventory)
            .execute(&self.write)
            .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    /// Soft-deletes a product by setting is_deleted = true.
    ///
    /// Not idempotent: a row that is already deleted is not matched, so a
    /// second call reports NotFound.
    pub async fn delete(&self, id: i64) -> DbResult<()> {
        debug!(id, "Soft-deleting product");

        let result =
            sqlx::query("UPDATE products SET is_deleted = TRUE WHERE id = $1 AND is_deleted = FALSE")
                .bind(id)
                .execute(&self.write)
                .await?;

        if result.rows_affected() == 0 {
            return Err(DbError::not_found(ENTITY, id));
        }

        Ok(())
    }

    /// Fuzzy-searches live products by name, description and category.
    ///
    /// Results are ranked by the best-matching field. There is no limit on
    /// the number of rows returned.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let products = repo.search("wireles hedphones").await?;
    /// ```
    pub async fn search(&self, query: &str) -> DbResult<Vec<Product>> {
        let query = validate_search_query(query)?;

        debug!(query = %query, "Searching products");

        if query.is_empty() {
            return Ok(Vec::new());
        }

        let products = sqlx::query_as::<_, Product>(SEARCH_SQL)
            .bind(&query)
            .bind(TEXT_SIMILARITY_THRESHOLD)
            .bind(CATEGORY_SIMILARITY_THRESHOLD)
            .fetch_all(&self.read)
            .await?;

        debug!(count = products.len(), "Search returned products");
        Ok(products)
    }

    /// Counts live (not soft-deleted) products.
    pub async fn count_active(&self) -> DbResult<i64> {
        let count: i64 =
            sqlx::query_scalar("SELECT COUNT(*) FROM products WHERE is_deleted = FALSE")
                .fetch_one(&self.read)
                .await?;

        Ok(count)
    }
}

// =============================================================================
// Query Building
// =============================================================================

/// Appends the base predicate plus the optional filter.
fn push_predicate(qb: &mut QueryBuilder<'static, Postgres>, filter: Option<ProductFilter>) {
    qb.push(" WHERE is_deleted = FALSE");

    match filter {
        Some(ProductFilter::Category(category)) => {
            qb.push(" AND category = ").push_bind(category);
        }
        Some(ProductFilter::InStock) => {
            qb.push(" AND inventory > 0");
        }
        None => {}
    }
}

fn build_count_query(filter: Option<ProductFilter>) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("SELECT COUNT(*) FROM products");
    push_predicate(&mut qb, filter);
    qb
}

fn build_list_query(query: &ListQuery) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new(format!("SELECT {} FROM products", PRODUCT_COLUMNS));
    push_predicate(&mut qb, query.filter);

    qb.push(" ORDER BY ");
    if let Some(Sort { field, direction }) = query.sort {
        qb.push(field.column())
            .push(" ")
            .push(direction.keyword())
            .push(", ");
    }
    qb.push(STABLE_ORDER);

    qb.push(" LIMIT ").push_bind(i64::from(query.limit));

    // OFFSET 0 is never sent
    if query.offset > 0 {
        qb.push(" OFFSET ").push_bind(i64::from(query.offset));
    }

    qb
}

/// Builds `UPDATE products SET <present fields> WHERE id = $n`.
///
/// Callers must reject empty patches first.
fn build_update_query(id: i64, patch: &ProductPatch) -> QueryBuilder<'static, Postgres> {
    let mut qb = QueryBuilder::new("UPDATE products SET ");

    {
        let mut set = qb.separated(", ");
        if let Some(name) = &patch.name {
            set.push("name = ").push_bind_unseparated(name.clone());
        }
        if let Some(description) = &patch.description {
            set.push("description = ")
                .push_bind_unseparated(description.clone());
        }
        if let Some(category) = patch.category {
            set.push("category = ").push_bind_unseparated(category);
        }
        if let Some(price) = patch.price {
            set.push("price = ").push_bind_unseparated(price);
        }
        if let Some(inventory) = patch.inventory {
            set.push("inventory = ").push_bind_unseparated(inventory);
        }
    }

    qb.push(" WHERE id = ").push_bind(id);
    qb
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use catalog_core::{Category, SortField};
    use rust_decimal::Decimal;

    #[test]
    fn test_list_query_default_order() {
        let qb = build_list_query(&ListQuery::new(10));
        assert_eq!(
            qb.sql(),
            format!(
                "SELECT {} FROM products WHERE is_deleted = FALSE \
                 ORDER BY updated_at DESC, id ASC LIMIT $1",
                PRODUCT_COLUMNS
            )
        );
    }

    #[test]
    fn test_list_query_sorted_and_filtered() {
        let query = ListQuery::new(10)
            .offset(20)
            .sort(Sort::desc(SortField::Price))
            .filter(ProductFilter::Category(Category::Books));
        let qb = build_list_query(&query);
        let sql = qb.sql();

        assert!(sql.contains("WHERE is_deleted = FALSE AND category = $1"));
        assert!(sql.contains("ORDER BY price DESC, updated_at DESC, id ASC"));
        assert!(sql.ends_with("LIMIT $2 OFFSET $3"));
    }

    #[test]
    fn test_list_query_omits_zero_offset() {
        let query = ListQuery::new(5)
            .sort(Sort::asc(SortField::Name))
            .filter(ProductFilter::InStock);
        let qb = build_list_query(&query);
        let sql = qb.sql();

        assert!(sql.contains("AND inventory > 0"));
        assert!(sql.contains("ORDER BY name ASC, updated_at DESC, id ASC"));
        assert!(!sql.contains("OFFSET"));
    }

    #[test]
    fn test_count_query_shares_predicate() {
        let qb = build_count_query(Some(ProductFilter::InStock));
        assert_eq!(
            qb.sql(),
            "SELECT COUNT(*) FROM products WHERE is_deleted = FALSE AND inventory > 0"
        );

        let qb = build_count_query(None);
        assert!(!qb.sql().contains("ORDER BY"));
    }

    #[test]
    fn test_update_query_only_present_fields() {
        let patch = ProductPatch::new().name("Desk Lamp").price(Decimal::ZERO);
        let qb = build_update_query(3, &patch);
        assert_eq!(
            qb.sql(),
            "UPDATE products SET name = $1, price = $2 WHERE id = $3"
        );

        let qb = build_update_query(3, &ProductPatch::new().inventory(12));
        assert_eq!(qb.sql(), "UPDATE products SET inventory = $1 WHERE id = $2");
    }

    #[test]
    fn test_update_query_never_sets_timestamps() {
        let now = chrono::Utc::now();
        let product = Product {
            id: 1,
            name: "Kettle".to_string(),
            description: "1.7L".to_string(),
            category: Category::Home,
            price: Decimal::new(2999, 2),
            inventory: 4,
            is_deleted: false,
            created_at: now,
            updated_at: now,
        };
        let qb = build_update_query(product.id, &ProductPatch::from(&product));
        let sql = qb.sql();

        assert_eq!(
            sql,
            "UPDATE products SET name = $1, description = $2, category = $3, price = $4, \
             inventory = $5 WHERE id = $6"
        );
        assert!(!sql.contains("created_at"));
        assert!(!sql.contains("updated_at"));
        assert!(!sql.contains("is_deleted"));
    }

    #[test]
    fn test_search_sql_thresholds_and_ranking() {
        assert!(SEARCH_SQL.contains("similarity(category_to_text(category), $1) >= $3"));
        assert!(SEARCH_SQL.contains("AND is_deleted = FALSE"));
        assert!(SEARCH_SQL.contains("GREATEST("));
        assert!(TEXT_SIMILARITY_THRESHOLD < CATEGORY_SIMILARITY_THRESHOLD);
    }
}
