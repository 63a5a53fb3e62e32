//! Shared fixtures for integration tests.
//!
//! Every test gets its own schema so listing totals only see that test's rows.
//! `DATABASE_URL` must point at a PostgreSQL server where the role may create
//! schemas (and `pg_trgm`, if it is not installed yet).

#![allow(dead_code)]

use catalog_core::{Category, Product};
use catalog_db::{Database, DbConfig};
use rust_decimal::Decimal;
use sqlx::{Connection, PgConnection};
use tokio::sync::OnceCell;
use uuid::Uuid;

static EXTENSION: OnceCell<()> = OnceCell::const_new();

fn database_url() -> String {
    std::env::var("DATABASE_URL").expect("DATABASE_URL must be set for integration tests")
}

/// Installs pg_trgm into `public` once per test run, so every test schema
/// resolves `similarity()` through its search path.
async fn ensure_extension(url: &str) {
    EXTENSION
        .get_or_init(|| async {
            let mut conn = PgConnection::connect(url).await.unwrap();
            sqlx::query("CREATE EXTENSION IF NOT EXISTS pg_trgm SCHEMA public")
                .execute(&mut conn)
                .await
                .unwrap();
            conn.close().await.unwrap();
        })
        .await;
}

/// Connects to a fresh, fully migrated schema.
pub async fn test_db() -> Database {
    let url = database_url();
    ensure_extension(&url).await;

    let schema = format!("catalog_test_{}", Uuid::new_v4().simple());
    let mut conn = PgConnection::connect(&url).await.unwrap();
    sqlx::query(&format!("CREATE SCHEMA {}", schema))
        .execute(&mut conn)
        .await
        .unwrap();
    conn.close().await.unwrap();

    let config = DbConfig::new(url).schema(schema).max_connections(2);
    Database::connect(config).await.unwrap()
}

/// Inserts a row the way an upstream writer would.
pub async fn insert_product(
    db: &Database,
    name: &str,
    description: &str,
    category: Category,
    price: Decimal,
    inventory: i32,
) -> Product {
    sqlx::query_as::<_, Product>(
        r#"
        INSERT INTO products (name, description, category, price, inventory)
        VALUES ($1, $2, $3, $4, $5)
        RETURNING id, name, description, category, price, inventory, is_deleted, created_at, updated_at
        "#,
    )
    .bind(name)
    .bind(description)
    .bind(category)
    .bind(price)
    .bind(inventory)
    .fetch_one(db.write_pool())
    .await
    .unwrap()
}

/// Price helper: `cents(1299)` is 12.99.
pub fn cents(value: i64) -> Decimal {
    Decimal::new(value, 2)
}

/// Counts every row, deleted or not.
pub async fn count_all(db: &Database) -> i64 {
    sqlx::query_scalar("SELECT COUNT(*) FROM products")
        .fetch_one(db.read_pool())
        .await
        .unwrap()
}
