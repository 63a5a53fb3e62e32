//! # Database Pool Management
//!
//! Connection pool creation for the read/write split.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Read / Write Pools                                 │
//! │                                                                         │
//! │  DbConfig::from_env() ← DATABASE_URL, DATABASE_READ_URL                │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::connect(config).await ← Create pools + run migrations       │
//! │       │                                                                 │
//! │       ├──────────────────────────────┐                                  │
//! │       ▼                              ▼                                  │
//! │  ┌──────────────────┐       ┌──────────────────┐                       │
//! │  │   write PgPool   │       │   read PgPool    │                       │
//! │  │  (primary)       │       │  (replica, or a  │                       │
//! │  │  UPDATE ...      │       │   clone of write)│                       │
//! │  └──────────────────┘       └──────────────────┘                       │
//! │       ▲                              ▲                                  │
//! │       └───────── ProductRepository ──┘                                  │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Migrations always run against the write pool.

use std::str::FromStr;

use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::PgPool;
use tracing::{debug, info};

use crate::config::DbConfig;
use crate::error::{DbError, DbResult};
use crate::migrations;
use crate::repository::product::ProductRepository;

// =============================================================================
// Database
// =============================================================================

/// Main database handle providing repository access.
///
/// Cloning is cheap: both pools are reference counted.
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::connect(DbConfig::from_env()?).await?;
/// let page = db.products().list(20, 0, "price", "in_stock", "asc").await?;
/// ```
#[derive(Debug, Clone)]
pub struct Database {
    /// Pool for queries.
    read: PgPool,

    /// Pool for mutations and migrations.
    write: PgPool,
}

impl Database {
    /// Creates the connection pools.
    ///
    /// ## What This Does
    /// 1. Connects the write pool to `write_url`
    /// 2. Connects a read pool to `read_url`, or shares the write pool
    /// 3. Runs migrations (if enabled)
    pub async fn connect(config: DbConfig) -> DbResult<Self> {
        info!(
            read_replica = config.has_read_replica(),
            schema = ?config.schema,
            "Initializing database connection"
        );

        let write = build_pool(&config.write_url, &config).await?;

        let read = match config.read_url.as_deref() {
            Some(url) if config.has_read_replica() => build_pool(url, &config).await?,
            _ => write.clone(),
        };

        info!(
            max_connections = config.max_connections,
            "Database pools created"
        );

        let db = Database { read, write };

        if config.run_migrations {
            db.run_migrations().await?;
        }

        Ok(db)
    }

    /// Wraps pools created elsewhere. No migrations are run.
    pub fn from_pools(read: PgPool, write: PgPool) -> Self {
        Database { read, write }
    }

    /// Runs database migrations against the write pool.
    ///
    /// Idempotent: safe to run multiple times.
    pub async fn run_migrations(&self) -> DbResult<()> {
        info!("Running database migrations");
        migrations::run_migrations(&self.write).await?;
        info!("Migrations complete");
        Ok(())
    }

    /// Returns the read pool.
    pub fn read_pool(&self) -> &PgPool {
        &self.read
    }

    /// Returns the write pool.
    ///
    /// For advanced statements not covered by repositories (seeding, fixtures).
    pub fn write_pool(&self) -> &PgPool {
        &self.write
    }

    /// Returns the product repository.
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.read.clone(), self.write.clone())
    }

    /// Closes both pools.
    ///
    /// After calling close, all repository operations will fail.
    pub async fn close(&self) {
        info!("Closing database connection pools");
        self.write.close().await;
        self.read.close().await;
    }

    /// Checks if both pools can execute queries.
    pub async fn health_check(&self) -> bool {
        let write_ok = sqlx::query("SELECT 1").execute(&self.write).await.is_ok();
        let read_ok = sqlx::query("SELECT 1").execute(&self.read).await.is_ok();
        debug!(write_ok, read_ok, "Health check");
        write_ok && read_ok
    }
}

/// Builds one pool from a connection string and the shared settings.
async fn build_pool(url: &str, config: &DbConfig) -> DbResult<PgPool> {
    let mut connect_options =
        PgConnectOptions::from_str(url).map_err(|e| DbError::ConnectionFailed(e.to_string()))?;

    if let Some(schema) = &config.schema {
        connect_options =
            connect_options.options([("search_path", format!("{},public", schema))]);
    }

    debug!("Connection options configured");

    PgPoolOptions::new()
        .max_connections(config.max_connections)
        .min_connections(config.min_connections)
        .acquire_timeout(config.connect_timeout)
        .idle_timeout(Some(config.idle_timeout))
        .connect_with(connect_options)
        .await
        .map_err(|e| DbError::ConnectionFailed(e.to_string()))
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_malformed_url_is_connection_failure() {
        let config = DbConfig::new("not a url").run_migrations(false);
        let err = Database::connect(config).await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionFailed(_)));
        assert!(err.is_storage_failure());
    }

    #[tokio::test]
    async fn test_from_pools_keeps_read_and_write_handles() {
        let pool = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/catalog")
            .unwrap();
        let shared = Database::from_pools(pool.clone(), pool);
        shared.read_pool().close().await;
        assert!(shared.write_pool().is_closed());

        let read = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/catalog_replica")
            .unwrap();
        let write = PgPoolOptions::new()
            .connect_lazy("postgres://localhost/catalog")
            .unwrap();
        let split = Database::from_pools(read, write);
        split.read_pool().close().await;
        assert!(split.read_pool().is_closed());
        assert!(!split.write_pool().is_closed());

        split.close().await;
        assert!(split.write_pool().is_closed());
    }
}
