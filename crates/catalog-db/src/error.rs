//! # Database Error Types
//!
//! Error types for database operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  ValidationError (catalog-core)     PostgreSQL Error (sqlx::Error)     │
//! │       │                                   │                             │
//! │       ▼                                   ▼                             │
//! │  DbError::InvalidArgument           DbError storage variants           │
//! │       │                                   │                             │
//! │       └──────────────┬────────────────────┘                             │
//! │                      ▼                                                  │
//! │  Calling layer decides status codes and retries                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Nothing here retries or swallows an error.

use catalog_core::ValidationError;
use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// A filter, sort or argument was rejected before reaching SQL.
    #[error("Invalid argument: {0}")]
    InvalidArgument(#[from] ValidationError),

    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - `get_by_id` finds no row
    /// - An update or soft delete affected zero rows
    /// - Deleting a row that is already soft-deleted
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// A table constraint rejected the write.
    ///
    /// ## When This Occurs
    /// - CHECK (inventory >= 0) / CHECK (price >= 0)
    /// - Any UNIQUE or FOREIGN KEY violation
    #[error("Constraint {constraint} violated: {message}")]
    ConstraintViolation { constraint: String, message: String },

    /// Database connection failed.
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Migration failed.
    #[error("Migration failed: {0}")]
    MigrationFailed(String),

    /// Pool exhausted (all connections in use past the acquire timeout).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Any other engine error, carried unchanged.
    #[error("Query failed: {0}")]
    Query(#[source] sqlx::Error),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Checks if the error came from the storage engine rather than from
    /// the caller's input or a missing row.
    pub fn is_storage_failure(&self) -> bool {
        !matches!(self, DbError::InvalidArgument(_) | DbError::NotFound { .. })
    }

    /// Checks if the error is a NotFound.
    pub fn is_not_found(&self) -> bool {
        matches!(self, DbError::NotFound { .. })
    }
}

/// PostgreSQL SQLSTATE class for integrity constraint violations.
const INTEGRITY_CONSTRAINT_CLASS: &str = "23";

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound      → DbError::NotFound
/// sqlx::Error::Database (23xxx) → DbError::ConstraintViolation
/// sqlx::Error::PoolTimedOut     → DbError::PoolExhausted
/// sqlx::Error::PoolClosed       → DbError::ConnectionFailed
/// Other                         → DbError::Query
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::not_found("Record", "unknown"),

            sqlx::Error::Database(ref db_err)
                if db_err
                    .code()
                    .is_some_and(|code| code.starts_with(INTEGRITY_CONSTRAINT_CLASS)) =>
            {
                DbError::ConstraintViolation {
                    constraint: db_err.constraint().unwrap_or("unknown").to_string(),
                    message: db_err.message().to_string(),
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::ConnectionFailed("Pool is closed".to_string()),

            other => DbError::Query(other),
        }
    }
}

impl From<sqlx::migrate::MigrateError> for DbError {
    fn from(err: sqlx::migrate::MigrateError) -> Self {
        DbError::MigrationFailed(err.to_string())
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_not_found_message() {
        let err = DbError::not_found("Product", 42);
        assert_eq!(err.to_string(), "Product not found: 42");
        assert!(err.is_not_found());
        assert!(!err.is_storage_failure());
    }

    #[test]
    fn test_validation_maps_to_invalid_argument() {
        let err: DbError = ValidationError::InvalidFilter("gadgets".to_string()).into();
        assert!(matches!(err, DbError::InvalidArgument(_)));
        assert_eq!(
            err.to_string(),
            "Invalid argument: invalid filter applied: gadgets"
        );
        assert!(!err.is_storage_failure());
    }

    #[test]
    fn test_sqlx_error_mapping() {
        assert!(DbError::from(sqlx::Error::RowNotFound).is_not_found());
        assert!(matches!(
            DbError::from(sqlx::Error::PoolTimedOut),
            DbError::PoolExhausted
        ));
        assert!(matches!(
            DbError::from(sqlx::Error::PoolClosed),
            DbError::ConnectionFailed(_)
        ));

        let err = DbError::from(sqlx::Error::Protocol("unexpected message".to_string()));
        assert!(matches!(err, DbError::Query(_)));
        assert!(err.is_storage_failure());
    }
}
