//! # Database Error Types
//!
//! Error types for store operations.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Propagation                                    │
//! │                                                                         │
//! │  SQLite Error (sqlx::Error)                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbError (this module) ← Adds context and categorization               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ApiError (in vinicola-app) ← code + message for the view              │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Session keeps its screen and shows the message                        │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

/// Database operation errors.
#[derive(Debug, Error)]
pub enum DbError {
    /// Entity not found in database.
    ///
    /// ## When This Occurs
    /// - Updating a product whose id was deleted or never assigned
    #[error("{entity} not found: {id}")]
    NotFound { entity: String, id: String },

    /// Primary key or UNIQUE constraint violation.
    ///
    /// ## When This Occurs
    /// - Registering an email that already exists
    #[error("Duplicate {field}: '{value}' already exists")]
    DuplicateKey { field: String, value: String },

    /// Underlying storage could not be opened or reached.
    ///
    /// ## When This Occurs
    /// - Database file can't be created (permissions, missing directory)
    /// - Disk full
    /// - Pool already closed
    #[error("Store unavailable: {0}")]
    StoreUnavailable(String),

    /// Schema bootstrap or recreation failed.
    #[error("Schema setup failed: {0}")]
    SchemaFailed(String),

    /// Query execution failed.
    #[error("Query failed: {0}")]
    QueryFailed(String),

    /// Transaction failed.
    #[error("Transaction failed: {0}")]
    TransactionFailed(String),

    /// Pool exhausted (all connections in use).
    #[error("Connection pool exhausted")]
    PoolExhausted,

    /// Internal database error.
    #[error("Internal database error: {0}")]
    Internal(String),
}

impl DbError {
    /// Creates a NotFound error for a given entity type and ID.
    pub fn not_found(entity: impl Into<String>, id: impl ToString) -> Self {
        DbError::NotFound {
            entity: entity.into(),
            id: id.to_string(),
        }
    }

    /// Creates a DuplicateKey error.
    pub fn duplicate(field: impl Into<String>, value: impl Into<String>) -> Self {
        DbError::DuplicateKey {
            field: field.into(),
            value: value.into(),
        }
    }

    /// Fills in the offending value on a DuplicateKey error.
    ///
    /// SQLite only reports the column, so repositories that know the value
    /// attach it after the fact. Other variants pass through unchanged.
    pub fn with_duplicate_value(self, value: impl Into<String>) -> Self {
        match self {
            DbError::DuplicateKey { field, .. } => DbError::DuplicateKey {
                field,
                value: value.into(),
            },
            other => other,
        }
    }
}

/// Convert sqlx errors to DbError.
///
/// ## Error Mapping
/// ```text
/// sqlx::Error::RowNotFound        → DbError::NotFound
/// sqlx::Error::Database (unique)  → DbError::DuplicateKey
/// sqlx::Error::Database (other)   → DbError::QueryFailed
/// sqlx::Error::PoolTimedOut       → DbError::PoolExhausted
/// sqlx::Error::PoolClosed / Io    → DbError::StoreUnavailable
/// Other                           → DbError::Internal
/// ```
impl From<sqlx::Error> for DbError {
    fn from(err: sqlx::Error) -> Self {
        match err {
            sqlx::Error::RowNotFound => DbError::NotFound {
                entity: "Record".to_string(),
                id: "unknown".to_string(),
            },

            sqlx::Error::Database(db_err) => {
                let msg = db_err.message();

                // SQLite reports both TEXT primary keys and UNIQUE indexes as
                // "UNIQUE constraint failed: <table>.<column>"
                if db_err.is_unique_violation() || msg.contains("UNIQUE constraint failed") {
                    let field = msg
                        .split("UNIQUE constraint failed: ")
                        .nth(1)
                        .unwrap_or("unknown")
                        .to_string();
                    DbError::DuplicateKey {
                        field,
                        value: "unknown".to_string(),
                    }
                } else {
                    DbError::QueryFailed(msg.to_string())
                }
            }

            sqlx::Error::PoolTimedOut => DbError::PoolExhausted,

            sqlx::Error::PoolClosed => DbError::StoreUnavailable("Pool is closed".to_string()),

            sqlx::Error::Io(e) => DbError::StoreUnavailable(e.to_string()),

            _ => DbError::Internal(err.to_string()),
        }
    }
}

/// Result type for database operations.
pub type DbResult<T> = Result<T, DbError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_with_duplicate_value_fills_value() {
        let err = DbError::duplicate("usuarios.email", "unknown").with_duplicate_value("a@x.com");
        assert_eq!(
            err.to_string(),
            "Duplicate usuarios.email: 'a@x.com' already exists"
        );
    }

    #[test]
    fn test_with_duplicate_value_ignores_other_variants() {
        let err = DbError::not_found("Product", 4).with_duplicate_value("x");
        assert!(matches!(err, DbError::NotFound { ref id, .. } if id == "4"));
    }

    #[test]
    fn test_pool_closed_is_store_unavailable() {
        let err: DbError = sqlx::Error::PoolClosed.into();
        assert!(matches!(err, DbError::StoreUnavailable(_)));
    }
}
