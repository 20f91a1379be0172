//! # API Error Type
//!
//! Unified error type for session actions and commands.
//!
//! ## Error Handling Strategy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Vinicola                               │
//! │                                                                         │
//! │  Session action                                                        │
//! │       │                                                                 │
//! │       ├── Store error?   ── DbError::DuplicateKey ───────┐             │
//! │       │                                                  │             │
//! │       ├── Parse error?   ── CoreError::Validation ───────┤             │
//! │       │                                                  ▼             │
//! │       │                                              ApiError          │
//! │       │                                                  │             │
//! │       │                          session.notice = message│             │
//! │       │                          screen unchanged        ▼             │
//! │       └── Success ───────────────────────────► SessionView             │
//! │                                                                         │
//! │  The view renders `notice` and may also read `code`:                   │
//! │    { "code": "DUPLICATE_KEY", "message": "..." }                       │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use serde::Serialize;
use vinicola_core::{CoreError, ValidationError};
use vinicola_db::DbError;

/// Error returned from session actions.
///
/// ## Serialization
/// ```json
/// {
///   "code": "INVALID_CREDENTIALS",
///   "message": "Invalid email or password"
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiError {
    /// Machine-readable error code for programmatic handling
    pub code: ErrorCode,

    /// Human-readable error message for display
    pub message: String,
}

/// Error codes for action results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Login found no matching email/password pair
    InvalidCredentials,

    /// Insert collided with an existing key
    DuplicateKey,

    /// Record not found
    NotFound,

    /// Numeric text could not be parsed
    ParseError,

    /// Store could not be opened or reached
    StoreUnavailable,

    /// Action is not defined for the current screen
    InvalidTransition,

    /// Catalog action issued before login
    NotAuthenticated,

    /// Any other store failure
    DatabaseError,

    /// Internal error
    Internal,
}

impl ApiError {
    /// Creates a new API error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        ApiError {
            code,
            message: message.into(),
        }
    }

    /// Creates a not found error.
    pub fn not_found(resource: &str, id: &str) -> Self {
        ApiError::new(ErrorCode::NotFound, format!("{} not found: {}", resource, id))
    }

    /// Login failure. Does not say whether the email exists.
    pub fn invalid_credentials() -> Self {
        ApiError::new(ErrorCode::InvalidCredentials, "Invalid email or password")
    }

    /// Creates an invalid transition error.
    pub fn invalid_transition(action: &str, screen: impl std::fmt::Debug) -> Self {
        ApiError::new(
            ErrorCode::InvalidTransition,
            format!("{} is not available on the {:?} screen", action, screen),
        )
    }

    /// Creates a not authenticated error.
    pub fn not_authenticated() -> Self {
        ApiError::new(ErrorCode::NotAuthenticated, "Log in to manage the catalog")
    }

    /// Creates a store unavailable error.
    pub fn store_unavailable(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::StoreUnavailable, message)
    }

    /// Creates an internal error.
    pub fn internal(message: impl Into<String>) -> Self {
        ApiError::new(ErrorCode::Internal, message)
    }
}

/// Converts database errors to API errors.
impl From<DbError> for ApiError {
    fn from(err: DbError) -> Self {
        match err {
            DbError::NotFound { entity, id } => ApiError::not_found(&entity, &id),
            DbError::DuplicateKey { field, value } => ApiError::new(
                ErrorCode::DuplicateKey,
                format!("{} '{}' already exists", field, value),
            ),
            DbError::StoreUnavailable(e) => {
                tracing::error!("Store unavailable: {}", e);
                ApiError::store_unavailable("Local storage is not available")
            }
            DbError::SchemaFailed(e) => {
                tracing::error!("Schema setup failed: {}", e);
                ApiError::store_unavailable("Local storage could not be prepared")
            }
            DbError::QueryFailed(e) => {
                // Log the actual error but return a generic message
                tracing::error!("Database query failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
            DbError::TransactionFailed(e) => {
                tracing::error!("Transaction failed: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database transaction failed")
            }
            DbError::PoolExhausted => {
                ApiError::new(ErrorCode::DatabaseError, "Database pool exhausted")
            }
            DbError::Internal(e) => {
                tracing::error!("Internal database error: {}", e);
                ApiError::new(ErrorCode::DatabaseError, "Database operation failed")
            }
        }
    }
}

/// Converts core errors to API errors.
impl From<CoreError> for ApiError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ProductNotFound(id) => ApiError::not_found("Product", &id.to_string()),
            CoreError::Validation(e) => ApiError::from(e),
        }
    }
}

impl From<ValidationError> for ApiError {
    fn from(err: ValidationError) -> Self {
        ApiError::new(ErrorCode::ParseError, err.to_string())
    }
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{:?}] {}", self.code, self.message)
    }
}

impl std::error::Error for ApiError {}

/// Result type for session actions.
pub type ApiResult<T> = Result<T, ApiError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_duplicate_key_maps_to_duplicate_code() {
        let err: ApiError = DbError::duplicate("usuarios.email", "a@x.com").into();
        assert_eq!(err.code, ErrorCode::DuplicateKey);
        assert_eq!(err.message, "usuarios.email 'a@x.com' already exists");
    }

    #[test]
    fn test_validation_maps_to_parse_error() {
        let err: ApiError = CoreError::Validation(ValidationError::InvalidNumber {
            field: "price".to_string(),
            value: "abc".to_string(),
        })
        .into();
        assert_eq!(err.code, ErrorCode::ParseError);
        assert_eq!(err.message, "price is not a number: 'abc'");
    }

    #[test]
    fn test_store_errors_hide_details() {
        let err: ApiError =
            DbError::StoreUnavailable("disk I/O error at /secret".to_string()).into();
        assert_eq!(err.code, ErrorCode::StoreUnavailable);
        assert!(!err.message.contains("/secret"));
    }

    #[test]
    fn test_serialized_shape() {
        let json = serde_json::to_value(ApiError::invalid_credentials()).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "code": "INVALID_CREDENTIALS",
                "message": "Invalid email or password"
            })
        );
    }
}
