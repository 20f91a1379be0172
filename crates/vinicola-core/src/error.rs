//! # Error Types
//!
//! Domain-specific error types for vinicola-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  vinicola-core errors (this file)                                      │
//! │  ├── CoreError        - General domain errors                          │
//! │  └── ValidationError  - Input parsing failures                         │
//! │                                                                         │
//! │  vinicola-db errors (separate crate)                                   │
//! │  └── DbError          - Store operation failures                       │
//! │                                                                         │
//! │  vinicola-app errors                                                   │
//! │  └── ApiError         - What the view layer sees                       │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → ApiError → view                   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// Product id does not exist in the catalog.
    #[error("Product not found: {0}")]
    ProductNotFound(i64),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Input parsing errors.
///
/// Only numeric fields are checked; free-text fields are stored as typed.
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    /// Text could not be read as a number.
    ///
    /// ## When This Occurs
    /// - Price typed as `"abc"` or left empty
    /// - Decimal comma instead of point (`"12,5"`)
    #[error("{field} is not a number: '{value}'")]
    InvalidNumber { field: String, value: String },

    /// Text parsed but is NaN or infinite, which the store cannot hold.
    #[error("{field} must be a finite number: '{value}'")]
    NotFinite { field: String, value: String },
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================
