//! # vinicola-core: Pure Domain Types for Vinicola
//!
//! The user and wine-catalog types shared by the store and the session
//! state machine. No I/O lives here.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vinicola Architecture                            │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    View layer (external)                        │   │
//! │  │       Login ──► Register ──► Product catalog                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │ commands                               │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                 vinicola-app (session state)                    │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │             ★ vinicola-core (THIS CRATE) ★                      │   │
//! │  │     types: User, Product, NewProduct                            │   │
//! │  │     validation: price text parsing                              │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │              vinicola-db (SQLite store, repositories)           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (User, Product, NewProduct)
//! - [`error`] - Domain error types
//! - [`validation`] - Price text parsing
//!
//! ## Example Usage
//!
//! ```rust
//! use vinicola_core::validation::parse_price;
//! use vinicola_core::NewProduct;
//!
//! let price = parse_price("45.0").unwrap();
//! let wine = NewProduct::new("Malbec", "13%", price);
//! assert_eq!(wine.price, 45.0);
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Name of the store when the host does not supply one.
pub const DEFAULT_DATABASE_NAME: &str = "vinicola_db";
