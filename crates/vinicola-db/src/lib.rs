//! # vinicola-db: Database Layer for Vinicola
//!
//! This crate provides the embedded store behind the wine catalog.
//! It uses SQLite for local storage with sqlx for async operations.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                        Vinicola Data Flow                               │
//! │                                                                         │
//! │  Session action (submit_login, add_product, ...)                       │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                   vinicola-db (THIS CRATE)                      │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌───────────────┐    ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories │    │    Schema    │  │   │
//! │  │   │   (pool.rs)   │    │               │    │  (schema.rs) │  │   │
//! │  │   │               │    │ UserRepo      │    │              │  │   │
//! │  │   │ SqlitePool    │◄───│ ProductRepo   │    │ usuarios     │  │   │
//! │  │   │               │    │               │    │ produtos     │  │   │
//! │  │   └───────────────┘    └───────────────┘    └──────────────┘  │   │
//! │  │                                                                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                     SQLite Database                             │   │
//! │  │   <platform data dir>/vinicola_db.sqlite                        │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`schema`] - Table definitions and versioned bootstrap
//! - [`error`] - Database error types
//! - [`repository`] - User and product repositories
//!
//! ## Usage
//!
//! ```rust,ignore
//! use vinicola_db::{Database, DbConfig};
//! use vinicola_core::NewProduct;
//!
//! let db = Database::open(DbConfig::new("path/to/vinicola_db.sqlite")).await?;
//!
//! let malbec = db.products().insert(&NewProduct::new("Malbec", "13%", 45.0)).await?;
//! let catalog = db.products().list_all().await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod pool;
pub mod repository;
pub mod schema;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{DbError, DbResult};
pub use pool::{Database, DbConfig};
pub use schema::{MAX_SCHEMA_VERSION, SCHEMA_VERSION};

// Repository re-exports for convenience
pub use repository::product::ProductRepository;
pub use repository::user::UserRepository;
