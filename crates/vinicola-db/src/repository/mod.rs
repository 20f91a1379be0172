//! # Repository Module
//!
//! Typed data access over the two store collections.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Repository Pattern                                   │
//! │                                                                         │
//! │  Session action                                                        │
//! │       │                                                                 │
//! │       │  db.products().list_all()                                      │
//! │       ▼                                                                 │
//! │  ProductRepository                  UserRepository                     │
//! │  ├── insert(&self, new_product)     ├── insert(&self, user)            │
//! │  ├── update(&self, product)         └── find_by_credentials(...)       │
//! │  ├── delete(&self, product)                                            │
//! │  ├── list_all(&self)                                                   │
//! │  └── get_by_id(&self, id)                                              │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database (produtos, usuarios)                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`UserRepository`](user::UserRepository) - Registration and login lookup
//! - [`ProductRepository`](product::ProductRepository) - Catalog CRUD

pub mod product;
pub mod user;
