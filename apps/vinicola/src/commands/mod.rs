//! # Commands Module
//!
//! The functions the view layer calls. Each one takes the state it needs,
//! runs one session action and returns the new `SessionView`.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  View layer                                                            │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  commands::auth::submit_login(&db, &session, email, password)          │
//! │       │                                                                 │
//! │       │  Result<SessionView, ApiError>                                  │
//! │       ▼                                                                 │
//! │  { screen: "productCatalog", isAuthenticated: true, catalog: [...] }   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## State Injection
//! ```rust,ignore
//! // Only needs the session
//! async fn request_back(session: &SessionState)
//!
//! // Needs both
//! async fn add_product(db: &DbState, session: &SessionState, ...)
//! ```

pub mod auth;
pub mod catalog;
