//! # State Module
//!
//! Application state, split by concern so each command names what it needs.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    State Architecture                                   │
//! │                                                                         │
//! │  ┌──────────────┐  ┌──────────────────┐  ┌──────────────────┐          │
//! │  │   DbState    │  │  SessionState    │  │    AppConfig     │          │
//! │  │              │  │                  │  │                  │          │
//! │  │  Database    │  │  Arc<Mutex<      │  │  database path   │          │
//! │  │  (SQLite     │  │    Session       │  │  database name   │          │
//! │  │   pool)      │  │  >>              │  │  schema version  │          │
//! │  └──────────────┘  └──────────────────┘  └──────────────────┘          │
//! │                                                                         │
//! │  • DbState: pool is internally synchronized                            │
//! │  • SessionState: one action at a time through the mutex                │
//! │  • AppConfig: read-only after startup                                  │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

mod config;
mod db;
mod session;

pub use config::AppConfig;
pub use db::DbState;
pub use session::{Screen, Session, SessionState, SessionView};
