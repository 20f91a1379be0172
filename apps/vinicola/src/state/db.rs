//! # Database State
//!
//! Wraps the opened `Database` for use in commands.
//!
//! The pool inside `Database` is already safe to share; no lock is needed
//! here. Ordering between actions comes from the session lock.

use vinicola_db::Database;

/// Wrapper around the store handle owned by the app for its lifetime.
#[derive(Debug, Clone)]
pub struct DbState {
    db: Database,
}

impl DbState {
    /// Creates a new DbState wrapping the database connection.
    pub fn new(db: Database) -> Self {
        DbState { db }
    }

    /// Returns a reference to the inner Database.
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let catalog = db_state.inner().products().list_all().await?;
    /// ```
    pub fn inner(&self) -> &Database {
        &self.db
    }
}
