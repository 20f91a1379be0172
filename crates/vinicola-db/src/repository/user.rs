//! # User Repository
//!
//! Registration and credential lookup over the `usuarios` table.
//!
//! Users are never updated or deleted; the only way to remove one is a full
//! store recreation.

use sqlx::SqlitePool;
use tracing::debug;

use crate::error::{DbError, DbResult};
use vinicola_core::User;

/// Repository for user database operations.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Inserts a new user.
    ///
    /// ## Returns
    /// * `Ok(())` - User stored
    /// * `Err(DbError::DuplicateKey)` - Email already registered
    pub async fn insert(&self, user: &User) -> DbResult<()> {
        debug!(email = %user.email, "Inserting user");

        sqlx::query("INSERT INTO usuarios (email, password) VALUES (?1, ?2)")
            .bind(&user.email)
            .bind(&user.password)
            .execute(&self.pool)
            .await
            .map_err(|e| DbError::from(e).with_duplicate_value(&user.email))?;

        Ok(())
    }

    /// Looks up a user by exact email and password.
    ///
    /// Unknown email and wrong password both return `Ok(None)`; callers
    /// cannot tell the two apart.
    pub async fn find_by_credentials(&self, email: &str, password: &str) -> DbResult<Option<User>> {
        debug!(email = %email, "Looking up credentials");

        let user = sqlx::query_as::<_, User>(
            "SELECT email, password FROM usuarios WHERE email = ?1 AND password = ?2",
        )
        .bind(email)
        .bind(password)
        .fetch_optional(&self.pool)
        .await?;

        Ok(user)
    }

    /// Counts registered users (for diagnostics).
    pub async fn count(&self) -> DbResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}
