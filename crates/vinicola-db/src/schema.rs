//! # Store Schema
//!
//! Table definitions and the versioned bootstrap for the store.
//!
//! ## Versioning Policy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Schema Bootstrap                                   │
//! │                                                                         │
//! │  Database::open                                                        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Read PRAGMA user_version                                              │
//! │       │                                                                 │
//! │       ├── 0 (fresh file)       → create tables, stamp version          │
//! │       ├── == SCHEMA_VERSION    → nothing to do                         │
//! │       └── anything else        → DROP both tables, create, stamp       │
//! │                                  (ALL DATA IS LOST)                    │
//! │                                                                         │
//! │  Everything runs in one transaction: a failed bootstrap leaves the     │
//! │  previous file untouched.                                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! There is no data-preserving migration. Bumping [`SCHEMA_VERSION`] wipes
//! every user and product on the next open.

use sqlx::{SqliteConnection, SqlitePool};
use tracing::{debug, info, warn};

use crate::error::{DbError, DbResult};

/// Current schema version, stored in `PRAGMA user_version`.
pub const SCHEMA_VERSION: u32 = 1;

/// Largest version `PRAGMA user_version` can hold (a signed 32-bit value).
pub const MAX_SCHEMA_VERSION: u32 = i32::MAX as u32;

/// SQLite DDL for both collections.
///
/// - `usuarios.email` is the primary key (TEXT, so SQLite reports collisions
///   as `UNIQUE constraint failed: usuarios.email`)
/// - `produtos.id` uses AUTOINCREMENT so ids of deleted rows are never
///   handed out again
pub const SQLITE_INIT: &str = r#"
CREATE TABLE IF NOT EXISTS usuarios (
    email TEXT PRIMARY KEY NOT NULL,
    password TEXT NOT NULL
);

CREATE TABLE IF NOT EXISTS produtos (
    id INTEGER PRIMARY KEY AUTOINCREMENT,
    nome TEXT NOT NULL,
    teor TEXT NOT NULL,
    preco REAL NOT NULL
);
"#;

const SQLITE_DROP: &str = r#"
DROP TABLE IF EXISTS usuarios;
DROP TABLE IF EXISTS produtos;
"#;

/// What bootstrap did to the file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SchemaAction {
    /// Fresh store; tables created.
    Created,
    /// Stored version matched; nothing changed.
    Unchanged,
    /// Stored version differed; all tables dropped and recreated.
    Recreated { from: u32 },
}

/// Brings the store to `target` version, recreating it on mismatch.
pub async fn bootstrap(pool: &SqlitePool, target: u32) -> DbResult<SchemaAction> {
    check_version(target)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    let stored = read_version(&mut tx).await?;
    let action = match stored {
        0 => SchemaAction::Created,
        v if v == target => SchemaAction::Unchanged,
        v => SchemaAction::Recreated { from: v },
    };

    debug!(stored, target, ?action, "Schema bootstrap");

    if let SchemaAction::Recreated { from } = action {
        warn!(from, to = target, "Schema version changed, recreating store");
        execute_batch(&mut tx, SQLITE_DROP).await?;
    }

    execute_batch(&mut tx, SQLITE_INIT).await?;

    if action != SchemaAction::Unchanged {
        write_version(&mut tx, target).await?;
    }

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    info!(version = target, ?action, "Schema ready");
    Ok(action)
}

/// Drops and recreates both tables, stamping `target`.
pub async fn recreate(pool: &SqlitePool, target: u32) -> DbResult<()> {
    check_version(target)?;

    let mut tx = pool
        .begin()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    execute_batch(&mut tx, SQLITE_DROP).await?;
    execute_batch(&mut tx, SQLITE_INIT).await?;
    write_version(&mut tx, target).await?;

    tx.commit()
        .await
        .map_err(|e| DbError::TransactionFailed(e.to_string()))?;

    warn!(version = target, "Store recreated, all data dropped");
    Ok(())
}

/// Returns the version stamped in the file (0 for a fresh file).
pub async fn stored_version(pool: &SqlitePool) -> DbResult<u32> {
    let mut conn = pool.acquire().await?;
    read_version(&mut conn).await
}

/// Rejects versions SQLite would silently store as 0.
fn check_version(version: u32) -> DbResult<()> {
    if !(1..=MAX_SCHEMA_VERSION).contains(&version) {
        return Err(DbError::SchemaFailed(format!(
            "schema version must be between 1 and {MAX_SCHEMA_VERSION}, got {version}"
        )));
    }
    Ok(())
}

async fn read_version(conn: &mut SqliteConnection) -> DbResult<u32> {
    let version: i64 = sqlx::query_scalar("PRAGMA user_version")
        .fetch_one(&mut *conn)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;

    u32::try_from(version)
        .map_err(|_| DbError::SchemaFailed(format!("invalid stored version {version}")))
}

async fn write_version(conn: &mut SqliteConnection, version: u32) -> DbResult<()> {
    // PRAGMA arguments cannot be bound
    sqlx::query(&format!("PRAGMA user_version = {version}"))
        .execute(&mut *conn)
        .await
        .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    Ok(())
}

/// sqlx prepares one statement at a time, so split the DDL on `;`.
async fn execute_batch(conn: &mut SqliteConnection, sql: &str) -> DbResult<()> {
    for stmt in sql.split(';') {
        let s = stmt.trim();
        if s.is_empty() {
            continue;
        }
        sqlx::query(s)
            .execute(&mut *conn)
            .await
            .map_err(|e| DbError::SchemaFailed(e.to_string()))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pool::{Database, DbConfig};

    async fn table_names(pool: &SqlitePool) -> Vec<String> {
        sqlx::query_scalar(
            "SELECT name FROM sqlite_master WHERE type = 'table' AND name IN ('usuarios', 'produtos') ORDER BY name",
        )
        .fetch_all(pool)
        .await
        .unwrap()
    }

    #[tokio::test]
    async fn test_open_creates_tables_and_stamps_version() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();

        assert_eq!(table_names(db.pool()).await, vec!["produtos", "usuarios"]);
        assert_eq!(stored_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_bootstrap_same_version_is_unchanged() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();

        let action = bootstrap(db.pool(), SCHEMA_VERSION).await.unwrap();
        assert_eq!(action, SchemaAction::Unchanged);
    }

    #[tokio::test]
    async fn test_bootstrap_version_bump_recreates() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO usuarios (email, password) VALUES ('a@x.com', 'pw1')")
            .execute(db.pool())
            .await
            .unwrap();

        let action = bootstrap(db.pool(), SCHEMA_VERSION + 1).await.unwrap();

        assert_eq!(
            action,
            SchemaAction::Recreated {
                from: SCHEMA_VERSION
            }
        );
        assert_eq!(stored_version(db.pool()).await.unwrap(), SCHEMA_VERSION + 1);
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(users, 0);
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_version_zero() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();

        let result = bootstrap(db.pool(), 0).await;
        assert!(matches!(result, Err(DbError::SchemaFailed(_))));
    }

    #[tokio::test]
    async fn test_bootstrap_rejects_version_above_i32_max() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        sqlx::query("INSERT INTO usuarios (email, password) VALUES ('a@x.com', 'pw1')")
            .execute(db.pool())
            .await
            .unwrap();

        let result = bootstrap(db.pool(), MAX_SCHEMA_VERSION + 1).await;
        assert!(matches!(result, Err(DbError::SchemaFailed(_))));
        assert!(matches!(
            recreate(db.pool(), 3_000_000_000).await,
            Err(DbError::SchemaFailed(_))
        ));

        // Nothing was written: version and data are as before
        assert_eq!(stored_version(db.pool()).await.unwrap(), SCHEMA_VERSION);
        let users: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM usuarios")
            .fetch_one(db.pool())
            .await
            .unwrap();
        assert_eq!(users, 1);
    }

    #[tokio::test]
    async fn test_bootstrap_accepts_max_version() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();

        bootstrap(db.pool(), MAX_SCHEMA_VERSION).await.unwrap();

        assert_eq!(stored_version(db.pool()).await.unwrap(), MAX_SCHEMA_VERSION);
    }
}
