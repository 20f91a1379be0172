//! # Database Pool Management
//!
//! Opening the store and handing out repositories.
//!
//! ## Architecture
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Store Lifecycle                                    │
//! │                                                                         │
//! │  App startup                                                           │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  DbConfig::new(path) ← Configure pool settings + schema version        │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  Database::open(config).await ← Create pool + bootstrap schema         │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────┐                           │
//! │  │            SqlitePool                    │                           │
//! │  │   shared by UserRepository and           │                           │
//! │  │   ProductRepository for the whole        │                           │
//! │  │   process lifetime                       │                           │
//! │  └─────────────────────────────────────────┘                           │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Each repository call borrows one pooled connection for the duration of a
//! single statement; the connection goes back to the pool when the call
//! completes or fails.

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous};
use sqlx::SqlitePool;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info};

use crate::error::{DbError, DbResult};
use crate::repository::product::ProductRepository;
use crate::repository::user::UserRepository;
use crate::schema::{self, SCHEMA_VERSION};

const IN_MEMORY_PATH: &str = ":memory:";

// =============================================================================
// Configuration
// =============================================================================

/// Database configuration.
///
/// ## Example
/// ```rust,ignore
/// let config = DbConfig::new("/path/to/vinicola_db.sqlite")
///     .schema_version(2)
///     .max_connections(2);
/// ```
#[derive(Debug, Clone)]
pub struct DbConfig {
    /// Path to the SQLite database file.
    pub database_path: PathBuf,

    /// Schema version the store must be at. A different stored version
    /// triggers destructive recreation.
    /// Default: [`SCHEMA_VERSION`]
    pub schema_version: u32,

    /// Maximum number of connections in the pool.
    /// Default: 4
    pub max_connections: u32,

    /// Minimum number of connections to keep alive.
    /// Default: 1
    pub min_connections: u32,

    /// Connection timeout duration.
    /// Default: 30 seconds
    pub connect_timeout: Duration,

    /// Idle timeout before closing a connection.
    /// Default: 10 minutes
    pub idle_timeout: Duration,
}

impl DbConfig {
    /// Creates a new database configuration with the given path.
    ///
    /// The file is created if it doesn't exist; its parent directory must.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        DbConfig {
            database_path: path.into(),
            schema_version: SCHEMA_VERSION,
            max_connections: 4,
            min_connections: 1,
            connect_timeout: Duration::from_secs(30),
            idle_timeout: Duration::from_secs(600),
        }
    }

    /// Sets the schema version the store must be at.
    ///
    /// Must be in `1..=MAX_SCHEMA_VERSION`; `open` fails otherwise.
    pub fn schema_version(mut self, version: u32) -> Self {
        self.schema_version = version;
        self
    }

    /// Sets the maximum number of connections.
    pub fn max_connections(mut self, max: u32) -> Self {
        self.max_connections = max;
        self
    }

    /// Sets the minimum number of connections.
    pub fn min_connections(mut self, min: u32) -> Self {
        self.min_connections = min;
        self
    }

    /// Sets the connection timeout.
    pub fn connect_timeout(mut self, timeout: Duration) -> Self {
        self.connect_timeout = timeout;
        self
    }

    /// Creates an in-memory database configuration (for testing).
    ///
    /// ## Usage
    /// ```rust,ignore
    /// let db = Database::open(DbConfig::in_memory()).await?;
    /// // Database is isolated, perfect for tests
    /// ```
    pub fn in_memory() -> Self {
        DbConfig {
            database_path: PathBuf::from(IN_MEMORY_PATH),
            schema_version: SCHEMA_VERSION,
            max_connections: 1, // One connection keeps the single in-memory database alive
            min_connections: 1,
            connect_timeout: Duration::from_secs(5),
            idle_timeout: Duration::from_secs(60),
        }
    }

    /// Whether this config points at an in-memory store.
    pub fn is_in_memory(&self) -> bool {
        self.database_path == Path::new(IN_MEMORY_PATH)
    }

    fn connect_options(&self) -> DbResult<SqliteConnectOptions> {
        if self.is_in_memory() {
            return SqliteConnectOptions::from_str("sqlite::memory:")
                .map_err(|e| DbError::StoreUnavailable(e.to_string()));
        }

        Ok(SqliteConnectOptions::new()
            .filename(&self.database_path)
            // WAL mode: readers don't block the single writer
            .journal_mode(SqliteJournalMode::Wal)
            // NORMAL synchronous: safe from corruption, may lose last transaction on crash
            .synchronous(SqliteSynchronous::Normal)
            .create_if_missing(true))
    }
}

// =============================================================================
// Database
// =============================================================================

/// The process-wide store handle.
///
/// Cloning is cheap (the pool is reference counted); both repositories share
/// the same pool.
#[derive(Debug, Clone)]
pub struct Database {
    /// The SQLite connection pool.
    pool: SqlitePool,

    /// Version the schema was bootstrapped to.
    schema_version: u32,
}

impl Database {
    /// Opens (or creates) the store.
    ///
    /// ## What This Does
    /// 1. Creates the database file if it doesn't exist
    /// 2. Configures SQLite (WAL, NORMAL synchronous)
    /// 3. Creates the connection pool
    /// 4. Bootstraps the schema, recreating the store on version mismatch
    ///
    /// Opening an existing store at the same version changes nothing.
    ///
    /// ## Returns
    /// * `Ok(Database)` - Ready-to-use store handle
    /// * `Err(DbError::StoreUnavailable)` - File could not be opened
    /// * `Err(DbError::SchemaFailed)` - Bootstrap failed
    pub async fn open(config: DbConfig) -> DbResult<Self> {
        info!(
            path = %config.database_path.display(),
            schema_version = config.schema_version,
            "Opening store"
        );

        let connect_options = config.connect_options()?;

        debug!("Connection options configured");

        let mut pool_options = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .min_connections(config.min_connections)
            .acquire_timeout(config.connect_timeout)
            .idle_timeout(Some(config.idle_timeout));

        if config.is_in_memory() {
            // Recycling the last connection would discard the whole database
            pool_options = pool_options
                .idle_timeout(None::<Duration>)
                .max_lifetime(None::<Duration>);
        }

        let pool = pool_options
            .connect_with(connect_options)
            .await
            .map_err(|e| DbError::StoreUnavailable(e.to_string()))?;

        info!(max_connections = config.max_connections, "Database pool created");

        schema::bootstrap(&pool, config.schema_version).await?;

        Ok(Database {
            pool,
            schema_version: config.schema_version,
        })
    }

    /// Returns a reference to the connection pool.
    ///
    /// For advanced queries not covered by repositories.
    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Returns the user repository.
    pub fn users(&self) -> UserRepository {
        UserRepository::new(self.pool.clone())
    }

    /// Returns the product repository.
    ///
    /// ## Example
    /// ```rust,ignore
    /// let catalog = db.products().list_all().await?;
    /// ```
    pub fn products(&self) -> ProductRepository {
        ProductRepository::new(self.pool.clone())
    }

    /// Version stamped in the store file.
    pub async fn schema_version(&self) -> DbResult<u32> {
        schema::stored_version(&self.pool).await
    }

    /// Destroys every user and product and rebuilds empty tables.
    pub async fn recreate(&self) -> DbResult<()> {
        schema::recreate(&self.pool, self.schema_version).await
    }

    /// Closes the database connection pool.
    ///
    /// ## Note
    /// After calling close, all repository operations fail with
    /// `DbError::StoreUnavailable`.
    pub async fn close(&self) {
        info!("Closing database connection pool");
        self.pool.close().await;
    }

    /// Checks if the database is healthy (can execute queries).
    pub async fn health_check(&self) -> bool {
        sqlx::query("SELECT 1").execute(&self.pool).await.is_ok()
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use vinicola_core::{NewProduct, User};

    fn scratch_path() -> PathBuf {
        std::env::temp_dir().join(format!("vinicola-test-{}.sqlite", uuid::Uuid::new_v4()))
    }

    fn remove_store(path: &Path) {
        for suffix in ["", "-wal", "-shm"] {
            let mut file = path.as_os_str().to_owned();
            file.push(suffix);
            let _ = std::fs::remove_file(PathBuf::from(file));
        }
    }

    #[tokio::test]
    async fn test_in_memory_database() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();

        assert!(db.health_check().await);
        assert_eq!(db.schema_version().await.unwrap(), SCHEMA_VERSION);
    }

    #[tokio::test]
    async fn test_config_builder() {
        let config = DbConfig::new("/tmp/test.sqlite")
            .max_connections(10)
            .min_connections(2)
            .schema_version(3);

        assert_eq!(config.max_connections, 10);
        assert_eq!(config.min_connections, 2);
        assert_eq!(config.schema_version, 3);
        assert!(!config.is_in_memory());
        assert!(DbConfig::in_memory().is_in_memory());
    }

    #[tokio::test]
    async fn test_reopen_same_version_keeps_data() {
        let path = scratch_path();

        let db = Database::open(DbConfig::new(&path)).await.unwrap();
        db.users().insert(&User::new("a@x.com", "pw1")).await.unwrap();
        db.close().await;

        let db = Database::open(DbConfig::new(&path)).await.unwrap();
        assert_eq!(db.users().count().await.unwrap(), 1);
        db.close().await;

        remove_store(&path);
    }

    #[tokio::test]
    async fn test_reopen_with_version_bump_empties_store() {
        let path = scratch_path();

        let db = Database::open(DbConfig::new(&path)).await.unwrap();
        db.users().insert(&User::new("a@x.com", "pw1")).await.unwrap();
        db.products()
            .insert(&NewProduct::new("Malbec", "13%", 45.0))
            .await
            .unwrap();
        db.close().await;

        let db = Database::open(DbConfig::new(&path).schema_version(SCHEMA_VERSION + 1))
            .await
            .unwrap();
        assert_eq!(db.users().count().await.unwrap(), 0);
        assert_eq!(db.products().count().await.unwrap(), 0);
        assert_eq!(db.schema_version().await.unwrap(), SCHEMA_VERSION + 1);
        db.close().await;

        remove_store(&path);
    }

    #[tokio::test]
    async fn test_open_rejects_unstorable_version() {
        let path = scratch_path();

        let db = Database::open(DbConfig::new(&path)).await.unwrap();
        db.users().insert(&User::new("a@x.com", "pw1")).await.unwrap();
        db.close().await;

        let result = Database::open(DbConfig::new(&path).schema_version(3_000_000_000)).await;
        assert!(matches!(result, Err(DbError::SchemaFailed(_))));

        // The store keeps its version, so a later bump still wipes it
        let db = Database::open(DbConfig::new(&path).schema_version(SCHEMA_VERSION + 1))
            .await
            .unwrap();
        assert_eq!(db.users().count().await.unwrap(), 0);
        db.close().await;

        remove_store(&path);
    }

    #[tokio::test]
    async fn test_recreate_empties_store() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        db.users().insert(&User::new("a@x.com", "pw1")).await.unwrap();
        db.products()
            .insert(&NewProduct::new("Malbec", "13%", 45.0))
            .await
            .unwrap();

        db.recreate().await.unwrap();

        assert_eq!(db.users().count().await.unwrap(), 0);
        assert!(db.products().list_all().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_closed_store_is_unavailable() {
        let db = Database::open(DbConfig::in_memory()).await.unwrap();
        db.close().await;

        let result = db.products().list_all().await;
        assert!(matches!(result, Err(DbError::StoreUnavailable(_))));
        assert!(!db.health_check().await);
    }

    #[tokio::test]
    async fn test_open_in_missing_directory_fails() {
        let path = std::env::temp_dir()
            .join(format!("vinicola-missing-{}", uuid::Uuid::new_v4()))
            .join("store.sqlite");

        let result = Database::open(DbConfig::new(path)).await;
        assert!(matches!(result, Err(DbError::StoreUnavailable(_))));
    }
}
