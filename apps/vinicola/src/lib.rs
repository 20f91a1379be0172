//! # Vinicola App Library
//!
//! Session core for the Vinicola wine catalog. A view layer (desktop or
//! mobile shell) starts it once, then calls the functions in [`commands`]
//! and renders the returned [`state::SessionView`].
//!
//! ## Module Organization
//! ```text
//! vinicola_app/
//! ├── lib.rs          ◄─── You are here (startup)
//! ├── state/
//! │   ├── mod.rs      ◄─── State type exports
//! │   ├── db.rs       ◄─── Database state wrapper
//! │   ├── session.rs  ◄─── Screen state machine + catalog cache
//! │   └── config.rs   ◄─── Configuration
//! ├── commands/
//! │   ├── mod.rs      ◄─── Command exports
//! │   ├── auth.rs     ◄─── Login / register / back
//! │   └── catalog.rs  ◄─── Add / delete / refresh products
//! └── error.rs        ◄─── API error type for commands
//! ```
//!
//! ## Usage
//! ```rust,ignore
//! vinicola_app::init_tracing();
//!
//! let app = Vinicola::start(AppConfig::from_env()).await?;
//! let view = commands::auth::submit_login(&app.db, &app.session, email, password).await?;
//! ```

pub mod commands;
pub mod error;
pub mod state;

use std::path::PathBuf;

use directories::ProjectDirs;
use tracing::info;
use tracing_subscriber::EnvFilter;

use error::{ApiError, ApiResult};
use state::{AppConfig, DbState, SessionState};
use vinicola_db::{Database, DbConfig};

/// Everything a view layer needs, created once per process.
#[derive(Debug, Clone)]
pub struct Vinicola {
    pub config: AppConfig,
    pub db: DbState,
    pub session: SessionState,
}

impl Vinicola {
    /// Opens the store and creates a session on the login screen.
    ///
    /// ## Startup Sequence
    /// ```text
    /// ┌─────────────────────────────────────────────────────────────────────────┐
    /// │  1. Determine Database Path                                            │
    /// │     • VINICOLA_DB_PATH, or                                              │
    /// │     • Linux: ~/.local/share/vinicola/vinicola_db.sqlite                 │
    /// │     • macOS: ~/Library/Application Support/br.agnello.vinicola/...       │
    /// │                                                                         │
    /// │  2. Open Store                                                          │
    /// │     • SQLite with WAL mode                                              │
    /// │     • Schema version check, recreate on mismatch                        │
    /// │                                                                         │
    /// │  3. Initialize State Objects                                           │
    /// │     • DbState wraps the Database                                        │
    /// │     • SessionState starts on Login                                      │
    /// └─────────────────────────────────────────────────────────────────────────┘
    /// ```
    ///
    /// ## Errors
    /// `STORE_UNAVAILABLE` when the location cannot be resolved or opened.
    /// The app cannot run without a store.
    pub async fn start(config: AppConfig) -> ApiResult<Self> {
        let db_path = database_path(&config)?;
        info!(?db_path, "Database path determined");

        let db_config = DbConfig::new(db_path).schema_version(config.schema_version);
        let db = Database::open(db_config).await?;
        info!(schema_version = config.schema_version, "Store ready");

        Ok(Self::with_database(config, db))
    }

    /// Builds the app around an already opened store.
    pub fn with_database(config: AppConfig, db: Database) -> Self {
        Vinicola {
            config,
            db: DbState::new(db),
            session: SessionState::new(),
        }
    }

    /// Closes the store.
    pub async fn shutdown(&self) {
        self.db.inner().close().await;
        info!("Store closed");
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=vinicola=trace` - Show trace for vinicola crates only
/// - Default: `info,vinicola=debug,sqlx=warn`
///
/// Safe to call more than once; later calls are ignored.
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,vinicola=debug,sqlx=warn"));

    let _ = tracing_subscriber::fmt().with_env_filter(filter).try_init();
}

/// Determines the store file path.
///
/// ## Platform-Specific Paths
/// - **macOS**: `~/Library/Application Support/br.agnello.vinicola/<name>.sqlite`
/// - **Windows**: `%APPDATA%\agnello\vinicola\data\<name>.sqlite`
/// - **Linux**: `~/.local/share/vinicola/<name>.sqlite`
///
/// `config.database_path` (from `VINICOLA_DB_PATH`) wins when set.
pub fn database_path(config: &AppConfig) -> ApiResult<PathBuf> {
    if let Some(path) = &config.database_path {
        return Ok(path.clone());
    }

    let proj_dirs = ProjectDirs::from("br", "agnello", "vinicola")
        .ok_or_else(|| ApiError::store_unavailable("Could not determine app data directory"))?;

    let data_dir = proj_dirs.data_dir();

    std::fs::create_dir_all(data_dir).map_err(|e| {
        tracing::error!(?data_dir, "Could not create data directory: {}", e);
        ApiError::store_unavailable("Could not create app data directory")
    })?;

    Ok(data_dir.join(config.file_name()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::{auth, catalog};
    use crate::state::Screen;

    fn temp_config() -> AppConfig {
        let path =
            std::env::temp_dir().join(format!("vinicola-app-{}.sqlite", uuid::Uuid::new_v4()));
        AppConfig {
            database_path: Some(path),
            ..AppConfig::default()
        }
    }

    #[test]
    fn test_database_path_override() {
        let config = AppConfig {
            database_path: Some(PathBuf::from("/data/wines.sqlite")),
            ..AppConfig::default()
        };

        assert_eq!(database_path(&config).unwrap(), PathBuf::from("/data/wines.sqlite"));
    }

    #[test]
    fn test_init_tracing_twice() {
        init_tracing();
        init_tracing();
    }

    #[tokio::test]
    async fn test_start_persists_across_restarts() {
        let config = temp_config();

        let app = Vinicola::start(config.clone()).await.unwrap();
        auth::request_register(&app.session).await.unwrap();
        auth::submit_register(&app.db, &app.session, "a@x.com".into(), "pw1".into())
            .await
            .unwrap();
        auth::submit_login(&app.db, &app.session, "a@x.com".into(), "pw1".into())
            .await
            .unwrap();
        catalog::add_product(&app.db, &app.session, "Malbec".into(), "13%".into(), "45.0".into())
            .await
            .unwrap();
        app.shutdown().await;

        let app = Vinicola::start(config.clone()).await.unwrap();
        assert_eq!(auth::get_session(&app.session).await.screen, Screen::Login);
        let view = auth::submit_login(&app.db, &app.session, "a@x.com".into(), "pw1".into())
            .await
            .unwrap();
        assert_eq!(view.catalog.len(), 1);
        assert_eq!(view.catalog[0].name, "Malbec");
        app.shutdown().await;

        if let Some(path) = &config.database_path {
            for suffix in ["", "-wal", "-shm"] {
                let mut file = path.as_os_str().to_owned();
                file.push(suffix);
                let _ = std::fs::remove_file(PathBuf::from(file));
            }
        }
    }
}
