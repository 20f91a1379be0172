//! # Configuration
//!
//! Settings loaded once at startup.
//!
//! ## Configuration Sources (Priority Order)
//! 1. Environment variables (`VINICOLA_*`)
//! 2. Defaults (this file)
//!
//! Read-only after startup, so no lock.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};
use tracing::warn;
use vinicola_core::DEFAULT_DATABASE_NAME;
use vinicola_db::{MAX_SCHEMA_VERSION, SCHEMA_VERSION};

/// Application configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppConfig {
    /// Full path of the store file. When unset the file lives in the
    /// platform data directory.
    pub database_path: Option<PathBuf>,

    /// Store name; the file is `<name>.sqlite`.
    pub database_name: String,

    /// Expected schema version. Any other stored version wipes the store.
    /// Valid range is `1..=MAX_SCHEMA_VERSION`.
    pub schema_version: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        AppConfig {
            database_path: None,
            database_name: DEFAULT_DATABASE_NAME.to_string(),
            schema_version: SCHEMA_VERSION,
        }
    }
}

impl AppConfig {
    /// Creates a config from environment variables and defaults.
    ///
    /// ## Environment Variables
    /// - `VINICOLA_DB_PATH`: Full path of the store file
    /// - `VINICOLA_DB_NAME`: Store name (default: "vinicola_db")
    /// - `VINICOLA_SCHEMA_VERSION`: Expected schema version
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Same as [`AppConfig::from_env`] with a custom variable source.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = AppConfig::default();

        if let Some(path) = lookup("VINICOLA_DB_PATH") {
            config.database_path = Some(PathBuf::from(path));
        }

        if let Some(name) = lookup("VINICOLA_DB_NAME") {
            config.database_name = name;
        }

        if let Some(version) = lookup("VINICOLA_SCHEMA_VERSION") {
            match version.parse::<u32>() {
                Ok(v) if (1..=MAX_SCHEMA_VERSION).contains(&v) => config.schema_version = v,
                _ => warn!(value = %version, "Ignoring invalid VINICOLA_SCHEMA_VERSION"),
            }
        }

        config
    }

    /// File name used inside the platform data directory.
    pub fn file_name(&self) -> String {
        format!("{}.sqlite", self.database_name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[]));

        assert_eq!(config, AppConfig::default());
        assert_eq!(config.database_name, "vinicola_db");
        assert_eq!(config.file_name(), "vinicola_db.sqlite");
        assert_eq!(config.schema_version, SCHEMA_VERSION);
        assert!(config.database_path.is_none());
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("VINICOLA_DB_PATH", "/tmp/wines.sqlite"),
            ("VINICOLA_DB_NAME", "adega"),
            ("VINICOLA_SCHEMA_VERSION", "3"),
        ]));

        assert_eq!(config.database_path, Some(PathBuf::from("/tmp/wines.sqlite")));
        assert_eq!(config.file_name(), "adega.sqlite");
        assert_eq!(config.schema_version, 3);
    }

    #[test]
    fn test_invalid_schema_version_keeps_default() {
        for bad in ["abc", "0", "-1", "2147483648", "3000000000"] {
            let config =
                AppConfig::from_lookup(lookup_from(&[("VINICOLA_SCHEMA_VERSION", bad)]));
            assert_eq!(config.schema_version, SCHEMA_VERSION);
        }
    }
}
