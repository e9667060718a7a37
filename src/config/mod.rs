//! Configuration models for settings and storage location.

pub mod settings;

pub use settings::{AppSettings, SettingsPatch, Theme};

use std::path::PathBuf;

/// Environment variable naming the file backend's data directory.
pub const DATA_DIR_ENV: &str = "RESOURCE_LEDGER_DATA_DIR";

/// Storage location configuration for the file backend.
#[derive(Debug, Clone)]
pub struct StorageConfig {
    /// Directory holding the persisted slot files.
    pub data_dir: PathBuf,
}

impl StorageConfig {
    /// Resolve the storage location from the environment (including a
    /// `.env` file when present), defaulting to `./data`.
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv();
        let data_dir = std::env::var(DATA_DIR_ENV)
            .map_or_else(|_| PathBuf::from("data"), PathBuf::from);
        Self { data_dir }
    }
}
