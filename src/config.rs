//! Configuration loading and management
//!
//! Handles parsing of `taskprefs.toml` configuration files.

use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

use crate::error::Result;
use crate::lock::DEFAULT_LOCK_TIMEOUT_MS;

/// Name of the configuration file
pub const CONFIG_FILE: &str = "taskprefs.toml";

/// Name of the persisted preference record
pub const PREFS_FILE: &str = "user_preferences.json";

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Preference store configuration
    #[serde(default)]
    pub store: StoreConfig,

    /// Legacy migration configuration
    #[serde(default)]
    pub migration: MigrationConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            store: StoreConfig::default(),
            migration: MigrationConfig::default(),
        }
    }
}

/// Preference store configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoreConfig {
    /// Directory holding the preference record
    #[serde(default = "default_store_dir")]
    pub dir: PathBuf,

    /// File name of the preference record
    #[serde(default = "default_prefs_file")]
    pub file: String,

    /// Lock acquisition timeout in milliseconds
    #[serde(default = "default_lock_timeout_ms")]
    pub lock_timeout_ms: u64,
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            dir: default_store_dir(),
            file: default_prefs_file(),
            lock_timeout_ms: default_lock_timeout_ms(),
        }
    }
}

impl StoreConfig {
    /// Full path to the preference record file
    pub fn record_path(&self) -> PathBuf {
        self.dir.join(&self.file)
    }
}

fn default_store_dir() -> PathBuf {
    directories::ProjectDirs::from("", "", "taskprefs")
        .map(|dirs| dirs.data_dir().to_path_buf())
        .unwrap_or_else(|| PathBuf::from("."))
}

fn default_prefs_file() -> String {
    PREFS_FILE.to_string()
}

fn default_lock_timeout_ms() -> u64 {
    DEFAULT_LOCK_TIMEOUT_MS
}

/// Legacy migration configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MigrationConfig {
    /// Path to the legacy flat preference file, if one may exist
    #[serde(default)]
    pub legacy_file: Option<PathBuf>,
}

impl Config {
    /// Load configuration from a `taskprefs.toml` file
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Config = toml::from_str(&content)?;
        Ok(config)
    }

    /// Load configuration from a directory, or return defaults
    pub fn load_from_dir(dir: &Path) -> Self {
        let config_path = dir.join(CONFIG_FILE);
        if config_path.exists() {
            Self::load(&config_path).unwrap_or_default()
        } else {
            Self::default()
        }
    }

    /// Save configuration to a file
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}
