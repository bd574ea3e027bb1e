//! Legacy flat-preference sources for one-shot migration.
//!
//! Earlier releases kept preferences as a flat string map. On first use the
//! structured store folds the legacy sort-order value in, gated on the
//! structured field still being unset (see `PreferenceStore::migrate_legacy`).

use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;

use crate::error::Result;

/// Read-only view of a legacy flat key/value preference source.
///
/// Consulted at most once per store lifetime; may simply not exist.
pub trait LegacySource {
    fn get_string(&self, key: &str) -> Result<Option<String>>;
}

/// Legacy preference file: a JSON object of string keys to string values.
///
/// An absent file reads as an empty map.
#[derive(Debug, Clone)]
pub struct LegacyPrefsFile {
    path: PathBuf,
}

impl LegacyPrefsFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }
}

impl LegacySource for LegacyPrefsFile {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        if !self.path.exists() {
            return Ok(None);
        }
        let content = fs::read_to_string(&self.path)?;
        let map: HashMap<String, String> = serde_json::from_str(&content)?;
        Ok(map.get(key).cloned())
    }
}

/// In-memory legacy source, mainly for tests and embedding.
#[derive(Debug, Clone, Default)]
pub struct LegacyPrefsMap {
    entries: HashMap<String, String>,
}

impl LegacyPrefsMap {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_entry(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.entries.insert(key.into(), value.into());
        self
    }
}

impl LegacySource for LegacyPrefsMap {
    fn get_string(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}
