//! Error types for taskprefs
//!
//! Read faults from the durability layer are recoverable: the store degrades
//! to the default preference record instead of failing. Write faults and
//! everything else surface to the caller.

use std::path::PathBuf;
use thiserror::Error;

/// Main error type for taskprefs operations
#[derive(Error, Debug)]
pub enum Error {
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("TOML parse error: {0}")]
    TomlParse(#[from] toml::de::Error),

    #[error("TOML serialize error: {0}")]
    TomlSerialize(#[from] toml::ser::Error),

    #[error("Lock acquisition failed: {0}")]
    LockFailed(PathBuf),
}

impl Error {
    /// Whether this error came from reading the backing record.
    ///
    /// Corrupt record data counts as a read fault: the durability layer
    /// surfaces corruption the same way it surfaces an unreadable file.
    pub fn is_read_fault(&self) -> bool {
        matches!(self, Error::Io(_) | Error::Json(_))
    }
}

/// Result type alias for taskprefs operations
pub type Result<T> = std::result::Result<T, Error>;
