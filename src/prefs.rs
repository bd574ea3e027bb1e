//! Durable, observable user-preference store.
//!
//! One JSON record on disk holds the combined sort order and the
//! show-completed toggle. Updates are read-modify-write transactions: an
//! in-process mutex serializes callers, a sibling `.lock` flock excludes
//! other processes, and the record is replaced atomically before the new
//! value is published to observers. A record that cannot be read degrades to
//! the default preferences instead of failing the store.

use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Mutex, PoisonError};

use serde::{Deserialize, Serialize};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::config::Config;
use crate::error::Result;
use crate::lock::{self, FileLock, DEFAULT_LOCK_TIMEOUT_MS};
use crate::migration::{LegacyPrefsFile, LegacySource};
use crate::sort_order::{SortDimension, SortOrder};

/// Key consulted in the legacy flat store during migration
pub const LEGACY_SORT_ORDER_KEY: &str = "sort_order";

/// Resolved preference record observed by consumers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Preferences {
    pub show_completed: bool,
    pub sort_order: SortOrder,
}

/// Persisted shape of the record.
///
/// The sort order is optional on the wire: an absent symbol means the field
/// was never set and legacy migration may still fold a value in, while an
/// explicit `"NONE"` is a committed choice.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct StoredPrefs {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    sort_order: Option<String>,
    #[serde(default)]
    show_completed: bool,
}

impl StoredPrefs {
    /// Decode the stored symbol. Unset and unrecognized both resolve to
    /// `SortOrder::None`; unrecognized is warned, never an error.
    fn sort_order(&self) -> SortOrder {
        match &self.sort_order {
            None => SortOrder::None,
            Some(raw) => SortOrder::from_symbol(raw).unwrap_or_else(|| {
                warn!(symbol = %raw, "unrecognized sort order symbol, treating as NONE");
                SortOrder::None
            }),
        }
    }

    fn set_sort_order(&mut self, order: SortOrder) {
        self.sort_order = Some(order.as_symbol().to_string());
    }

    fn resolve(&self) -> Preferences {
        Preferences {
            show_completed: self.show_completed,
            sort_order: self.sort_order(),
        }
    }
}

/// Durable single-record preference store with a live change feed.
#[derive(Debug)]
pub struct PreferenceStore {
    path: PathBuf,
    lock_timeout_ms: u64,
    /// Serializes read-modify-write updates and migration against each other.
    update_lock: Mutex<()>,
    migrated: AtomicBool,
    tx: watch::Sender<Preferences>,
}

impl PreferenceStore {
    /// Open the store over a record file, creating nothing on disk yet.
    ///
    /// A read fault here does not fail the open: the store comes up carrying
    /// the default preferences and logs the fault.
    pub fn open(path: impl Into<PathBuf>) -> Result<Self> {
        Self::open_with_timeout(path, DEFAULT_LOCK_TIMEOUT_MS)
    }

    /// Open with an explicit lock acquisition timeout.
    pub fn open_with_timeout(path: impl Into<PathBuf>, lock_timeout_ms: u64) -> Result<Self> {
        let path = path.into();
        let stored = Self::read_degraded(&path)?;
        let (tx, _rx) = watch::channel(stored.resolve());
        Ok(Self {
            path,
            lock_timeout_ms,
            update_lock: Mutex::new(()),
            migrated: AtomicBool::new(false),
            tx,
        })
    }

    /// Open the store and fold legacy preferences in before any observer can
    /// see a value.
    pub fn open_with_migration(
        path: impl Into<PathBuf>,
        legacy: &dyn LegacySource,
    ) -> Result<Self> {
        let store = Self::open(path)?;
        store.migrate_legacy(legacy)?;
        Ok(store)
    }

    /// Build a store from configuration, running the configured legacy
    /// migration if one is set up.
    pub fn from_config(config: &Config) -> Result<Self> {
        let store =
            Self::open_with_timeout(config.store.record_path(), config.store.lock_timeout_ms)?;
        if let Some(legacy_path) = &config.migration.legacy_file {
            store.migrate_legacy(&LegacyPrefsFile::new(legacy_path))?;
        }
        Ok(store)
    }

    /// Path to the backing record file
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Subscribe to the preference feed.
    ///
    /// The current record is available immediately through the receiver;
    /// every committed update is published after it. Dropping the receiver
    /// has no side effects.
    pub fn observe(&self) -> watch::Receiver<Preferences> {
        self.tx.subscribe()
    }

    /// The last committed record.
    pub fn current(&self) -> Preferences {
        *self.tx.borrow()
    }

    /// Set the show-completed toggle, leaving the sort order untouched.
    pub fn update_show_completed(&self, show: bool) -> Result<Preferences> {
        self.edit(|stored| stored.show_completed = show)
    }

    /// Apply the deadline toggle intent to the combined sort order.
    pub fn enable_sort_by_deadline(&self, enable: bool) -> Result<Preferences> {
        self.toggle_sort(SortDimension::Deadline, enable)
    }

    /// Apply the priority toggle intent to the combined sort order.
    pub fn enable_sort_by_priority(&self, enable: bool) -> Result<Preferences> {
        self.toggle_sort(SortDimension::Priority, enable)
    }

    fn toggle_sort(&self, dimension: SortDimension, enable: bool) -> Result<Preferences> {
        self.edit(|stored| {
            let next = stored.sort_order().toggle(dimension, enable);
            stored.set_sort_order(next);
        })
    }

    /// Fold the legacy flat sort-order value into the structured record.
    ///
    /// Runs at most once per store lifetime and only when the structured
    /// field is still unset; an explicit `"NONE"` already in the record wins
    /// over any legacy value. Returns whether a fold happened.
    pub fn migrate_legacy(&self, legacy: &dyn LegacySource) -> Result<bool> {
        let _guard = self
            .update_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        if self.migrated.load(Ordering::SeqCst) {
            return Ok(false);
        }

        let _flock = FileLock::acquire(lock::lock_path(&self.path), self.lock_timeout_ms)?;
        let mut stored = Self::read_degraded(&self.path)?;

        let folded = if stored.sort_order.is_none() {
            match legacy.get_string(LEGACY_SORT_ORDER_KEY)? {
                Some(raw) => {
                    let order = SortOrder::from_symbol(&raw).unwrap_or_else(|| {
                        warn!(symbol = %raw, "unrecognized legacy sort order, folding as NONE");
                        SortOrder::None
                    });
                    debug!(sort_order = order.as_symbol(), "migrating legacy sort order");
                    stored.set_sort_order(order);
                    self.commit(&stored)?;
                    true
                }
                None => false,
            }
        } else {
            false
        };

        self.migrated.store(true, Ordering::SeqCst);
        Ok(folded)
    }

    /// One read-modify-write transaction against the backing record.
    ///
    /// The record is re-read under the file lock so concurrent processes
    /// never lose each other's updates. A write fault propagates and nothing
    /// is published.
    fn edit<F>(&self, mutate: F) -> Result<Preferences>
    where
        F: FnOnce(&mut StoredPrefs),
    {
        let _guard = self
            .update_lock
            .lock()
            .unwrap_or_else(PoisonError::into_inner);
        let _flock = FileLock::acquire(lock::lock_path(&self.path), self.lock_timeout_ms)?;

        let mut stored = Self::read_stored(&self.path)?;
        mutate(&mut stored);
        self.commit(&stored)
    }

    /// Write the record atomically and publish the committed value.
    fn commit(&self, stored: &StoredPrefs) -> Result<Preferences> {
        let json = serde_json::to_string_pretty(stored)?;
        lock::write_atomic(&self.path, json.as_bytes())?;

        let prefs = stored.resolve();
        self.tx.send_replace(prefs);
        Ok(prefs)
    }

    /// Read the record; a missing file is the default record.
    fn read_stored(path: &Path) -> Result<StoredPrefs> {
        if !path.exists() {
            return Ok(StoredPrefs::default());
        }
        let content = std::fs::read_to_string(path)?;
        let stored: StoredPrefs = serde_json::from_str(&content)?;
        Ok(stored)
    }

    /// Read the record, degrading read faults to the default record.
    ///
    /// Fault classes other than a durability read fault still propagate.
    fn read_degraded(path: &Path) -> Result<StoredPrefs> {
        match Self::read_stored(path) {
            Ok(stored) => Ok(stored),
            Err(err) if err.is_read_fault() => {
                warn!(path = %path.display(), error = %err, "error reading preferences, using defaults");
                Ok(StoredPrefs::default())
            }
            Err(err) => Err(err),
        }
    }
}
