//! taskprefs - Durable user preferences for task lists
//!
//! This library persists a small structured preference record (a combined
//! sort order and a show-completed toggle), exposes it as a live observable
//! value, migrates legacy flat preference data into the structured store
//! exactly once, and projects a task collection into a filtered, ordered
//! view model under the current preferences.
//!
//! # Core Concepts
//!
//! - **Combined sort order**: two UI toggles ("by deadline", "by priority")
//!   fold into one four-state enum; only the enum is persisted
//! - **Read-modify-write atomicity**: preference updates serialize against
//!   each other in-process and across processes, so no toggle is ever lost
//! - **Degraded-default reads**: an unreadable record yields the default
//!   preferences and a log line, never a dead observation stream
//! - **One-shot migration**: a legacy flat sort-order value is folded in
//!   only while the structured field is still unset
//!
//! # Module Organization
//!
//! - `config`: Configuration loading from `taskprefs.toml`
//! - `error`: Error types and result aliases
//! - `lock`: File locking and atomic writes for the record file
//! - `migration`: Legacy flat-preference sources
//! - `prefs`: The durable, observable preference store
//! - `sort_order`: The combined sort-order state machine
//! - `tasks`: Task records and the filter+sort projection
//! - `view`: View-model assembly over the two input feeds

pub mod config;
pub mod error;
pub mod lock;
pub mod migration;
pub mod prefs;
pub mod sort_order;
pub mod tasks;
pub mod view;

pub use error::{Error, Result};
pub use prefs::{PreferenceStore, Preferences};
pub use sort_order::{SortDimension, SortOrder};
pub use tasks::{filter_sort_tasks, Task, TaskPriority};
pub use view::{ui_model_stream, TaskFeed, TasksUiModel};
