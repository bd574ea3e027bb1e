use std::path::PathBuf;

use chrono::{DateTime, TimeZone, Utc};
use tempfile::TempDir;

use taskprefs::prefs::PreferenceStore;
use taskprefs::tasks::{Task, TaskPriority};

/// Temp-dir backed preference store fixture.
pub struct PrefsFixture {
    dir: TempDir,
}

impl PrefsFixture {
    pub fn new() -> Self {
        init_tracing();
        let dir = tempfile::tempdir().expect("failed to create tempdir");
        Self { dir }
    }

    pub fn record_path(&self) -> PathBuf {
        self.dir.path().join("user_preferences.json")
    }

    pub fn legacy_path(&self) -> PathBuf {
        self.dir.path().join("legacy_prefs.json")
    }

    pub fn dir_path(&self) -> &std::path::Path {
        self.dir.path()
    }

    pub fn open(&self) -> PreferenceStore {
        PreferenceStore::open(self.record_path()).expect("failed to open store")
    }

    pub fn write_record(&self, contents: &str) {
        std::fs::write(self.record_path(), contents).expect("failed to write record");
    }

    pub fn write_legacy(&self, contents: &str) {
        std::fs::write(self.legacy_path(), contents).expect("failed to write legacy file");
    }
}

pub fn day(n: u32) -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 6, n, 0, 0, 0).unwrap()
}

/// The three-task collection from the concrete projection scenario:
/// A(day 3, Low, open), B(day 1, High, open), C(day 3, High, completed).
pub fn sample_tasks() -> Vec<Task> {
    vec![
        Task::new("A", day(3), TaskPriority::Low),
        Task::new("B", day(1), TaskPriority::High),
        Task::new("C", day(3), TaskPriority::High).completed(),
    ]
}

pub fn names(tasks: &[Task]) -> Vec<&str> {
    tasks.iter().map(|task| task.name.as_str()).collect()
}

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn")),
        )
        .with_test_writer()
        .try_init();
}
