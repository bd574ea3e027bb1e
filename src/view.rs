//! View-model assembly: joining the preference feed with the task feed.
//!
//! The presentation layer consumes one stream of `TasksUiModel` snapshots,
//! recomputed whenever either input changes. Nothing here is persisted.

use tokio::sync::watch;

use crate::prefs::Preferences;
use crate::sort_order::SortOrder;
use crate::tasks::{filter_sort_tasks, Task};

/// Snapshot handed to the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TasksUiModel {
    pub tasks: Vec<Task>,
    pub show_completed: bool,
    pub sort_order: SortOrder,
}

impl TasksUiModel {
    /// Pure projection of a task collection under the given preferences.
    pub fn compute(tasks: &[Task], prefs: Preferences) -> Self {
        Self {
            tasks: filter_sort_tasks(tasks, prefs.show_completed, prefs.sort_order),
            show_completed: prefs.show_completed,
            sort_order: prefs.sort_order,
        }
    }
}

/// Stand-in for an external task repository: a watch channel owning the
/// current task collection.
#[derive(Debug)]
pub struct TaskFeed {
    tx: watch::Sender<Vec<Task>>,
}

impl TaskFeed {
    pub fn new(initial: Vec<Task>) -> Self {
        let (tx, _rx) = watch::channel(initial);
        Self { tx }
    }

    pub fn publish(&self, tasks: Vec<Task>) {
        self.tx.send_replace(tasks);
    }

    pub fn subscribe(&self) -> watch::Receiver<Vec<Task>> {
        self.tx.subscribe()
    }
}

/// Continuously combine the task feed with the preference feed.
///
/// Must be called from within a Tokio runtime; the combine loop runs as a
/// spawned task. The returned receiver carries the model for the current values of both
/// inputs immediately. A spawned loop keeps it current until either input
/// closes, at which point the output closes too. Dropping the receiver is
/// always safe; the loop stops once nobody listens and both inputs are gone.
pub fn ui_model_stream(
    mut tasks_rx: watch::Receiver<Vec<Task>>,
    mut prefs_rx: watch::Receiver<Preferences>,
) -> watch::Receiver<TasksUiModel> {
    let initial = {
        let tasks = tasks_rx.borrow_and_update();
        let prefs = *prefs_rx.borrow_and_update();
        TasksUiModel::compute(&tasks, prefs)
    };
    let (tx, rx) = watch::channel(initial);

    tokio::spawn(async move {
        loop {
            tokio::select! {
                changed = tasks_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
                changed = prefs_rx.changed() => {
                    if changed.is_err() {
                        break;
                    }
                }
            }

            let model = {
                let tasks = tasks_rx.borrow_and_update();
                let prefs = *prefs_rx.borrow_and_update();
                TasksUiModel::compute(&tasks, prefs)
            };
            tx.send_replace(model);
        }
    });

    rx
}
