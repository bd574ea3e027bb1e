//! Task records and the preference-driven projection.
//!
//! Tasks arrive from an external repository; this module only filters and
//! orders them. All sorts are stable, so tasks with equal keys keep their
//! input order and re-renders stay deterministic.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::sort_order::SortOrder;

const PRIORITIES: [TaskPriority; 3] =
    [TaskPriority::High, TaskPriority::Medium, TaskPriority::Low];

/// Task priority, ranked High first for sorting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
}

/// A task record as produced by the external task source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub name: String,
    pub deadline: DateTime<Utc>,
    pub priority: TaskPriority,
    #[serde(default)]
    pub completed: bool,
}

impl Task {
    pub fn new(name: impl Into<String>, deadline: DateTime<Utc>, priority: TaskPriority) -> Self {
        Self {
            name: name.into(),
            deadline,
            priority,
            completed: false,
        }
    }

    pub fn completed(mut self) -> Self {
        self.completed = true;
        self
    }
}

fn priority_rank(priority: TaskPriority) -> usize {
    PRIORITIES
        .iter()
        .position(|entry| *entry == priority)
        .unwrap_or(PRIORITIES.len())
}

/// Filter and order a task collection for display.
///
/// Completed tasks are dropped unless `show_completed`. Ordering:
/// - `None`: input order preserved
/// - `ByDeadline`: deadline descending (latest first)
/// - `ByPriority`: priority rank ascending (High first)
/// - `ByDeadlineAndPriority`: deadline descending, then priority rank
pub fn filter_sort_tasks(
    tasks: &[Task],
    show_completed: bool,
    sort_order: SortOrder,
) -> Vec<Task> {
    let mut filtered: Vec<Task> = tasks
        .iter()
        .filter(|task| show_completed || !task.completed)
        .cloned()
        .collect();

    match sort_order {
        SortOrder::None => {}
        SortOrder::ByDeadline => {
            filtered.sort_by(|left, right| right.deadline.cmp(&left.deadline));
        }
        SortOrder::ByPriority => {
            filtered.sort_by(|left, right| {
                priority_rank(left.priority).cmp(&priority_rank(right.priority))
            });
        }
        SortOrder::ByDeadlineAndPriority => {
            filtered.sort_by(|left, right| {
                right
                    .deadline
                    .cmp(&left.deadline)
                    .then_with(|| priority_rank(left.priority).cmp(&priority_rank(right.priority)))
            });
        }
    }

    filtered
}
