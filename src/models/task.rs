// SPDX-License-Identifier: MIT
// Copyright 2026 Roland Dreier <roland@rolandd.dev>

//! To-do task model and per-date ordering.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored task (document ID is `id`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: String,
    pub title: String,
    /// Date (YYYY-MM-DD)
    pub date: String,
    #[serde(default)]
    pub completed: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Order within the task's date, starting at 0
    #[serde(default)]
    pub position: u32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Sort tasks by date, then position, then creation time.
pub fn sort_tasks(tasks: &mut [Task]) {
    tasks.sort_by(|a, b| {
        a.date
            .cmp(&b.date)
            .then(a.position.cmp(&b.position))
            .then(a.created_at.cmp(&b.created_at))
    });
}

/// Position for a task appended to `siblings` (the tasks sharing its date).
pub fn next_position(siblings: &[Task]) -> u32 {
    siblings
        .iter()
        .map(|t| t.position.saturating_add(1))
        .max()
        .unwrap_or(0)
}

/// Move `task_id` to `new_index` within one date's tasks and renumber.
///
/// `tasks` must all share a date. Indices past the end are clamped. Returns
/// `None` if `task_id` is not among them; otherwise the tasks in their new
/// order with positions `0..n`.
pub fn reorder(mut tasks: Vec<Task>, task_id: &str, new_index: usize) -> Option<Vec<Task>> {
    sort_tasks(&mut tasks);
    let from = tasks.iter().position(|t| t.id == task_id)?;
    let moved = tasks.remove(from);
    let to = new_index.min(tasks.len());
    tasks.insert(to, moved);

    for (position, task) in tasks.iter_mut().enumerate() {
        task.position = position as u32;
    }
    Some(tasks)
}
