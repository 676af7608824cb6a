//! Cleanup of tasks read back from storage
//!
//! Stored data may come from an older widget build or be edited by hand, so
//! the store invariants are re-established before it is used.

use super::task::{Task, TaskId};
use std::collections::HashSet;

/// Normalize line endings in a string to LF (\n)
pub fn normalize_string_line_endings(s: &str) -> String {
    s.replace("\r\n", "\n").replace('\r', "\n")
}

/// What `normalize_loaded_tasks` had to change
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct NormalizeReport {
    /// Tasks that got a new id
    pub reassigned: usize,
    /// Tasks dropped for blank text
    pub dropped: usize,
}

/// Make loaded tasks satisfy the store invariants
///
/// Line endings in task text are normalized to LF and tasks with blank text
/// are dropped. Tasks whose id is zero or already taken by an earlier task
/// get a fresh id past the highest one (or the lowest free id once the top of
/// the range is reached), so all ids are distinct and the order of the list
/// is unchanged.
pub fn normalize_loaded_tasks(tasks: Vec<Task>) -> (Vec<Task>, NormalizeReport) {
    let mut taken: HashSet<TaskId> = tasks.iter().map(|t| t.id).collect();
    let mut next_id: TaskId = tasks.iter().map(|t| t.id).max().unwrap_or(0);
    let mut seen = HashSet::new();
    let mut report = NormalizeReport::default();

    let tasks = tasks
        .into_iter()
        .filter_map(|mut task| {
            task.text = normalize_string_line_endings(&task.text);
            task.editing = false;

            if task.text.trim().is_empty() {
                report.dropped += 1;
                return None;
            }

            if task.id == 0 || !seen.insert(task.id) {
                let Some(id) = fresh_id(&mut next_id, &taken) else {
                    report.dropped += 1;
                    return None;
                };
                task.id = id;
                taken.insert(id);
                seen.insert(id);
                report.reassigned += 1;
            }
            Some(task)
        })
        .collect();

    (tasks, report)
}

fn fresh_id(next_id: &mut TaskId, taken: &HashSet<TaskId>) -> Option<TaskId> {
    if let Some(id) = next_id.checked_add(1) {
        *next_id = id;
        return Some(id);
    }
    (1..=TaskId::MAX).find(|id| !taken.contains(id))
}
