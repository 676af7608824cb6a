//! Formatting helper functions for the todo MCP server
//!
//! Renders the filtered read model as the text returned by `list_tasks`.

use crate::todo::{Filter, Summary, Task, TodoStore, local_date_today};
use chrono::NaiveDate;

/// Format one task line
///
/// `position` is the index in the full store, the value `reorder_task` takes.
pub fn format_task(position: usize, task: &Task, today: NaiveDate) -> String {
    let mut line = format!(
        "{}. [{}] #{} {} (priority: {}, due: {})",
        position,
        if task.done { "x" } else { " " },
        task.id,
        task.text,
        task.priority,
        task.due
    );
    if task.is_overdue(today) {
        line.push_str(" OVERDUE");
    }
    if task.editing {
        line.push_str(" [editing]");
    }
    line
}

/// Format the tasks selected by `filter`, with a header and counts
pub fn format_tasks(store: &TodoStore, view: Filter, dark_mode: bool) -> String {
    format_tasks_on(store, view, dark_mode, local_date_today())
}

pub(crate) fn format_tasks_on(
    store: &TodoStore,
    view: Filter,
    dark_mode: bool,
    today: NaiveDate,
) -> String {
    let summary = Summary::of(store);
    let mut result = format!(
        "Todo list ({} of {} remaining, theme: {})\n",
        summary.pending,
        summary.total,
        if dark_mode { "dark" } else { "light" }
    );

    let lines: Vec<String> = store
        .tasks()
        .iter()
        .enumerate()
        .filter(|(_, task)| view.matches(task))
        .map(|(position, task)| format_task(position, task, today))
        .collect();

    if lines.is_empty() {
        result.push_str(&format!("No {} tasks", view));
        return result;
    }

    result.push_str(&format!("Showing {} {} task(s):\n\n", lines.len(), view));
    for line in lines {
        result.push_str(&line);
        result.push('\n');
    }
    result
}
