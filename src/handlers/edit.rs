//! Edit handlers for the todo MCP server
//!
//! Editing is a two-step flow: `start_edit` marks the task, then
//! `commit_edit` writes the new values or `cancel_edit` drops them.

use crate::TodoServerHandler;
use crate::todo::TaskId;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Mark a task as being edited
    pub async fn handle_start_edit(&self, id: TaskId) -> McpResult<String> {
        match self.update_store(&format!("Edit task {}", id), |store| {
            Ok(store.contains(id).then(|| store.start_edit(id)))
        }) {
            Ok(Some(_)) => Ok(format!("Task #{} is now being edited", id)),
            Ok(None) => Ok(format!("Task #{} not found, nothing changed", id)),
            Err(e) => bail_public!(_, "{}", e),
        }
    }

    /// Write new text, priority and due date; omitted values keep the current ones
    pub async fn handle_commit_edit(
        &self,
        id: TaskId,
        text: String,
        priority: Option<String>,
        due: Option<String>,
    ) -> McpResult<String> {
        let priority = validation::parse_priority(priority.as_deref())?;
        let due = validation::parse_due_date(due.as_deref())?;

        match self.update_store(&format!("Update task {}", id), |store| {
            let Some(current) = store.get(id) else {
                return Ok(None);
            };
            store
                .commit_edit(
                    id,
                    &text,
                    priority.unwrap_or(current.priority),
                    due.unwrap_or(current.due),
                )
                .map(Some)
        }) {
            Ok(Some(_)) => Ok(format!("Task #{} updated successfully", id)),
            Ok(None) => Ok(format!("Task #{} not found, nothing changed", id)),
            Err(e) => bail_public!(_, "{}", e),
        }
    }

    /// Leave edit mode without changing the task
    pub async fn handle_cancel_edit(&self, id: TaskId) -> McpResult<String> {
        match self.update_store(&format!("Cancel edit of task {}", id), |store| {
            Ok(store.contains(id).then(|| store.cancel_edit(id)))
        }) {
            Ok(Some(_)) => Ok(format!("Edit of task #{} cancelled", id)),
            Ok(None) => Ok(format!("Task #{} not found, nothing changed", id)),
            Err(e) => bail_public!(_, "{}", e),
        }
    }
}
