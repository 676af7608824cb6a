//! Toggle handler for the todo MCP server

use crate::TodoServerHandler;
use crate::todo::TaskId;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Flip a task between done and pending
    pub async fn handle_toggle_task(&self, id: TaskId) -> McpResult<String> {
        let result = self.update_store(&format!("Toggle task {}", id), |store| {
            Ok(store.contains(id).then(|| store.toggle(id)))
        });

        let done = match result {
            Ok(Some(snapshot)) => snapshot.store.get(id).is_some_and(|t| t.done),
            Ok(None) => return Ok(format!("Task #{} not found, nothing changed", id)),
            Err(e) => bail_public!(_, "{}", e),
        };
        Ok(format!(
            "Task #{} marked as {}",
            id,
            if done { "done" } else { "pending" }
        ))
    }
}
