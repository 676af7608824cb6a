//! Remove handler for the todo MCP server

use crate::TodoServerHandler;
use crate::todo::TaskId;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Remove a task. Repeating the call for the same ID is harmless.
    pub async fn handle_remove_task(&self, id: TaskId) -> McpResult<String> {
        let mut text = None;
        let result = self.update_store(&format!("Remove task {}", id), |store| {
            text = store.get(id).map(|t| t.text.clone());
            Ok(text.is_some().then(|| store.remove(id)))
        });

        match (result, text) {
            (Ok(Some(_)), Some(text)) => Ok(format!("Task #{} ({}) removed", id, text)),
            (Ok(_), _) => Ok(format!("Task #{} not found, nothing changed", id)),
            (Err(e), _) => bail_public!(_, "{}", e),
        }
    }
}
