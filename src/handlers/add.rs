//! Add handler for the todo MCP server

use crate::TodoServerHandler;
use crate::validation;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Append a task. Blank text is rejected and leaves the list unchanged.
    pub async fn handle_add_task(
        &self,
        text: String,
        priority: Option<String>,
        due: Option<String>,
    ) -> McpResult<String> {
        let priority = validation::parse_priority(priority.as_deref())?.unwrap_or_default();
        let due = validation::parse_due_date(due.as_deref())?;

        let result = self.update_store(&format!("Add task {}", text.trim()), |store| {
            store.add(&text, priority, due).map(Some)
        });

        let snapshot = match result {
            Ok(snapshot) => snapshot,
            Err(e) => bail_public!(_, "{}", e),
        };
        let Some(task) = snapshot.as_ref().and_then(|s| s.store.tasks().last()) else {
            bail_public!(_, "Task was not added");
        };
        Ok(format!(
            "Task created with ID: {} (priority: {}, due: {})",
            task.id, task.priority, task.due
        ))
    }
}
