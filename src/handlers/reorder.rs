//! Reorder handler for the todo MCP server

use crate::TodoServerHandler;
use mcp_attr::{Result as McpResult, bail_public};

impl TodoServerHandler {
    /// Move the task at position `from` to position `to`
    pub async fn handle_reorder_task(&self, from: u32, to: u32) -> McpResult<String> {
        let (from, to) = (from as usize, to as usize);
        let mut len = 0;
        let message = format!("Move task from {} to {}", from, to);
        let result = self.update_store(&message, |store| {
            len = store.len();
            let in_range = from < len && to < len && from != to;
            Ok(in_range.then(|| store.reorder(from, to)))
        });

        let snapshot = match result {
            Ok(Some(snapshot)) => snapshot,
            Ok(None) if from >= len || to >= len => {
                return Ok(format!(
                    "Position out of range (list has {} task(s)), nothing changed",
                    len
                ));
            }
            Ok(None) => {
                return Ok("Task already at that position, nothing changed".to_string());
            }
            Err(e) => bail_public!(_, "{}", e),
        };

        let id = snapshot
            .store
            .tasks()
            .get(to)
            .map(|t| t.id)
            .unwrap_or_default();
        Ok(format!("Task #{} moved from position {} to {}", id, from, to))
    }
}
