//! List handler for the todo MCP server

use crate::TodoServerHandler;
use crate::formatting;
use crate::validation;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Render the tasks selected by `filter`
    pub async fn handle_list_tasks(&self, filter: Option<String>) -> McpResult<String> {
        let filter = validation::parse_filter(filter.as_deref())?;
        let snapshot = self.snapshot();
        Ok(formatting::format_tasks(
            &snapshot.store,
            filter,
            snapshot.dark_mode,
        ))
    }
}
