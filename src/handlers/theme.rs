//! Theme handler for the todo MCP server

use crate::TodoServerHandler;
use mcp_attr::Result as McpResult;

impl TodoServerHandler {
    /// Flip between light and dark theme
    pub async fn handle_toggle_theme(&self) -> McpResult<String> {
        let dark_mode = self.update_theme();
        Ok(format!(
            "Theme switched to {}",
            if dark_mode { "dark" } else { "light" }
        ))
    }
}
