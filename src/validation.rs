//! Validation helper functions for tool arguments
//!
//! Arguments are parsed here before the store is touched, so a bad request
//! never produces a partial change.

use crate::todo::{Filter, Priority};
use chrono::NaiveDate;
use mcp_attr::Result as McpResult;

fn invalid_params(message: String) -> mcp_attr::Error {
    mcp_attr::Error::new(mcp_attr::ErrorCode::INVALID_PARAMS).with_message(message, true)
}

/// Parse an optional priority, `None` or blank meaning not given
pub fn parse_priority(priority: Option<&str>) -> McpResult<Option<Priority>> {
    match priority.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => s.parse::<Priority>().map(Some).map_err(invalid_params),
    }
}

/// Parse a due date in YYYY-MM-DD format, `None` or blank meaning no date
pub fn parse_due_date(date: Option<&str>) -> McpResult<Option<NaiveDate>> {
    match date.map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|_| {
                invalid_params(format!(
                    "Invalid date format '{}'. Use YYYY-MM-DD (e.g., '2025-03-15')",
                    s
                ))
            }),
    }
}

/// Parse a list filter, `None` or blank meaning all tasks
pub fn parse_filter(filter: Option<&str>) -> McpResult<Filter> {
    match filter.map(str::trim) {
        None | Some("") => Ok(Filter::All),
        Some(s) => s.parse::<Filter>().map_err(invalid_params),
    }
}
