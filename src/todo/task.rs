use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Task identifier, unique within a store
pub type TaskId = u32;

/// Get the current date in local timezone
pub fn local_date_today() -> NaiveDate {
    Local::now().date_naive()
}

/// Task priority
///
/// Serialized as "High", "Medium" or "Low" to stay compatible with the
/// stored task array.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum Priority {
    High,
    #[default]
    Medium,
    Low,
}

impl FromStr for Priority {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "high" => Ok(Priority::High),
            "medium" => Ok(Priority::Medium),
            "low" => Ok(Priority::Low),
            _ => Err(format!(
                "Invalid priority '{}'. Valid options are: High, Medium, Low",
                s
            )),
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Priority::High => "High",
            Priority::Medium => "Medium",
            Priority::Low => "Low",
        };
        f.write_str(name)
    }
}

/// A single todo entry
///
/// The persisted field names (`uniqueNo`, `isChecked`) match the task array
/// written by the browser widget, so existing local storage dumps load as-is.
/// `id` and `done` are accepted as aliases when reading.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    /// Description shown in the list
    pub text: String,
    /// Unique identifier within the store
    #[serde(rename = "uniqueNo", alias = "id")]
    pub id: TaskId,
    /// Completion flag
    #[serde(rename = "isChecked", alias = "done", default)]
    pub done: bool,
    /// Priority, Medium when missing
    #[serde(default)]
    pub priority: Priority,
    /// Due date (format: YYYY-MM-DD), today when missing
    #[serde(default = "local_date_today")]
    pub due: NaiveDate,
    /// Session-only edit marker, never persisted
    #[serde(skip)]
    pub editing: bool,
}

impl Task {
    /// Create a pending, non-editing task
    pub fn new(id: TaskId, text: impl Into<String>, priority: Priority, due: NaiveDate) -> Self {
        Self {
            text: text.into(),
            id,
            done: false,
            priority,
            due,
            editing: false,
        }
    }

    /// Check if the task is past its due date and still pending
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.done && self.due < today
    }
}

/// The fixed list a fresh store starts with
pub fn seed_tasks() -> Vec<Task> {
    let today = local_date_today();
    vec![
        Task::new(1, "Learn HTML", Priority::Medium, today),
        Task::new(2, "Learn CSS", Priority::Medium, today),
        Task::new(3, "Learn JavaScript", Priority::Medium, today),
    ]
}
