use super::store::TodoStore;
use super::task::Task;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// View selector over the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Filter {
    #[default]
    All,
    Completed,
    Pending,
}

impl Filter {
    /// Check if a task belongs to this view
    pub fn matches(self, task: &Task) -> bool {
        match self {
            Filter::All => true,
            Filter::Completed => task.done,
            Filter::Pending => !task.done,
        }
    }
}

impl FromStr for Filter {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(Filter::All),
            "completed" => Ok(Filter::Completed),
            "pending" => Ok(Filter::Pending),
            _ => Err(format!(
                "Invalid filter '{}'. Valid options are: all, completed, pending",
                s
            )),
        }
    }
}

impl fmt::Display for Filter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Filter::All => "all",
            Filter::Completed => "completed",
            Filter::Pending => "pending",
        };
        f.write_str(name)
    }
}

/// Borrow the tasks of `store` selected by `filter`, in store order
pub fn apply(store: &TodoStore, filter: Filter) -> impl Iterator<Item = &Task> + '_ {
    store.tasks().iter().filter(move |task| filter.matches(task))
}

/// Task counts for the list header
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Summary {
    pub total: usize,
    pub completed: usize,
    pub pending: usize,
}

impl Summary {
    pub fn of(store: &TodoStore) -> Self {
        let completed = apply(store, Filter::Completed).count();
        Self {
            total: store.len(),
            completed,
            pending: store.len() - completed,
        }
    }
}
