//! Todo MCP Server Library
//!
//! This library provides a Model Context Protocol (MCP) server for a simple
//! prioritized todo list: add, edit, check, delete and reorder tasks, filter
//! them by completion, and flip a light/dark theme flag.
//!
//! # Architecture
//!
//! The library follows a 3-layer architecture:
//! - **MCP Layer**: `TodoServerHandler` - Translates tool calls into store operations
//! - **Domain Layer**: `todo` module - Task records, pure store transitions, filters
//! - **Persistence Layer**: `storage` module - Best-effort key-value persistence with optional Git sync
//!
//! # Example
//!
//! ```no_run
//! use todo_mcp::TodoServerHandler;
//! use anyhow::Result;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let handler = TodoServerHandler::new("todo.toml", false)?;
//!     // Use handler with MCP server...
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod formatting;
mod git_ops;
mod handlers;
pub mod kv;
pub mod storage;
pub mod todo;
pub mod validation;

use anyhow::{Result, ensure};
use mcp_attr::Result as McpResult;
use mcp_attr::server::{McpServer, mcp_server};
use std::path::Path;
use std::sync::{Mutex, MutexGuard};
use tokio::sync::watch;

// Re-export commonly used types
pub use error::{PersistenceError, ValidationError};
pub use kv::{FileKeyValueStore, KeyValueStore, MemoryKeyValueStore};
pub use storage::{Snapshot, Storage};
pub use todo::{Filter, Operation, Priority, Task, TaskId, TodoStore};

/// MCP Server handler for the todo list
///
/// Holds the current snapshot (tasks and theme flag). Every mutation is
/// persisted through `Storage` and published to subscribers.
pub struct TodoServerHandler {
    pub(crate) state: Mutex<Snapshot>,
    pub(crate) storage: Storage,
    changes: watch::Sender<Snapshot>,
}

impl TodoServerHandler {
    /// Create a new handler backed by a data file
    ///
    /// # Arguments
    /// * `storage_path` - Path to the data file (TOML key-value format)
    /// * `sync_git` - Enable automatic Git commits of the data file
    ///
    /// # Returns
    /// Result containing the handler, or an error when the data file's
    /// directory does not exist
    pub fn new(storage_path: &str, sync_git: bool) -> Result<Self> {
        let path = Path::new(storage_path);
        if let Some(parent) = path.parent()
            && !parent.as_os_str().is_empty()
        {
            ensure!(
                parent.is_dir(),
                "Directory '{}' for the data file does not exist",
                parent.display()
            );
        }

        Ok(Self::with_storage(Storage::new(path, sync_git)))
    }

    /// Create a handler over an already configured storage
    pub fn with_storage(storage: Storage) -> Self {
        let snapshot = storage.load();
        tracing::info!(
            tasks = snapshot.store.len(),
            dark_mode = snapshot.dark_mode,
            "todo list loaded"
        );
        let (changes, _) = watch::channel(snapshot.clone());
        Self {
            state: Mutex::new(snapshot),
            storage,
            changes,
        }
    }

    /// Subscribe to snapshots published after every change
    pub fn subscribe(&self) -> watch::Receiver<Snapshot> {
        self.changes.subscribe()
    }

    /// Current tasks and theme flag
    pub fn snapshot(&self) -> Snapshot {
        self.lock_state().clone()
    }

    pub(crate) fn lock_state(&self) -> MutexGuard<'_, Snapshot> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    /// Replace the store with the result of `transition`, then persist and
    /// publish the new snapshot
    ///
    /// `transition` runs under the state lock and returns `Ok(None)` when
    /// there is nothing to change (e.g. the task is gone). In that case, and
    /// on a validation error, nothing is changed, saved or published.
    pub(crate) fn update_store(
        &self,
        message: &str,
        transition: impl FnOnce(&TodoStore) -> Result<Option<TodoStore>, ValidationError>,
    ) -> Result<Option<Snapshot>, ValidationError> {
        let mut state = self.lock_state();
        let Some(next) = transition(&state.store)? else {
            return Ok(None);
        };
        state.store = next;
        self.persist(&state, message);
        Ok(Some(state.clone()))
    }

    /// Flip the theme flag, then persist and publish
    pub(crate) fn update_theme(&self) -> bool {
        let mut state = self.lock_state();
        state.dark_mode = !state.dark_mode;
        let message = if state.dark_mode {
            "Switch to dark theme"
        } else {
            "Switch to light theme"
        };
        self.persist(&state, message);
        state.dark_mode
    }

    fn persist(&self, snapshot: &Snapshot, message: &str) {
        tracing::debug!(commit_message = message, tasks = snapshot.store.len(), "state changed");
        self.storage
            .save_with_message(&snapshot.store, snapshot.dark_mode, message);
        self.changes.send_replace(snapshot.clone());
    }
}

impl Drop for TodoServerHandler {
    fn drop(&mut self) {
        // Push to git on shutdown if sync is enabled
        if let Err(e) = self.storage.shutdown() {
            tracing::warn!(error = %e, "shutdown git sync failed");
        }
    }
}

/// Todo list server: a single ordered list of tasks with priority and due date.
///
/// Each task has a numeric ID (#1, #2, ...) that never changes. Positions shown by
/// list_tasks are 0-based store indices and are what reorder_task takes.
/// Priorities: High, Medium (default), Low. Dates: YYYY-MM-DD, due defaults to today.
#[mcp_server]
impl McpServer for TodoServerHandler {
    /// **Add**: Append a new task to the end of the list. Text must not be blank.
    #[tool]
    async fn add_task(
        &self,
        /// Text: what needs to be done
        text: String,
        /// Priority: High/Medium/Low (optional, default Medium)
        priority: Option<String>,
        /// Due date: YYYY-MM-DD (optional, default today)
        due: Option<String>,
    ) -> McpResult<String> {
        self.handle_add_task(text, priority, due).await
    }

    /// **Check**: Flip a task between done and pending.
    #[tool]
    async fn toggle_task(
        &self,
        /// Task ID
        id: u32,
    ) -> McpResult<String> {
        self.handle_toggle_task(id).await
    }

    /// **Edit (begin)**: Mark a task as being edited. Finish with commit_edit or cancel_edit.
    #[tool]
    async fn start_edit(
        &self,
        /// Task ID
        id: u32,
    ) -> McpResult<String> {
        self.handle_start_edit(id).await
    }

    /// **Edit (save)**: Set text, priority and due date of a task and leave edit mode.
    /// Omitted priority/due keep their current values. Text must not be blank.
    #[tool]
    async fn commit_edit(
        &self,
        /// Task ID
        id: u32,
        /// New text
        text: String,
        /// New priority: High/Medium/Low (optional)
        priority: Option<String>,
        /// New due date: YYYY-MM-DD (optional)
        due: Option<String>,
    ) -> McpResult<String> {
        self.handle_commit_edit(id, text, priority, due).await
    }

    /// **Edit (discard)**: Leave edit mode without changing the task.
    #[tool]
    async fn cancel_edit(
        &self,
        /// Task ID
        id: u32,
    ) -> McpResult<String> {
        self.handle_cancel_edit(id).await
    }

    /// **Delete**: Remove a task permanently. Removing an unknown ID does nothing.
    #[tool]
    async fn remove_task(
        &self,
        /// Task ID
        id: u32,
    ) -> McpResult<String> {
        self.handle_remove_task(id).await
    }

    /// **Reorder**: Move the task at position `from` to position `to` (0-based, as shown by list_tasks).
    #[tool]
    async fn reorder_task(
        &self,
        /// Current position
        from: u32,
        /// Target position
        to: u32,
    ) -> McpResult<String> {
        self.handle_reorder_task(from, to).await
    }

    /// **List**: Show tasks in list order with their positions, IDs, priority and due date.
    #[tool]
    async fn list_tasks(
        &self,
        /// Filter: all/completed/pending (optional, default all)
        filter: Option<String>,
    ) -> McpResult<String> {
        self.handle_list_tasks(filter).await
    }

    /// **Theme**: Switch between light and dark theme.
    #[tool]
    async fn toggle_theme(&self) -> McpResult<String> {
        self.handle_toggle_theme().await
    }
}
