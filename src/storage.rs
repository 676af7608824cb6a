//! Persistence adapter for the todo store
//!
//! Tasks are written as a JSON array under one key and the theme flag as
//! `"true"`/`"false"` under another. Writes are best effort: `save` logs
//! failures and returns, it never fails the operation that triggered it.

use crate::error::PersistenceError;
use crate::git_ops::GitSync;
use crate::kv::{FileKeyValueStore, KeyValueStore};
use crate::todo::{Task, TodoStore, normalize_loaded_tasks};
use std::path::Path;

/// Key holding the JSON task array
pub const TASKS_KEY: &str = "todoList";

/// Key holding the dark-mode flag
pub const THEME_KEY: &str = "darkMode";

/// Everything the persistence adapter stores
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Snapshot {
    pub store: TodoStore,
    pub dark_mode: bool,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            store: TodoStore::seeded(),
            dark_mode: false,
        }
    }
}

pub struct Storage {
    backend: Box<dyn KeyValueStore>,
    git: Option<GitSync>,
}

impl Storage {
    /// Create a storage backed by a TOML file
    ///
    /// # Arguments
    /// * `file_path` - Path to the data file, created on first save
    /// * `sync_git` - Commit the data file after every save
    pub fn new(file_path: impl AsRef<Path>, sync_git: bool) -> Self {
        let file_path = file_path.as_ref();
        let git = sync_git.then(|| GitSync::new(file_path));
        if let Some(git) = &git
            && !git.is_git_managed()
        {
            tracing::warn!(
                path = %file_path.display(),
                "git sync requested but the data file is not inside a git repository"
            );
        }

        Self {
            backend: Box::new(FileKeyValueStore::new(file_path)),
            git,
        }
    }

    /// Create a storage over any key-value backend, without git sync
    pub fn with_backend(backend: impl KeyValueStore + 'static) -> Self {
        Self {
            backend: Box::new(backend),
            git: None,
        }
    }

    /// Path of the data file, `None` for non-file backends
    pub fn file_path(&self) -> Option<&Path> {
        self.backend.file_path()
    }

    /// Load tasks and theme, falling back to defaults for anything missing or
    /// unreadable
    pub fn load(&self) -> Snapshot {
        Snapshot {
            store: self.load_tasks(),
            dark_mode: self.load_theme(),
        }
    }

    /// Load the task list, or the seed list when absent or malformed
    pub fn load_tasks(&self) -> TodoStore {
        let raw = match self.backend.get(TASKS_KEY) {
            Ok(Some(raw)) => raw,
            Ok(None) => {
                tracing::info!("no stored tasks, starting from the seed list");
                return TodoStore::seeded();
            }
            Err(e) => {
                tracing::warn!(error = %e, "failed to read stored tasks, using the seed list");
                return TodoStore::seeded();
            }
        };

        match decode_tasks(&raw) {
            Ok(tasks) => {
                let (tasks, report) = normalize_loaded_tasks(tasks);
                if report.reassigned > 0 {
                    tracing::warn!(
                        reassigned = report.reassigned,
                        "stored tasks had duplicate ids, reassigned"
                    );
                }
                if report.dropped > 0 {
                    tracing::warn!(
                        dropped = report.dropped,
                        "stored tasks had blank text, dropped"
                    );
                }
                TodoStore::from_tasks(tasks)
            }
            Err(e) => {
                tracing::warn!(error = %e, "stored tasks are malformed, using the seed list");
                TodoStore::seeded()
            }
        }
    }

    /// Load the dark-mode flag, light theme when absent or unparseable
    pub fn load_theme(&self) -> bool {
        match self.backend.get(THEME_KEY) {
            Ok(Some(raw)) => raw.trim().parse().unwrap_or_else(|_| {
                tracing::warn!(value = %raw, "unrecognized theme flag, using light theme");
                false
            }),
            Ok(None) => false,
            Err(e) => {
                tracing::warn!(error = %e, "failed to read theme flag, using light theme");
                false
            }
        }
    }

    /// Save tasks and theme, logging and swallowing any failure
    pub fn save(&self, store: &TodoStore, dark_mode: bool) {
        self.save_with_message(store, dark_mode, "Update todo list");
    }

    /// Save tasks and theme with a git commit message, logging and swallowing
    /// any failure
    pub fn save_with_message(&self, store: &TodoStore, dark_mode: bool, message: &str) {
        if let Err(e) = self.try_save(store, dark_mode, message) {
            tracing::warn!(error = %e, commit_message = message, "failed to persist todo list");
        }
    }

    /// Save tasks and theme, reporting the first failure
    pub fn try_save(
        &self,
        store: &TodoStore,
        dark_mode: bool,
        message: &str,
    ) -> Result<(), PersistenceError> {
        self.backend.set(TASKS_KEY, &encode_tasks(store.tasks())?)?;
        self.backend.set(THEME_KEY, if dark_mode { "true" } else { "false" })?;

        if let (Some(git), Some(path)) = (&self.git, self.backend.file_path()) {
            git.commit(path, message).map_err(PersistenceError::Git)?;
        }
        Ok(())
    }

    /// Push committed changes on shutdown when git sync is enabled
    pub fn shutdown(&self) -> Result<(), PersistenceError> {
        match &self.git {
            Some(git) if git.is_git_managed() => git.push().map_err(PersistenceError::Git),
            _ => Ok(()),
        }
    }
}

/// Encode tasks as the stored JSON array, without the edit marker
pub fn encode_tasks(tasks: &[Task]) -> Result<String, PersistenceError> {
    Ok(serde_json::to_string(tasks)?)
}

/// Decode the stored JSON array
pub fn decode_tasks(raw: &str) -> Result<Vec<Task>, PersistenceError> {
    Ok(serde_json::from_str(raw)?)
}
