//! Common test utilities for integration tests

#![allow(dead_code)]

use chrono::NaiveDate;
use tempfile::TempDir;
use todo_mcp::{MemoryKeyValueStore, Storage, TaskId, TodoServerHandler, TodoStore};

/// Create a handler over an in-memory backend
pub fn memory_handler() -> TodoServerHandler {
    TodoServerHandler::with_storage(Storage::with_backend(MemoryKeyValueStore::new()))
}

/// Create a handler with a data file in a fresh temporary directory
pub fn file_handler() -> (TodoServerHandler, TempDir) {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("todo.toml");
    let handler = TodoServerHandler::new(path.to_str().unwrap(), false).unwrap();
    (handler, temp_dir)
}

/// Path of the data file inside a temporary directory from `file_handler`
pub fn data_path(temp_dir: &TempDir) -> String {
    temp_dir.path().join("todo.toml").to_str().unwrap().to_string()
}

pub fn ids(store: &TodoStore) -> Vec<TaskId> {
    store.tasks().iter().map(|t| t.id).collect()
}

pub fn date(y: i32, m: u32, d: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(y, m, d).unwrap()
}
