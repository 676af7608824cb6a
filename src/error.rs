//! Error types for the todo store and its persistence adapter
//!
//! Only two kinds exist: validation failures, which abort the operation and
//! are reported to the user, and persistence failures, which are logged and
//! otherwise ignored.

use thiserror::Error;

/// Rejected store operation, the store is left unchanged
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Enter valid text: task text must not be empty")]
    EmptyText,

    #[error("No task ids left: the highest possible id is already taken")]
    IdsExhausted,
}

/// Failure reading or writing the key-value store
#[derive(Debug, Error)]
pub enum PersistenceError {
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse storage file: {0}")]
    TomlDecode(#[from] toml::de::Error),

    #[error("failed to write storage file: {0}")]
    TomlEncode(#[from] toml::ser::Error),

    #[error("failed to encode task list: {0}")]
    Json(#[from] serde_json::Error),

    #[error("git sync failed: {0:#}")]
    Git(anyhow::Error),
}
