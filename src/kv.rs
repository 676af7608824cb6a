//! Key-value backends for the persistence adapter
//!
//! Values are strings, mirroring browser local storage. The file backend
//! keeps every key in one TOML table so the data file stays readable and
//! produces small diffs under git.

use crate::error::PersistenceError;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// A string key-value store
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `None` when the key was never written
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError>;

    /// Write a value, replacing any previous one
    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError>;

    /// Path of the backing file, if any
    fn file_path(&self) -> Option<&Path> {
        None
    }
}

/// Key-value store backed by a TOML file
pub struct FileKeyValueStore {
    file_path: PathBuf,
}

impl FileKeyValueStore {
    pub fn new(file_path: impl AsRef<Path>) -> Self {
        Self {
            file_path: file_path.as_ref().to_path_buf(),
        }
    }

    fn read_all(&self) -> Result<BTreeMap<String, String>, PersistenceError> {
        if !self.file_path.exists() {
            return Ok(BTreeMap::new());
        }

        let content = fs::read_to_string(&self.file_path)?;
        if content.trim().is_empty() {
            return Ok(BTreeMap::new());
        }
        Ok(toml::from_str(&content)?)
    }
}

impl KeyValueStore for FileKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        Ok(self.read_all()?.remove(key))
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        // Corrupt content is discarded so later writes still land
        let mut entries = match self.read_all() {
            Err(PersistenceError::TomlDecode(e)) => {
                tracing::warn!(
                    path = %self.file_path.display(),
                    error = %e,
                    "storage file is corrupt, replacing it"
                );
                BTreeMap::new()
            }
            result => result?,
        };
        entries.insert(key.to_string(), value.to_string());
        let content = toml::to_string_pretty(&entries)?;
        fs::write(&self.file_path, content)?;
        Ok(())
    }

    fn file_path(&self) -> Option<&Path> {
        Some(&self.file_path)
    }
}

/// In-memory key-value store, for tests and ephemeral sessions
#[derive(Default)]
pub struct MemoryKeyValueStore {
    entries: Mutex<BTreeMap<String, String>>,
}

impl MemoryKeyValueStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store pre-populated with entries
    pub fn with_entries<'a>(entries: impl IntoIterator<Item = (&'a str, &'a str)>) -> Self {
        let entries = entries
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            entries: Mutex::new(entries),
        }
    }
}

impl KeyValueStore for MemoryKeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, PersistenceError> {
        let entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> Result<(), PersistenceError> {
        let mut entries = self.entries.lock().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
