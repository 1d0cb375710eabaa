//! Best score persistence
//!
//! Features:
//! - Single integer stored as a decimal string under a fixed key
//! - Pluggable key-value backends (LocalStorage on web, in-memory elsewhere)
//! - Storage failures degrade to a session-only best score, never a crash

pub mod best;

pub use best::{BestScoreRecord, parse_best_score};

use std::collections::HashMap;
use std::fmt;

/// Storage failure
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageError {
    /// No storage backend could be reached (private browsing, sandboxed iframe...)
    Unavailable,
    /// The backend refused a write (quota exceeded, permissions)
    WriteRejected {
        key: String,
        reason: String,
    },
}

impl fmt::Display for StorageError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            StorageError::Unavailable => write!(f, "storage is unavailable"),
            StorageError::WriteRejected { key, reason } => {
                write!(f, "write to '{key}' rejected: {reason}")
            }
        }
    }
}

impl std::error::Error for StorageError {}

/// String key-value storage
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory store (native builds and tests)
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store pre-populated with one entry
    pub fn with_entry(key: &str, value: &str) -> Self {
        let mut store = Self::new();
        store.entries.insert(key.to_string(), value.to_string());
        store
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// Store that fails every operation
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableStore;

impl KeyValueStore for UnavailableStore {
    fn get(&self, _key: &str) -> Result<Option<String>, StorageError> {
        Err(StorageError::Unavailable)
    }

    fn set(&mut self, _key: &str, _value: &str) -> Result<(), StorageError> {
        Err(StorageError::Unavailable)
    }
}

/// Browser LocalStorage
#[cfg(target_arch = "wasm32")]
pub struct LocalStorageStore {
    storage: Option<web_sys::Storage>,
}

#[cfg(target_arch = "wasm32")]
impl LocalStorageStore {
    pub fn new() -> Self {
        let storage = web_sys::window()
            .and_then(|w| w.local_storage().ok())
            .flatten();
        if storage.is_none() {
            log::warn!("LocalStorage unavailable - best score will not persist");
        }
        Self { storage }
    }
}

#[cfg(target_arch = "wasm32")]
impl KeyValueStore for LocalStorageStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage.get_item(key).map_err(|_| StorageError::Unavailable)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let storage = self.storage.as_ref().ok_or(StorageError::Unavailable)?;
        storage
            .set_item(key, value)
            .map_err(|e| StorageError::WriteRejected {
                key: key.to_string(),
                reason: format!("{e:?}"),
            })
    }
}
