//! Key-value boundary for the last-entered token.
//!
//! The contract is deliberately small: `get`/`set` on string keys, with one
//! fixed key in use. Storage failures never propagate out of a session edit;
//! the session records the error and keeps operating on the in-memory value.

use std::collections::HashMap;
use thiserror::Error;

/// The single cache key: the raw compact token, plain text.
pub const STORAGE_KEY: &str = "app:jwt";

#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable: {0}")]
    Unavailable(String),
    #[error("storage write failed: {0}")]
    WriteFailed(String),
}

pub trait Storage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}

/// In-memory storage, used for tests and as the fallback when a real
/// backend is unavailable.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    entries: HashMap<String, String>,
}

impl MemoryStorage {
    pub fn new() -> Self {
        Self::default()
    }
}

impl Storage for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}
