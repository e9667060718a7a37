//! In-memory storage backend.

use std::collections::HashMap;

use crate::core::LedgerError;
use crate::infra::storage::StorageBackend;

/// Simple in-memory backend for development and testing.
///
/// Construct with [`MemoryStorage::failing`] to simulate an unreachable
/// medium: every operation then returns a backend error, which the gateway
/// probe turns into unavailable/no-op behavior.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    slots: HashMap<String, String>,
    fail: bool,
}

impl MemoryStorage {
    /// Create an empty backend.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a backend that fails every operation.
    pub fn failing() -> Self {
        Self {
            slots: HashMap::new(),
            fail: true,
        }
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    /// Whether no slots are stored.
    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }
}

impl StorageBackend for MemoryStorage {
    fn get(&self, key: &str) -> Result<Option<String>, LedgerError> {
        if self.fail {
            return Err(LedgerError::Backend("memory backend disabled".into()));
        }
        Ok(self.slots.get(key).cloned())
    }

    fn put(&mut self, key: &str, value: &str) -> Result<(), LedgerError> {
        if self.fail {
            return Err(LedgerError::Backend("memory backend disabled".into()));
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), LedgerError> {
        if self.fail {
            return Err(LedgerError::Backend("memory backend disabled".into()));
        }
        self.slots.remove(key);
        Ok(())
    }

    fn used_bytes(&self) -> u64 {
        self.slots
            .iter()
            .map(|(k, v)| (k.len() + v.len()) as u64)
            .sum()
    }
}
