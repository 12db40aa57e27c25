//! In-memory slot store with an optional byte quota.

use super::{usage_after_write, DurableStore, StorageError, StorageResult};
use std::collections::HashMap;

/// Process-local slot store.
///
/// Usage is counted as the byte length of every key plus its value, the way a
/// browser origin quota is charged.
#[derive(Debug, Clone)]
pub struct MemoryStore {
    slots: HashMap<String, String>,
    quota_bytes: Option<usize>,
    available: bool,
}

impl MemoryStore {
    /// Creates an unlimited store.
    pub fn new() -> Self {
        Self {
            slots: HashMap::new(),
            quota_bytes: None,
            available: true,
        }
    }

    /// Creates a store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::new()
        }
    }

    /// Creates a store whose every call fails with `Unavailable`.
    pub fn unavailable() -> Self {
        Self {
            available: false,
            ..Self::new()
        }
    }

    /// Current usage in bytes.
    pub fn used_bytes(&self) -> usize {
        self.slots
            .iter()
            .map(|(key, value)| key.len() + value.len())
            .sum()
    }

    /// Changes the quota for subsequent writes.
    pub fn set_quota(&mut self, quota_bytes: Option<usize>) {
        self.quota_bytes = quota_bytes;
    }

    /// Number of stored slots.
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn ensure_available(&self) -> StorageResult<()> {
        if self.available {
            Ok(())
        } else {
            Err(StorageError::Unavailable(
                "memory store disabled".to_string(),
            ))
        }
    }
}

impl Default for MemoryStore {
    fn default() -> Self {
        Self::new()
    }
}

impl DurableStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.ensure_available()?;
        Ok(self.slots.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> StorageResult<()> {
        self.ensure_available()?;
        if let Some(quota) = self.quota_bytes {
            let replaced = self.slots.get(key).map(String::len);
            let required = usage_after_write(self.used_bytes(), key, replaced, value);
            if required > quota {
                return Err(StorageError::CapacityExceeded {
                    key: key.to_string(),
                    required,
                    available: quota,
                });
            }
        }
        self.slots.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> StorageResult<()> {
        self.ensure_available()?;
        self.slots.remove(key);
        Ok(())
    }
}
