//! In-memory key-value store.

use std::collections::HashMap;
use std::sync::RwLock;
use std::sync::atomic::{AtomicBool, Ordering};

use tracing::debug;

use crate::error::{StorageError, StorageResult};
use crate::store::{validate_key, KeyValueStore};

/// Process-local store, optionally bounded by a byte quota.
///
/// The quota counts key and value bytes, mirroring browser storage limits.
/// A store can also be switched off to simulate a disabled medium.
#[derive(Debug, Default)]
pub struct MemoryStore {
    entries: RwLock<HashMap<String, String>>,
    quota_bytes: Option<usize>,
    disabled: AtomicBool,
}

impl MemoryStore {
    /// Create an unbounded store.
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a store that rejects writes beyond `quota_bytes`.
    pub fn with_quota(quota_bytes: usize) -> Self {
        Self {
            quota_bytes: Some(quota_bytes),
            ..Self::default()
        }
    }

    /// Enable or disable the store. A disabled store fails every operation.
    pub fn set_disabled(&self, disabled: bool) {
        self.disabled.store(disabled, Ordering::SeqCst);
    }

    /// Number of stored entries.
    pub fn len(&self) -> usize {
        self.entries.read().map(|e| e.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Bytes currently used by keys and values.
    pub fn used_bytes(&self) -> usize {
        self.entries
            .read()
            .map(|e| e.iter().map(|(k, v)| k.len() + v.len()).sum())
            .unwrap_or(0)
    }

    fn check_enabled(&self) -> StorageResult<()> {
        if self.disabled.load(Ordering::SeqCst) {
            return Err(StorageError::unavailable("memory store is disabled"));
        }
        Ok(())
    }
}

fn poisoned() -> StorageError {
    StorageError::unavailable("memory store lock poisoned")
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> StorageResult<Option<String>> {
        self.check_enabled()?;
        validate_key(key)?;

        let entries = self.entries.read().map_err(|_| poisoned())?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &str) -> StorageResult<()> {
        self.check_enabled()?;
        validate_key(key)?;

        let mut entries = self.entries.write().map_err(|_| poisoned())?;

        if let Some(quota) = self.quota_bytes {
            let used: usize = entries
                .iter()
                .filter(|(k, _)| k.as_str() != key)
                .map(|(k, v)| k.len() + v.len())
                .sum();
            let needed = key.len() + value.len();
            let available = quota.saturating_sub(used);
            if needed > available {
                return Err(StorageError::QuotaExceeded { needed, available });
            }
        }

        debug!(key = key, bytes = value.len(), "Stored value in memory");
        entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&self, key: &str) -> StorageResult<()> {
        self.check_enabled()?;
        validate_key(key)?;

        let mut entries = self.entries.write().map_err(|_| poisoned())?;
        entries.remove(key);
        Ok(())
    }
}
