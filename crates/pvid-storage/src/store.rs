//! Key-value persistence surface.

use crate::error::{StorageError, StorageResult};

/// Maximum accepted key length.
pub const MAX_KEY_LEN: usize = 128;

/// Durable string key-value storage.
///
/// Reads and writes are synchronous from the caller's point of view. Every
/// operation reports failure so callers can decide whether to surface it.
pub trait KeyValueStore: Send + Sync {
    /// Read the value stored under `key`.
    fn get(&self, key: &str) -> StorageResult<Option<String>>;

    /// Store `value` under `key`, replacing any previous value.
    fn set(&self, key: &str, value: &str) -> StorageResult<()>;

    /// Delete `key`. Removing a missing key succeeds.
    fn remove(&self, key: &str) -> StorageResult<()>;

    /// Whether a value exists under `key`.
    fn contains(&self, key: &str) -> StorageResult<bool> {
        Ok(self.get(key)?.is_some())
    }
}

/// Check that a key is non-empty, bounded and limited to `[A-Za-z0-9._-]`.
///
/// Keys double as file names in [`crate::FileStore`], so path separators
/// and leading dots are rejected.
pub fn validate_key(key: &str) -> StorageResult<()> {
    if key.is_empty() {
        return Err(StorageError::invalid_key("key is empty"));
    }

    if key.len() > MAX_KEY_LEN {
        return Err(StorageError::invalid_key(format!(
            "key exceeds {} characters",
            MAX_KEY_LEN
        )));
    }

    if key.starts_with('.') {
        return Err(StorageError::invalid_key(format!("{} starts with '.'", key)));
    }

    if !key
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'))
    {
        return Err(StorageError::invalid_key(format!(
            "{} contains unsupported characters",
            key
        )));
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_key() {
        assert!(validate_key("video-creation-progress").is_ok());
        assert!(validate_key("user_42.draft").is_ok());

        assert!(validate_key("").is_err());
        assert!(validate_key("../etc/passwd").is_err());
        assert!(validate_key("a/b").is_err());
        assert!(validate_key(".hidden").is_err());
        assert!(validate_key(&"k".repeat(MAX_KEY_LEN + 1)).is_err());
    }
}
