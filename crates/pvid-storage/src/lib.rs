//! Durable key-value storage for studio state.
//!
//! This crate provides:
//! - The `KeyValueStore` persistence surface (get/set/remove by string key)
//! - An in-memory store with optional byte quota
//! - A directory-backed store with atomic writes

pub mod error;
pub mod file;
pub mod memory;
pub mod store;

pub use error::{StorageError, StorageResult};
pub use file::FileStore;
pub use memory::MemoryStore;
pub use store::{validate_key, KeyValueStore, MAX_KEY_LEN};
