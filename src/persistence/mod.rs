//! Key-value persistence
//!
//! The game stores two small string values (mute flag and high score). Every
//! backend implements [`KvStore`]; callers treat failures as non-fatal.
//!
//! Backends:
//! - [`MemoryStore`]: tests and throwaway runs
//! - [`JsonFileStore`]: native, one JSON object per file
//! - [`LocalStorageStore`]: browser LocalStorage

#[cfg(not(target_arch = "wasm32"))]
pub mod file;
#[cfg(target_arch = "wasm32")]
pub mod local;
pub mod memory;

#[cfg(not(target_arch = "wasm32"))]
pub use file::JsonFileStore;
#[cfg(target_arch = "wasm32")]
pub use local::LocalStorageStore;
pub use memory::MemoryStore;

use thiserror::Error;

/// Errors from a storage backend
#[derive(Debug, Error)]
pub enum StorageError {
    #[error("storage unavailable")]
    Unavailable,
    #[error("storage I/O failed: {0}")]
    Io(#[from] std::io::Error),
    #[error("stored data is corrupt: {0}")]
    Corrupt(#[from] serde_json::Error),
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// String key-value store
pub trait KvStore {
    /// Value stored under `key`, `None` if never set
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Store `value` under `key`, replacing any previous value
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;
}
