//! Durable key-value storage behind the cart.
//!
//! The cart needs exactly two operations from its backing store: read a
//! string by key and overwrite a string by key. [`KeyValueStore`] is that
//! seam; [`MemoryStore`] and [`FileStore`] are the two backends shipped here.

mod file;
mod memory;

use thiserror::Error;

pub use file::FileStore;
pub use memory::MemoryStore;

/// The key the cart is persisted under.
pub const STORAGE_KEY: &str = "products";

/// Storage backend failures.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Filesystem operation failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The key cannot be used by this backend.
    #[error("invalid storage key {0:?}")]
    InvalidKey(String),

    /// Backend-specific failure.
    #[error("storage backend error: {0}")]
    Backend(String),
}

/// A string-to-string store that outlives the process.
///
/// Implementations need no transactional guarantees; the cart always
/// overwrites the whole value.
pub trait KeyValueStore: Send + Sync + 'static {
    /// Read the value stored under `key`, if any.
    fn get(&self, key: &str) -> impl Future<Output = Result<Option<String>, StorageError>> + Send;

    /// Replace the value stored under `key`.
    fn set(&self, key: &str, value: &str) -> impl Future<Output = Result<(), StorageError>> + Send;
}
