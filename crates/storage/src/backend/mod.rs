#![forbid(unsafe_code)]

//! Raw key-value persistence behind the collection store.
//!
//! Backends deal in whole string values only. All methods take `&self`:
//! the store is driven from one thread, and each backend keeps whatever
//! interior mutability it needs.

mod files;
mod memory;
mod sqlite;

pub use files::FileBackend;
pub use memory::MemoryBackend;
pub use sqlite::SqliteBackend;

use crate::StoreError;

pub trait Backend {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    /// Replaces the value under `key` in a single write.
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;

    fn keys(&self) -> Result<Vec<String>, StoreError>;
}

impl<B: Backend + ?Sized> Backend for Box<B> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).put(key, value)
    }

    fn keys(&self) -> Result<Vec<String>, StoreError> {
        (**self).keys()
    }
}
