#![forbid(unsafe_code)]

use crate::backend::{Backend, FileBackend, MemoryBackend, SqliteBackend};
use crate::{
    CollectionStore, DeleteBuilder, InsertBuilder, Record, SelectBuilder, StoreError,
    UpdateBuilder,
};
use orbit_core::{StorageKey, Table};
use std::path::Path;

/// Entry point for the query API: `db.from("projects").select("*")...`.
#[derive(Debug)]
pub struct Database {
    store: CollectionStore,
}

impl Database {
    pub fn new(store: CollectionStore) -> Self {
        Self { store }
    }

    pub fn with_backend(backend: impl Backend + 'static) -> Self {
        Self::new(CollectionStore::new(backend))
    }

    pub fn in_memory() -> Self {
        Self::with_backend(MemoryBackend::new())
    }

    pub fn open_sqlite(storage_dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::with_backend(SqliteBackend::open(storage_dir)?))
    }

    pub fn open_files(dir: impl AsRef<Path>) -> Result<Self, StoreError> {
        Ok(Self::with_backend(FileBackend::open(dir)?))
    }

    pub fn store(&self) -> &CollectionStore {
        &self.store
    }

    /// Unknown names are accepted and stored under a derived key.
    pub fn from(&self, name: &str) -> TableAccessor<'_> {
        let key = StorageKey::resolve(name);
        if key.is_derived() {
            log::warn!("unknown table {name}, using storage key {}", key.as_str());
        }
        TableAccessor {
            store: &self.store,
            key,
        }
    }

    pub fn table(&self, table: Table) -> TableAccessor<'_> {
        TableAccessor {
            store: &self.store,
            key: StorageKey::Known(table),
        }
    }

    pub fn collections(&self) -> Result<Vec<String>, StoreError> {
        self.store.collections()
    }
}

/// Builder factory bound to one storage key.
#[derive(Clone, Debug)]
pub struct TableAccessor<'a> {
    store: &'a CollectionStore,
    key: StorageKey,
}

impl<'a> TableAccessor<'a> {
    pub fn storage_key(&self) -> &str {
        self.key.as_str()
    }

    pub fn select(&self, columns: &str) -> SelectBuilder<'a> {
        SelectBuilder::new(self.store, self.key.as_str()).select(columns)
    }

    pub fn insert(&self, row: Record) -> InsertBuilder<'a> {
        InsertBuilder::new(self.store, self.key.as_str(), vec![row])
    }

    pub fn insert_many(&self, rows: impl IntoIterator<Item = Record>) -> InsertBuilder<'a> {
        InsertBuilder::new(self.store, self.key.as_str(), rows.into_iter().collect())
    }

    pub fn update(&self, changes: Record) -> UpdateBuilder<'a> {
        UpdateBuilder::new(self.store, self.key.as_str(), changes)
    }

    pub fn delete(&self) -> DeleteBuilder<'a> {
        DeleteBuilder::new(self.store, self.key.as_str())
    }
}
