#![forbid(unsafe_code)]

use crate::backend::Backend;
use crate::{Record, StoreError};

/// Ordered record sequences, one JSON array per storage key.
pub struct CollectionStore {
    backend: Box<dyn Backend>,
}

impl CollectionStore {
    pub fn new(backend: impl Backend + 'static) -> Self {
        Self {
            backend: Box::new(backend),
        }
    }

    /// A key that was never written reads as an empty collection; a value
    /// that does not decode is an error, never an empty collection.
    pub fn read(&self, key: &str) -> Result<Vec<Record>, StoreError> {
        let Some(raw) = self.backend.get(key)? else {
            return Ok(Vec::new());
        };
        decode_collection(key, &raw)
    }

    /// Replaces the whole sequence under `key`.
    pub fn write(&self, key: &str, records: &[Record]) -> Result<(), StoreError> {
        let raw = serde_json::to_string(records)?;
        self.backend.put(key, &raw)
    }

    pub fn collections(&self) -> Result<Vec<String>, StoreError> {
        self.backend.keys()
    }
}

impl std::fmt::Debug for CollectionStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CollectionStore").finish_non_exhaustive()
    }
}

fn decode_collection(key: &str, raw: &str) -> Result<Vec<Record>, StoreError> {
    if raw.is_empty() {
        return Ok(Vec::new());
    }
    serde_json::from_str::<Vec<Record>>(raw).map_err(|err| StoreError::Corrupt {
        key: key.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::MemoryBackend;
    use serde_json::json;

    fn store_with(key: &str, raw: &str) -> CollectionStore {
        let backend = MemoryBackend::new();
        backend.put(key, raw).expect("seed");
        CollectionStore::new(backend)
    }

    #[test]
    fn missing_and_empty_values_read_as_empty() {
        let store = store_with("orbit_blank", "");
        assert!(store.read("orbit_missing").expect("read").is_empty());
        assert!(store.read("orbit_blank").expect("read").is_empty());
    }

    #[test]
    fn malformed_values_surface_as_corrupt() {
        for raw in ["  ", "\n", "{not json", "null", "{\"id\":\"a\"}", "[1, 2]", "[{\"id\":\"a\"}, \"x\"]"] {
            let store = store_with("orbit_projects", raw);
            match store.read("orbit_projects") {
                Err(StoreError::Corrupt { key, .. }) => assert_eq!(key, "orbit_projects"),
                other => panic!("expected corrupt error for {raw:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn write_replaces_the_whole_sequence() {
        let store = CollectionStore::new(MemoryBackend::new());
        let first = vec![
            Record::try_from(json!({"id": "a"})).expect("record"),
            Record::try_from(json!({"id": "b"})).expect("record"),
        ];
        store.write("orbit_tasks", &first).expect("write");
        store.write("orbit_tasks", &first[1..]).expect("rewrite");

        let rows = store.read("orbit_tasks").expect("read");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].id(), Some("b"));
        assert_eq!(store.collections().expect("keys"), vec!["orbit_tasks"]);
    }
}
