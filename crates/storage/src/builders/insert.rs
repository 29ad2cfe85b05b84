#![forbid(unsafe_code)]

use super::{Columns, Returning, ensure_unique_ids, resolve};
use crate::{CollectionStore, Data, Deferred, Record, Response, StoreError};
use orbit_core::{new_id, now_iso};
use serde_json::Value;
use std::future::IntoFuture;

#[must_use = "an insert does nothing until it is awaited"]
#[derive(Debug)]
pub struct InsertBuilder<'a> {
    store: &'a CollectionStore,
    key: String,
    rows: Vec<Record>,
    returning: Returning,
}

impl<'a> InsertBuilder<'a> {
    pub(crate) fn new(store: &'a CollectionStore, key: impl Into<String>, rows: Vec<Record>) -> Self {
        Self {
            store,
            key: key.into(),
            rows,
            returning: Returning::default(),
        }
    }

    /// Return the inserted rows instead of nothing.
    pub fn select(mut self, columns: &str) -> Self {
        self.returning.columns = Some(Columns::parse(columns));
        self
    }

    pub fn single(mut self) -> Self {
        self.returning.single = true;
        self
    }

    fn execute(self) -> Result<Option<Data>, StoreError> {
        if self.rows.is_empty() {
            return Ok(self.returning.shape(Vec::new()));
        }

        let mut stored = self.store.read(&self.key)?;
        let timestamp = now_iso();
        let mut inserted = Vec::with_capacity(self.rows.len());
        for mut row in self.rows {
            row.set_default("id", || Value::String(new_id()));
            row.set_default("created_at", || Value::String(timestamp.clone()));
            row.set_default("updated_at", || Value::String(timestamp.clone()));
            inserted.push(row);
        }
        ensure_unique_ids(&self.key, &stored, &inserted)?;
        stored.extend(inserted.iter().cloned());
        self.store.write(&self.key, &stored)?;

        Ok(self.returning.shape(inserted))
    }
}

impl<'a> IntoFuture for InsertBuilder<'a> {
    type Output = Response;
    type IntoFuture = Deferred<'a>;

    fn into_future(self) -> Self::IntoFuture {
        Deferred::new(move || {
            let key = self.key.clone();
            resolve("insert", &key, self.execute())
        })
    }
}
