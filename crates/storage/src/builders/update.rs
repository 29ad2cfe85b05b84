#![forbid(unsafe_code)]

use super::{Columns, Returning, ensure_unique_ids, resolve};
use crate::predicate::{Predicate, matches_all};
use crate::{CollectionStore, Data, Deferred, Record, Response, StoreError};
use orbit_core::now_iso;
use serde_json::Value;
use std::future::IntoFuture;

#[must_use = "an update does nothing until it is awaited"]
#[derive(Debug)]
pub struct UpdateBuilder<'a> {
    store: &'a CollectionStore,
    key: String,
    changes: Record,
    predicates: Vec<Predicate>,
    returning: Returning,
}

impl<'a> UpdateBuilder<'a> {
    pub(crate) fn new(store: &'a CollectionStore, key: impl Into<String>, changes: Record) -> Self {
        Self {
            store,
            key: key.into(),
            changes,
            predicates: Vec::new(),
            returning: Returning::default(),
        }
    }

    pub fn eq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Predicate::Eq {
            field: field.into(),
            value: value.into(),
        })
    }

    pub fn neq(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Predicate::Neq {
            field: field.into(),
            value: value.into(),
        })
    }

    pub fn is(self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.filter(Predicate::Is {
            field: field.into(),
            value: value.into(),
        })
    }

    pub fn filter(mut self, predicate: Predicate) -> Self {
        self.predicates.push(predicate);
        self
    }

    /// Return the updated rows instead of nothing.
    pub fn select(mut self, columns: &str) -> Self {
        self.returning.columns = Some(Columns::parse(columns));
        self
    }

    pub fn single(mut self) -> Self {
        self.returning.single = true;
        self
    }

    fn execute(&self) -> Result<Option<Data>, StoreError> {
        let mut stored = self.store.read(&self.key)?;
        let timestamp = now_iso();
        let mut updated = Vec::new();
        let mut matched = Vec::with_capacity(stored.len());
        for row in stored.iter_mut() {
            let hit = matches_all(&self.predicates, row);
            if hit {
                row.merge(&self.changes);
                row.set("updated_at", timestamp.clone());
                updated.push(row.clone());
            }
            matched.push(hit);
        }

        // Nothing matched: the stored value is already what it would become.
        if updated.is_empty() {
            return Ok(self.returning.shape(updated));
        }
        if self.changes.contains("id") {
            let untouched = stored
                .iter()
                .zip(&matched)
                .filter(|(_, hit)| !**hit)
                .map(|(row, _)| row);
            ensure_unique_ids(&self.key, untouched, &updated)?;
        }
        self.store.write(&self.key, &stored)?;
        Ok(self.returning.shape(updated))
    }
}

impl<'a> IntoFuture for UpdateBuilder<'a> {
    type Output = Response;
    type IntoFuture = Deferred<'a>;

    fn into_future(self) -> Self::IntoFuture {
        Deferred::new(move || resolve("update", &self.key, self.execute()))
    }
}
