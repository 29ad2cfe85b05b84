#![forbid(unsafe_code)]

use super::{Columns, Returning, resolve};
use crate::predicate::{Predicate, matches_all};
use crate::{CollectionStore, Data, Deferred, Response, StoreError};
use serde_json::Value;
use std::future::IntoFuture;

/// Removes every row matching all predicates. Without predicates that is
/// every row in the collection.
#[must_use = "a delete does nothing until it is awaited"]
#[derive(Debug)]
pub struct DeleteBuilder<'a> {
    store: &'a CollectionStore,
    key: String,
    predicates: Vec<Predicate>,
    returning: Returning,
}

impl<'a> DeleteBuilder<'a> {
    pub(crate) fn new(store: &'a CollectionStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
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

    /// Return the removed rows instead of nothing.
    pub fn select(mut self, columns: &str) -> Self {
        self.returning.columns = Some(Columns::parse(columns));
        self
    }

    fn execute(&self) -> Result<Option<Data>, StoreError> {
        let stored = self.store.read(&self.key)?;
        let (removed, kept): (Vec<_>, Vec<_>) = stored
            .into_iter()
            .partition(|row| matches_all(&self.predicates, row));

        if !removed.is_empty() {
            self.store.write(&self.key, &kept)?;
        }
        Ok(self.returning.shape(removed))
    }
}

impl<'a> IntoFuture for DeleteBuilder<'a> {
    type Output = Response;
    type IntoFuture = Deferred<'a>;

    fn into_future(self) -> Self::IntoFuture {
        Deferred::new(move || resolve("delete", &self.key, self.execute()))
    }
}
