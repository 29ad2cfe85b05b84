#![forbid(unsafe_code)]

use super::{Columns, collapse, resolve};
use crate::predicate::{OrderBy, Predicate, matches_all};
use crate::{CollectionStore, Data, Deferred, Response, StoreError};
use serde_json::Value;
use std::future::IntoFuture;

#[must_use = "a query does nothing until it is awaited"]
#[derive(Debug)]
pub struct SelectBuilder<'a> {
    store: &'a CollectionStore,
    key: String,
    columns: Columns,
    predicates: Vec<Predicate>,
    order: Option<OrderBy>,
    limit: Option<usize>,
    single: bool,
}

impl<'a> SelectBuilder<'a> {
    pub(crate) fn new(store: &'a CollectionStore, key: impl Into<String>) -> Self {
        Self {
            store,
            key: key.into(),
            columns: Columns::All,
            predicates: Vec::new(),
            order: None,
            limit: None,
            single: false,
        }
    }

    pub fn select(mut self, columns: &str) -> Self {
        self.columns = Columns::parse(columns);
        self
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

    /// Replaces any earlier ordering; only one sort field is supported.
    pub fn order(mut self, field: impl Into<String>, ascending: bool) -> Self {
        self.order = Some(OrderBy {
            field: field.into(),
            ascending,
        });
        self
    }

    pub fn order_by(self, field: impl Into<String>) -> Self {
        self.order(field, true)
    }

    pub fn limit(mut self, count: usize) -> Self {
        self.limit = Some(count);
        self
    }

    /// Collapses to the first row; no rows resolves to `data: None`.
    pub fn single(mut self) -> Self {
        self.single = true;
        self
    }

    pub fn maybe_single(mut self) -> Self {
        self.single = true;
        self
    }

    fn execute(&self) -> Result<Option<Data>, StoreError> {
        let mut rows = self.store.read(&self.key)?;
        rows.retain(|row| matches_all(&self.predicates, row));
        if let Some(order) = &self.order {
            order.sort(&mut rows);
        }
        if let Some(limit) = self.limit {
            rows.truncate(limit);
        }
        Ok(collapse(self.columns.apply(rows), self.single))
    }
}

impl<'a> IntoFuture for SelectBuilder<'a> {
    type Output = Response;
    type IntoFuture = Deferred<'a>;

    fn into_future(self) -> Self::IntoFuture {
        Deferred::new(move || resolve("select", &self.key, self.execute()))
    }
}
