#![forbid(unsafe_code)]

//! Chainable query and mutation builders.
//!
//! A builder only accumulates intent. Awaiting it runs one synchronous
//! execution against the collection store and resolves to a [`Response`].

mod delete;
mod insert;
mod select;
mod update;

pub use delete::DeleteBuilder;
pub use insert::InsertBuilder;
pub use select::SelectBuilder;
pub use update::UpdateBuilder;

use crate::{Data, Record, Response, StoreError};
use serde_json::Value;
use std::collections::HashSet;

/// Field list requested through `select(...)`.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum Columns {
    #[default]
    All,
    Only(Vec<String>),
}

impl Columns {
    pub fn parse(raw: &str) -> Self {
        let columns = raw
            .split(',')
            .map(str::trim)
            .filter(|column| !column.is_empty())
            .map(str::to_string)
            .collect::<Vec<_>>();
        if columns.is_empty() || columns.iter().any(|column| column == "*") {
            Self::All
        } else {
            Self::Only(columns)
        }
    }

    fn apply(&self, rows: Vec<Record>) -> Vec<Record> {
        match self {
            Self::All => rows,
            Self::Only(columns) => rows.into_iter().map(|row| row.project(columns)).collect(),
        }
    }
}

/// What a mutation hands back once executed.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
struct Returning {
    columns: Option<Columns>,
    single: bool,
}

impl Returning {
    fn shape(&self, rows: Vec<Record>) -> Option<Data> {
        let columns = self.columns.as_ref()?;
        collapse(columns.apply(rows), self.single)
    }
}

fn collapse(rows: Vec<Record>, single: bool) -> Option<Data> {
    if single {
        rows.into_iter().next().map(Data::Row)
    } else {
        Some(Data::Rows(rows))
    }
}

/// Fails when an `incoming` row reuses an id held by `existing` or by an
/// earlier incoming row. Ids compare by their JSON text.
fn ensure_unique_ids<'r>(
    key: &str,
    existing: impl IntoIterator<Item = &'r Record>,
    incoming: impl IntoIterator<Item = &'r Record>,
) -> Result<(), StoreError> {
    let mut seen = existing
        .into_iter()
        .filter_map(|row| row.get("id").map(Value::to_string))
        .collect::<HashSet<_>>();
    for row in incoming {
        let Some(id) = row.get("id").map(Value::to_string) else {
            continue;
        };
        if !seen.insert(id.clone()) {
            return Err(StoreError::DuplicateId {
                key: key.to_string(),
                id,
            });
        }
    }
    Ok(())
}

fn resolve(operation: &str, key: &str, outcome: Result<Option<Data>, StoreError>) -> Response {
    match &outcome {
        Ok(data) => {
            let rows = match data {
                Some(Data::Row(_)) => 1,
                Some(Data::Rows(rows)) => rows.len(),
                None => 0,
            };
            log::debug!("{operation} {key}: ok ({rows} returned)");
        }
        Err(err) => log::error!("{operation} {key}: {err}"),
    }
    Response::from(outcome)
}
