#![forbid(unsafe_code)]

use orbit_core::Table;
use orbit_storage::{Data, Database, OrderBy, Predicate, Record, Response};

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Query {
    pub(crate) table: String,
    pub(crate) columns: String,
    pub(crate) filters: Vec<Predicate>,
    pub(crate) order: Option<OrderBy>,
    pub(crate) limit: Option<usize>,
    pub(crate) single: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) struct Mutation {
    pub(crate) table: String,
    pub(crate) filters: Vec<Predicate>,
    pub(crate) select: bool,
    pub(crate) single: bool,
}

#[derive(Clone, Debug, PartialEq)]
pub(crate) enum Command {
    Collections,
    Select(Query),
    Insert(Mutation, Vec<Record>),
    Update(Mutation, Record),
    Delete(Mutation),
}

pub(crate) async fn execute(db: &Database, command: Command) -> Response {
    match command {
        Command::Collections => list_collections(db),
        Command::Select(query) => {
            let mut builder = db.from(&query.table).select(&query.columns);
            for predicate in query.filters {
                builder = builder.filter(predicate);
            }
            if let Some(order) = query.order {
                builder = builder.order(order.field, order.ascending);
            }
            if let Some(limit) = query.limit {
                builder = builder.limit(limit);
            }
            if query.single {
                builder = builder.maybe_single();
            }
            builder.await
        }
        Command::Insert(mutation, rows) => {
            let mut builder = db.from(&mutation.table).insert_many(rows);
            if mutation.select {
                builder = builder.select("*");
            }
            if mutation.single {
                builder = builder.single();
            }
            builder.await
        }
        Command::Update(mutation, changes) => {
            let mut builder = db.from(&mutation.table).update(changes);
            for predicate in mutation.filters {
                builder = builder.filter(predicate);
            }
            if mutation.select {
                builder = builder.select("*");
            }
            if mutation.single {
                builder = builder.single();
            }
            builder.await
        }
        Command::Delete(mutation) => {
            let mut builder = db.from(&mutation.table).delete();
            for predicate in mutation.filters {
                builder = builder.filter(predicate);
            }
            if mutation.select {
                builder = builder.select("*");
            }
            builder.await
        }
    }
}

/// One row per stored collection: its storage key and, when known, the
/// logical table name.
fn list_collections(db: &Database) -> Response {
    let keys = match db.collections() {
        Ok(keys) => keys,
        Err(err) => return Response::failure(err),
    };
    let rows = keys
        .into_iter()
        .map(|key| {
            let table = Table::ALL
                .into_iter()
                .find(|table| table.storage_key() == key)
                .map(|table| table.name());
            let row = Record::new().with("key", key.as_str());
            match table {
                Some(name) => row.with("table", name),
                None => row,
            }
        })
        .collect();
    Response::success(Some(Data::Rows(rows)))
}
