#![forbid(unsafe_code)]

//! Local collection storage with a chainable, awaitable query API.
//!
//! ```no_run
//! # async fn demo() {
//! use orbit_storage::{Database, Record};
//!
//! let db = Database::in_memory();
//! let created = db
//!     .from("projects")
//!     .insert(Record::new().with("name", "Alpha"))
//!     .select("*")
//!     .single()
//!     .await;
//! let id = created.row().and_then(Record::id).unwrap_or_default().to_string();
//!
//! let found = db.from("projects").select("*").eq("id", id).maybe_single().await;
//! assert!(found.is_ok());
//! # }
//! ```

pub mod backend;
mod builders;
mod collection;
mod database;
mod error;
mod predicate;
mod record;
mod response;

pub use builders::{Columns, DeleteBuilder, InsertBuilder, SelectBuilder, UpdateBuilder};
pub use collection::CollectionStore;
pub use database::{Database, TableAccessor};
pub use error::StoreError;
pub use predicate::{OrderBy, Predicate};
pub use record::Record;
pub use response::{Data, Deferred, Response};
