#![forbid(unsafe_code)]

pub mod ids;
pub mod model;
pub mod tables;
pub mod time;

pub use crate::ids::new_id;
pub use crate::tables::{StorageKey, Table};
pub use crate::time::now_iso;
