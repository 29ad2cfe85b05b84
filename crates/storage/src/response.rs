#![forbid(unsafe_code)]

use crate::{Record, StoreError};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};
use std::future::Future;
use std::pin::Pin;
use std::task::{Context, Poll};

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(untagged)]
pub enum Data {
    Row(Record),
    Rows(Vec<Record>),
}

/// The `{data, error}` envelope every awaited builder resolves to.
///
/// On failure only `error` is set. On success `data` may still be `None`
/// (mutation without `select`, `single` with no rows).
#[derive(Debug)]
pub struct Response {
    pub data: Option<Data>,
    pub error: Option<StoreError>,
}

impl Response {
    pub fn success(data: Option<Data>) -> Self {
        Self { data, error: None }
    }

    pub fn failure(error: StoreError) -> Self {
        Self {
            data: None,
            error: Some(error),
        }
    }

    pub fn is_ok(&self) -> bool {
        self.error.is_none()
    }

    /// The collapsed row, or the first row of a list.
    pub fn row(&self) -> Option<&Record> {
        match &self.data {
            Some(Data::Row(row)) => Some(row),
            Some(Data::Rows(rows)) => rows.first(),
            None => None,
        }
    }

    pub fn rows(&self) -> &[Record] {
        match &self.data {
            Some(Data::Row(row)) => std::slice::from_ref(row),
            Some(Data::Rows(rows)) => rows,
            None => &[],
        }
    }

    pub fn into_result(self) -> Result<Option<Data>, StoreError> {
        match self.error {
            Some(error) => Err(error),
            None => Ok(self.data),
        }
    }
}

impl From<Result<Option<Data>, StoreError>> for Response {
    fn from(value: Result<Option<Data>, StoreError>) -> Self {
        match value {
            Ok(data) => Self::success(data),
            Err(error) => Self::failure(error),
        }
    }
}

impl Serialize for Response {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Response", 2)?;
        state.serialize_field("data", &self.data)?;
        state.serialize_field("error", &self.error.as_ref().map(ToString::to_string))?;
        state.end()
    }
}

/// Awaitable wrapper around one synchronous execution.
///
/// The work runs on the first poll and the future is ready immediately; it
/// never yields in the middle of an execution.
pub struct Deferred<'a> {
    task: Option<Box<dyn FnOnce() -> Response + 'a>>,
}

impl<'a> Deferred<'a> {
    pub(crate) fn new(task: impl FnOnce() -> Response + 'a) -> Self {
        Self {
            task: Some(Box::new(task)),
        }
    }
}

impl Future for Deferred<'_> {
    type Output = Response;

    fn poll(mut self: Pin<&mut Self>, _cx: &mut Context<'_>) -> Poll<Self::Output> {
        Poll::Ready(match self.task.take() {
            Some(task) => task(),
            None => Response::failure(StoreError::AlreadyExecuted),
        })
    }
}

impl std::fmt::Debug for Deferred<'_> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Deferred")
            .field("pending", &self.task.is_some())
            .finish()
    }
}
