#![forbid(unsafe_code)]

use crate::StoreError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// One stored item: an open map from field name to JSON value.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Record(Map<String, Value>);

impl Record {
    pub fn new() -> Self {
        Self(Map::new())
    }

    pub fn id(&self) -> Option<&str> {
        self.0.get("id").and_then(Value::as_str)
    }

    pub fn get(&self, field: &str) -> Option<&Value> {
        self.0.get(field)
    }

    pub fn get_str(&self, field: &str) -> Option<&str> {
        self.0.get(field).and_then(Value::as_str)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn set(&mut self, field: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(field.into(), value.into());
    }

    pub fn with(mut self, field: impl Into<String>, value: impl Into<Value>) -> Self {
        self.set(field, value);
        self
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overwrites every field present in `changes`; other fields stay as they are.
    pub fn merge(&mut self, changes: &Record) {
        for (field, value) in &changes.0 {
            self.0.insert(field.clone(), value.clone());
        }
    }

    pub(crate) fn set_default(&mut self, field: &str, value: impl FnOnce() -> Value) {
        if !self.0.contains_key(field) {
            self.0.insert(field.to_string(), value());
        }
    }

    pub(crate) fn project(mut self, columns: &[String]) -> Self {
        self.0.retain(|field, _| columns.iter().any(|column| column == field));
        self
    }

    pub fn decode<T: DeserializeOwned>(&self) -> Result<T, StoreError> {
        Ok(serde_json::from_value(Value::Object(self.0.clone()))?)
    }

    pub fn encode<T: Serialize>(value: &T) -> Result<Self, StoreError> {
        Self::try_from(serde_json::to_value(value)?)
    }
}

impl From<Map<String, Value>> for Record {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}

impl TryFrom<Value> for Record {
    type Error = StoreError;

    fn try_from(value: Value) -> Result<Self, Self::Error> {
        match value {
            Value::Object(map) => Ok(Self(map)),
            _ => Err(StoreError::InvalidInput("record must be a JSON object")),
        }
    }
}

impl From<Record> for Value {
    fn from(value: Record) -> Self {
        Value::Object(value.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use orbit_core::model::Project;
    use serde_json::json;

    #[test]
    fn merge_touches_only_supplied_fields() {
        let mut row = Record::try_from(json!({"id": "a", "x": 1, "y": [1, 2]})).unwrap();
        row.merge(&Record::new().with("x", 2).with("z", "new"));
        assert_eq!(
            Value::from(row),
            json!({"id": "a", "x": 2, "y": [1, 2], "z": "new"})
        );
    }

    #[test]
    fn set_default_keeps_supplied_value() {
        let mut row = Record::new().with("id", "fixed");
        row.set_default("id", || json!("generated"));
        row.set_default("created_at", || json!("now"));
        assert_eq!(row.id(), Some("fixed"));
        assert_eq!(row.get_str("created_at"), Some("now"));
    }

    #[test]
    fn projection_drops_unlisted_fields() {
        let row = Record::try_from(json!({"id": "a", "name": "n", "secret": true})).unwrap();
        let projected = row.project(&["id".to_string(), "missing".to_string()]);
        assert_eq!(Value::from(projected), json!({"id": "a"}));
    }

    #[test]
    fn typed_view_round_trip() {
        let row = Record::try_from(json!({
            "id": "p1",
            "name": "Alpha",
            "created_at": "2026-01-01T00:00:00.000Z",
            "updated_at": "2026-01-01T00:00:00.000Z",
            "extra": 42
        }))
        .unwrap();
        let project: Project = row.decode().unwrap();
        assert_eq!(project.name, "Alpha");
        assert_eq!(project.current_stage, "");

        let encoded = Record::encode(&project).unwrap();
        assert_eq!(encoded.id(), Some("p1"));
        assert!(!encoded.contains("extra"));
    }

    #[test]
    fn non_object_values_are_rejected() {
        assert!(matches!(
            Record::try_from(json!([1, 2])),
            Err(StoreError::InvalidInput(_))
        ));
    }
}
