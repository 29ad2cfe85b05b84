#![forbid(unsafe_code)]

use crate::Record;
use serde_json::Value;
use std::cmp::Ordering;

/// A single field test. Predicates on one builder are AND-combined.
#[derive(Clone, Debug, PartialEq)]
pub enum Predicate {
    Eq { field: String, value: Value },
    Neq { field: String, value: Value },
    /// Missing fields count as `null`.
    Is { field: String, value: Value },
}

impl Predicate {
    pub fn matches(&self, record: &Record) -> bool {
        match self {
            Self::Eq { field, value } => record
                .get(field)
                .is_some_and(|actual| strict_eq(actual, value)),
            Self::Neq { field, value } => !record
                .get(field)
                .is_some_and(|actual| strict_eq(actual, value)),
            Self::Is { field, value } => {
                strict_eq(record.get(field).unwrap_or(&Value::Null), value)
            }
        }
    }
}

pub(crate) fn matches_all(predicates: &[Predicate], record: &Record) -> bool {
    predicates.iter().all(|predicate| predicate.matches(record))
}

/// Same type and same value. Numbers compare by value, so `1` equals `1.0`.
pub(crate) fn strict_eq(left: &Value, right: &Value) -> bool {
    match (left, right) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::String(a), Value::String(b)) => a == b,
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return a == b;
            }
            if let (Some(a), Some(b)) = (a.as_u64(), b.as_u64()) {
                return a == b;
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a == b,
                _ => false,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            a.len() == b.len() && a.iter().zip(b).all(|(x, y)| strict_eq(x, y))
        }
        (Value::Object(a), Value::Object(b)) => {
            a.len() == b.len()
                && a.iter()
                    .all(|(key, x)| b.get(key).is_some_and(|y| strict_eq(x, y)))
        }
        _ => false,
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct OrderBy {
    pub field: String,
    pub ascending: bool,
}

impl OrderBy {
    /// Stable: rows comparing equal keep their relative order.
    pub(crate) fn sort(&self, rows: &mut [Record]) {
        rows.sort_by(|a, b| self.compare(a, b));
    }

    fn compare(&self, a: &Record, b: &Record) -> Ordering {
        let a = a.get(&self.field).filter(|value| !value.is_null());
        let b = b.get(&self.field).filter(|value| !value.is_null());
        match (a, b) {
            (None, None) => Ordering::Equal,
            // Nulls last ascending, first descending.
            (None, Some(_)) => {
                if self.ascending {
                    Ordering::Greater
                } else {
                    Ordering::Less
                }
            }
            (Some(_), None) => {
                if self.ascending {
                    Ordering::Less
                } else {
                    Ordering::Greater
                }
            }
            (Some(a), Some(b)) => {
                let ordering = compare_values(a, b);
                if self.ascending {
                    ordering
                } else {
                    ordering.reverse()
                }
            }
        }
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

fn compare_values(left: &Value, right: &Value) -> Ordering {
    match (left, right) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => {
            if let (Some(a), Some(b)) = (a.as_i64(), b.as_i64()) {
                return a.cmp(&b);
            }
            match (a.as_f64(), b.as_f64()) {
                (Some(a), Some(b)) => a.partial_cmp(&b).unwrap_or(Ordering::Equal),
                _ => Ordering::Equal,
            }
        }
        (Value::Array(a), Value::Array(b)) => {
            for (x, y) in a.iter().zip(b) {
                let ordering = compare_values(x, y);
                if ordering != Ordering::Equal {
                    return ordering;
                }
            }
            a.len().cmp(&b.len())
        }
        (Value::Object(_), Value::Object(_)) => Ordering::Equal,
        _ => type_rank(left).cmp(&type_rank(right)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn row(value: Value) -> Record {
        Record::try_from(value).expect("object")
    }

    #[test]
    fn numbers_compare_by_value() {
        assert!(strict_eq(&json!(1), &json!(1.0)));
        assert!(!strict_eq(&json!(1), &json!("1")));
        assert!(!strict_eq(&json!(true), &json!(1)));
        assert!(strict_eq(&json!(u64::MAX), &json!(u64::MAX)));
    }

    #[test]
    fn missing_fields_never_equal_but_always_differ() {
        let record = row(json!({"id": "a"}));
        let eq_null = Predicate::Eq {
            field: "app_id".to_string(),
            value: Value::Null,
        };
        let neq = Predicate::Neq {
            field: "app_id".to_string(),
            value: json!("x"),
        };
        let is_null = Predicate::Is {
            field: "app_id".to_string(),
            value: Value::Null,
        };
        assert!(!eq_null.matches(&record));
        assert!(neq.matches(&record));
        assert!(is_null.matches(&record));
        assert!(is_null.matches(&row(json!({"app_id": null}))));
        assert!(!is_null.matches(&row(json!({"app_id": "x"}))));
    }

    #[test]
    fn nulls_sort_last_ascending_and_first_descending() {
        let mut rows = vec![
            row(json!({"id": "n", "rank": null})),
            row(json!({"id": "b", "rank": 2})),
            row(json!({"id": "m"})),
            row(json!({"id": "a", "rank": 1})),
        ];
        let ids = |rows: &[Record]| rows.iter().filter_map(Record::id).collect::<Vec<_>>().join("");

        OrderBy { field: "rank".to_string(), ascending: true }.sort(&mut rows);
        assert_eq!(ids(&rows), "abnm");

        OrderBy { field: "rank".to_string(), ascending: false }.sort(&mut rows);
        assert_eq!(ids(&rows), "nmba");
    }

    #[test]
    fn mixed_types_rank_by_kind() {
        assert_eq!(compare_values(&json!(true), &json!(0)), Ordering::Less);
        assert_eq!(compare_values(&json!(10), &json!("1")), Ordering::Less);
        assert_eq!(compare_values(&json!(2.5), &json!(2)), Ordering::Greater);
        assert_eq!(compare_values(&json!([1, 2]), &json!([1, 3])), Ordering::Less);
    }
}
