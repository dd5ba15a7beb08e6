//! Structural comparison that tolerates the changes a JSON round trip makes.
//!
//! `==` on [`Value`] is strict about kinds. [`equivalent`] additionally treats
//! numbers of different kinds as equal when they denote the same number, a
//! date as equal to its stored string form, and a set as equal to a sequence
//! holding the same elements in the same order. Key order never matters.

use crate::document::Document;
use crate::value::{format_date, Value};

/// Deep equality modulo numeric kind, date formatting and set/sequence kind.
///
/// # Example
///
/// ```
/// use arango_document::{equivalent, Value};
///
/// assert!(equivalent(&Value::Integer(2), &Value::Float(2.0)));
/// assert!(!equivalent(&Value::Integer(2), &Value::from("2")));
/// ```
pub fn equivalent(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Null, Value::Null) => true,
        (Value::Bool(a), Value::Bool(b)) => a == b,
        (Value::Str(a), Value::Str(b)) => a == b,
        (Value::Date(a), Value::Date(b)) => a == b,
        (Value::Date(date), Value::Str(s)) | (Value::Str(s), Value::Date(date)) => {
            format_date(date) == *s
        }
        (Value::Document(a), Value::Document(b)) => equivalent_documents(a, b),

        (a, b) if a.is_number() && b.is_number() => numbers_equal(a, b),

        (a, b) => match (a.as_elements(), b.as_elements()) {
            (Some(items_a), Some(items_b)) => {
                items_a.len() == items_b.len()
                    && items_a.iter().zip(items_b).all(|(a, b)| equivalent(a, b))
            }
            _ => false,
        },
    }
}

/// [`equivalent`] for two documents.
pub fn equivalent_documents(a: &Document, b: &Document) -> bool {
    if a.len() != b.len() {
        return false;
    }
    for (key, value_a) in a {
        match b.fields.get(key) {
            Some(value_b) => {
                if !equivalent(value_a, value_b) {
                    return false;
                }
            }
            None => return false,
        }
    }
    true
}

fn numbers_equal(a: &Value, b: &Value) -> bool {
    match (a, b) {
        (Value::Integer(a), Value::Integer(b)) => a == b,
        (Value::UInteger(a), Value::UInteger(b)) => a == b,
        // UInteger only holds values above i64::MAX.
        (Value::Integer(_), Value::UInteger(_)) | (Value::UInteger(_), Value::Integer(_)) => false,
        _ => match (a.as_f64(), b.as_f64()) {
            (Some(a), Some(b)) => a == b,
            _ => false,
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn v(value: serde_json::Value) -> Value {
        Value::from(value)
    }

    #[test]
    fn test_scalars() {
        assert!(equivalent(&v(json!(1)), &v(json!(1))));
        assert!(!equivalent(&v(json!(1)), &v(json!(2))));
        assert!(!equivalent(&v(json!(0)), &v(json!(null))));
        assert!(!equivalent(&v(json!(1)), &v(json!(true))));
        assert!(!equivalent(&v(json!("")), &v(json!(null))));
        assert!(equivalent(&v(json!(1)), &v(json!(1.0))));
        assert!(!equivalent(&v(json!(1)), &v(json!(1.5))));
    }

    #[test]
    fn test_documents_ignore_order() {
        assert!(equivalent(
            &v(json!({"a": 1, "b": "2"})),
            &v(json!({"b": "2", "a": 1}))
        ));
        assert!(!equivalent(
            &v(json!({"a": 1, "b": "2"})),
            &v(json!({"a": 1, "b": "2", "c": []}))
        ));
        assert!(!equivalent(
            &v(json!({"a": 1, "c": 3})),
            &v(json!({"a": 1, "d": 3}))
        ));
        assert!(!equivalent(&v(json!({})), &v(json!([]))));
    }

    #[test]
    fn test_sequences() {
        assert!(equivalent(
            &v(json!([{"a": "a"}, {"b": "b"}])),
            &v(json!([{"a": "a"}, {"b": "b"}]))
        ));
        assert!(!equivalent(&v(json!([1, 2, 3])), &v(json!([1, 2]))));
        assert!(!equivalent(&v(json!([1, 2])), &v(json!([2, 1]))));
    }

    #[test]
    fn test_round_trip_kinds() {
        let date = Utc.with_ymd_and_hms(2024, 1, 2, 3, 4, 5).unwrap();
        assert!(equivalent(
            &Value::Date(date),
            &Value::from("2024-01-02T03:04:05.000Z")
        ));

        let set: Value = Value::Set([Value::from(1), Value::from(2)].into_iter().collect());
        assert!(equivalent(&set, &v(json!([1, 2]))));
        assert!(!equivalent(&set, &v(json!([1]))));
    }
}
