//! [`Value`] — the closed set of kinds a document field can hold.
//!
//! Numbers keep the kind they were read with: integers that fit in `i64` are
//! `Integer`, larger unsigned integers are `UInteger`, everything else is
//! `Float`.

use std::collections::hash_map::DefaultHasher;
use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};

use chrono::{DateTime, SecondsFormat, Utc};

use crate::document::Document;

/// A document field value.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum Value {
    #[default]
    Null,
    Bool(bool),
    /// Integer that fits in `i64`.
    Integer(i64),
    /// Unsigned integer above `i64::MAX`.
    UInteger(u64),
    Float(f64),
    Str(String),
    /// Timestamp; written as an RFC 3339 string with millisecond precision.
    Date(DateTime<Utc>),
    /// Nested document, owned by the containing value.
    Document(Document),
    /// Ordered, possibly heterogeneous list.
    Sequence(Vec<Value>),
    Set(ValueSet),
}

impl Value {
    /// Short name of the kind, used in conversion errors.
    pub fn kind(&self) -> &'static str {
        match self {
            Value::Null => "null",
            Value::Bool(_) => "bool",
            Value::Integer(_) | Value::UInteger(_) => "integer",
            Value::Float(_) => "float",
            Value::Str(_) => "string",
            Value::Date(_) => "date",
            Value::Document(_) => "document",
            Value::Sequence(_) => "sequence",
            Value::Set(_) => "set",
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Value::Null)
    }

    pub fn is_document(&self) -> bool {
        matches!(self, Value::Document(_))
    }

    pub fn is_number(&self) -> bool {
        matches!(self, Value::Integer(_) | Value::UInteger(_) | Value::Float(_))
    }

    /// Scalars are everything except documents, sequences and sets.
    pub fn is_scalar(&self) -> bool {
        !matches!(
            self,
            Value::Document(_) | Value::Sequence(_) | Value::Set(_)
        )
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            Value::Bool(b) => Some(*b),
            _ => None,
        }
    }

    pub fn as_i64(&self) -> Option<i64> {
        match self {
            Value::Integer(i) => Some(*i),
            Value::UInteger(u) => i64::try_from(*u).ok(),
            _ => None,
        }
    }

    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Integer(i) => Some(*i as f64),
            Value::UInteger(u) => Some(*u as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Str(s) => Some(s),
            _ => None,
        }
    }

    pub fn as_document(&self) -> Option<&Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    pub fn as_document_mut(&mut self) -> Option<&mut Document> {
        match self {
            Value::Document(doc) => Some(doc),
            _ => None,
        }
    }

    /// Elements of a sequence or set, in order.
    pub fn as_elements(&self) -> Option<&[Value]> {
        match self {
            Value::Sequence(items) => Some(items),
            Value::Set(set) => Some(set.as_slice()),
            _ => None,
        }
    }

    /// Depth of the deepest container below and including this value.
    ///
    /// Scalars have depth 0, an empty document or sequence has depth 1.
    /// Computed without recursion so it is safe on arbitrarily deep trees.
    pub fn nesting_depth(&self) -> usize {
        let mut max = 0;
        let mut stack: Vec<(&Value, usize)> = vec![(self, 0)];
        while let Some((value, depth)) = stack.pop() {
            match value {
                Value::Document(doc) => {
                    max = max.max(depth + 1);
                    stack.extend(doc.values().map(|v| (v, depth + 1)));
                }
                Value::Sequence(items) => {
                    max = max.max(depth + 1);
                    stack.extend(items.iter().map(|v| (v, depth + 1)));
                }
                Value::Set(set) => {
                    max = max.max(depth + 1);
                    stack.extend(set.iter().map(|v| (v, depth + 1)));
                }
                _ => {}
            }
        }
        max
    }
}

/// Format a timestamp the way documents store it.
pub fn format_date(date: &DateTime<Utc>) -> String {
    date.to_rfc3339_opts(SecondsFormat::Millis, true)
}

/// Insertion-ordered set of values.
///
/// Inserting a value equal to one already present is a no-op. Equality
/// between two sets ignores order. Membership goes through a hash index, so
/// `insert` and `contains` take expected constant time.
#[derive(Clone, Default)]
pub struct ValueSet {
    items: Vec<Value>,
    /// Fingerprint to positions in `items`.
    index: HashMap<u64, Vec<usize>>,
}

impl ValueSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a value, returning `false` if an equal value was already present.
    pub fn insert(&mut self, value: Value) -> bool {
        let bucket = self.index.entry(fingerprint(&value)).or_default();
        if bucket.iter().any(|&at| self.items[at] == value) {
            return false;
        }
        bucket.push(self.items.len());
        self.items.push(value);
        true
    }

    pub fn contains(&self, value: &Value) -> bool {
        self.index
            .get(&fingerprint(value))
            .is_some_and(|bucket| bucket.iter().any(|&at| self.items[at] == *value))
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Value> {
        self.items.iter()
    }

    pub fn as_slice(&self) -> &[Value] {
        &self.items
    }

    pub fn into_vec(self) -> Vec<Value> {
        self.items
    }
}

impl fmt::Debug for ValueSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_set().entries(&self.items).finish()
    }
}

/// Hash of `value` that agrees with `==`: documents and sets hash without
/// regard to order, and `0.0` hashes like `-0.0`.
fn fingerprint(value: &Value) -> u64 {
    let mut hasher = DefaultHasher::new();
    hash_value(value, &mut hasher);
    hasher.finish()
}

fn hash_value<H: Hasher>(value: &Value, state: &mut H) {
    std::mem::discriminant(value).hash(state);
    match value {
        Value::Null => {}
        Value::Bool(b) => b.hash(state),
        Value::Integer(i) => i.hash(state),
        Value::UInteger(u) => u.hash(state),
        Value::Float(f) => {
            let f = if *f == 0.0 { 0.0 } else { *f };
            f.to_bits().hash(state);
        }
        Value::Str(s) => s.hash(state),
        Value::Date(d) => d.hash(state),
        Value::Document(doc) => {
            let sum = doc
                .iter()
                .map(|(key, value)| {
                    let mut entry = DefaultHasher::new();
                    key.hash(&mut entry);
                    hash_value(value, &mut entry);
                    entry.finish()
                })
                .fold(0u64, u64::wrapping_add);
            doc.len().hash(state);
            sum.hash(state);
        }
        Value::Sequence(items) => {
            items.len().hash(state);
            for item in items {
                hash_value(item, state);
            }
        }
        Value::Set(set) => {
            let sum = set.iter().map(fingerprint).fold(0u64, u64::wrapping_add);
            set.len().hash(state);
            sum.hash(state);
        }
    }
}

impl PartialEq for ValueSet {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len() && self.items.iter().all(|v| other.contains(v))
    }
}

impl FromIterator<Value> for ValueSet {
    fn from_iter<I: IntoIterator<Item = Value>>(iter: I) -> Self {
        let mut set = ValueSet::new();
        for value in iter {
            set.insert(value);
        }
        set
    }
}

impl IntoIterator for ValueSet {
    type Item = Value;
    type IntoIter = std::vec::IntoIter<Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.into_iter()
    }
}

impl<'a> IntoIterator for &'a ValueSet {
    type Item = &'a Value;
    type IntoIter = std::slice::Iter<'a, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

// ── From conversions ──────────────────────────────────────────────────────

macro_rules! from_integer {
    ($($t:ty),*) => {
        $(impl From<$t> for Value {
            fn from(v: $t) -> Self {
                Value::Integer(i64::from(v))
            }
        })*
    };
}

from_integer!(i8, i16, i32, i64, u8, u16, u32);

impl From<u64> for Value {
    fn from(v: u64) -> Self {
        match i64::try_from(v) {
            Ok(i) => Value::Integer(i),
            Err(_) => Value::UInteger(v),
        }
    }
}

impl From<f32> for Value {
    fn from(v: f32) -> Self {
        Value::Float(f64::from(v))
    }
}

impl From<f64> for Value {
    fn from(v: f64) -> Self {
        Value::Float(v)
    }
}

impl From<bool> for Value {
    fn from(v: bool) -> Self {
        Value::Bool(v)
    }
}

impl From<String> for Value {
    fn from(v: String) -> Self {
        Value::Str(v)
    }
}

impl From<&str> for Value {
    fn from(v: &str) -> Self {
        Value::Str(v.to_owned())
    }
}

impl From<DateTime<Utc>> for Value {
    fn from(v: DateTime<Utc>) -> Self {
        Value::Date(v)
    }
}

impl From<Document> for Value {
    fn from(v: Document) -> Self {
        Value::Document(v)
    }
}

impl From<ValueSet> for Value {
    fn from(v: ValueSet) -> Self {
        Value::Set(v)
    }
}

impl<T: Into<Value>> From<Vec<T>> for Value {
    fn from(v: Vec<T>) -> Self {
        Value::Sequence(v.into_iter().map(Into::into).collect())
    }
}

impl<T: Into<Value>> From<Option<T>> for Value {
    fn from(v: Option<T>) -> Self {
        match v {
            Some(inner) => inner.into(),
            None => Value::Null,
        }
    }
}

// ── serde_json bridge ─────────────────────────────────────────────────────

impl From<serde_json::Value> for Value {
    fn from(v: serde_json::Value) -> Self {
        match v {
            serde_json::Value::Null => Value::Null,
            serde_json::Value::Bool(b) => Value::Bool(b),
            serde_json::Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Value::Integer(i)
                } else if let Some(u) = n.as_u64() {
                    Value::UInteger(u)
                } else {
                    Value::Float(n.as_f64().unwrap_or(f64::NAN))
                }
            }
            serde_json::Value::String(s) => Value::Str(s),
            serde_json::Value::Array(arr) => {
                Value::Sequence(arr.into_iter().map(Value::from).collect())
            }
            serde_json::Value::Object(obj) => Value::Document(
                obj.into_iter()
                    .map(|(k, v)| (k, Value::from(v)))
                    .collect(),
            ),
        }
    }
}

impl From<Value> for serde_json::Value {
    fn from(v: Value) -> Self {
        match v {
            Value::Null => serde_json::Value::Null,
            Value::Bool(b) => serde_json::Value::Bool(b),
            Value::Integer(i) => serde_json::Value::from(i),
            Value::UInteger(u) => serde_json::Value::from(u),
            // Non-finite floats have no JSON literal.
            Value::Float(f) => serde_json::Number::from_f64(f)
                .map(serde_json::Value::Number)
                .unwrap_or(serde_json::Value::Null),
            Value::Str(s) => serde_json::Value::String(s),
            Value::Date(d) => serde_json::Value::String(format_date(&d)),
            Value::Document(doc) => serde_json::Value::Object(
                doc.into_iter()
                    .map(|(k, v)| (k, serde_json::Value::from(v)))
                    .collect(),
            ),
            Value::Sequence(items) => {
                serde_json::Value::Array(items.into_iter().map(serde_json::Value::from).collect())
            }
            Value::Set(set) => {
                serde_json::Value::Array(set.into_iter().map(serde_json::Value::from).collect())
            }
        }
    }
}
