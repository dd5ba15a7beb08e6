//! [`Document`] — ordered key/value record, the universal representation of a
//! database record.
//!
//! Keys are unique per level and keep insertion order, which the JSON codec
//! relies on. Nested documents are owned by their parent value.
//!
//! Path-addressed access (`get`, `set_field`, `remove_field`, `has_field`,
//! `get_field`) lives in [`crate::path`].

use std::fmt;
use std::str::FromStr;

use indexmap::IndexMap;

use crate::coerce::FromValue;
use crate::error::DocumentError;
use crate::value::Value;

pub const ID: &str = "_id";
pub const KEY: &str = "_key";
pub const REV: &str = "_rev";
pub const FROM: &str = "_from";
pub const TO: &str = "_to";

/// Ordered mapping from field name to [`Value`].
///
/// Equality ignores key order. [`crate::equal::equivalent_documents`] also
/// tolerates the kind changes a JSON round trip introduces.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Document {
    pub(crate) fields: IndexMap<String, Value>,
}

impl Document {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            fields: IndexMap::with_capacity(capacity),
        }
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn iter(&self) -> indexmap::map::Iter<'_, String, Value> {
        self.fields.iter()
    }

    pub fn keys(&self) -> indexmap::map::Keys<'_, String, Value> {
        self.fields.keys()
    }

    pub fn values(&self) -> indexmap::map::Values<'_, String, Value> {
        self.fields.values()
    }

    /// Whether a top-level key exists. Dots in `key` are not interpreted.
    pub fn contains_key(&self, key: &str) -> bool {
        self.fields.contains_key(key)
    }

    /// Insert a top-level key without interpreting dots. An existing key keeps
    /// its position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.fields.insert(key.into(), value.into())
    }

    /// Remove a top-level key without interpreting dots, preserving the order
    /// of the remaining keys.
    pub fn remove(&mut self, key: &str) -> Option<Value> {
        self.fields.shift_remove(key)
    }

    pub fn clear(&mut self) {
        self.fields.clear();
    }

    /// Copy of this document without the listed top-level keys.
    pub fn except(&self, keys: &[&str]) -> Document {
        self.fields
            .iter()
            .filter(|(k, _)| !keys.contains(&k.as_str()))
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect()
    }

    /// Depth of the deepest nested container; a flat document has depth 1.
    pub fn nesting_depth(&self) -> usize {
        self.fields
            .values()
            .map(|v| v.nesting_depth())
            .max()
            .unwrap_or(0)
            + 1
    }

    // ── system attributes ─────────────────────────────────────────────────

    /// Document handle (`collection/key`).
    pub fn id(&self) -> Option<&str> {
        self.fields.get(ID).and_then(Value::as_str)
    }

    pub fn key(&self) -> Option<&str> {
        self.fields.get(KEY).and_then(Value::as_str)
    }

    pub fn rev(&self) -> Option<&str> {
        self.fields.get(REV).and_then(Value::as_str)
    }

    /// Handle of the vertex an edge starts from.
    pub fn edge_from(&self) -> Option<&str> {
        self.fields.get(FROM).and_then(Value::as_str)
    }

    /// Handle of the vertex an edge points to.
    pub fn edge_to(&self) -> Option<&str> {
        self.fields.get(TO).and_then(Value::as_str)
    }

    /// Copy without `_id`, `_key`, `_rev`, `_from` and `_to`.
    pub fn without_system_attributes(&self) -> Document {
        self.except(&[ID, KEY, REV, FROM, TO])
    }

    // ── typed readers ─────────────────────────────────────────────────────

    pub fn string(&self, path: &str) -> Result<String, DocumentError> {
        self.get_field(path)
    }

    pub fn int(&self, path: &str) -> Result<i64, DocumentError> {
        self.get_field(path)
    }

    pub fn float(&self, path: &str) -> Result<f64, DocumentError> {
        self.get_field(path)
    }

    pub fn bool(&self, path: &str) -> Result<bool, DocumentError> {
        self.get_field(path)
    }

    pub fn list<T: FromValue>(&self, path: &str) -> Result<Vec<T>, DocumentError> {
        self.get_field(path)
    }

    pub fn document(&self, path: &str) -> Result<Document, DocumentError> {
        self.get_field(path)
    }
}

impl<K: Into<String>, V: Into<Value>> FromIterator<(K, V)> for Document {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        Document {
            fields: iter
                .into_iter()
                .map(|(k, v)| (k.into(), v.into()))
                .collect(),
        }
    }
}

impl<K: Into<String>, V: Into<Value>> Extend<(K, V)> for Document {
    fn extend<I: IntoIterator<Item = (K, V)>>(&mut self, iter: I) {
        for (k, v) in iter {
            self.fields.insert(k.into(), v.into());
        }
    }
}

impl IntoIterator for Document {
    type Item = (String, Value);
    type IntoIter = indexmap::map::IntoIter<String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.into_iter()
    }
}

impl<'a> IntoIterator for &'a Document {
    type Item = (&'a String, &'a Value);
    type IntoIter = indexmap::map::Iter<'a, String, Value>;

    fn into_iter(self) -> Self::IntoIter {
        self.fields.iter()
    }
}

impl FromStr for Document {
    type Err = DocumentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        crate::codec::deserialize(s)
    }
}

/// Compact JSON, or indented JSON with `{:#}`.
///
/// Unlike [`Document::to_json_string`] this applies no depth limit, so any
/// document can be printed.
impl fmt::Display for Document {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = if f.alternate() {
            serde_json::to_string_pretty(self)
        } else {
            serde_json::to_string(self)
        };
        f.write_str(&text.map_err(|_| fmt::Error)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vertex() -> Document {
        let mut doc = Document::new();
        doc.insert(ID, "persons/alice");
        doc.insert(KEY, "alice");
        doc.insert(REV, "_hV2-3--");
        doc.insert("name", "Alice");
        doc
    }

    #[test]
    fn test_system_attributes() {
        let doc = vertex();
        assert_eq!(doc.id(), Some("persons/alice"));
        assert_eq!(doc.key(), Some("alice"));
        assert_eq!(doc.rev(), Some("_hV2-3--"));
        assert_eq!(doc.edge_from(), None);

        let edge: Document = [(FROM, "persons/alice"), (TO, "persons/bob")]
            .into_iter()
            .collect();
        assert_eq!(edge.edge_from(), Some("persons/alice"));
        assert_eq!(edge.edge_to(), Some("persons/bob"));
    }

    #[test]
    fn test_except() {
        let doc = vertex();
        let trimmed = doc.except(&[ID, REV]);
        assert_eq!(trimmed.keys().collect::<Vec<_>>(), vec!["_key", "name"]);

        let plain = doc.without_system_attributes();
        assert_eq!(plain.keys().collect::<Vec<_>>(), vec!["name"]);
    }

    #[test]
    fn test_insert_keeps_position() {
        let mut doc: Document = [("a", 1), ("b", 2), ("c", 3)].into_iter().collect();
        assert_eq!(doc.insert("a", 10), Some(Value::Integer(1)));
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "b", "c"]);

        doc.remove("b");
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["a", "c"]);
    }

    #[test]
    fn test_insert_does_not_split_dots() {
        let mut doc = Document::new();
        doc.insert("a.b", 1);
        assert!(doc.contains_key("a.b"));
        assert!(!doc.contains_key("a"));
    }

    #[test]
    fn test_typed_readers() {
        let doc: Document = "{\"code\":404,\"error\":true,\"errorMessage\":\"not found\",\"bindVars\":[\"x\"]}"
            .parse()
            .unwrap();
        assert_eq!(doc.int("code").unwrap(), 404);
        assert!(doc.bool("error").unwrap());
        assert_eq!(doc.string("errorMessage").unwrap(), "not found");
        assert_eq!(doc.list::<String>("bindVars").unwrap(), vec!["x"]);
        assert_eq!(doc.float("code").unwrap(), 404.0);
        assert!(doc.document("missing").unwrap().is_empty());
    }

    #[test]
    fn test_display_is_compact_json() {
        let doc: Document = [("a", 1)].into_iter().collect();
        assert_eq!(doc.to_string(), "{\"a\":1}");
        assert_eq!(format!("{doc:#}"), "{\n  \"a\": 1\n}");
    }

    #[test]
    fn test_display_ignores_depth_limit() {
        let mut doc = Document::new();
        doc.set_field(&vec!["n"; 200].join("."), 1);
        assert_eq!(doc.nesting_depth(), 200);

        let text = doc.to_string();
        assert!(text.starts_with("{\"n\":{\"n\":"));
        assert!(text.ends_with(&"}".repeat(200)));
        assert!(matches!(
            doc.to_json_string(),
            Err(DocumentError::DepthLimitExceeded { .. })
        ));
    }

    #[test]
    fn test_nesting_depth() {
        assert_eq!(Document::new().nesting_depth(), 1);
        let doc: Document = "{\"a\":{\"b\":[1]}}".parse().unwrap();
        assert_eq!(doc.nesting_depth(), 3);
    }
}
