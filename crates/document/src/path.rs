//! Dotted-path access into nested documents.
//!
//! Reads, removals and existence checks stop at the first missing (or
//! non-document) intermediate segment and report "not found". Writes create
//! empty documents for missing (or null) intermediate segments and continue;
//! an intermediate holding any other value blocks the write.

use arango_document_path::{segments, split_terminal};
use tracing::{trace, warn};

use crate::coerce::{Depth, FromValue};
use crate::document::Document;
use crate::error::DocumentError;
use crate::value::Value;

impl Document {
    /// Value at `path`, or `None` if any segment is missing.
    ///
    /// # Example
    ///
    /// ```
    /// use arango_document::{Document, Value};
    ///
    /// let doc: Document = r#"{"a":{"j":1}}"#.parse().unwrap();
    /// assert_eq!(doc.get("a.j"), Some(&Value::Integer(1)));
    /// assert_eq!(doc.get("a.k"), None);
    /// assert_eq!(doc.get("x.j"), None);
    /// ```
    pub fn get(&self, path: &str) -> Option<&Value> {
        let terminal = split_terminal(path);
        self.container(&terminal.parent)?.fields.get(terminal.key)
    }

    pub fn get_mut(&mut self, path: &str) -> Option<&mut Value> {
        let terminal = split_terminal(path);
        self.container_mut(&terminal.parent)?
            .fields
            .get_mut(terminal.key)
    }

    /// Whether a value (including an explicit null) is stored at `path`.
    pub fn has_field(&self, path: &str) -> bool {
        self.get(path).is_some()
    }

    /// Value at `path` converted to `T`.
    ///
    /// A missing path yields `T::default()`; use [`Document::has_field`] to tell
    /// an absent field from one holding the default. A present value that
    /// cannot be converted is an error.
    ///
    /// # Example
    ///
    /// ```
    /// use arango_document::Document;
    ///
    /// let doc: Document = r#"{"foo":"v","bar":12345,"a":{"j":1}}"#.parse().unwrap();
    /// assert_eq!(doc.get_field::<i64>("a.j").unwrap(), 1);
    /// assert_eq!(doc.get_field::<i64>("bar").unwrap(), 12345);
    /// assert_eq!(doc.get_field::<i64>("missing").unwrap(), 0);
    /// assert!(doc.get_field::<i64>("foo").is_err());
    /// ```
    pub fn get_field<T: FromValue + Default>(&self, path: &str) -> Result<T, DocumentError> {
        Ok(self.get_field_opt(path)?.unwrap_or_default())
    }

    /// Like [`Document::get_field`] but reports a missing path as `None`.
    pub fn get_field_opt<T: FromValue>(&self, path: &str) -> Result<Option<T>, DocumentError> {
        match self.get(path) {
            Some(value) => T::from_value(value, Depth::default()).map(Some),
            None => Ok(None),
        }
    }

    /// Store `value` at `path`, creating intermediate documents as needed.
    ///
    /// Missing or null intermediate segments become empty documents. If an
    /// intermediate segment holds any other value the document is left
    /// unchanged and a warning is logged; use [`Document::try_set_field`] to
    /// get the failure as an error. An existing terminal key keeps its
    /// position.
    ///
    /// # Example
    ///
    /// ```
    /// use arango_document::Document;
    ///
    /// let mut doc = Document::new();
    /// doc.set_field("a.b.c", 1).set_field("name", "x");
    /// assert!(doc.get("a").unwrap().is_document());
    /// assert!(doc.get("a.b").unwrap().is_document());
    /// assert_eq!(doc.int("a.b.c").unwrap(), 1);
    /// ```
    pub fn set_field(&mut self, path: &str, value: impl Into<Value>) -> &mut Self {
        if let Err(err) = self.try_set_field(path, value) {
            warn!(path, %err, "field not written");
        }
        self
    }

    /// Like [`Document::set_field`] but fails with
    /// [`DocumentError::PathBlocked`] instead of skipping the write.
    ///
    /// # Example
    ///
    /// ```
    /// use arango_document::{Document, DocumentError};
    ///
    /// let mut doc: Document = r#"{"tags":["a","b"]}"#.parse().unwrap();
    /// let err = doc.try_set_field("tags.0", "z").unwrap_err();
    /// assert!(matches!(err, DocumentError::PathBlocked { .. }));
    /// assert_eq!(doc.to_string(), r#"{"tags":["a","b"]}"#);
    /// ```
    pub fn try_set_field(
        &mut self,
        path: &str,
        value: impl Into<Value>,
    ) -> Result<&mut Self, DocumentError> {
        let terminal = split_terminal(path);
        self.container_or_insert(&terminal.parent)?
            .fields
            .insert(terminal.key.to_owned(), value.into());
        Ok(self)
    }

    /// Remove the value at `path`; a missing path is a no-op.
    pub fn remove_field(&mut self, path: &str) -> Option<Value> {
        let terminal = split_terminal(path);
        self.container_mut(&terminal.parent)?
            .fields
            .shift_remove(terminal.key)
    }

    /// Iterate over the documents along `path`, starting with `self`.
    ///
    /// Stops early at the first missing or non-document segment.
    pub fn walk<'a>(&'a self, path: &'a str) -> impl Iterator<Item = &'a Document> + 'a {
        let mut steps = segments(path);
        let mut current = Some(self);
        std::iter::from_fn(move || {
            let doc = current?;
            current = steps
                .next()
                .and_then(|step| doc.fields.get(step))
                .and_then(Value::as_document);
            Some(doc)
        })
    }

    fn container(&self, parent: &[&str]) -> Option<&Document> {
        let mut current = self;
        for step in parent {
            current = current.fields.get(*step)?.as_document()?;
        }
        Some(current)
    }

    fn container_mut(&mut self, parent: &[&str]) -> Option<&mut Document> {
        let mut current = self;
        for step in parent {
            current = current.fields.get_mut(*step)?.as_document_mut()?;
        }
        Some(current)
    }

    /// Walk `parent`, creating documents for missing or null segments.
    ///
    /// Fails before mutating anything: a blocking segment already exists, so
    /// every segment before it was an existing document.
    fn container_or_insert(&mut self, parent: &[&str]) -> Result<&mut Document, DocumentError> {
        let mut current = self;
        for step in parent {
            let slot = current.fields.entry((*step).to_owned()).or_default();
            if slot.is_null() {
                trace!(segment = *step, "creating nested document");
                *slot = Value::Document(Document::new());
            }
            current = match slot {
                Value::Document(next) => next,
                other => {
                    return Err(DocumentError::PathBlocked {
                        segment: (*step).to_owned(),
                        found: other.kind(),
                    })
                }
            };
        }
        Ok(current)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_top_level_set_get() {
        let mut doc = Document::new();
        doc.set_field("foo", "bar");
        assert!(doc.has_field("foo"));
        assert_eq!(doc.get("foo"), Some(&Value::from("bar")));
    }

    #[test]
    fn test_set_auto_creates_intermediates() {
        let mut doc = Document::new();
        doc.set_field("a.b.c", 7);

        assert!(doc.get("a").is_some_and(Value::is_document));
        assert!(doc.get("a.b").is_some_and(Value::is_document));
        assert_eq!(doc.get("a.b.c"), Some(&Value::Integer(7)));
    }

    #[test]
    fn test_set_into_existing_nested() {
        let mut doc = Document::new();
        doc.set_field("a.x", 1).set_field("a.y", 2);
        let a = doc.get("a").and_then(Value::as_document).unwrap();
        assert_eq!(a.keys().collect::<Vec<_>>(), vec!["x", "y"]);
    }

    #[test]
    fn test_set_through_scalar_intermediate_is_blocked() {
        let mut doc = Document::new();
        doc.set_field("a", 1).set_field("a.b", 2);
        assert_eq!(doc.get("a"), Some(&Value::Integer(1)));
        assert_eq!(doc.get("a.b"), None);

        assert_eq!(
            doc.try_set_field("a.b", 2).map(|_| ()),
            Err(DocumentError::PathBlocked {
                segment: "a".into(),
                found: "integer",
            })
        );
    }

    #[test]
    fn test_set_through_sequence_keeps_elements() {
        let mut doc = Document::new();
        doc.set_field("tags", vec!["a", "b"]);
        let before = doc.clone();

        doc.set_field("tags.0", "z");
        assert_eq!(doc, before);
        assert_eq!(
            doc.try_set_field("tags.0", "z").map(|_| ()),
            Err(DocumentError::PathBlocked {
                segment: "tags".into(),
                found: "sequence",
            })
        );
        assert_eq!(doc.get("tags"), Some(&Value::from(vec!["a", "b"])));
    }

    #[test]
    fn test_set_through_null_intermediate_creates_document() {
        let mut doc = Document::new();
        doc.set_field("a", Value::Null);
        doc.try_set_field("a.b", 2).unwrap();
        assert_eq!(doc.int("a.b").unwrap(), 2);
    }

    #[test]
    fn test_blocked_write_deep_in_path_leaves_document_unchanged() {
        let mut doc = Document::new();
        doc.set_field("a.b", "leaf");
        let before = doc.clone();
        assert!(doc.try_set_field("a.b.c.d", 1).is_err());
        assert_eq!(doc, before);
    }

    #[test]
    fn test_overwrite_keeps_position() {
        let mut doc = Document::new();
        doc.set_field("x", 1).set_field("y", 2).set_field("x", 3);
        assert_eq!(doc.keys().collect::<Vec<_>>(), vec!["x", "y"]);
        assert_eq!(doc.get("x"), Some(&Value::Integer(3)));
    }

    #[test]
    fn test_missing_intermediate_is_not_found() {
        let doc = Document::new();
        assert_eq!(doc.get("a.b.c"), None);
        assert!(!doc.has_field("a.b.c"));
        assert_eq!(doc.get_field::<i64>("a.b.c").unwrap(), 0);
        assert_eq!(doc.get_field_opt::<i64>("a.b.c").unwrap(), None);
    }

    #[test]
    fn test_scalar_intermediate_is_not_found() {
        let mut doc = Document::new();
        doc.set_field("a", "text");
        assert_eq!(doc.get("a.b"), None);
        assert!(!doc.has_field("a.b"));
    }

    #[test]
    fn test_remove_missing_is_noop() {
        let mut doc = Document::new();
        doc.set_field("x", 1);
        assert_eq!(doc.remove_field("a.b.c"), None);
        assert!(!doc.has_field("a.b.c"));
        assert_eq!(doc.len(), 1);
    }

    #[test]
    fn test_remove_nested() {
        let mut doc = Document::new();
        doc.set_field("a.b", 1).set_field("a.c", 2);
        assert_eq!(doc.remove_field("a.b"), Some(Value::Integer(1)));
        assert!(!doc.has_field("a.b"));
        assert!(doc.has_field("a.c"));
    }

    #[test]
    fn test_has_field_with_explicit_null() {
        let mut doc = Document::new();
        doc.set_field("a.b", Value::Null);
        assert!(doc.has_field("a.b"));
        assert_eq!(doc.get_field::<Option<i64>>("a.b").unwrap(), None);
    }

    #[test]
    fn test_get_mut() {
        let mut doc = Document::new();
        doc.set_field("a.count", 1);
        if let Some(Value::Integer(n)) = doc.get_mut("a.count") {
            *n += 1;
        }
        assert_eq!(doc.int("a.count").unwrap(), 2);
        assert!(doc.get_mut("a.missing").is_none());
    }

    #[test]
    fn test_walk() {
        let mut doc = Document::new();
        doc.set_field("a.b.c", 1);
        assert_eq!(doc.walk("a.b.c").count(), 3);
        assert_eq!(doc.walk("a.x.y").count(), 2);
        assert_eq!(doc.walk("zzz").count(), 1);
    }
}
