//! JSON text codec for [`Document`]s.
//!
//! Key order is preserved in both directions. Numbers keep the kind they were
//! written with; integers above `i64::MAX` become [`Value::UInteger`]. Dates
//! are written as RFC 3339 strings and read back as strings, and sets are
//! written as arrays and read back as sequences. Non-finite floats have no
//! JSON form and are written as `null`.
//!
//! # Example
//!
//! ```
//! use arango_document::{deserialize, serialize, Value};
//!
//! let doc = deserialize(r#"{"foo":"v","bar":12345,"a":{"j":1}}"#).unwrap();
//! assert_eq!(doc.get("bar"), Some(&Value::Integer(12345)));
//! assert_eq!(serialize(&doc).unwrap(), r#"{"foo":"v","bar":12345,"a":{"j":1}}"#);
//! ```

use std::fmt;

use serde::de::{self, Deserialize, Deserializer, MapAccess, SeqAccess, Visitor};
use serde::ser::{Serialize, Serializer};
use tracing::{debug, trace};

use crate::coerce::DEFAULT_MAX_DEPTH;
use crate::document::Document;
use crate::error::DocumentError;
use crate::value::{format_date, Value};

/// Options for [`serialize_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SerializeOptions {
    /// Indent nested containers with two spaces.
    pub pretty: bool,
    /// Capped at [`DEFAULT_MAX_DEPTH`] so the output always parses again.
    pub max_depth: usize,
}

impl Default for SerializeOptions {
    fn default() -> Self {
        Self {
            pretty: false,
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

/// Compact JSON text for `doc`.
pub fn serialize(doc: &Document) -> Result<String, DocumentError> {
    serialize_with(doc, &SerializeOptions::default())
}

pub fn serialize_with(doc: &Document, options: &SerializeOptions) -> Result<String, DocumentError> {
    check_depth(doc, options.max_depth.min(DEFAULT_MAX_DEPTH))?;
    let text = if options.pretty {
        serde_json::to_string_pretty(doc)
    } else {
        serde_json::to_string(doc)
    };
    text.map_err(|err| DocumentError::Encode(err.to_string()))
}

/// Parse JSON text whose top-level value is an object.
pub fn deserialize(text: &str) -> Result<Document, DocumentError> {
    deserialize_with(text, DEFAULT_MAX_DEPTH)
}

/// Like [`deserialize`], rejecting documents nested deeper than `max_depth`.
///
/// The parser itself stops at [`DEFAULT_MAX_DEPTH`], so larger limits have no
/// effect.
pub fn deserialize_with(text: &str, max_depth: usize) -> Result<Document, DocumentError> {
    debug!(bytes = text.len(), "deserializing document");
    let doc: Document = serde_json::from_str(text).map_err(|err| {
        let message = err.to_string();
        if message.starts_with("recursion limit exceeded") {
            DocumentError::DepthLimitExceeded {
                limit: max_depth.min(DEFAULT_MAX_DEPTH),
            }
        } else {
            DocumentError::MalformedInput(message)
        }
    })?;
    check_depth(&doc, max_depth)?;
    trace!(fields = doc.len(), "deserialized document");
    Ok(doc)
}

fn check_depth(doc: &Document, max_depth: usize) -> Result<(), DocumentError> {
    if doc.nesting_depth() > max_depth {
        return Err(DocumentError::DepthLimitExceeded { limit: max_depth });
    }
    Ok(())
}

impl Document {
    /// Compact JSON text, see [`serialize`].
    pub fn to_json_string(&self) -> Result<String, DocumentError> {
        serialize(self)
    }

    /// Indented JSON text.
    pub fn to_json_pretty(&self) -> Result<String, DocumentError> {
        serialize_with(
            self,
            &SerializeOptions {
                pretty: true,
                ..SerializeOptions::default()
            },
        )
    }
}

// ── serde ─────────────────────────────────────────────────────────────────

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Value::Null => serializer.serialize_unit(),
            Value::Bool(b) => serializer.serialize_bool(*b),
            Value::Integer(i) => serializer.serialize_i64(*i),
            Value::UInteger(u) => serializer.serialize_u64(*u),
            Value::Float(f) if f.is_finite() => serializer.serialize_f64(*f),
            Value::Float(_) => serializer.serialize_unit(),
            Value::Str(s) => serializer.serialize_str(s),
            Value::Date(d) => serializer.serialize_str(&format_date(d)),
            Value::Document(doc) => doc.serialize(serializer),
            Value::Sequence(items) => serializer.collect_seq(items),
            Value::Set(set) => serializer.collect_seq(set),
        }
    }
}

impl Serialize for Document {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_map(&self.fields)
    }
}

struct ValueVisitor;

impl<'de> Visitor<'de> for ValueVisitor {
    type Value = Value;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON value")
    }

    fn visit_bool<E: de::Error>(self, v: bool) -> Result<Value, E> {
        Ok(Value::Bool(v))
    }

    fn visit_i64<E: de::Error>(self, v: i64) -> Result<Value, E> {
        Ok(Value::Integer(v))
    }

    fn visit_u64<E: de::Error>(self, v: u64) -> Result<Value, E> {
        Ok(Value::from(v))
    }

    fn visit_f64<E: de::Error>(self, v: f64) -> Result<Value, E> {
        Ok(Value::Float(v))
    }

    fn visit_str<E: de::Error>(self, v: &str) -> Result<Value, E> {
        Ok(Value::Str(v.to_owned()))
    }

    fn visit_string<E: de::Error>(self, v: String) -> Result<Value, E> {
        Ok(Value::Str(v))
    }

    fn visit_unit<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_none<E: de::Error>(self) -> Result<Value, E> {
        Ok(Value::Null)
    }

    fn visit_some<D: Deserializer<'de>>(self, deserializer: D) -> Result<Value, D::Error> {
        Value::deserialize(deserializer)
    }

    fn visit_seq<A: SeqAccess<'de>>(self, mut seq: A) -> Result<Value, A::Error> {
        let mut items = Vec::with_capacity(seq.size_hint().unwrap_or(0));
        while let Some(item) = seq.next_element()? {
            items.push(item);
        }
        Ok(Value::Sequence(items))
    }

    fn visit_map<A: MapAccess<'de>>(self, map: A) -> Result<Value, A::Error> {
        DocumentVisitor.visit_map(map).map(Value::Document)
    }
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_any(ValueVisitor)
    }
}

struct DocumentVisitor;

impl<'de> Visitor<'de> for DocumentVisitor {
    type Value = Document;

    fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("a JSON object")
    }

    fn visit_map<A: MapAccess<'de>>(self, mut map: A) -> Result<Document, A::Error> {
        let mut doc = Document::with_capacity(map.size_hint().unwrap_or(0));
        while let Some((key, value)) = map.next_entry::<String, Value>()? {
            doc.fields.insert(key, value);
        }
        Ok(doc)
    }
}

impl<'de> Deserialize<'de> for Document {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        deserializer.deserialize_map(DocumentVisitor)
    }
}
