//! Conversion between stored [`Value`]s and Rust types.
//!
//! [`FromValue`] turns a stored value into the requested type: exact matches
//! pass through, sequences and sets are rebuilt element by element, and
//! scalars go through a checked conversion (integer range checks, integral
//! floats only, string parsing). Anything else is a
//! [`DocumentError::Conversion`].
//!
//! [`ToValue`] is the reverse direction used when emitting documents.

use std::collections::{BTreeSet, HashSet};
use std::hash::Hash;

use chrono::{DateTime, Utc};

use crate::document::Document;
use crate::error::DocumentError;
use crate::value::{format_date, Value, ValueSet};

/// Default nesting limit: the deepest nesting `serde_json` parses.
///
/// Its parser fails on the 128th nested container, so 127 levels (root
/// document included) is the most that can be written and read back.
pub const DEFAULT_MAX_DEPTH: usize = 127;

/// Recursion guard threaded through nested conversions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Depth {
    level: usize,
    limit: usize,
}

impl Depth {
    pub fn new(limit: usize) -> Self {
        Self { level: 0, limit }
    }

    pub fn level(&self) -> usize {
        self.level
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    /// One level deeper, or an error once the limit is passed.
    pub fn descend(self) -> Result<Depth, DocumentError> {
        if self.level >= self.limit {
            return Err(DocumentError::DepthLimitExceeded { limit: self.limit });
        }
        Ok(Depth {
            level: self.level + 1,
            limit: self.limit,
        })
    }
}

impl Default for Depth {
    fn default() -> Self {
        Depth::new(DEFAULT_MAX_DEPTH)
    }
}

/// Declared shape of a mapped field.
///
/// Collection element shapes come from the Rust type, so an empty collection
/// still has a well-defined element shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Shape {
    Scalar,
    Date,
    Enum,
    /// A mapped struct, stored as a nested document.
    Compound,
    /// A [`Document`] or [`Value`] taken as-is.
    Raw,
    Sequence(Box<Shape>),
    Set(Box<Shape>),
    Optional(Box<Shape>),
}

impl Shape {
    /// The element shape of a collection, or the inner shape of an option.
    pub fn element(&self) -> Option<&Shape> {
        match self {
            Shape::Sequence(inner) | Shape::Set(inner) | Shape::Optional(inner) => Some(inner),
            _ => None,
        }
    }
}

/// Conversion from a stored value into `Self`.
pub trait FromValue: Sized {
    /// Declared shape of `Self`.
    fn shape() -> Shape;

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError>;
}

/// Conversion from `Self` into a storable value.
pub trait ToValue {
    fn to_value(&self, depth: Depth) -> Result<Value, DocumentError>;
}

fn mismatch<T>(expected: &'static str, value: &Value) -> Result<T, DocumentError> {
    Err(DocumentError::conversion(expected, value.kind()))
}

// ── raw ───────────────────────────────────────────────────────────────────

impl FromValue for Value {
    fn shape() -> Shape {
        Shape::Raw
    }

    fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
        Ok(value.clone())
    }
}

impl ToValue for Value {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(self.clone())
    }
}

impl FromValue for Document {
    fn shape() -> Shape {
        Shape::Raw
    }

    fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
        match value {
            Value::Document(doc) => Ok(doc.clone()),
            other => mismatch("document", other),
        }
    }
}

impl ToValue for Document {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::Document(self.clone()))
    }
}

// ── scalars ───────────────────────────────────────────────────────────────

impl FromValue for String {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
        match value {
            Value::Str(s) => Ok(s.clone()),
            Value::Integer(i) => Ok(i.to_string()),
            Value::UInteger(u) => Ok(u.to_string()),
            Value::Float(f) => Ok(f.to_string()),
            Value::Bool(b) => Ok(b.to_string()),
            Value::Date(d) => Ok(format_date(d)),
            other => mismatch("string", other),
        }
    }
}

impl ToValue for String {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::Str(self.clone()))
    }
}

impl ToValue for &str {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::Str((*self).to_owned()))
    }
}

impl FromValue for bool {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
        match value {
            Value::Bool(b) => Ok(*b),
            Value::Integer(0) => Ok(false),
            Value::Integer(1) => Ok(true),
            Value::Str(s) if s.eq_ignore_ascii_case("true") => Ok(true),
            Value::Str(s) if s.eq_ignore_ascii_case("false") => Ok(false),
            other => mismatch("bool", other),
        }
    }
}

impl ToValue for bool {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::Bool(*self))
    }
}

macro_rules! integer_conversions {
    ($($t:ty),*) => {
        $(
            impl FromValue for $t {
                fn shape() -> Shape {
                    Shape::Scalar
                }

                fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
                    let out_of_range = || DocumentError::conversion(stringify!($t), value.kind());
                    match value {
                        Value::Integer(i) => <$t>::try_from(*i).map_err(|_| out_of_range()),
                        Value::UInteger(u) => <$t>::try_from(*u).map_err(|_| out_of_range()),
                        Value::Float(f) => {
                            if f.fract() == 0.0 && *f >= <$t>::MIN as f64 && *f < <$t>::MAX as f64 + 1.0 {
                                Ok(*f as $t)
                            } else {
                                Err(out_of_range())
                            }
                        }
                        Value::Bool(b) => Ok(<$t>::from(*b)),
                        Value::Str(s) => s.trim().parse::<$t>().map_err(|_| out_of_range()),
                        other => mismatch(stringify!($t), other),
                    }
                }
            }

            impl ToValue for $t {
                fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
                    Ok(Value::from(*self))
                }
            }
        )*
    };
}

integer_conversions!(i8, i16, i32, i64, u8, u16, u32, u64);

impl FromValue for f64 {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
        match value {
            Value::Float(f) => Ok(*f),
            Value::Integer(i) => Ok(*i as f64),
            Value::UInteger(u) => Ok(*u as f64),
            Value::Bool(b) => Ok(f64::from(u8::from(*b))),
            Value::Str(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| DocumentError::conversion("f64", "string")),
            other => mismatch("f64", other),
        }
    }
}

impl ToValue for f64 {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::Float(*self))
    }
}

impl FromValue for f32 {
    fn shape() -> Shape {
        Shape::Scalar
    }

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError> {
        let wide = f64::from_value(value, depth)?;
        let narrow = wide as f32;
        if wide.is_finite() && !narrow.is_finite() {
            return mismatch("f32", value);
        }
        Ok(narrow)
    }
}

impl ToValue for f32 {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::from(*self))
    }
}

impl FromValue for DateTime<Utc> {
    fn shape() -> Shape {
        Shape::Date
    }

    fn from_value(value: &Value, _depth: Depth) -> Result<Self, DocumentError> {
        match value {
            Value::Date(d) => Ok(*d),
            Value::Str(s) => DateTime::parse_from_rfc3339(s)
                .map(|d| d.with_timezone(&Utc))
                .map_err(|_| DocumentError::conversion("date", "string")),
            // Milliseconds since the epoch.
            Value::Integer(ms) => DateTime::from_timestamp_millis(*ms)
                .ok_or_else(|| DocumentError::conversion("date", "integer")),
            other => mismatch("date", other),
        }
    }
}

impl ToValue for DateTime<Utc> {
    fn to_value(&self, _depth: Depth) -> Result<Value, DocumentError> {
        Ok(Value::Date(*self))
    }
}

// ── containers ────────────────────────────────────────────────────────────

impl<T: FromValue> FromValue for Option<T> {
    fn shape() -> Shape {
        Shape::Optional(Box::new(T::shape()))
    }

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError> {
        match value {
            Value::Null => Ok(None),
            other => T::from_value(other, depth).map(Some),
        }
    }
}

impl<T: ToValue> ToValue for Option<T> {
    fn to_value(&self, depth: Depth) -> Result<Value, DocumentError> {
        match self {
            Some(inner) => inner.to_value(depth),
            None => Ok(Value::Null),
        }
    }
}

fn elements<'a>(value: &'a Value, expected: &'static str) -> Result<&'a [Value], DocumentError> {
    value
        .as_elements()
        .ok_or_else(|| DocumentError::conversion(expected, value.kind()))
}

impl<T: FromValue> FromValue for Vec<T> {
    fn shape() -> Shape {
        Shape::Sequence(Box::new(T::shape()))
    }

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError> {
        let inner = depth.descend()?;
        elements(value, "sequence")?
            .iter()
            .map(|item| T::from_value(item, inner))
            .collect()
    }
}

impl<T: ToValue> ToValue for Vec<T> {
    fn to_value(&self, depth: Depth) -> Result<Value, DocumentError> {
        let inner = depth.descend()?;
        self.iter()
            .map(|item| item.to_value(inner))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Sequence)
    }
}

impl<T: FromValue + Ord> FromValue for BTreeSet<T> {
    fn shape() -> Shape {
        Shape::Set(Box::new(T::shape()))
    }

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError> {
        let inner = depth.descend()?;
        elements(value, "set")?
            .iter()
            .map(|item| T::from_value(item, inner))
            .collect()
    }
}

impl<T: ToValue> ToValue for BTreeSet<T> {
    fn to_value(&self, depth: Depth) -> Result<Value, DocumentError> {
        let inner = depth.descend()?;
        self.iter()
            .map(|item| item.to_value(inner))
            .collect::<Result<ValueSet, _>>()
            .map(Value::Set)
    }
}

impl<T: FromValue + Eq + Hash> FromValue for HashSet<T> {
    fn shape() -> Shape {
        Shape::Set(Box::new(T::shape()))
    }

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError> {
        let inner = depth.descend()?;
        elements(value, "set")?
            .iter()
            .map(|item| T::from_value(item, inner))
            .collect()
    }
}

impl<T: ToValue> ToValue for HashSet<T> {
    fn to_value(&self, depth: Depth) -> Result<Value, DocumentError> {
        let inner = depth.descend()?;
        self.iter()
            .map(|item| item.to_value(inner))
            .collect::<Result<ValueSet, _>>()
            .map(Value::Set)
    }
}

// ── enumerations ──────────────────────────────────────────────────────────

/// A fieldless enum stored by ordinal, declared with [`crate::document_enum!`].
pub trait Enumerant: Sized + Copy + 'static {
    const NAME: &'static str;
    const VARIANTS: &'static [(&'static str, i64, Self)];

    fn ordinal(&self) -> i64;

    fn name(&self) -> &'static str;

    fn from_ordinal(ordinal: i64) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(_, n, _)| *n == ordinal)
            .map(|(_, _, v)| *v)
    }

    fn from_name(name: &str) -> Option<Self> {
        Self::VARIANTS
            .iter()
            .find(|(n, _, _)| *n == name)
            .map(|(_, _, v)| *v)
    }
}

/// Map a stored ordinal or variant name to an enumerant.
pub fn enumerant_from_value<E: Enumerant>(value: &Value) -> Result<E, DocumentError> {
    let found = match value {
        Value::Integer(i) => E::from_ordinal(*i),
        Value::Str(s) => E::from_name(s)
            .or_else(|| s.trim().parse().ok().and_then(E::from_ordinal)),
        other => return mismatch(E::NAME, other),
    };
    found.ok_or_else(|| DocumentError::conversion(E::NAME, value.kind()))
}
