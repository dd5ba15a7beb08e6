//! Mapping between [`Document`]s and caller-defined structs.
//!
//! A mapped type lists its fields once as a table of [`FieldDescriptor`]s,
//! usually through [`crate::mapped!`]. Each descriptor knows the field's
//! stored name (the alias, if any, which may be a dotted path), whether it
//! takes part in mapping, its [`Shape`], and how to read and write it.
//!
//! Reading a document into a struct starts from `T::default()` and fills the
//! fields the document has; everything else keeps its default. Writing a
//! struct out goes through [`Document::try_set_field`], so dotted aliases re-nest.

use std::fmt;
use std::ops::{Deref, DerefMut};

use tracing::trace;

use crate::coerce::{Depth, FromValue, Shape, ToValue, DEFAULT_MAX_DEPTH};
use crate::document::Document;
use crate::error::DocumentError;
use crate::value::Value;

type Reader<T> = Box<dyn Fn(&T, Depth) -> Result<Value, DocumentError> + Send + Sync>;
type Writer<T> = Box<dyn Fn(&mut T, &Value, Depth) -> Result<(), DocumentError> + Send + Sync>;

/// One mapped field of `T`.
pub struct FieldDescriptor<T> {
    name: &'static str,
    alias: Option<&'static str>,
    serializable: bool,
    shape: Shape,
    read: Reader<T>,
    write: Writer<T>,
}

impl<T: 'static> FieldDescriptor<T> {
    /// Descriptor for the field reached through `get` / `get_mut`.
    ///
    /// The shape is taken from the field's Rust type.
    pub fn new<F>(name: &'static str, get: fn(&T) -> &F, get_mut: fn(&mut T) -> &mut F) -> Self
    where
        F: FromValue + ToValue + 'static,
    {
        FieldDescriptor {
            name,
            alias: None,
            serializable: true,
            shape: F::shape(),
            read: Box::new(move |target: &T, depth: Depth| get(target).to_value(depth)),
            write: Box::new(move |target: &mut T, value: &Value, depth: Depth| {
                *get_mut(target) = F::from_value(value, depth)?;
                Ok(())
            }),
        }
    }

    /// Store the field under `alias` instead of its name.
    pub fn alias(mut self, alias: &'static str) -> Self {
        self.alias = Some(alias);
        self
    }

    /// Exclude the field from mapping in both directions.
    pub fn skip(mut self) -> Self {
        self.serializable = false;
        self
    }
}

impl<T> FieldDescriptor<T> {
    pub fn name(&self) -> &'static str {
        self.name
    }

    pub fn alias_name(&self) -> Option<&'static str> {
        self.alias
    }

    /// The path the field is stored under.
    pub fn effective_name(&self) -> &'static str {
        self.alias.unwrap_or(self.name)
    }

    pub fn shape(&self) -> &Shape {
        &self.shape
    }

    pub fn is_serializable(&self) -> bool {
        self.serializable
    }

    pub fn read(&self, target: &T, depth: Depth) -> Result<Value, DocumentError> {
        (self.read)(target, depth)
    }

    pub fn write(&self, target: &mut T, value: &Value, depth: Depth) -> Result<(), DocumentError> {
        (self.write)(target, value, depth)
    }
}

impl<T> fmt::Debug for FieldDescriptor<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FieldDescriptor")
            .field("name", &self.name)
            .field("alias", &self.alias)
            .field("serializable", &self.serializable)
            .field("shape", &self.shape)
            .finish()
    }
}

/// A type that can be built from, and written back to, a [`Document`].
///
/// Implement it with [`crate::mapped!`] or by hand:
///
/// ```
/// use std::sync::OnceLock;
/// use arango_document::{Document, FieldDescriptor, Mapped};
///
/// #[derive(Default)]
/// struct Counter {
///     hits: u32,
/// }
///
/// impl Mapped for Counter {
///     fn descriptors() -> &'static [FieldDescriptor<Self>] {
///         static FIELDS: OnceLock<Vec<FieldDescriptor<Counter>>> = OnceLock::new();
///         FIELDS.get_or_init(|| {
///             vec![FieldDescriptor::new("hits", |c: &Counter| &c.hits, |c: &mut Counter| &mut c.hits)
///                 .alias("stats.hits")]
///         })
///     }
/// }
///
/// let doc: Document = r#"{"stats":{"hits":3}}"#.parse().unwrap();
/// let counter: Counter = doc.to_typed().unwrap();
/// assert_eq!(counter.hits, 3);
/// ```
pub trait Mapped: Default + Sized + 'static {
    fn descriptors() -> &'static [FieldDescriptor<Self>];

    /// Build `Self` from `doc`, one nesting level below `depth`.
    fn to_typed_at(doc: &Document, depth: Depth) -> Result<Self, DocumentError> {
        let depth = depth.descend()?;
        let mut target = Self::default();
        for field in Self::descriptors() {
            if !field.is_serializable() {
                continue;
            }
            let stored = field.effective_name();
            match doc.get(stored) {
                None | Some(Value::Null) => {
                    trace!(field = field.name(), path = stored, "field absent, keeping default");
                }
                Some(value) => field
                    .write(&mut target, value, depth)
                    .map_err(|err| err.in_field(field.name()))?,
            }
        }
        Ok(target)
    }

    /// Write `self` out as a document, one nesting level below `depth`.
    fn from_typed_at(&self, depth: Depth) -> Result<Document, DocumentError> {
        let depth = depth.descend()?;
        let mut doc = Document::with_capacity(Self::descriptors().len());
        for field in Self::descriptors() {
            if !field.is_serializable() {
                continue;
            }
            let value = field
                .read(self, depth)
                .map_err(|err| err.in_field(field.name()))?;
            doc.try_set_field(field.effective_name(), value)
                .map_err(|err| err.in_field(field.name()))?;
        }
        Ok(doc)
    }
}

/// Copy `source` key by key with [`Document::try_set_field`].
fn path_copy(source: &Document, depth: Depth) -> Result<Document, DocumentError> {
    if depth.level() + source.nesting_depth() > depth.limit() {
        return Err(DocumentError::DepthLimitExceeded {
            limit: depth.limit(),
        });
    }
    let mut out = Document::with_capacity(source.len());
    for (key, value) in source {
        out.try_set_field(key, value.clone())?;
    }
    Ok(out)
}

impl Mapped for Document {
    fn descriptors() -> &'static [FieldDescriptor<Self>] {
        &[]
    }

    fn to_typed_at(doc: &Document, depth: Depth) -> Result<Self, DocumentError> {
        path_copy(doc, depth)
    }

    fn from_typed_at(&self, depth: Depth) -> Result<Document, DocumentError> {
        path_copy(self, depth)
    }
}

/// A document passed through the mapper untouched.
///
/// Use it as the target type when a call site is generic over [`Mapped`] but
/// the caller wants the raw fields.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawRecord(pub Document);

impl Deref for RawRecord {
    type Target = Document;

    fn deref(&self) -> &Document {
        &self.0
    }
}

impl DerefMut for RawRecord {
    fn deref_mut(&mut self) -> &mut Document {
        &mut self.0
    }
}

impl From<Document> for RawRecord {
    fn from(doc: Document) -> Self {
        RawRecord(doc)
    }
}

impl From<RawRecord> for Document {
    fn from(record: RawRecord) -> Self {
        record.0
    }
}

impl Mapped for RawRecord {
    fn descriptors() -> &'static [FieldDescriptor<Self>] {
        &[]
    }

    fn to_typed_at(doc: &Document, depth: Depth) -> Result<Self, DocumentError> {
        path_copy(doc, depth).map(RawRecord)
    }

    fn from_typed_at(&self, depth: Depth) -> Result<Document, DocumentError> {
        path_copy(&self.0, depth)
    }
}

impl FromValue for RawRecord {
    fn shape() -> Shape {
        Shape::Raw
    }

    fn from_value(value: &Value, depth: Depth) -> Result<Self, DocumentError> {
        compound_from_value(value, depth)
    }
}

impl ToValue for RawRecord {
    fn to_value(&self, depth: Depth) -> Result<Value, DocumentError> {
        compound_to_value(self, depth)
    }
}

/// [`FromValue`] body for mapped structs: the value must be a document.
pub fn compound_from_value<T: Mapped>(value: &Value, depth: Depth) -> Result<T, DocumentError> {
    match value {
        Value::Document(doc) => T::to_typed_at(doc, depth),
        other => Err(DocumentError::conversion("document", other.kind())),
    }
}

/// [`ToValue`] body for mapped structs.
pub fn compound_to_value<T: Mapped>(value: &T, depth: Depth) -> Result<Value, DocumentError> {
    value.from_typed_at(depth).map(Value::Document)
}

/// Options for [`to_typed_with`] and [`from_typed_with`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MapperOptions {
    /// Deepest nesting the mapper follows before failing.
    pub max_depth: usize,
}

impl Default for MapperOptions {
    fn default() -> Self {
        Self {
            max_depth: DEFAULT_MAX_DEPTH,
        }
    }
}

pub fn to_typed<T: Mapped>(doc: &Document) -> Result<T, DocumentError> {
    to_typed_with(doc, &MapperOptions::default())
}

pub fn to_typed_with<T: Mapped>(doc: &Document, options: &MapperOptions) -> Result<T, DocumentError> {
    T::to_typed_at(doc, Depth::new(options.max_depth))
}

pub fn from_typed<T: Mapped>(value: &T) -> Result<Document, DocumentError> {
    from_typed_with(value, &MapperOptions::default())
}

pub fn from_typed_with<T: Mapped>(value: &T, options: &MapperOptions) -> Result<Document, DocumentError> {
    value.from_typed_at(Depth::new(options.max_depth))
}

impl Document {
    /// Build a `T` from this document.
    ///
    /// Missing fields keep their default; fields `T` does not declare are
    /// ignored.
    pub fn to_typed<T: Mapped>(&self) -> Result<T, DocumentError> {
        to_typed(self)
    }

    /// Write `value` out as a document.
    pub fn from_typed<T: Mapped>(value: &T) -> Result<Document, DocumentError> {
        from_typed(value)
    }
}
