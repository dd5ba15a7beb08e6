//! Generic ArangoDB document model.
//!
//! A [`Document`] is an ordered key/value record, the shape every database
//! record, query result and request body takes on the wire. This crate
//! provides:
//!
//! - dotted-path access into nested documents ([`Document::get_field`],
//!   [`Document::set_field`], [`Document::remove_field`], [`Document::has_field`])
//! - checked runtime coercion of stored values ([`FromValue`], [`ToValue`])
//! - an order-preserving JSON codec ([`serialize`], [`deserialize`])
//! - mapping to and from caller structs ([`Mapped`], [`mapped!`],
//!   [`document_enum!`])
//! - shallow merging ([`merge`], [`MergePolicy`])
//!
//! # Example
//!
//! ```
//! use arango_document::{mapped, Document, MergePolicy};
//!
//! #[derive(Debug, Default)]
//! struct User {
//!     name: String,
//!     logins: u32,
//! }
//!
//! mapped!(User { name, logins });
//!
//! let mut doc: Document = r#"{"_key":"u1","name":"Ann","logins":"3"}"#.parse().unwrap();
//! assert_eq!(doc.key(), Some("u1"));
//!
//! let user: User = doc.to_typed().unwrap();
//! assert_eq!(user.logins, 3);
//!
//! doc.set_field("profile.theme", "dark");
//! let defaults: Document = r#"{"profile":{},"logins":0,"active":true}"#.parse().unwrap();
//! doc.merge(&defaults, MergePolicy::MergeFields);
//! assert_eq!(
//!     doc.to_string(),
//!     r#"{"_key":"u1","name":"Ann","logins":"3","profile":{"theme":"dark"},"active":true}"#
//! );
//! ```

pub mod cli;
pub mod codec;
pub mod coerce;
mod document;
pub mod equal;
pub mod error;
mod macros;
pub mod mapper;
pub mod merge;
mod path;
mod value;

pub use codec::{deserialize, deserialize_with, serialize, serialize_with, SerializeOptions};
pub use coerce::{Depth, Enumerant, FromValue, Shape, ToValue, DEFAULT_MAX_DEPTH};
pub use document::{Document, FROM, ID, KEY, REV, TO};
pub use equal::{equivalent, equivalent_documents};
pub use error::DocumentError;
pub use mapper::{
    from_typed, from_typed_with, to_typed, to_typed_with, FieldDescriptor, Mapped, MapperOptions,
    RawRecord,
};
pub use merge::{merge, MergePolicy, MergeReport};
pub use value::{format_date, Value, ValueSet};

pub use arango_document_path::{validate_field_path, PathError};
