//! Dotted field paths for ArangoDB documents.
//!
//! A field path is a sequence of object keys joined with `.`. A path without a
//! dot addresses a top-level key directly; `"address.city"` addresses the
//! `city` key of the nested document stored under `address`.
//!
//! There is no escaping: a key that itself contains a dot cannot be reached
//! through a path and must be accessed on the containing document directly.
//!
//! # Example
//!
//! ```
//! use arango_document_path::{format_field_path, parse_field_path, split_terminal};
//!
//! let path = parse_field_path("a.b.c");
//! assert_eq!(path, vec!["a", "b", "c"]);
//! assert_eq!(format_field_path(&path), "a.b.c");
//!
//! let terminal = split_terminal("a.b.c");
//! assert_eq!(terminal.parent, vec!["a", "b"]);
//! assert_eq!(terminal.key, "c");
//! ```

use thiserror::Error;

pub mod types;
pub use types::{FieldPath, PathStep, Terminal};

mod util;
pub use util::{
    format_field_path, is_child, is_nested, is_path_equal, is_root, parent, parse_field_path,
    segments, split_terminal, SEPARATOR,
};

pub mod validate;
pub use validate::validate_field_path;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum PathError {
    #[error("field path is empty")]
    Empty,
    #[error("field path has an empty segment at position {index}")]
    EmptySegment { index: usize },
    #[error("field path too long")]
    PathTooLong,
    #[error("field path nests too deeply")]
    TooDeep,
    #[error("root path has no parent")]
    NoParent,
}
