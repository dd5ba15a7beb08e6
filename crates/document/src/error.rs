//! Error type shared by coercion, the JSON codec and the object mapper.
//!
//! Path misses are not errors: accessors report them as `None`, `false` or the
//! target type's default value.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum DocumentError {
    /// A stored value cannot be converted to the requested type.
    #[error("cannot convert {found} to {expected}")]
    Conversion {
        expected: &'static str,
        found: &'static str,
    },
    /// The text is not valid JSON, or its top-level value is not an object.
    #[error("malformed document: {0}")]
    MalformedInput(String),
    /// A document could not be written as JSON.
    #[error("cannot encode document: {0}")]
    Encode(String),
    /// A path write would have to pass through a stored value that is not a
    /// document.
    #[error("cannot write through `{segment}`: found {found}")]
    PathBlocked {
        segment: String,
        found: &'static str,
    },
    /// Nesting exceeded the configured limit.
    #[error("nesting exceeds the depth limit of {limit}")]
    DepthLimitExceeded { limit: usize },
    /// A mapping failure, annotated with the field that caused it.
    #[error("field `{field}`: {source}")]
    Field {
        field: String,
        #[source]
        source: Box<DocumentError>,
    },
}

impl DocumentError {
    pub fn conversion(expected: &'static str, found: &'static str) -> Self {
        DocumentError::Conversion { expected, found }
    }

    /// Wrap this error with the name of the field being mapped.
    ///
    /// Nested failures produce a dotted chain, e.g. `field `address`: field `zip`: ...`.
    pub fn in_field(self, field: impl Into<String>) -> Self {
        DocumentError::Field {
            field: field.into(),
            source: Box::new(self),
        }
    }

    /// The innermost error, with field annotations stripped.
    pub fn root_cause(&self) -> &DocumentError {
        match self {
            DocumentError::Field { source, .. } => source.root_cause(),
            other => other,
        }
    }

    pub fn is_conversion(&self) -> bool {
        matches!(self.root_cause(), DocumentError::Conversion { .. })
    }

    pub fn is_malformed_input(&self) -> bool {
        matches!(self.root_cause(), DocumentError::MalformedInput(_))
    }
}
