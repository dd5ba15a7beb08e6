//! Logic behind the `doc-field` and `doc-merge` binaries.
//!
//! - `doc-field` prints one field of a JSON document read from stdin
//! - `doc-merge` merges two JSON documents and prints the result

use std::str::FromStr;

use arango_document_path::{validate_field_path, PathError};
use thiserror::Error;
use tracing_subscriber::EnvFilter;

use crate::coerce::{Depth, FromValue};
use crate::codec::deserialize;
use crate::error::DocumentError;
use crate::merge::MergePolicy;
use crate::value::Value;

#[derive(Debug, Error)]
pub enum CliError {
    #[error(transparent)]
    Document(#[from] DocumentError),
    #[error(transparent)]
    Io(#[from] std::io::Error),
    #[error(transparent)]
    Path(#[from] PathError),
    #[error("{0}")]
    Usage(String),
    #[error("no field at `{0}`")]
    NotFound(String),
}

/// Output format of `doc-field`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum FieldFormat {
    /// The stored value as JSON.
    #[default]
    Json,
    String,
    Int,
    Float,
    Bool,
}

impl FromStr for FieldFormat {
    type Err = CliError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "json" => Ok(FieldFormat::Json),
            "string" | "str" => Ok(FieldFormat::String),
            "int" | "integer" => Ok(FieldFormat::Int),
            "float" | "double" => Ok(FieldFormat::Float),
            "bool" | "boolean" => Ok(FieldFormat::Bool),
            other => Err(CliError::Usage(format!("unknown format: {other}"))),
        }
    }
}

/// Install a stderr subscriber filtered by `RUST_LOG` (default `warn`).
pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

// ── doc-field ─────────────────────────────────────────────────────────────

/// Look up `path` in a JSON document and render it in `format`.
pub fn lookup_field(json: &str, path: &str, format: FieldFormat) -> Result<String, CliError> {
    validate_field_path(path)?;
    let doc = deserialize(json)?;
    let value = doc
        .get(path)
        .ok_or_else(|| CliError::NotFound(path.to_string()))?;
    let depth = Depth::default();
    let rendered = match format {
        FieldFormat::Json => render_json(value)?,
        FieldFormat::String => String::from_value(value, depth)?,
        FieldFormat::Int => i64::from_value(value, depth)?.to_string(),
        FieldFormat::Float => f64::from_value(value, depth)?.to_string(),
        FieldFormat::Bool => bool::from_value(value, depth)?.to_string(),
    };
    Ok(rendered)
}

fn render_json(value: &Value) -> Result<String, DocumentError> {
    serde_json::to_string(value).map_err(|err| DocumentError::Encode(err.to_string()))
}

// ── doc-merge ─────────────────────────────────────────────────────────────

/// Merge `source_json` into `target_json` and return the merged document.
pub fn merge_documents(
    target_json: &str,
    source_json: &str,
    policy: MergePolicy,
) -> Result<String, CliError> {
    let mut target = deserialize(target_json)?;
    let source = deserialize(source_json)?;
    target.merge(&source, policy);
    Ok(target.to_json_string()?)
}
