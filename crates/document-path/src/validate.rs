//! Validation for dotted field paths.
//!
//! The document accessors are lenient and accept any string. These checks are
//! for callers that build paths from untrusted input and want to reject
//! obviously broken ones up front.

use crate::util::segments;
use crate::PathError;

/// Maximum allowed path string length.
const MAX_PATH_STRING_LENGTH: usize = 1024;

/// Maximum allowed number of segments.
const MAX_PATH_DEPTH: usize = 128;

/// Validate a dotted field path.
///
/// # Errors
///
/// - [`PathError::Empty`] for the empty string
/// - [`PathError::PathTooLong`] if longer than 1024 bytes
/// - [`PathError::TooDeep`] if it has more than 128 segments
/// - [`PathError::EmptySegment`] for leading, trailing or doubled dots
///
/// # Example
///
/// ```
/// use arango_document_path::validate_field_path;
///
/// validate_field_path("a.b.c").unwrap();
/// validate_field_path("a..c").unwrap_err();
/// validate_field_path("").unwrap_err();
/// ```
pub fn validate_field_path(path: &str) -> Result<(), PathError> {
    if path.is_empty() {
        return Err(PathError::Empty);
    }
    if path.len() > MAX_PATH_STRING_LENGTH {
        return Err(PathError::PathTooLong);
    }
    let mut depth = 0;
    for (index, step) in segments(path).enumerate() {
        if step.is_empty() {
            return Err(PathError::EmptySegment { index });
        }
        depth += 1;
    }
    if depth > MAX_PATH_DEPTH {
        return Err(PathError::TooDeep);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_simple_paths() {
        assert!(validate_field_path("name").is_ok());
        assert!(validate_field_path("a.b").is_ok());
        assert!(validate_field_path("_key").is_ok());
    }

    #[test]
    fn test_validate_empty_segments() {
        assert_eq!(
            validate_field_path(".a"),
            Err(PathError::EmptySegment { index: 0 })
        );
        assert_eq!(
            validate_field_path("a."),
            Err(PathError::EmptySegment { index: 1 })
        );
        assert_eq!(
            validate_field_path("a..b"),
            Err(PathError::EmptySegment { index: 1 })
        );
    }

    #[test]
    fn test_validate_long_path() {
        let long = "a".repeat(2000);
        assert_eq!(validate_field_path(&long), Err(PathError::PathTooLong));
    }

    #[test]
    fn test_validate_deep_path() {
        let deep = vec!["x"; 200].join(".");
        assert_eq!(validate_field_path(&deep), Err(PathError::TooDeep));

        let max = vec!["x"; 128].join(".");
        assert!(validate_field_path(&max).is_ok());
    }
}
