use crate::types::Terminal;
use crate::PathError;

/// Segment separator for field paths.
pub const SEPARATOR: char = '.';

/// Iterate over the segments of a field path without allocating.
pub fn segments(path: &str) -> std::str::Split<'_, char> {
    path.split(SEPARATOR)
}

/// Parse a dotted field path into owned segments.
pub fn parse_field_path(path: &str) -> Vec<String> {
    segments(path).map(str::to_owned).collect()
}

/// Format segments back into a dotted field path.
pub fn format_field_path<S: AsRef<str>>(path: &[S]) -> String {
    let mut out = String::new();
    for (i, step) in path.iter().enumerate() {
        if i > 0 {
            out.push(SEPARATOR);
        }
        out.push_str(step.as_ref());
    }
    out
}

/// Split a path into the segments leading to its container and the terminal key.
pub fn split_terminal(path: &str) -> Terminal<'_> {
    match path.rsplit_once(SEPARATOR) {
        Some((head, key)) => Terminal {
            parent: segments(head).collect(),
            key,
        },
        None => Terminal {
            parent: Vec::new(),
            key: path,
        },
    }
}

/// Whether the path addresses a nested field (contains a separator).
pub fn is_nested(path: &str) -> bool {
    path.contains(SEPARATOR)
}

/// Check if a parsed path is the root (no segments).
pub fn is_root<S: AsRef<str>>(path: &[S]) -> bool {
    path.is_empty()
}

/// Check if `parent` strictly contains `child`.
pub fn is_child<S: AsRef<str>>(parent: &[S], child: &[S]) -> bool {
    if parent.len() >= child.len() {
        return false;
    }
    parent
        .iter()
        .zip(child.iter())
        .all(|(p, c)| p.as_ref() == c.as_ref())
}

/// Check if two parsed paths are equal.
pub fn is_path_equal<S: AsRef<str>>(p1: &[S], p2: &[S]) -> bool {
    p1.len() == p2.len() && p1.iter().zip(p2).all(|(a, b)| a.as_ref() == b.as_ref())
}

/// Get the parent of a parsed path.
pub fn parent<S: AsRef<str>>(path: &[S]) -> Result<Vec<String>, PathError> {
    if path.is_empty() {
        return Err(PathError::NoParent);
    }
    Ok(path[..path.len() - 1]
        .iter()
        .map(|s| s.as_ref().to_owned())
        .collect())
}
