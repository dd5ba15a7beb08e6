//! Type definitions for dotted field paths.

/// A single segment of a field path (one object key).
pub type PathStep = String;

/// A parsed field path.
pub type FieldPath = Vec<PathStep>;

/// A path split into the container that holds the terminal key and the key
/// itself.
///
/// `"a.b.c"` splits into parent `["a", "b"]` and key `"c"`; a path without a
/// dot has an empty parent and addresses a top-level key.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Terminal<'a> {
    /// Segments leading to the container of the terminal key.
    pub parent: Vec<&'a str>,
    /// The terminal key.
    pub key: &'a str,
}

impl<'a> Terminal<'a> {
    /// Whether the terminal key lives directly at the top level.
    pub fn is_top_level(&self) -> bool {
        self.parent.is_empty()
    }
}
