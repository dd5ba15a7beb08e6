//! Shallow merging of one document into another.

use tracing::debug;

use crate::document::Document;

/// How [`merge`] treats keys present in both documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum MergePolicy {
    /// Add keys the target lacks; keep the target's value for shared keys.
    #[default]
    MergeFields,
    /// Add keys the target lacks; overwrite shared keys with the source value.
    ReplaceFields,
}

/// Top-level keys touched by a [`merge`], in source order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MergeReport {
    pub added: Vec<String>,
    pub replaced: Vec<String>,
    pub kept: Vec<String>,
}

impl MergeReport {
    /// Whether the target was modified.
    pub fn changed(&self) -> bool {
        !self.added.is_empty() || !self.replaced.is_empty()
    }
}

/// Merge the top-level fields of `source` into `target`.
///
/// Nested documents are not merged recursively: a shared key is either kept
/// or replaced as a whole. New keys are appended in source order and replaced
/// keys keep their position.
///
/// # Example
///
/// ```
/// use arango_document::{merge, Document, MergePolicy};
///
/// let mut target: Document = r#"{"x":1,"y":2}"#.parse().unwrap();
/// let source: Document = r#"{"y":99,"z":3}"#.parse().unwrap();
///
/// let report = merge(&mut target, &source, MergePolicy::ReplaceFields);
/// assert_eq!(target.to_string(), r#"{"x":1,"y":99,"z":3}"#);
/// assert_eq!(report.replaced, vec!["y"]);
/// ```
pub fn merge(target: &mut Document, source: &Document, policy: MergePolicy) -> MergeReport {
    let mut report = MergeReport::default();
    for (key, value) in source {
        match target.fields.get_mut(key) {
            None => {
                target.fields.insert(key.clone(), value.clone());
                report.added.push(key.clone());
            }
            Some(slot) if policy == MergePolicy::ReplaceFields => {
                *slot = value.clone();
                report.replaced.push(key.clone());
            }
            Some(_) => report.kept.push(key.clone()),
        }
    }
    debug!(
        ?policy,
        added = report.added.len(),
        replaced = report.replaced.len(),
        kept = report.kept.len(),
        "merged document"
    );
    report
}

impl Document {
    /// Merge `source` into `self`, see [`merge`].
    pub fn merge(&mut self, source: &Document, policy: MergePolicy) -> MergeReport {
        merge(self, source, policy)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::value::Value;

    fn pair() -> (Document, Document) {
        let target = [("x", 1), ("y", 2)].into_iter().collect();
        let source = [("y", 99), ("z", 3)].into_iter().collect();
        (target, source)
    }

    #[test]
    fn test_merge_fields_keeps_target() {
        let (mut target, source) = pair();
        let report = target.merge(&source, MergePolicy::MergeFields);

        assert_eq!(target.to_string(), r#"{"x":1,"y":2,"z":3}"#);
        assert_eq!(report.added, vec!["z"]);
        assert_eq!(report.kept, vec!["y"]);
        assert!(report.replaced.is_empty());
        assert!(report.changed());
    }

    #[test]
    fn test_replace_fields_overwrites_in_place() {
        let (mut target, source) = pair();
        let report = target.merge(&source, MergePolicy::ReplaceFields);

        assert_eq!(target.to_string(), r#"{"x":1,"y":99,"z":3}"#);
        assert_eq!(report.replaced, vec!["y"]);
    }

    #[test]
    fn test_merge_is_shallow() {
        let mut target = Document::new();
        target.set_field("a.left", 1);
        let mut source = Document::new();
        source.set_field("a.right", 2);

        target.merge(&source, MergePolicy::MergeFields);
        assert!(!target.has_field("a.right"));

        target.merge(&source, MergePolicy::ReplaceFields);
        assert!(!target.has_field("a.left"));
        assert_eq!(target.get("a.right"), Some(&Value::Integer(2)));
    }

    #[test]
    fn test_merge_empty_source_is_noop() {
        let (mut target, _) = pair();
        let before = target.clone();
        let report = target.merge(&Document::new(), MergePolicy::ReplaceFields);
        assert!(!report.changed());
        assert_eq!(target, before);
    }
}
