//! Structured doc metadata: ordered tag sequences and tag patterns

use std::fmt;

use regex::Regex;

use crate::error::RewriteError;

/// One annotation attached to a declaration: a name such as `var` or
/// `ORM\Column` and a free-form body.
///
/// Names and bodies are data, not identifiers; nothing here validates
/// them. The body may span multiple lines.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Tag {
    name: String,
    body: String,
}

impl Tag {
    pub fn new(name: impl Into<String>, body: impl Into<String>) -> Self {
        Tag {
            name: name.into(),
            body: body.into(),
        }
    }

    /// A tag with an empty body, e.g. `@ORM\Id`.
    pub fn named(name: impl Into<String>) -> Self {
        Tag::new(name, "")
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn body(&self) -> &str {
        &self.body
    }

    pub(crate) fn set_body(&mut self, body: String) {
        self.body = body;
    }
}

impl fmt::Display for Tag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.body.is_empty() {
            write!(f, "@{}", self.name)
        } else {
            write!(f, "@{} {}", self.name, self.body)
        }
    }
}

/// The ordered tag sequence attached to a syntax node.
///
/// Order is preserved exactly: removals keep the relative order of the
/// survivors, and additions append. Duplicate names are allowed.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DocMetadata {
    tags: Vec<Tag>,
}

impl DocMetadata {
    pub fn new() -> Self {
        DocMetadata::default()
    }

    pub fn push(&mut self, tag: Tag) {
        self.tags.push(tag);
    }

    pub fn tags(&self) -> &[Tag] {
        &self.tags
    }

    pub(crate) fn tags_mut(&mut self) -> &mut Vec<Tag> {
        &mut self.tags
    }

    pub fn len(&self) -> usize {
        self.tags.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tags.is_empty()
    }

    /// First tag with the given name, if any.
    pub fn tag(&self, name: &str) -> Option<&Tag> {
        self.tags.iter().find(|tag| tag.name == name)
    }

    pub fn has_tag(&self, name: &str) -> bool {
        self.tag(name).is_some()
    }
}

impl FromIterator<Tag> for DocMetadata {
    fn from_iter<I: IntoIterator<Item = Tag>>(iter: I) -> Self {
        DocMetadata {
            tags: iter.into_iter().collect(),
        }
    }
}

impl<'a> IntoIterator for &'a DocMetadata {
    type Item = &'a Tag;
    type IntoIter = std::slice::Iter<'a, Tag>;

    fn into_iter(self) -> Self::IntoIter {
        self.tags.iter()
    }
}

/// A compiled matcher over tags.
///
/// The name expression must cover the whole tag name; `ORM(\\.*)?`
/// matches `ORM` and `ORM\Column` but not `XORM`. The optional body
/// expression is an unanchored search within the tag body. Both are
/// compiled eagerly so malformed expressions surface before any tree is
/// touched.
#[derive(Debug, Clone)]
pub struct TagPattern {
    source: String,
    name: Regex,
    body: Option<Regex>,
}

impl TagPattern {
    /// Pattern matching on the tag name alone.
    pub fn for_name(name_pattern: &str) -> Result<Self, RewriteError> {
        Ok(TagPattern {
            source: name_pattern.to_string(),
            name: compile_anchored(name_pattern)?,
            body: None,
        })
    }

    /// Pattern matching on the tag name and, within the same tag, the
    /// body.
    pub fn with_body(name_pattern: &str, body_pattern: &str) -> Result<Self, RewriteError> {
        Ok(TagPattern {
            source: name_pattern.to_string(),
            name: compile_anchored(name_pattern)?,
            body: Some(compile(body_pattern)?),
        })
    }

    /// The name expression as originally supplied.
    pub fn source(&self) -> &str {
        &self.source
    }

    /// Whether the tag name and body both satisfy this pattern. A
    /// pattern without a body expression matches on name alone.
    pub fn matches(&self, tag: &Tag) -> bool {
        if !self.name.is_match(tag.name()) {
            return false;
        }
        match &self.body {
            Some(body) => body.is_match(tag.body()),
            None => true,
        }
    }

    pub fn name_matches(&self, name: &str) -> bool {
        self.name.is_match(name)
    }

    /// The compiled body expression, if one was supplied.
    pub fn body_regex(&self) -> Option<&Regex> {
        self.body.as_ref()
    }
}

fn compile(pattern: &str) -> Result<Regex, RewriteError> {
    Regex::new(pattern).map_err(|err| RewriteError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

fn compile_anchored(pattern: &str) -> Result<Regex, RewriteError> {
    Regex::new(&format!("^(?:{pattern})$")).map_err(|err| RewriteError::InvalidPattern {
        pattern: pattern.to_string(),
        message: err.to_string(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    // ==================== Tags ====================

    #[test]
    fn test_tags_display_with_at_prefix() {
        assert_eq!(Tag::new("var", "UuidInterface|null").to_string(), "@var UuidInterface|null");
        assert_eq!(Tag::named("ORM\\Id").to_string(), "@ORM\\Id");
    }

    #[test]
    fn test_metadata_preserves_insertion_order() {
        let mut doc = DocMetadata::new();
        doc.push(Tag::new("var", "int"));
        doc.push(Tag::named("ORM\\Id"));
        doc.push(Tag::new("ORM\\Column", "(type=\"integer\")"));

        let names: Vec<&str> = doc.tags().iter().map(Tag::name).collect();
        assert_eq!(names, ["var", "ORM\\Id", "ORM\\Column"]);
    }

    #[test]
    fn test_metadata_allows_duplicate_names() {
        let doc: DocMetadata =
            [Tag::new("param", "first"), Tag::new("param", "second")].into_iter().collect();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tag("param").unwrap().body(), "first");
    }

    // ==================== Name matching ====================

    #[test]
    fn test_name_pattern_covers_the_whole_name() {
        let pattern = TagPattern::for_name("var").unwrap();
        assert!(pattern.matches(&Tag::new("var", "int")));
        assert!(!pattern.matches(&Tag::new("variable", "int")));
        assert!(!pattern.matches(&Tag::new("v", "int")));
    }

    #[test]
    fn test_name_pattern_matches_namespaced_prefixes() {
        let pattern = TagPattern::for_name("ORM(\\\\.*)?").unwrap();
        assert!(pattern.matches(&Tag::named("ORM")));
        assert!(pattern.matches(&Tag::named("ORM\\Id")));
        assert!(pattern.matches(&Tag::new("ORM\\Column", "(type=\"integer\")")));
        assert!(!pattern.matches(&Tag::named("XORM")));
        assert!(!pattern.matches(&Tag::named("ORMX")));
    }

    #[test]
    fn test_name_pattern_supports_alternation() {
        let pattern = TagPattern::for_name("var|ORM(\\\\.*)?").unwrap();
        assert!(pattern.matches(&Tag::new("var", "int")));
        assert!(pattern.matches(&Tag::named("ORM\\Id")));
        assert!(!pattern.matches(&Tag::new("Serializer\\Type", "(\"int\")")));
    }

    // ==================== Body matching ====================

    #[test]
    fn test_body_pattern_is_an_unanchored_search() {
        let pattern = TagPattern::with_body("var", "Uuid").unwrap();
        assert!(pattern.matches(&Tag::new("var", "UuidInterface|null")));
        assert!(!pattern.matches(&Tag::new("var", "int")));
    }

    #[test]
    fn test_body_pattern_requires_the_same_tag_to_match_both() {
        let pattern = TagPattern::with_body("var", "Uuid").unwrap();
        assert!(!pattern.matches(&Tag::new("return", "UuidInterface")));
    }

    // ==================== Compilation ====================

    #[test]
    fn test_malformed_name_pattern_is_rejected_eagerly() {
        let err = TagPattern::for_name("ORM(").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_malformed_body_pattern_is_rejected_eagerly() {
        let err = TagPattern::with_body("var", "[").unwrap_err();
        assert!(matches!(err, RewriteError::InvalidPattern { .. }));
    }

    #[test]
    fn test_source_returns_the_original_expression() {
        let pattern = TagPattern::for_name("var|type").unwrap();
        assert_eq!(pattern.source(), "var|type");
    }
}
