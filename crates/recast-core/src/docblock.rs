//! Tag-level rewriting of a node's doc metadata

use std::borrow::Cow;

use crate::doc::{Tag, TagPattern};
use crate::error::RewriteError;
use crate::node::SyntaxNode;

/// Adds, removes, and rewrites tags on a node's doc metadata.
///
/// This is a generic tag engine: it never interprets tag semantics, it
/// only moves the tags the caller hands it. Callers own questions like
/// "should this tag be unique".
#[derive(Debug, Default, Clone, Copy)]
pub struct DocBlockRewriter;

impl DocBlockRewriter {
    pub fn new() -> Self {
        DocBlockRewriter
    }

    /// Append a tag to the node's metadata, attaching an empty sequence
    /// first if the node had none. Duplicate names are allowed.
    pub fn add_tag(&self, node: &mut SyntaxNode, tag: Tag) {
        node.ensure_doc().push(tag);
    }

    /// Remove every tag matching the pattern and return how many were
    /// removed. Survivors keep their relative order. A node without
    /// metadata, or without matching tags, is left untouched.
    pub fn remove_tags_matching(&self, node: &mut SyntaxNode, pattern: &TagPattern) -> usize {
        let Some(doc) = node.doc_mut() else {
            return 0;
        };
        let before = doc.len();
        doc.tags_mut().retain(|tag| !pattern.matches(tag));
        before - doc.len()
    }

    /// Substitute `replacement` for the pattern's body expression inside
    /// every tag whose name matches, and return how many tag bodies
    /// changed. Capture-group references such as `${1}` are expanded.
    ///
    /// The pattern must carry a body expression; a name-only pattern has
    /// nothing to replace and fails with `InvalidPattern`.
    pub fn replace_in_tag_body(
        &self,
        node: &mut SyntaxNode,
        pattern: &TagPattern,
        replacement: &str,
    ) -> Result<usize, RewriteError> {
        let Some(body_regex) = pattern.body_regex() else {
            return Err(RewriteError::InvalidPattern {
                pattern: pattern.source().to_string(),
                message: "pattern has no body expression to replace".to_string(),
            });
        };

        let Some(doc) = node.doc_mut() else {
            return Ok(0);
        };

        let mut changed = 0;
        for tag in doc.tags_mut() {
            if !pattern.name_matches(tag.name()) {
                continue;
            }
            let rewritten = match body_regex.replace_all(tag.body(), replacement) {
                Cow::Borrowed(_) => continue,
                Cow::Owned(body) => body,
            };
            if rewritten != tag.body() {
                tag.set_body(rewritten);
                changed += 1;
            }
        }
        Ok(changed)
    }
}
