//! Owned syntax nodes with attached doc metadata

use std::fmt;

use crate::doc::DocMetadata;
use crate::error::RewriteError;
use crate::location::Span;

/// Whether a string is a plain identifier: ASCII letter or underscore
/// followed by letters, digits, or underscores.
pub(crate) fn is_identifier(text: &str) -> bool {
    let mut chars = text.chars();
    match chars.next() {
        Some(c) if c.is_ascii_alphabetic() || c == '_' => {}
        _ => return false,
    }
    chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// Access level of a declaration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Visibility {
    Public,
    Protected,
    Private,
}

impl Visibility {
    pub fn as_str(&self) -> &'static str {
        match self {
            Visibility::Public => "public",
            Visibility::Protected => "protected",
            Visibility::Private => "private",
        }
    }

    /// Parse a visibility keyword, case-insensitively.
    pub fn parse(text: &str) -> Option<Visibility> {
        match text.to_ascii_lowercase().as_str() {
            "public" => Some(Visibility::Public),
            "protected" => Some(Visibility::Protected),
            "private" => Some(Visibility::Private),
            _ => None,
        }
    }
}

impl fmt::Display for Visibility {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Broad grammatical role of a node kind.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeCategory {
    Declaration,
    Expression,
    Statement,
}

/// A fully qualified type name: zero or more namespace segments and a
/// final type name, e.g. `Ramsey\Uuid\Uuid`.
///
/// References are validated on construction; a `TypeReference` always
/// holds at least one well-formed segment.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct TypeReference {
    segments: Vec<String>,
}

impl TypeReference {
    /// Parse a backslash-separated qualified name. A single leading
    /// backslash is accepted and dropped.
    pub fn parse(text: &str) -> Result<Self, RewriteError> {
        let trimmed = text.trim();
        let trimmed = trimmed.strip_prefix('\\').unwrap_or(trimmed);
        if trimmed.is_empty() {
            return Err(RewriteError::InvalidType(text.to_string()));
        }
        let segments: Vec<String> = trimmed.split('\\').map(str::to_string).collect();
        if segments.iter().any(|segment| !is_identifier(segment)) {
            return Err(RewriteError::InvalidType(text.to_string()));
        }
        Ok(TypeReference { segments })
    }

    /// The final segment: the type name itself.
    pub fn name(&self) -> &str {
        self.segments.last().map(String::as_str).unwrap_or_default()
    }

    /// The namespace segments, without the final name.
    pub fn namespace(&self) -> &[String] {
        match self.segments.split_last() {
            Some((_, namespace)) => namespace,
            None => &[],
        }
    }

    pub fn segments(&self) -> &[String] {
        &self.segments
    }
}

impl fmt::Display for TypeReference {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.segments.join("\\"))
    }
}

/// The kind of a syntax node, carrying the primitive data for the
/// construct. Child nodes live on [`SyntaxNode`], not here.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Class-like declaration; children are its members.
    Class { name: String },
    /// Property declaration.
    Property { name: String, visibility: Visibility },
    /// Method declaration; children are its body statements.
    Method { name: String, visibility: Visibility },
    /// Variable reference.
    Variable { name: String },
    /// Member access; the single child is the receiver expression.
    PropertyFetch { property: String },
    /// Static invocation `Type::method(...)`; children are the arguments.
    StaticCall { target: TypeReference, method: String },
    /// Assignment; children are exactly `[target, value]`.
    Assign,
    /// Verbatim literal text.
    Literal { text: String },
    /// Statement wrapping a single expression child.
    ExpressionStmt,
    /// Statement sequence.
    Block,
}

impl NodeKind {
    pub fn category(&self) -> NodeCategory {
        match self {
            NodeKind::Class { .. } | NodeKind::Property { .. } | NodeKind::Method { .. } => {
                NodeCategory::Declaration
            }
            NodeKind::Variable { .. }
            | NodeKind::PropertyFetch { .. }
            | NodeKind::StaticCall { .. }
            | NodeKind::Assign
            | NodeKind::Literal { .. } => NodeCategory::Expression,
            NodeKind::ExpressionStmt | NodeKind::Block => NodeCategory::Statement,
        }
    }

    /// Short label for diagnostics.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Class { .. } => "Class",
            NodeKind::Property { .. } => "Property",
            NodeKind::Method { .. } => "Method",
            NodeKind::Variable { .. } => "Variable",
            NodeKind::PropertyFetch { .. } => "PropertyFetch",
            NodeKind::StaticCall { .. } => "StaticCall",
            NodeKind::Assign => "Assign",
            NodeKind::Literal { .. } => "Literal",
            NodeKind::ExpressionStmt => "ExpressionStmt",
            NodeKind::Block => "Block",
        }
    }

    /// The identifier a human would use to name this node, if it has
    /// one.
    pub fn identifier(&self) -> Option<&str> {
        match self {
            NodeKind::Class { name }
            | NodeKind::Property { name, .. }
            | NodeKind::Method { name, .. }
            | NodeKind::Variable { name } => Some(name),
            NodeKind::PropertyFetch { property } => Some(property),
            NodeKind::StaticCall { method, .. } => Some(method),
            _ => None,
        }
    }
}

/// An owned node in a syntax tree.
///
/// Trees are strictly acyclic: every node owns its children outright, and
/// children are only ever replaced as a whole list. Equality is deep
/// structural equality over kind, children, and doc metadata, which is
/// what idempotence checks compare.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SyntaxNode {
    kind: NodeKind,
    children: Vec<SyntaxNode>,
    doc: Option<DocMetadata>,
    span: Option<Span>,
}

impl SyntaxNode {
    pub fn new(kind: NodeKind) -> Self {
        SyntaxNode {
            kind,
            children: Vec::new(),
            doc: None,
            span: None,
        }
    }

    pub fn with_children(mut self, children: Vec<SyntaxNode>) -> Self {
        self.children = children;
        self
    }

    pub fn with_doc(mut self, doc: DocMetadata) -> Self {
        self.doc = Some(doc);
        self
    }

    pub fn with_span(mut self, span: Span) -> Self {
        self.span = Some(span);
        self
    }

    pub fn kind(&self) -> &NodeKind {
        &self.kind
    }

    pub fn category(&self) -> NodeCategory {
        self.kind.category()
    }

    pub fn children(&self) -> &[SyntaxNode] {
        &self.children
    }

    pub fn child(&self, index: usize) -> Option<&SyntaxNode> {
        self.children.get(index)
    }

    /// Take ownership of the child list, leaving it empty. Pair with
    /// [`SyntaxNode::replace_children`] when rebuilding a node.
    pub fn take_children(&mut self) -> Vec<SyntaxNode> {
        std::mem::take(&mut self.children)
    }

    /// Replace the child list wholesale. There is no per-index child
    /// mutation.
    pub fn replace_children(&mut self, children: Vec<SyntaxNode>) {
        self.children = children;
    }

    /// Doc metadata, if any was attached. A node without metadata behaves
    /// as if it carried an empty tag sequence.
    pub fn doc(&self) -> Option<&DocMetadata> {
        self.doc.as_ref()
    }

    pub fn doc_mut(&mut self) -> Option<&mut DocMetadata> {
        self.doc.as_mut()
    }

    /// Doc metadata, attaching an empty sequence first if the node had
    /// none.
    pub fn ensure_doc(&mut self) -> &mut DocMetadata {
        self.doc.get_or_insert_with(DocMetadata::new)
    }

    /// Replace the doc metadata wholesale.
    pub fn set_doc(&mut self, doc: DocMetadata) {
        self.doc = Some(doc);
    }

    pub fn span(&self) -> Option<Span> {
        self.span
    }

    /// One-line summary for reports: label, identifier, and span when
    /// present, e.g. `Property(uuid) @ 12..40`.
    pub fn describe(&self) -> String {
        let mut out = match self.kind.identifier() {
            Some(name) => format!("{}({})", self.kind.label(), name),
            None => self.kind.label().to_string(),
        };
        if let Some(span) = self.span {
            out.push_str(&format!(" @ {span}"));
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::doc::Tag;

    // ==================== Identifiers ====================

    #[test]
    fn test_identifiers_accept_letters_digits_underscores() {
        assert!(is_identifier("uuid"));
        assert!(is_identifier("_construct"));
        assert!(is_identifier("legacyId2"));
    }

    #[test]
    fn test_identifiers_reject_leading_digits_and_symbols() {
        assert!(!is_identifier(""));
        assert!(!is_identifier("9lives"));
        assert!(!is_identifier("foo-bar"));
        assert!(!is_identifier("foo bar"));
        assert!(!is_identifier("foo\\bar"));
    }

    // ==================== Visibility ====================

    #[test]
    fn test_visibility_parses_case_insensitively() {
        assert_eq!(Visibility::parse("private"), Some(Visibility::Private));
        assert_eq!(Visibility::parse("Protected"), Some(Visibility::Protected));
        assert_eq!(Visibility::parse("PUBLIC"), Some(Visibility::Public));
        assert_eq!(Visibility::parse("internal"), None);
    }

    #[test]
    fn test_visibility_displays_as_keyword() {
        assert_eq!(Visibility::Private.to_string(), "private");
    }

    // ==================== TypeReference ====================

    #[test]
    fn test_type_reference_parses_qualified_names() {
        let uuid = TypeReference::parse("Ramsey\\Uuid\\Uuid").unwrap();
        assert_eq!(uuid.name(), "Uuid");
        assert_eq!(uuid.namespace(), &["Ramsey".to_string(), "Uuid".to_string()]);
        assert_eq!(uuid.to_string(), "Ramsey\\Uuid\\Uuid");
    }

    #[test]
    fn test_type_reference_accepts_leading_backslash() {
        let uuid = TypeReference::parse("\\Ramsey\\Uuid\\Uuid").unwrap();
        assert_eq!(uuid.to_string(), "Ramsey\\Uuid\\Uuid");
    }

    #[test]
    fn test_type_reference_parses_bare_names() {
        let local = TypeReference::parse("UuidInterface").unwrap();
        assert_eq!(local.name(), "UuidInterface");
        assert!(local.namespace().is_empty());
    }

    #[test]
    fn test_type_reference_rejects_malformed_names() {
        assert!(matches!(
            TypeReference::parse(""),
            Err(RewriteError::InvalidType(_))
        ));
        assert!(matches!(
            TypeReference::parse("Ramsey\\\\Uuid"),
            Err(RewriteError::InvalidType(_))
        ));
        assert!(matches!(
            TypeReference::parse("Ramsey\\9Uuid"),
            Err(RewriteError::InvalidType(_))
        ));
        assert!(matches!(
            TypeReference::parse("Ramsey\\Uuid\\"),
            Err(RewriteError::InvalidType(_))
        ));
    }

    // ==================== Categories ====================

    #[test]
    fn test_kinds_report_their_category() {
        let target = TypeReference::parse("Uuid").unwrap();
        assert_eq!(
            NodeKind::Class { name: "Product".into() }.category(),
            NodeCategory::Declaration
        );
        assert_eq!(
            NodeKind::StaticCall { target, method: "uuid4".into() }.category(),
            NodeCategory::Expression
        );
        assert_eq!(NodeKind::ExpressionStmt.category(), NodeCategory::Statement);
    }

    // ==================== SyntaxNode ====================

    #[test]
    fn test_new_nodes_have_no_children_doc_or_span() {
        let node = SyntaxNode::new(NodeKind::Block);
        assert!(node.children().is_empty());
        assert!(node.doc().is_none());
        assert!(node.span().is_none());
    }

    #[test]
    fn test_children_are_replaced_as_a_whole() {
        let mut node = SyntaxNode::new(NodeKind::Block).with_children(vec![
            SyntaxNode::new(NodeKind::ExpressionStmt),
        ]);
        let taken = node.take_children();
        assert_eq!(taken.len(), 1);
        assert!(node.children().is_empty());

        node.replace_children(vec![
            SyntaxNode::new(NodeKind::ExpressionStmt),
            SyntaxNode::new(NodeKind::ExpressionStmt),
        ]);
        assert_eq!(node.children().len(), 2);
    }

    #[test]
    fn test_ensure_doc_attaches_empty_metadata_once() {
        let mut node = SyntaxNode::new(NodeKind::Property {
            name: "uuid".into(),
            visibility: Visibility::Private,
        });
        node.ensure_doc().push(Tag::new("var", "UuidInterface|null"));
        node.ensure_doc().push(Tag::named("internal"));

        let doc = node.doc().unwrap();
        assert_eq!(doc.len(), 2);
        assert_eq!(doc.tags()[0].name(), "var");
    }

    #[test]
    fn test_equality_is_deep() {
        let make = || {
            SyntaxNode::new(NodeKind::Class { name: "Product".into() }).with_children(vec![
                SyntaxNode::new(NodeKind::Property {
                    name: "uuid".into(),
                    visibility: Visibility::Private,
                })
                .with_doc(DocMetadata::from_iter([Tag::new("var", "UuidInterface|null")])),
            ])
        };
        assert_eq!(make(), make());

        let mut other = make();
        other.replace_children(Vec::new());
        assert_ne!(make(), other);
    }

    #[test]
    fn test_describe_shows_identifier_and_span() {
        let node = SyntaxNode::new(NodeKind::Property {
            name: "uuid".into(),
            visibility: Visibility::Private,
        })
        .with_span(Span::new(12, 40));
        assert_eq!(node.describe(), "Property(uuid) @ 12..40");

        let bare = SyntaxNode::new(NodeKind::Assign);
        assert_eq!(bare.describe(), "Assign");
    }
}
