//! Pure constructors for well-formed syntax fragments

use crate::error::RewriteError;
use crate::node::{is_identifier, NodeKind, SyntaxNode, TypeReference, Visibility};

/// Builds composite nodes from primitive inputs, validating the inputs
/// up front.
///
/// Every operation is pure: nothing already built is mutated, and the
/// same inputs always produce the same node, so a fragment can be built
/// once and cloned or rebuilt per call site with identical results.
#[derive(Debug, Default, Clone, Copy)]
pub struct NodeBuilder;

impl NodeBuilder {
    pub fn new() -> Self {
        NodeBuilder
    }

    /// Property declaration with no doc metadata attached.
    pub fn build_property(
        &self,
        name: &str,
        visibility: Visibility,
    ) -> Result<SyntaxNode, RewriteError> {
        self.check_identifier(name)?;
        Ok(SyntaxNode::new(NodeKind::Property {
            name: name.to_string(),
            visibility,
        }))
    }

    /// Class declaration with no members.
    pub fn build_class(&self, name: &str) -> Result<SyntaxNode, RewriteError> {
        self.check_identifier(name)?;
        Ok(SyntaxNode::new(NodeKind::Class {
            name: name.to_string(),
        }))
    }

    /// Method declaration with an empty body.
    pub fn build_method(
        &self,
        name: &str,
        visibility: Visibility,
    ) -> Result<SyntaxNode, RewriteError> {
        self.check_identifier(name)?;
        Ok(SyntaxNode::new(NodeKind::Method {
            name: name.to_string(),
            visibility,
        }))
    }

    pub fn build_variable(&self, name: &str) -> Result<SyntaxNode, RewriteError> {
        self.check_identifier(name)?;
        Ok(SyntaxNode::new(NodeKind::Variable {
            name: name.to_string(),
        }))
    }

    /// Member access `object.property`.
    pub fn build_property_fetch(
        &self,
        object: SyntaxNode,
        property: &str,
    ) -> Result<SyntaxNode, RewriteError> {
        self.check_identifier(property)?;
        Ok(SyntaxNode::new(NodeKind::PropertyFetch {
            property: property.to_string(),
        })
        .with_children(vec![object]))
    }

    /// Verbatim literal.
    pub fn build_literal(&self, text: &str) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Literal {
            text: text.to_string(),
        })
    }

    /// Static invocation `Type::method(args...)`.
    pub fn build_static_call(
        &self,
        target: &TypeReference,
        method: &str,
        args: Vec<SyntaxNode>,
    ) -> Result<SyntaxNode, RewriteError> {
        self.check_identifier(method)?;
        Ok(SyntaxNode::new(NodeKind::StaticCall {
            target: target.clone(),
            method: method.to_string(),
        })
        .with_children(args))
    }

    /// Assignment statement `target = value;`.
    ///
    /// The target path is a dot-separated lvalue path such as `this.uuid`
    /// or `counter`: the first segment names a variable, each further
    /// segment a property fetched from it. A path that does not resolve
    /// to an assignable location fails with `InvalidTarget`.
    pub fn build_assignment(
        &self,
        target_path: &str,
        value: SyntaxNode,
    ) -> Result<SyntaxNode, RewriteError> {
        let target = self.resolve_target(target_path)?;
        let assign = SyntaxNode::new(NodeKind::Assign).with_children(vec![target, value]);
        Ok(SyntaxNode::new(NodeKind::ExpressionStmt).with_children(vec![assign]))
    }

    fn resolve_target(&self, path: &str) -> Result<SyntaxNode, RewriteError> {
        let invalid = |reason: &str| RewriteError::InvalidTarget {
            path: path.to_string(),
            reason: reason.to_string(),
        };

        let trimmed = path.trim();
        if trimmed.is_empty() {
            return Err(invalid("empty target path"));
        }

        let mut segments = trimmed.split('.');
        let head = segments.next().unwrap_or_default();
        if !is_identifier(head) {
            return Err(invalid("first segment must be a variable name"));
        }

        let mut target = SyntaxNode::new(NodeKind::Variable {
            name: head.to_string(),
        });
        for segment in segments {
            if !is_identifier(segment) {
                return Err(invalid("path segment is not an identifier"));
            }
            target = SyntaxNode::new(NodeKind::PropertyFetch {
                property: segment.to_string(),
            })
            .with_children(vec![target]);
        }
        Ok(target)
    }

    fn check_identifier(&self, name: &str) -> Result<(), RewriteError> {
        if is_identifier(name) {
            Ok(())
        } else {
            Err(RewriteError::InvalidIdentifier(name.to_string()))
        }
    }
}
