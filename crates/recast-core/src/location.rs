//! Source spans and tree addresses

use std::fmt;

/// Byte range in the source text a node was parsed from.
///
/// Spans are attached by whatever front end produced the tree and are
/// carried through rewrites untouched. Synthesized nodes have no span.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Span {
    pub start: usize,
    pub end: usize,
}

impl Span {
    pub fn new(start: usize, end: usize) -> Self {
        Span { start, end }
    }

    pub fn len(&self) -> usize {
        self.end.saturating_sub(self.start)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl fmt::Display for Span {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}..{}", self.start, self.end)
    }
}

/// Address of a node within a tree: the child indices walked from the
/// root to reach it.
///
/// Paths are stable only for the tree they were produced from; a rewrite
/// that inserts or removes children invalidates paths below the change.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub struct NodePath {
    indices: Vec<usize>,
}

impl NodePath {
    /// The address of the root node itself.
    pub fn root() -> Self {
        NodePath::default()
    }

    /// The address of the `index`-th child of the node at this path.
    pub fn child(&self, index: usize) -> Self {
        let mut indices = self.indices.clone();
        indices.push(index);
        NodePath { indices }
    }

    pub fn indices(&self) -> &[usize] {
        &self.indices
    }

    pub fn is_root(&self) -> bool {
        self.indices.is_empty()
    }

    pub fn depth(&self) -> usize {
        self.indices.len()
    }
}

impl fmt::Display for NodePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "root")?;
        for index in &self.indices {
            write!(f, ".{index}")?;
        }
        Ok(())
    }
}
