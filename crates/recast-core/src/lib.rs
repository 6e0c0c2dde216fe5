//! recast-core: building blocks for source-to-source tree rewriting
//!
//! This crate provides:
//! - `SyntaxNode` / `NodeKind`: owned, acyclic syntax trees with attached
//!   doc metadata and optional source spans
//! - `Tag` / `DocMetadata` / `TagPattern`: structured annotations and
//!   compiled matchers over them
//! - `NodeBuilder` / `TypeReference`: validated, pure constructors for
//!   composite fragments
//! - `DocBlockRewriter`: add, remove, and rewrite tags on a node
//! - `walk` / `find`: depth-first traversal with pruning
//! - `render`: canonical text rendering for diagnostics and goldens
//!
//! Parsing source text into trees, and turning rewritten trees back into
//! concrete source, belong to the callers on either side of this crate.

pub mod builder;
pub mod doc;
pub mod docblock;
pub mod error;
pub mod location;
pub mod node;
pub mod printer;
pub mod visitor;

pub use builder::NodeBuilder;
pub use doc::{DocMetadata, Tag, TagPattern};
pub use docblock::DocBlockRewriter;
pub use error::RewriteError;
pub use location::{NodePath, Span};
pub use node::{NodeCategory, NodeKind, SyntaxNode, TypeReference, Visibility};
pub use printer::render;
pub use visitor::{find, walk};
