//! recast-rules: configurable rewrite rules and the engine that runs them
//!
//! This crate provides:
//! - `Rule` / `RuleContext`: the interface a transformation implements
//! - `RuleRegistry`: name-to-factory mapping with option validation
//! - `RuleConfig` / `load_configs_from_file`: declarative YAML registration
//! - `RewriteEngine`: depth-first pass with per-node failure isolation
//!   and parallel batch rewriting
//! - `RewriteReport`: a serializable record of every rule decision
//! - `rules::*`: the built-in rules
//!
//! A typical driver loads a YAML config, builds the rules through the
//! registry, and hands trees to one engine:
//!
//! ```
//! use recast_core::{DocBlockRewriter, NodeBuilder, NodeKind, SyntaxNode};
//! use recast_rules::{load_configs_from_str, RewriteEngine, RuleRegistry};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let configs = load_configs_from_str(
//!     "rule: add_property\noptions:\n  class: Product\n  name: uuid",
//! )?;
//! let rules = RuleRegistry::new().build_all(&configs)?;
//! let engine = RewriteEngine::new(NodeBuilder::new(), DocBlockRewriter::new())
//!     .with_rules(rules);
//!
//! let tree = SyntaxNode::new(NodeKind::Class { name: "Product".into() });
//! let rewritten = engine.rewrite(&tree);
//! assert_eq!(rewritten.report.applied(), 1);
//! # Ok(())
//! # }
//! ```

pub mod config;
pub mod engine;
pub mod registry;
pub mod report;
pub mod rules;

pub use config::{
    load_configs_from_file, load_configs_from_str, ConfigValue, LoadError, RuleConfig, RuleOptions,
};
pub use engine::{RewriteEngine, Rewritten};
pub use registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext, RuleRegistry};
pub use report::{Outcome, ReportEntry, RewriteReport};
