//! Tree-walking rewrite engine
//!
//! One pass visits every node depth-first, parents before children, and
//! runs each registered rule against it in registration order. A rule
//! that matches replaces the node; the pass then descends into the
//! replacement's children, so a node synthesized by an earlier rule is
//! seen by later rules in the same pass.

use rayon::prelude::*;
use recast_core::{DocBlockRewriter, NodeBuilder, NodePath, SyntaxNode};

use crate::registry::{Rule, RuleContext};
use crate::report::{Outcome, ReportEntry, RewriteReport};

/// The outcome of rewriting one tree: the transformed tree and the
/// decision-by-decision report.
#[derive(Debug, Clone)]
pub struct Rewritten {
    pub tree: SyntaxNode,
    pub report: RewriteReport,
}

/// Applies a fixed sequence of rules to trees.
///
/// The engine holds no per-tree state, so one engine can rewrite any
/// number of trees, from any number of threads.
pub struct RewriteEngine {
    builder: NodeBuilder,
    docs: DocBlockRewriter,
    rules: Vec<Box<dyn Rule>>,
}

impl RewriteEngine {
    /// Engine with explicitly injected collaborators and no rules yet.
    pub fn new(builder: NodeBuilder, docs: DocBlockRewriter) -> Self {
        RewriteEngine {
            builder,
            docs,
            rules: Vec::new(),
        }
    }

    pub fn with_rules(mut self, rules: Vec<Box<dyn Rule>>) -> Self {
        self.rules.extend(rules);
        self
    }

    pub fn push_rule(&mut self, rule: Box<dyn Rule>) {
        self.rules.push(rule);
    }

    /// Names of the registered rules, in application order.
    pub fn rule_names(&self) -> Vec<&'static str> {
        self.rules.iter().map(|rule| rule.name()).collect()
    }

    /// Rewrite one tree.
    ///
    /// The input is never touched; the transformed tree is built from a
    /// copy, so on a disastrous pass the caller still holds the
    /// original. Every rule decision lands in the report, one entry per
    /// rule per visited node. A rule that fails on a node is recorded
    /// and the node kept as-is; the pass continues with the node's
    /// siblings and children.
    pub fn rewrite(&self, tree: &SyntaxNode) -> Rewritten {
        let mut report = RewriteReport::new();
        let ctx = RuleContext {
            builder: &self.builder,
            docs: &self.docs,
        };
        let tree = self.rewrite_node(tree.clone(), NodePath::root(), &ctx, &mut report);
        Rewritten { tree, report }
    }

    /// Rewrite many independent trees in parallel, preserving input
    /// order. Each tree is rewritten on one worker; nothing is shared
    /// between trees but the engine itself.
    pub fn rewrite_batch(&self, trees: Vec<(String, SyntaxNode)>) -> Vec<(String, Rewritten)> {
        trees
            .into_par_iter()
            .map(|(id, tree)| {
                let rewritten = self.rewrite(&tree);
                (id, rewritten)
            })
            .collect()
    }

    fn rewrite_node(
        &self,
        node: SyntaxNode,
        path: NodePath,
        ctx: &RuleContext<'_>,
        report: &mut RewriteReport,
    ) -> SyntaxNode {
        let mut current = node;

        for rule in &self.rules {
            if !rule.matches(&current) {
                report.push(ReportEntry {
                    rule: rule.name().to_string(),
                    path: path.to_string(),
                    node: current.describe(),
                    outcome: Outcome::Skipped,
                    reason: None,
                });
                continue;
            }
            match rule.apply(&current, ctx) {
                Ok(next) => {
                    report.push(ReportEntry {
                        rule: rule.name().to_string(),
                        path: path.to_string(),
                        node: next.describe(),
                        outcome: Outcome::Applied,
                        reason: None,
                    });
                    current = next;
                }
                Err(err) => {
                    report.push(ReportEntry {
                        rule: rule.name().to_string(),
                        path: path.to_string(),
                        node: current.describe(),
                        outcome: Outcome::Failed,
                        reason: Some(err.to_string()),
                    });
                }
            }
        }

        let children = current.take_children();
        let rebuilt = children
            .into_iter()
            .enumerate()
            .map(|(index, child)| self.rewrite_node(child, path.child(index), ctx, report))
            .collect();
        current.replace_children(rebuilt);
        current
    }
}
