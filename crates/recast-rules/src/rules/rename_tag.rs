//! Rule: rename a doc tag, keeping its body
//!
//! ```yaml
//! rule: rename_tag
//! options:
//!   from: inheritdoc
//!   to: inheritDoc
//! ```
//!
//! Every tag named `from`, on any node, is renamed to `to`; bodies and
//! tag order are untouched. Names are compared exactly, no patterns.

use recast_core::{DocMetadata, RewriteError, SyntaxNode, Tag};

use crate::config::{required_str, RuleOptions};
use crate::registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext};

const RULE_NAME: &str = "rename_tag";

static OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "from",
        description: "Exact tag name to rename",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "to",
        description: "Replacement tag name",
        required: true,
        kind: OptionKind::String,
    },
];

#[derive(Debug)]
pub struct RenameTagRule {
    from: String,
    to: String,
}

impl RenameTagRule {
    pub fn from_options(options: &RuleOptions) -> Result<Self, RewriteError> {
        validate_options(RULE_NAME, OPTIONS, options)?;

        let from = required_str(RULE_NAME, options, "from")?.to_string();
        let to = required_str(RULE_NAME, options, "to")?.to_string();
        for (option, value) in [("from", &from), ("to", &to)] {
            if value.is_empty() {
                return Err(RewriteError::InvalidConfig {
                    rule: RULE_NAME.to_string(),
                    message: format!("option `{option}` must not be empty"),
                });
            }
        }
        if from == to {
            return Err(RewriteError::InvalidConfig {
                rule: RULE_NAME.to_string(),
                message: "options `from` and `to` must differ".to_string(),
            });
        }

        Ok(RenameTagRule { from, to })
    }
}

impl Rule for RenameTagRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Rename a doc tag, keeping its body"
    }

    fn config_options(&self) -> &'static [ConfigOption] {
        OPTIONS
    }

    fn matches(&self, node: &SyntaxNode) -> bool {
        node.doc().is_some_and(|doc| doc.has_tag(&self.from))
    }

    fn apply(&self, node: &SyntaxNode, _ctx: &RuleContext<'_>) -> Result<SyntaxNode, RewriteError> {
        let Some(doc) = node.doc() else {
            return Err(RewriteError::UnapplicableRule {
                rule: RULE_NAME.to_string(),
                reason: "node carries no doc metadata".to_string(),
            });
        };

        let renamed: DocMetadata = doc
            .tags()
            .iter()
            .map(|tag| {
                if tag.name() == self.from {
                    Tag::new(&self.to, tag.body())
                } else {
                    tag.clone()
                }
            })
            .collect();

        let mut next = node.clone();
        next.set_doc(renamed);
        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_core::{DocBlockRewriter, NodeBuilder, NodeKind, Visibility};

    use crate::config::RuleConfig;

    fn rename(from: &str, to: &str) -> RenameTagRule {
        let config = RuleConfig::new(RULE_NAME)
            .with_option("from", from)
            .with_option("to", to);
        RenameTagRule::from_options(&config.options).unwrap()
    }

    fn method_with_tags(tags: impl IntoIterator<Item = Tag>) -> SyntaxNode {
        SyntaxNode::new(NodeKind::Method {
            name: "getId".into(),
            visibility: Visibility::Public,
        })
        .with_doc(tags.into_iter().collect())
    }

    fn apply(rule: &RenameTagRule, node: &SyntaxNode) -> SyntaxNode {
        let builder = NodeBuilder::new();
        let docs = DocBlockRewriter::new();
        let ctx = RuleContext { builder: &builder, docs: &docs };
        rule.apply(node, &ctx).unwrap()
    }

    // ==================== Configuration ====================

    #[test]
    fn test_rejects_empty_names() {
        let config = RuleConfig::new(RULE_NAME)
            .with_option("from", "")
            .with_option("to", "inheritDoc");
        let err = RenameTagRule::from_options(&config.options).unwrap_err();
        assert!(err.to_string().contains("`from`"));
    }

    #[test]
    fn test_rejects_identical_names() {
        let config = RuleConfig::new(RULE_NAME)
            .with_option("from", "var")
            .with_option("to", "var");
        let err = RenameTagRule::from_options(&config.options).unwrap_err();
        assert!(err.to_string().contains("must differ"));
    }

    // ==================== Matching ====================

    #[test]
    fn test_matches_any_node_carrying_the_tag() {
        let rule = rename("inheritdoc", "inheritDoc");
        assert!(rule.matches(&method_with_tags([Tag::named("inheritdoc")])));
        assert!(!rule.matches(&method_with_tags([Tag::named("inheritDoc")])));
        assert!(!rule.matches(&SyntaxNode::new(NodeKind::Block)));
    }

    // ==================== Application ====================

    #[test]
    fn test_renames_every_occurrence_keeping_bodies_and_order() {
        let rule = rename("returns", "return");
        let node = method_with_tags([
            Tag::new("param", "int id"),
            Tag::new("returns", "string"),
            Tag::new("returns", "null"),
        ]);
        let next = apply(&rule, &node);

        let tags = next.doc().unwrap().tags();
        assert_eq!(tags[0], Tag::new("param", "int id"));
        assert_eq!(tags[1], Tag::new("return", "string"));
        assert_eq!(tags[2], Tag::new("return", "null"));
    }

    #[test]
    fn test_leaves_other_tags_alone() {
        let rule = rename("inheritdoc", "inheritDoc");
        let node = method_with_tags([Tag::named("internal"), Tag::named("inheritdoc")]);
        let next = apply(&rule, &node);

        let names: Vec<&str> = next.doc().unwrap().tags().iter().map(Tag::name).collect();
        assert_eq!(names, ["internal", "inheritDoc"]);
    }

    #[test]
    fn test_application_is_idempotent_through_matches() {
        let rule = rename("inheritdoc", "inheritDoc");
        let once = apply(&rule, &method_with_tags([Tag::named("inheritdoc")]));
        assert!(!rule.matches(&once));
    }
}
