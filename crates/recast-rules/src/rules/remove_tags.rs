//! Rule: strip doc tags matching a pattern
//!
//! ```yaml
//! rule: remove_tags
//! options:
//!   property: legacyId
//!   name_pattern: 'var|ORM(\\.*)?'
//! ```
//!
//! The name pattern must cover the whole tag name, so `ORM(\\.*)?`
//! strips `ORM\Id` and `ORM\Column` but leaves `Serializer\Type`
//! alone. An optional `body_pattern` restricts removal to tags whose
//! body also matches, and an optional `property` restricts the rule to
//! one property declaration; without it, every node is in scope.

use recast_core::{NodeKind, RewriteError, SyntaxNode, TagPattern};

use crate::config::{optional_str, required_str, RuleOptions};
use crate::registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext};

const RULE_NAME: &str = "remove_tags";

static OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "name_pattern",
        description: "Expression the whole tag name must match",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "body_pattern",
        description: "Expression searched for within the tag body",
        required: false,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "property",
        description: "Restrict to this property declaration",
        required: false,
        kind: OptionKind::String,
    },
];

#[derive(Debug)]
pub struct RemoveTagsRule {
    pattern: TagPattern,
    property: Option<String>,
}

impl RemoveTagsRule {
    pub fn from_options(options: &RuleOptions) -> Result<Self, RewriteError> {
        validate_options(RULE_NAME, OPTIONS, options)?;

        let name_pattern = required_str(RULE_NAME, options, "name_pattern")?;
        let pattern = match optional_str(options, "body_pattern") {
            Some(body_pattern) => TagPattern::with_body(name_pattern, body_pattern)?,
            None => TagPattern::for_name(name_pattern)?,
        };
        let property = optional_str(options, "property").map(str::to_string);

        Ok(RemoveTagsRule { pattern, property })
    }

    fn in_scope(&self, node: &SyntaxNode) -> bool {
        match &self.property {
            Some(property) => {
                matches!(node.kind(), NodeKind::Property { name, .. } if name == property)
            }
            None => true,
        }
    }
}

impl Rule for RemoveTagsRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Strip doc tags matching a pattern"
    }

    fn config_options(&self) -> &'static [ConfigOption] {
        OPTIONS
    }

    fn matches(&self, node: &SyntaxNode) -> bool {
        self.in_scope(node)
            && node
                .doc()
                .is_some_and(|doc| doc.tags().iter().any(|tag| self.pattern.matches(tag)))
    }

    fn apply(&self, node: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<SyntaxNode, RewriteError> {
        let mut next = node.clone();
        ctx.docs.remove_tags_matching(&mut next, &self.pattern);
        Ok(next)
    }
}
