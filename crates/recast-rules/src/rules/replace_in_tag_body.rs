//! Rule: rewrite part of a doc tag body
//!
//! ```yaml
//! rule: replace_in_tag_body
//! options:
//!   tag: 'Serializer\\Type'
//!   pattern: '(\(")(int)("\))'
//!   replacement: '${1}string${3}'
//! ```
//!
//! `tag` is a whole-name expression selecting which tags to touch,
//! `pattern` an unanchored search within their bodies. Capture-group
//! references in the replacement are expanded, so the example turns
//! `("int")` into `("string")` without touching the quoting.

use recast_core::{NodeKind, RewriteError, SyntaxNode, TagPattern};

use crate::config::{optional_str, required_str, RuleOptions};
use crate::registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext};

const RULE_NAME: &str = "replace_in_tag_body";

static OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "tag",
        description: "Expression the whole tag name must match",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "pattern",
        description: "Expression searched for within the tag body",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "replacement",
        description: "Replacement text; ${n} expands capture group n",
        required: true,
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
pub struct ReplaceInTagBodyRule {
    pattern: TagPattern,
    replacement: String,
    property: Option<String>,
}

impl ReplaceInTagBodyRule {
    pub fn from_options(options: &RuleOptions) -> Result<Self, RewriteError> {
        validate_options(RULE_NAME, OPTIONS, options)?;

        let tag = required_str(RULE_NAME, options, "tag")?;
        let body = required_str(RULE_NAME, options, "pattern")?;
        let pattern = TagPattern::with_body(tag, body)?;
        let replacement = required_str(RULE_NAME, options, "replacement")?.to_string();
        let property = optional_str(options, "property").map(str::to_string);

        Ok(ReplaceInTagBodyRule {
            pattern,
            replacement,
            property,
        })
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

impl Rule for ReplaceInTagBodyRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Rewrite part of a doc tag body"
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
        ctx.docs.replace_in_tag_body(&mut next, &self.pattern, &self.replacement)?;
        Ok(next)
    }
}
