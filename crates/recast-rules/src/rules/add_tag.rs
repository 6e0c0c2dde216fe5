//! Rule: attach a doc tag to a named property
//!
//! ```yaml
//! rule: add_tag
//! options:
//!   property: uuid
//!   tag: var
//!   body: UuidInterface|null
//! ```
//!
//! The tag is appended after any existing tags, initializing the
//! metadata on a bare node. The rule skips properties that already
//! carry the exact tag, so repeated passes add nothing.

use recast_core::{NodeKind, RewriteError, SyntaxNode, Tag};

use crate::config::{optional_str, required_str, RuleOptions};
use crate::registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext};

const RULE_NAME: &str = "add_tag";

static OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "property",
        description: "Name of the property declaration to tag",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "tag",
        description: "Tag name, without the leading @",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "body",
        description: "Tag body (default empty)",
        required: false,
        kind: OptionKind::String,
    },
];

#[derive(Debug)]
pub struct AddTagRule {
    property: String,
    tag: Tag,
}

impl AddTagRule {
    pub fn from_options(options: &RuleOptions) -> Result<Self, RewriteError> {
        validate_options(RULE_NAME, OPTIONS, options)?;

        let property = required_str(RULE_NAME, options, "property")?.to_string();
        let name = required_str(RULE_NAME, options, "tag")?;
        if name.is_empty() {
            return Err(RewriteError::InvalidConfig {
                rule: RULE_NAME.to_string(),
                message: "option `tag` must not be empty".to_string(),
            });
        }
        let body = optional_str(options, "body").unwrap_or_default();

        Ok(AddTagRule {
            property,
            tag: Tag::new(name, body),
        })
    }

    fn already_tagged(&self, node: &SyntaxNode) -> bool {
        node.doc()
            .is_some_and(|doc| doc.tags().contains(&self.tag))
    }
}

impl Rule for AddTagRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Attach a doc tag to a named property"
    }

    fn config_options(&self) -> &'static [ConfigOption] {
        OPTIONS
    }

    fn matches(&self, node: &SyntaxNode) -> bool {
        matches!(node.kind(), NodeKind::Property { name, .. } if *name == self.property)
            && !self.already_tagged(node)
    }

    fn apply(&self, node: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<SyntaxNode, RewriteError> {
        let mut next = node.clone();
        ctx.docs.add_tag(&mut next, self.tag.clone());
        Ok(next)
    }
}
