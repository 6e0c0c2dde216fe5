//! Rule: add a property declaration to a named class
//!
//! ```yaml
//! rule: add_property
//! options:
//!   class: Product
//!   name: uuid
//!   visibility: private
//! ```
//!
//! The property is appended to the class body without doc metadata;
//! combine with `add_tag` to document it. A class that already declares
//! the property is left alone, whatever its visibility.

use recast_core::{NodeBuilder, NodeKind, RewriteError, SyntaxNode, Visibility};

use crate::config::{optional_str, required_str, RuleOptions};
use crate::registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext};

const RULE_NAME: &str = "add_property";

static OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "class",
        description: "Name of the class declaration to extend",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "name",
        description: "Name of the property to add",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "visibility",
        description: "public, protected, or private (default private)",
        required: false,
        kind: OptionKind::String,
    },
];

#[derive(Debug)]
pub struct AddPropertyRule {
    class: String,
    name: String,
    visibility: Visibility,
}

impl AddPropertyRule {
    pub fn from_options(options: &RuleOptions) -> Result<Self, RewriteError> {
        validate_options(RULE_NAME, OPTIONS, options)?;

        let class = required_str(RULE_NAME, options, "class")?.to_string();
        let name = required_str(RULE_NAME, options, "name")?.to_string();
        let visibility = match optional_str(options, "visibility") {
            None => Visibility::Private,
            Some(text) => {
                Visibility::parse(text).ok_or_else(|| RewriteError::InvalidConfig {
                    rule: RULE_NAME.to_string(),
                    message: format!("unknown visibility `{text}`"),
                })?
            }
        };

        // Surface bad identifiers at registration, not mid-pass.
        NodeBuilder::new().build_property(&name, visibility)?;

        Ok(AddPropertyRule {
            class,
            name,
            visibility,
        })
    }

    fn declares_property(&self, class: &SyntaxNode) -> bool {
        class.children().iter().any(|child| {
            matches!(child.kind(), NodeKind::Property { name, .. } if *name == self.name)
        })
    }
}

impl Rule for AddPropertyRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Add a property declaration to a named class"
    }

    fn config_options(&self) -> &'static [ConfigOption] {
        OPTIONS
    }

    fn matches(&self, node: &SyntaxNode) -> bool {
        matches!(node.kind(), NodeKind::Class { name } if *name == self.class)
            && !self.declares_property(node)
    }

    fn apply(&self, node: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<SyntaxNode, RewriteError> {
        let property = ctx.builder.build_property(&self.name, self.visibility)?;
        let mut next = node.clone();
        let mut children = next.take_children();
        children.push(property);
        next.replace_children(children);
        Ok(next)
    }
}
