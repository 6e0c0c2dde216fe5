//! Rule: initialize a property inside a named method
//!
//! ```yaml
//! rule: init_property
//! options:
//!   method: _construct
//!   property: uuid
//!   type: 'Ramsey\Uuid\Uuid'
//!   call: uuid4
//! ```
//!
//! Appends `this.<property> = <Type>::<call>();` to the method body.
//! The call takes no arguments. A method that already assigns the
//! property anywhere in its body is left alone.

use recast_core::{find, NodeBuilder, NodeKind, RewriteError, SyntaxNode, TypeReference};

use crate::config::{required_str, RuleOptions};
use crate::registry::{validate_options, ConfigOption, OptionKind, Rule, RuleContext};

const RULE_NAME: &str = "init_property";

static OPTIONS: &[ConfigOption] = &[
    ConfigOption {
        name: "method",
        description: "Name of the method to extend",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "property",
        description: "Property assigned on `this`",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "type",
        description: "Qualified type the initializer is called on",
        required: true,
        kind: OptionKind::String,
    },
    ConfigOption {
        name: "call",
        description: "Static method producing the initial value",
        required: true,
        kind: OptionKind::String,
    },
];

#[derive(Debug)]
pub struct InitPropertyRule {
    method: String,
    property: String,
    type_ref: TypeReference,
    call: String,
}

impl InitPropertyRule {
    pub fn from_options(options: &RuleOptions) -> Result<Self, RewriteError> {
        validate_options(RULE_NAME, OPTIONS, options)?;

        let method = required_str(RULE_NAME, options, "method")?.to_string();
        let property = required_str(RULE_NAME, options, "property")?.to_string();
        let type_ref = TypeReference::parse(required_str(RULE_NAME, options, "type")?)?;
        let call = required_str(RULE_NAME, options, "call")?.to_string();

        // The rule assigns one property directly on `this`; a dotted
        // value would be a valid assignment path but never a property.
        if property.contains('.') {
            return Err(RewriteError::InvalidConfig {
                rule: RULE_NAME.to_string(),
                message: format!("property `{property}` must be a single identifier"),
            });
        }

        // Dry-run the fragment so bad identifiers fail at registration.
        let dry_run = NodeBuilder::new();
        let value = dry_run.build_static_call(&type_ref, &call, Vec::new())?;
        dry_run.build_assignment(&format!("this.{property}"), value)?;

        Ok(InitPropertyRule {
            method,
            property,
            type_ref,
            call,
        })
    }

    fn assigns_property(&self, node: &SyntaxNode) -> bool {
        if !matches!(node.kind(), NodeKind::Assign) {
            return false;
        }
        let Some(target) = node.child(0) else {
            return false;
        };
        let NodeKind::PropertyFetch { property } = target.kind() else {
            return false;
        };
        if *property != self.property {
            return false;
        }
        matches!(
            target.child(0).map(SyntaxNode::kind),
            Some(NodeKind::Variable { name }) if name == "this"
        )
    }
}

impl Rule for InitPropertyRule {
    fn name(&self) -> &'static str {
        RULE_NAME
    }

    fn description(&self) -> &'static str {
        "Initialize a property inside a named method"
    }

    fn config_options(&self) -> &'static [ConfigOption] {
        OPTIONS
    }

    fn matches(&self, node: &SyntaxNode) -> bool {
        matches!(node.kind(), NodeKind::Method { name, .. } if *name == self.method)
            && find(node, |candidate| self.assigns_property(candidate)).is_none()
    }

    fn apply(&self, node: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<SyntaxNode, RewriteError> {
        let value = ctx.builder.build_static_call(&self.type_ref, &self.call, Vec::new())?;
        let stmt = ctx.builder.build_assignment(&format!("this.{}", self.property), value)?;

        let mut next = node.clone();
        let mut children = next.take_children();
        children.push(stmt);
        next.replace_children(children);
        Ok(next)
    }
}
