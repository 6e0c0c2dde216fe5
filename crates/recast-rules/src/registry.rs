//! Rule trait, option metadata, and the rule registry

use recast_core::{DocBlockRewriter, NodeBuilder, RewriteError, SyntaxNode};

use crate::config::{ConfigValue, RuleConfig, RuleOptions};

/// Collaborators a rule works through. They are injected explicitly at
/// engine construction; rules never reach for globals.
#[derive(Debug, Clone, Copy)]
pub struct RuleContext<'a> {
    pub builder: &'a NodeBuilder,
    pub docs: &'a DocBlockRewriter,
}

/// A named, configurable transformation over syntax nodes.
///
/// Rules must be idempotent: a tree that already carries the rule's
/// transformation is rejected by `matches`, so rewriting twice changes
/// nothing. `apply` never mutates its input; it returns a replacement
/// node built from a copy.
pub trait Rule: Send + Sync {
    fn name(&self) -> &'static str;

    fn description(&self) -> &'static str;

    /// Metadata for the options this rule accepts.
    fn config_options(&self) -> &'static [ConfigOption] {
        &[]
    }

    /// Whether the rule wants to transform this node.
    fn matches(&self, node: &SyntaxNode) -> bool;

    /// Produce the replacement for a matched node. On error the engine
    /// keeps the original node and records the failure.
    fn apply(&self, node: &SyntaxNode, ctx: &RuleContext<'_>) -> Result<SyntaxNode, RewriteError>;
}

/// Expected type of an option value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OptionKind {
    String,
    Bool,
}

/// Metadata for one rule option, used for validation and discovery.
#[derive(Debug, Clone, Copy)]
pub struct ConfigOption {
    pub name: &'static str,
    pub description: &'static str,
    pub required: bool,
    pub kind: OptionKind,
}

/// Check supplied options against a rule's option metadata. Unknown
/// options, type mismatches, and missing required options are all
/// configuration errors.
pub fn validate_options(
    rule: &str,
    specs: &[ConfigOption],
    options: &RuleOptions,
) -> Result<(), RewriteError> {
    let invalid = |message: String| RewriteError::InvalidConfig {
        rule: rule.to_string(),
        message,
    };

    for (name, value) in options {
        let Some(spec) = specs.iter().find(|spec| spec.name == name) else {
            return Err(invalid(format!("unknown option `{name}`")));
        };
        let ok = match spec.kind {
            OptionKind::String => matches!(value, ConfigValue::String(_)),
            OptionKind::Bool => matches!(value, ConfigValue::Bool(_)),
        };
        if !ok {
            return Err(invalid(format!("option `{name}` has the wrong type")));
        }
    }

    for spec in specs.iter().filter(|spec| spec.required) {
        if !options.contains_key(spec.name) {
            return Err(invalid(format!("missing required option `{}`", spec.name)));
        }
    }

    Ok(())
}

type RuleFactory = Box<dyn Fn(&RuleOptions) -> Result<Box<dyn Rule>, RewriteError> + Send + Sync>;

/// Registry of available rules, mapping names to factories that turn
/// validated options into rule instances.
///
/// `new` starts with the built-in rules; `empty` starts blank for
/// callers that bring their own.
pub struct RuleRegistry {
    factories: Vec<(String, RuleFactory)>,
}

impl RuleRegistry {
    /// Registry preloaded with every built-in rule.
    pub fn new() -> Self {
        let mut registry = RuleRegistry::empty();
        registry.register("add_property", |options| {
            crate::rules::AddPropertyRule::from_options(options)
                .map(|rule| Box::new(rule) as Box<dyn Rule>)
        });
        registry.register("add_tag", |options| {
            crate::rules::AddTagRule::from_options(options)
                .map(|rule| Box::new(rule) as Box<dyn Rule>)
        });
        registry.register("remove_tags", |options| {
            crate::rules::RemoveTagsRule::from_options(options)
                .map(|rule| Box::new(rule) as Box<dyn Rule>)
        });
        registry.register("rename_tag", |options| {
            crate::rules::RenameTagRule::from_options(options)
                .map(|rule| Box::new(rule) as Box<dyn Rule>)
        });
        registry.register("replace_in_tag_body", |options| {
            crate::rules::ReplaceInTagBodyRule::from_options(options)
                .map(|rule| Box::new(rule) as Box<dyn Rule>)
        });
        registry.register("init_property", |options| {
            crate::rules::InitPropertyRule::from_options(options)
                .map(|rule| Box::new(rule) as Box<dyn Rule>)
        });
        registry
    }

    pub fn empty() -> Self {
        RuleRegistry {
            factories: Vec::new(),
        }
    }

    /// Register a factory under a name. Registering a name again replaces
    /// the earlier factory.
    pub fn register<F>(&mut self, name: impl Into<String>, factory: F)
    where
        F: Fn(&RuleOptions) -> Result<Box<dyn Rule>, RewriteError> + Send + Sync + 'static,
    {
        let name = name.into();
        let factory: RuleFactory = Box::new(factory);
        match self.factories.iter_mut().find(|(existing, _)| *existing == name) {
            Some(entry) => entry.1 = factory,
            None => self.factories.push((name, factory)),
        }
    }

    pub fn contains(&self, name: &str) -> bool {
        self.factories.iter().any(|(existing, _)| existing == name)
    }

    /// Registered rule names, in registration order.
    pub fn all_names(&self) -> Vec<&str> {
        self.factories.iter().map(|(name, _)| name.as_str()).collect()
    }

    /// Build one rule from its configuration. An unknown rule name, and
    /// any option the factory rejects, is an `InvalidConfig` error.
    pub fn build(&self, config: &RuleConfig) -> Result<Box<dyn Rule>, RewriteError> {
        let factory = self
            .factories
            .iter()
            .find(|(name, _)| *name == config.rule)
            .map(|(_, factory)| factory)
            .ok_or_else(|| RewriteError::InvalidConfig {
                rule: config.rule.clone(),
                message: "unknown rule".to_string(),
            })?;
        factory(&config.options)
    }

    /// Build every configuration in order, failing fast on the first bad
    /// one. Nothing is returned unless every registration succeeds.
    pub fn build_all(&self, configs: &[RuleConfig]) -> Result<Vec<Box<dyn Rule>>, RewriteError> {
        configs.iter().map(|config| self.build(config)).collect()
    }
}

impl Default for RuleRegistry {
    fn default() -> Self {
        RuleRegistry::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use recast_core::NodeKind;

    struct NoopRule;

    impl Rule for NoopRule {
        fn name(&self) -> &'static str {
            "noop"
        }

        fn description(&self) -> &'static str {
            "Matches nothing"
        }

        fn matches(&self, _node: &SyntaxNode) -> bool {
            false
        }

        fn apply(
            &self,
            node: &SyntaxNode,
            _ctx: &RuleContext<'_>,
        ) -> Result<SyntaxNode, RewriteError> {
            Ok(node.clone())
        }
    }

    const SPECS: &[ConfigOption] = &[
        ConfigOption {
            name: "class",
            description: "Class to match",
            required: true,
            kind: OptionKind::String,
        },
        ConfigOption {
            name: "strict",
            description: "Require an exact match",
            required: false,
            kind: OptionKind::Bool,
        },
    ];

    // ==================== validate_options ====================

    #[test]
    fn test_accepts_known_options_of_the_right_type() {
        let mut options = RuleOptions::new();
        options.insert("class".into(), "Product".into());
        options.insert("strict".into(), true.into());
        assert!(validate_options("example", SPECS, &options).is_ok());
    }

    #[test]
    fn test_rejects_unknown_options() {
        let mut options = RuleOptions::new();
        options.insert("class".into(), "Product".into());
        options.insert("klass".into(), "Product".into());
        let err = validate_options("example", SPECS, &options).unwrap_err();
        assert!(err.to_string().contains("unknown option `klass`"));
    }

    #[test]
    fn test_rejects_missing_required_options() {
        let options = RuleOptions::new();
        let err = validate_options("example", SPECS, &options).unwrap_err();
        assert!(err.to_string().contains("missing required option `class`"));
    }

    #[test]
    fn test_rejects_type_mismatches() {
        let mut options = RuleOptions::new();
        options.insert("class".into(), true.into());
        let err = validate_options("example", SPECS, &options).unwrap_err();
        assert!(err.to_string().contains("wrong type"));
    }

    // ==================== Registry ====================

    #[test]
    fn test_new_registers_the_builtin_rules() {
        let registry = RuleRegistry::new();
        for name in [
            "add_property",
            "add_tag",
            "remove_tags",
            "rename_tag",
            "replace_in_tag_body",
            "init_property",
        ] {
            assert!(registry.contains(name), "missing builtin `{name}`");
        }
    }

    #[test]
    fn test_build_rejects_unknown_rule_names() {
        let registry = RuleRegistry::new();
        let err = registry.build(&RuleConfig::new("does_not_exist")).err().unwrap();
        assert!(matches!(err, RewriteError::InvalidConfig { rule, .. } if rule == "does_not_exist"));
    }

    #[test]
    fn test_build_constructs_a_configured_rule() {
        let registry = RuleRegistry::new();
        let config = RuleConfig::new("add_property")
            .with_option("class", "Product")
            .with_option("name", "uuid");
        let rule = registry.build(&config).unwrap();
        assert_eq!(rule.name(), "add_property");

        let class = SyntaxNode::new(NodeKind::Class { name: "Product".into() });
        assert!(rule.matches(&class));
    }

    #[test]
    fn test_build_all_fails_fast_on_the_first_bad_config() {
        let registry = RuleRegistry::new();
        let configs = vec![
            RuleConfig::new("add_property")
                .with_option("class", "Product")
                .with_option("name", "uuid"),
            RuleConfig::new("add_property").with_option("class", "Product"),
        ];
        let err = registry.build_all(&configs).err().unwrap();
        assert!(matches!(err, RewriteError::InvalidConfig { .. }));
    }

    #[test]
    fn test_custom_rules_can_be_registered() {
        let mut registry = RuleRegistry::empty();
        registry.register("noop", |_| Ok(Box::new(NoopRule) as Box<dyn Rule>));
        assert_eq!(registry.all_names(), ["noop"]);

        let rule = registry.build(&RuleConfig::new("noop")).unwrap();
        assert_eq!(rule.name(), "noop");
    }

    #[test]
    fn test_registering_a_name_again_replaces_the_factory() {
        let mut registry = RuleRegistry::empty();
        registry.register("noop", |_| Ok(Box::new(NoopRule) as Box<dyn Rule>));
        registry.register("noop", |_| {
            Err(RewriteError::InvalidConfig {
                rule: "noop".to_string(),
                message: "always fails".to_string(),
            })
        });
        assert_eq!(registry.all_names().len(), 1);
        assert!(registry.build(&RuleConfig::new("noop")).is_err());
    }
}
