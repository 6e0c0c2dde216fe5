//! Declarative rule configuration and YAML loading
//!
//! A configuration document is either a single rule registration or a
//! sequence of them:
//!
//! ```yaml
//! - rule: add_property
//!   options:
//!     class: Product
//!     name: uuid
//!     visibility: private
//! - rule: remove_tags
//!   options:
//!     property: legacyId
//!     name_pattern: 'var|ORM(\\.*)?'
//! ```

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use recast_core::RewriteError;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// A single option value. YAML booleans stay booleans; everything else
/// is a string.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(untagged)]
pub enum ConfigValue {
    Bool(bool),
    String(String),
}

impl ConfigValue {
    pub fn as_str(&self) -> Option<&str> {
        match self {
            ConfigValue::String(value) => Some(value),
            ConfigValue::Bool(_) => None,
        }
    }

    pub fn as_bool(&self) -> Option<bool> {
        match self {
            ConfigValue::Bool(value) => Some(*value),
            ConfigValue::String(_) => None,
        }
    }
}

impl From<&str> for ConfigValue {
    fn from(value: &str) -> Self {
        ConfigValue::String(value.to_string())
    }
}

impl From<String> for ConfigValue {
    fn from(value: String) -> Self {
        ConfigValue::String(value)
    }
}

impl From<bool> for ConfigValue {
    fn from(value: bool) -> Self {
        ConfigValue::Bool(value)
    }
}

/// Option map for one rule registration. A `BTreeMap` keeps iteration,
/// and therefore validation errors, in a stable order.
pub type RuleOptions = BTreeMap<String, ConfigValue>;

/// One declarative rule registration: the rule name plus its options.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(deny_unknown_fields)]
pub struct RuleConfig {
    pub rule: String,
    #[serde(default)]
    pub options: RuleOptions,
}

impl RuleConfig {
    pub fn new(rule: impl Into<String>) -> Self {
        RuleConfig {
            rule: rule.into(),
            options: RuleOptions::new(),
        }
    }

    pub fn with_option(mut self, name: impl Into<String>, value: impl Into<ConfigValue>) -> Self {
        self.options.insert(name.into(), value.into());
        self
    }
}

/// Errors reading configuration documents.
#[derive(Debug, Error)]
pub enum LoadError {
    #[error("failed to read config file: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse config: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Parse a YAML document holding one registration or a sequence of them.
pub fn load_configs_from_str(yaml: &str) -> Result<Vec<RuleConfig>, LoadError> {
    if let Ok(single) = serde_yaml::from_str::<RuleConfig>(yaml) {
        return Ok(vec![single]);
    }
    Ok(serde_yaml::from_str::<Vec<RuleConfig>>(yaml)?)
}

/// Read and parse a YAML configuration file.
pub fn load_configs_from_file(path: &Path) -> Result<Vec<RuleConfig>, LoadError> {
    let content = fs::read_to_string(path)?;
    load_configs_from_str(&content)
}

pub(crate) fn required_str<'a>(
    rule: &str,
    options: &'a RuleOptions,
    name: &str,
) -> Result<&'a str, RewriteError> {
    options
        .get(name)
        .and_then(ConfigValue::as_str)
        .ok_or_else(|| RewriteError::InvalidConfig {
            rule: rule.to_string(),
            message: format!("missing required option `{name}`"),
        })
}

pub(crate) fn optional_str<'a>(options: &'a RuleOptions, name: &str) -> Option<&'a str> {
    options.get(name).and_then(ConfigValue::as_str)
}
