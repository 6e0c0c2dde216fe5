//! Error types shared by node construction and rewriting

use thiserror::Error;

/// Errors raised while building nodes, compiling patterns, or applying
/// rules.
///
/// The first five variants are configuration or programmer errors and are
/// raised eagerly, before any tree is touched. `UnapplicableRule` is the
/// only variant expected during a rewrite pass; the engine records it and
/// moves on to the next node.
#[derive(Debug, Error)]
pub enum RewriteError {
    #[error("invalid identifier `{0}`")]
    InvalidIdentifier(String),

    #[error("invalid assignment target `{path}`: {reason}")]
    InvalidTarget { path: String, reason: String },

    #[error("invalid type reference `{0}`")]
    InvalidType(String),

    #[error("invalid pattern `{pattern}`: {message}")]
    InvalidPattern { pattern: String, message: String },

    #[error("invalid configuration for rule `{rule}`: {message}")]
    InvalidConfig { rule: String, message: String },

    #[error("rule `{rule}` not applicable: {reason}")]
    UnapplicableRule { rule: String, reason: String },
}

impl RewriteError {
    /// Whether a rewrite pass may recover from this error by keeping the
    /// current node and continuing. Only `UnapplicableRule` qualifies;
    /// everything else indicates a broken configuration.
    pub fn is_recoverable(&self) -> bool {
        matches!(self, RewriteError::UnapplicableRule { .. })
    }
}
