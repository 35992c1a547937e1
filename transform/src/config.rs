//! Rewrite configuration
//!
//! The prefix controlling which declared types the rewriter intercepts and
//! the static map from type suffix to service-endpoint identifier. Both are
//! supplied as environment-level configuration, read once at process start,
//! and passed by reference into the rewriter; no ambient global state.

use std::collections::HashMap;
use thiserror::Error;

/// Environment variable naming the intercepted type prefix
pub const PREFIX_VAR: &str = "RESOURCE_TYPE_PREFIX";

/// Environment variable holding the suffix → endpoint map as a JSON object
pub const SERVICE_TOKENS_VAR: &str = "RESOURCE_TYPE_SERVICE_TOKENS";

/// Configuration failures at process start
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A required environment variable is missing
    #[error("missing {0} environment variable")]
    MissingVar(&'static str),

    /// The service-token map is not a JSON object of strings
    #[error("invalid service-token map: {0}")]
    InvalidTokenMap(String),
}

/// Process-wide rewrite configuration, read-only after construction
#[derive(Clone, Debug)]
pub struct RewriteConfig {
    /// Declared types starting with this prefix are rewritten
    pub type_prefix: String,
    /// Suffix → service-endpoint identifier
    pub service_tokens: HashMap<String, String>,
}

impl RewriteConfig {
    /// Create a configuration from already-parsed parts
    #[must_use]
    pub fn new(type_prefix: impl Into<String>, service_tokens: HashMap<String, String>) -> Self {
        Self {
            type_prefix: type_prefix.into(),
            service_tokens,
        }
    }

    /// Parse a configuration from a prefix and a JSON object literal
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidTokenMap`] when `tokens_json` is not a
    /// JSON object mapping strings to strings.
    pub fn from_parts(type_prefix: impl Into<String>, tokens_json: &str) -> Result<Self, ConfigError> {
        let service_tokens: HashMap<String, String> = serde_json::from_str(tokens_json)
            .map_err(|e| ConfigError::InvalidTokenMap(e.to_string()))?;
        Ok(Self::new(type_prefix, service_tokens))
    }

    /// Read the configuration from the process environment
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::MissingVar`] when either variable is absent and
    /// [`ConfigError::InvalidTokenMap`] when the token map does not parse.
    pub fn from_env() -> Result<Self, ConfigError> {
        let type_prefix =
            std::env::var(PREFIX_VAR).map_err(|_| ConfigError::MissingVar(PREFIX_VAR))?;
        let tokens_json = std::env::var(SERVICE_TOKENS_VAR)
            .map_err(|_| ConfigError::MissingVar(SERVICE_TOKENS_VAR))?;
        Self::from_parts(type_prefix, &tokens_json)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_parts_parses_token_map() {
        let config = RewriteConfig::from_parts(
            "CustomResources::",
            r#"{"Boto::Hook": "arn:aws:lambda:eu-west-1:123456789012:function:botohook"}"#,
        )
        .expect("valid config");
        assert_eq!(config.type_prefix, "CustomResources::");
        assert_eq!(
            config.service_tokens["Boto::Hook"],
            "arn:aws:lambda:eu-west-1:123456789012:function:botohook"
        );
    }

    #[test]
    fn test_from_parts_rejects_non_object() {
        let err = RewriteConfig::from_parts("P::", "[1, 2]").expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidTokenMap(_)));
    }

    #[test]
    fn test_from_parts_rejects_non_string_values() {
        let err = RewriteConfig::from_parts("P::", r#"{"A": 1}"#).expect_err("should fail");
        assert!(matches!(err, ConfigError::InvalidTokenMap(_)));
    }
}
