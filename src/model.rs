//! @ai:module:intent Model configuration for benchmark runs
//! @ai:module:layer domain
//! @ai:module:public_api ModelConfig
//! @ai:module:stateless true

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::str::FromStr;

/// @ai:intent Immutable description of one model to benchmark
///
/// Identity for scheduling purposes is the `(provider, model)` pair;
/// sampling parameters do not participate in equality.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ModelConfig {
    /// Provider identifier (e.g., "openai", "anthropic", "llamacpp")
    pub provider: String,
    /// Model identifier within the provider (e.g., "gpt-4")
    pub model: String,
    /// Sampling temperature (0.0 for deterministic outputs)
    #[serde(default)]
    pub temperature: f64,
    /// Maximum number of tokens to generate
    #[serde(default = "default_max_tokens")]
    pub max_tokens: Option<u32>,
    /// Provider-specific parameters merged into the request body
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

fn default_max_tokens() -> Option<u32> {
    Some(1024)
}

impl ModelConfig {
    /// @ai:intent Create a model config with default sampling parameters
    /// @ai:pre provider and model are non-empty
    /// @ai:effects pure
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Result<Self> {
        let provider = provider.into();
        let model = model.into();

        if provider.trim().is_empty() || model.trim().is_empty() {
            return Err(Error::InvalidInput(
                "model provider and name must be non-empty".to_string(),
            ));
        }

        Ok(Self {
            provider,
            model,
            temperature: 0.0,
            max_tokens: default_max_tokens(),
            params: serde_json::Map::new(),
        })
    }

    /// @ai:intent Canonical "provider:model" identifier
    /// @ai:effects pure
    pub fn id(&self) -> String {
        format!("{}:{}", self.provider, self.model)
    }

    /// @ai:intent Validate the non-empty invariant
    /// @ai:effects pure
    pub fn validate(&self) -> Result<()> {
        if self.provider.trim().is_empty() || self.model.trim().is_empty() {
            return Err(Error::InvalidInput(
                "model provider and name must be non-empty".to_string(),
            ));
        }
        Ok(())
    }
}

impl PartialEq for ModelConfig {
    fn eq(&self, other: &Self) -> bool {
        self.provider == other.provider && self.model == other.model
    }
}

impl Eq for ModelConfig {}

impl std::hash::Hash for ModelConfig {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.provider.hash(state);
        self.model.hash(state);
    }
}

impl std::fmt::Display for ModelConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.provider, self.model)
    }
}

impl FromStr for ModelConfig {
    type Err = Error;

    /// @ai:intent Parse a "provider:model" argument string
    /// @ai:effects pure
    fn from_str(s: &str) -> Result<Self> {
        match s.split_once(':') {
            Some((provider, model)) if !provider.trim().is_empty() && !model.trim().is_empty() => {
                ModelConfig::new(provider, model)
            }
            _ => Err(Error::InvalidInput(format!(
                "Invalid model format: {}. Expected 'provider:model' (e.g., 'openai:gpt-4')",
                s
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_parse_provider_model() {
        let config: ModelConfig = "openai:gpt-4".parse().unwrap();
        assert_eq!(config.provider, "openai");
        assert_eq!(config.model, "gpt-4");
        assert_eq!(config.temperature, 0.0);
        assert_eq!(config.max_tokens, Some(1024));
    }

    #[test]
    fn test_parse_model_with_colon_in_name() {
        let config: ModelConfig = "ollama:llama3:8b".parse().unwrap();
        assert_eq!(config.provider, "ollama");
        assert_eq!(config.model, "llama3:8b");
    }

    #[test]
    fn test_parse_rejects_missing_colon() {
        let result: crate::error::Result<ModelConfig> = "badformat".parse();
        assert!(matches!(result, Err(Error::InvalidInput(_))));
    }

    #[test]
    fn test_parse_rejects_empty_parts() {
        assert!("openai:".parse::<ModelConfig>().is_err());
        assert!(":gpt-4".parse::<ModelConfig>().is_err());
        assert!(":".parse::<ModelConfig>().is_err());
    }

    #[test]
    fn test_new_rejects_empty_fields() {
        assert!(ModelConfig::new("", "gpt-4").is_err());
        assert!(ModelConfig::new("openai", "  ").is_err());
    }

    #[test]
    fn test_display_renders_id() {
        let config = ModelConfig::new("anthropic", "claude-3-opus").unwrap();
        assert_eq!(config.to_string(), "anthropic:claude-3-opus");
        assert_eq!(config.id(), "anthropic:claude-3-opus");
    }

    #[test]
    fn test_equality_ignores_sampling_parameters() {
        let mut a = ModelConfig::new("openai", "gpt-4").unwrap();
        let b = ModelConfig::new("openai", "gpt-4").unwrap();
        a.temperature = 0.7;
        a.max_tokens = Some(256);
        assert_eq!(a, b);
    }
}
