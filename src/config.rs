//! @ai:module:intent Configuration structs for benchmark runs
//! @ai:module:layer infrastructure
//! @ai:module:public_api BenchmarkConfig, RunOptions, ProviderSettings
//! @ai:module:stateless true

use serde::{Deserialize, Serialize};

/// @ai:intent Main configuration for the benchmark CLI
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BenchmarkConfig {
    #[serde(default)]
    pub run: RunOptions,
    #[serde(default)]
    pub provider: ProviderSettings,
}

/// @ai:intent Recognized options for a benchmark run
///
/// Replaces open-ended keyword arguments with an explicit structure:
/// concurrency selection, worker bound, and a provider-specific passthrough
/// mapping merged into every model's request parameters.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RunOptions {
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Concurrency bound; defaults to available execution units when unset
    #[serde(default)]
    pub num_workers: Option<usize>,
    /// Provider-specific passthrough applied to every model
    #[serde(default)]
    pub params: serde_json::Map<String, serde_json::Value>,
}

/// @ai:intent Settings for the HTTP model provider
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProviderSettings {
    /// Base URL of an OpenAI-compatible chat-completions API
    #[serde(default = "default_base_url")]
    pub base_url: String,
    /// Environment variable holding the API key (unset is allowed for local servers)
    #[serde(default = "default_api_key_env")]
    pub api_key_env: String,
    #[serde(default = "default_rate_limit")]
    pub requests_per_minute: u32,
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            num_workers: None,
            params: serde_json::Map::new(),
        }
    }
}

impl Default for ProviderSettings {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            api_key_env: default_api_key_env(),
            requests_per_minute: default_rate_limit(),
            timeout_secs: default_timeout(),
        }
    }
}

fn default_parallel() -> bool {
    true
}

fn default_base_url() -> String {
    "https://api.openai.com/v1".to_string()
}

fn default_api_key_env() -> String {
    "OPENAI_API_KEY".to_string()
}

fn default_rate_limit() -> u32 {
    60
}

fn default_timeout() -> u64 {
    120
}

impl RunOptions {
    /// @ai:intent Effective worker-pool size for parallel dispatch
    /// @ai:effects pure
    pub fn effective_workers(&self) -> usize {
        self.num_workers
            .filter(|n| *n > 0)
            .unwrap_or_else(|| {
                std::thread::available_parallelism()
                    .map(|n| n.get())
                    .unwrap_or(4)
            })
    }
}

impl BenchmarkConfig {
    /// @ai:intent Load configuration from a TOML file
    /// @ai:pre path exists and is readable
    /// @ai:effects fs:read
    pub fn load(path: &std::path::Path) -> anyhow::Result<Self> {
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// @ai:intent Save configuration to a TOML file
    /// @ai:effects fs:write
    pub fn save(&self, path: &std::path::Path) -> anyhow::Result<()> {
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_run_options_defaults() {
        let options = RunOptions::default();
        assert!(options.parallel);
        assert_eq!(options.num_workers, None);
        assert!(options.params.is_empty());
        assert!(options.effective_workers() >= 1);
    }

    #[test]
    fn test_explicit_worker_bound_wins() {
        let options = RunOptions {
            num_workers: Some(3),
            ..Default::default()
        };
        assert_eq!(options.effective_workers(), 3);
    }

    #[test]
    fn test_zero_workers_falls_back_to_default() {
        let options = RunOptions {
            num_workers: Some(0),
            ..Default::default()
        };
        assert!(options.effective_workers() >= 1);
    }

    #[test]
    fn test_config_round_trip() {
        let temp = tempfile::TempDir::new().unwrap();
        let path = temp.path().join("llamabench.toml");

        let config = BenchmarkConfig {
            run: RunOptions {
                parallel: false,
                num_workers: Some(2),
                ..Default::default()
            },
            provider: ProviderSettings {
                base_url: "http://localhost:8080/v1".to_string(),
                ..Default::default()
            },
        };

        config.save(&path).unwrap();
        let loaded = BenchmarkConfig::load(&path).unwrap();

        assert!(!loaded.run.parallel);
        assert_eq!(loaded.run.num_workers, Some(2));
        assert_eq!(loaded.provider.base_url, "http://localhost:8080/v1");
    }
}
