//! @ai:module:intent Model provider interface and test double
//! @ai:module:layer infrastructure
//! @ai:module:public_api ModelProvider, ProviderResponse, MockProvider

pub mod http;
pub mod rate_limiter;

pub use http::HttpProvider;
pub use rate_limiter::RateLimiter;

use crate::error::{Error, Result};
use crate::model::ModelConfig;
use crate::suite::Record;
use std::collections::{HashMap, HashSet};

/// @ai:intent Output of one model invocation
#[derive(Debug, Clone)]
pub struct ProviderResponse {
    pub content: String,
    pub input_tokens: Option<u32>,
    pub output_tokens: Option<u32>,
}

/// @ai:intent Capability that executes a model on one task input
///
/// The returned future is `Send` so the runner can dispatch evaluations
/// onto worker tasks.
pub trait ModelProvider: Send + Sync {
    /// @ai:intent Generate an output for (model, instructions, examples, input)
    fn generate(
        &self,
        model: &ModelConfig,
        instructions: &str,
        examples: &[Record],
        input: &Record,
    ) -> impl std::future::Future<Output = Result<ProviderResponse>> + Send;
}

/// @ai:intent Mock provider for tests: canned responses keyed by input
pub struct MockProvider {
    default_response: String,
    responses: HashMap<String, String>,
    fail_on: HashSet<String>,
}

impl MockProvider {
    /// @ai:intent Create a mock that returns a fixed response
    /// @ai:effects pure
    pub fn new(default_response: impl Into<String>) -> Self {
        Self {
            default_response: default_response.into(),
            responses: HashMap::new(),
            fail_on: HashSet::new(),
        }
    }

    /// @ai:intent Program a response for a specific input key
    /// @ai:effects pure
    pub fn with_response(mut self, key: impl Into<String>, response: impl Into<String>) -> Self {
        self.responses.insert(key.into(), response.into());
        self
    }

    /// @ai:intent Program a provider failure for a specific input key
    /// @ai:effects pure
    pub fn failing_on(mut self, key: impl Into<String>) -> Self {
        self.fail_on.insert(key.into());
        self
    }

    /// @ai:intent Key an input record by its field values
    /// @ai:effects pure
    pub fn input_key(input: &Record) -> String {
        input.values().cloned().collect::<Vec<_>>().join("|")
    }
}

impl ModelProvider for MockProvider {
    /// @ai:intent Return the programmed response for the input
    /// @ai:effects pure
    async fn generate(
        &self,
        _model: &ModelConfig,
        _instructions: &str,
        _examples: &[Record],
        input: &Record,
    ) -> Result<ProviderResponse> {
        let key = Self::input_key(input);

        if self.fail_on.contains(&key) {
            return Err(Error::Provider(format!(
                "mock provider failure for input '{}'",
                key
            )));
        }

        let content = self
            .responses
            .get(&key)
            .cloned()
            .unwrap_or_else(|| self.default_response.clone());

        Ok(ProviderResponse {
            content,
            input_tokens: Some(100),
            output_tokens: Some(200),
        })
    }
}
