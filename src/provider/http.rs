//! @ai:module:intent OpenAI-compatible HTTP client for model execution
//! @ai:module:layer infrastructure
//! @ai:module:public_api HttpProvider
//! @ai:module:stateless false

use crate::config::ProviderSettings;
use crate::error::{Error, Result};
use crate::model::ModelConfig;
use crate::provider::rate_limiter::RateLimiter;
use crate::provider::{ModelProvider, ProviderResponse};
use crate::suite::Record;
use serde::Deserialize;

/// @ai:intent Chat-completions response body
#[derive(Debug, Deserialize)]
struct ChatResponse {
    choices: Vec<ChatChoice>,
    #[serde(default)]
    usage: Option<ChatUsage>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessage,
}

#[derive(Debug, Deserialize)]
struct ChatMessage {
    #[serde(default)]
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatUsage {
    #[serde(default)]
    prompt_tokens: Option<u32>,
    #[serde(default)]
    completion_tokens: Option<u32>,
}

/// @ai:intent Rate-limited client for any OpenAI-compatible chat endpoint
///
/// Covers hosted APIs and local servers (llama.cpp, vLLM, Ollama) through a
/// configurable base URL. The API key is optional so unauthenticated local
/// servers work out of the box.
pub struct HttpProvider {
    client: reqwest::Client,
    settings: ProviderSettings,
    rate_limiter: RateLimiter,
    api_key: Option<String>,
}

impl HttpProvider {
    /// @ai:intent Create a provider from settings, reading the API key from the environment
    /// @ai:effects env
    pub fn new(settings: ProviderSettings) -> Result<Self> {
        let api_key = std::env::var(&settings.api_key_env).ok();

        if api_key.is_none() {
            tracing::warn!(
                "{} not set; sending unauthenticated requests to {}",
                settings.api_key_env,
                settings.base_url
            );
        }

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(settings.timeout_secs))
            .build()
            .map_err(|e| Error::Provider(format!("failed to create HTTP client: {}", e)))?;

        let rate_limiter = RateLimiter::new(settings.requests_per_minute);

        Ok(Self {
            client,
            settings,
            rate_limiter,
            api_key,
        })
    }
}

/// @ai:intent Render one record as "field: value" lines in field order
/// @ai:effects pure
fn render_record(record: &Record) -> String {
    record
        .iter()
        .map(|(key, value)| format!("{}: {}", key, value))
        .collect::<Vec<_>>()
        .join("\n")
}

/// @ai:intent Render the user prompt: few-shot examples then the input record
/// @ai:effects pure
fn render_user_prompt(examples: &[Record], input: &Record) -> String {
    let mut sections: Vec<String> = examples.iter().map(render_record).collect();
    sections.push(render_record(input));
    sections.retain(|s| !s.is_empty());
    sections.join("\n\n")
}

/// @ai:intent Build the chat-completions request body, merging model params
/// @ai:effects pure
fn build_body(model: &ModelConfig, instructions: &str, prompt: &str) -> serde_json::Value {
    let mut body = serde_json::json!({
        "model": model.model,
        "temperature": model.temperature,
        "messages": [
            { "role": "system", "content": instructions },
            { "role": "user", "content": prompt },
        ],
    });

    if let Some(object) = body.as_object_mut() {
        if let Some(max_tokens) = model.max_tokens {
            object.insert("max_tokens".to_string(), max_tokens.into());
        }

        for (key, value) in &model.params {
            object.insert(key.clone(), value.clone());
        }
    }

    body
}

impl ModelProvider for HttpProvider {
    /// @ai:intent Execute one chat completion for a task input
    /// @ai:effects network
    async fn generate(
        &self,
        model: &ModelConfig,
        instructions: &str,
        examples: &[Record],
        input: &Record,
    ) -> Result<ProviderResponse> {
        self.rate_limiter.wait().await;

        let prompt = render_user_prompt(examples, input);
        let body = build_body(model, instructions, &prompt);
        let url = format!("{}/chat/completions", self.settings.base_url.trim_end_matches('/'));

        let mut request = self.client.post(&url).json(&body);
        if let Some(key) = &self.api_key {
            request = request.bearer_auth(key);
        }

        let response = request
            .send()
            .await
            .map_err(|e| Error::Provider(format!("request to {} failed: {}", url, e)))?;

        let status = response.status();
        if !status.is_success() {
            let detail = response.text().await.unwrap_or_default();
            return Err(Error::Provider(format!(
                "provider returned {} for model {}: {}",
                status,
                model.id(),
                detail
            )));
        }

        let chat: ChatResponse = response
            .json()
            .await
            .map_err(|e| Error::Provider(format!("failed to parse provider response: {}", e)))?;

        let content = chat
            .choices
            .into_iter()
            .next()
            .map(|c| c.message.content)
            .ok_or_else(|| {
                Error::Provider(format!("provider returned no choices for {}", model.id()))
            })?;

        let (input_tokens, output_tokens) = chat
            .usage
            .map(|u| (u.prompt_tokens, u.completion_tokens))
            .unwrap_or((None, None));

        Ok(ProviderResponse {
            content,
            input_tokens,
            output_tokens,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use std::collections::BTreeMap;

    fn record(pairs: &[(&str, &str)]) -> Record {
        pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect()
    }

    #[test]
    fn test_render_record_orders_fields() {
        let rec = record(&[("question", "2 + 2"), ("context", "arithmetic")]);
        assert_eq!(render_record(&rec), "context: arithmetic\nquestion: 2 + 2");
    }

    #[test]
    fn test_render_user_prompt_examples_then_input() {
        let examples = vec![record(&[("question", "1 + 1"), ("answer", "2")])];
        let input = record(&[("question", "2 + 2")]);

        let prompt = render_user_prompt(&examples, &input);
        assert_eq!(prompt, "answer: 2\nquestion: 1 + 1\n\nquestion: 2 + 2");
    }

    #[test]
    fn test_render_user_prompt_skips_empty_synthetic_input() {
        let prompt = render_user_prompt(&[], &BTreeMap::new());
        assert_eq!(prompt, "");
    }

    #[test]
    fn test_build_body_merges_model_params() {
        let mut model = ModelConfig::new("openai", "gpt-4").unwrap();
        model.temperature = 0.7;
        model.max_tokens = Some(256);
        model
            .params
            .insert("top_p".to_string(), serde_json::json!(0.9));

        let body = build_body(&model, "Answer briefly.", "question: 2 + 2");

        assert_eq!(body["model"], "gpt-4");
        assert_eq!(body["temperature"], 0.7);
        assert_eq!(body["max_tokens"], 256);
        assert_eq!(body["top_p"], 0.9);
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][1]["content"], "question: 2 + 2");
    }

    #[test]
    fn test_build_body_omits_max_tokens_when_unset() {
        let mut model = ModelConfig::new("openai", "gpt-4").unwrap();
        model.max_tokens = None;

        let body = build_body(&model, "", "");
        assert!(body.get("max_tokens").is_none());
    }
}
