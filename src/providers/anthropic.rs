use crate::config::ProviderConfig;
use crate::error::ImportError;
use crate::providers::LlmProvider;
use async_trait::async_trait;
use log::debug;
use reqwest::header::HeaderValue;
use reqwest::Client;
use serde_json::{json, Value};
use std::time::Duration;

const DEFAULT_BASE_URL: &str = "https://api.anthropic.com";
const DEFAULT_MODEL: &str = "claude-3-5-haiku-20241022";

pub struct AnthropicProvider {
    client: Client,
    api_key: String,
    base_url: String,
    model: String,
    temperature: f32,
}

impl AnthropicProvider {
    /// Create a new Anthropic provider from configuration
    pub fn new(config: &ProviderConfig, timeout: Option<Duration>) -> Result<Self, ImportError> {
        // Try config first, then fall back to environment variable
        let api_key = config
            .api_key
            .clone()
            .or_else(|| std::env::var("ANTHROPIC_API_KEY").ok())
            .ok_or_else(|| {
                ImportError::ProviderUnavailable(
                    "ANTHROPIC_API_KEY not found in config or environment".to_string(),
                )
            })?;

        let client = Client::builder()
            .timeout(timeout.unwrap_or(Duration::from_secs(30)))
            .build()?;

        Ok(AnthropicProvider {
            client,
            api_key,
            base_url: config
                .base_url
                .clone()
                .unwrap_or_else(|| DEFAULT_BASE_URL.to_string()),
            model: config
                .model
                .clone()
                .unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            temperature: config.temperature,
        })
    }

    #[doc(hidden)]
    pub fn with_base_url(api_key: String, base_url: String, model: String) -> Self {
        AnthropicProvider {
            client: Client::new(),
            api_key,
            base_url,
            model,
            temperature: 0.0,
        }
    }
}

#[async_trait]
impl LlmProvider for AnthropicProvider {
    fn provider_name(&self) -> &str {
        "anthropic"
    }

    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ImportError> {
        let api_key = HeaderValue::from_str(&self.api_key)?;
        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url.trim_end_matches('/')))
            .header("x-api-key", api_key)
            .header("anthropic-version", "2023-06-01")
            .json(&json!({
                "model": self.model,
                "max_tokens": max_tokens,
                "temperature": self.temperature,
                "messages": [
                    {
                        "role": "user",
                        "content": prompt
                    }
                ]
            }))
            .send()
            .await
            .map_err(|e| ImportError::GenerationError(e.to_string()))?;

        let response_body: Value = response
            .json()
            .await
            .map_err(|e| ImportError::GenerationError(e.to_string()))?;
        debug!("Anthropic response: {:?}", response_body);

        // Check for API error response
        if let Some(error) = response_body.get("error") {
            let error_type = error["type"].as_str().unwrap_or("unknown");
            let error_message = error["message"].as_str().unwrap_or("Unknown error");
            return Err(ImportError::GenerationError(format!(
                "Anthropic API error ({}): {}",
                error_type, error_message
            )));
        }

        let completion = response_body["content"][0]["text"]
            .as_str()
            .ok_or_else(|| {
                ImportError::GenerationError(
                    "Failed to extract content from Anthropic response".to_string(),
                )
            })?
            .trim()
            .to_string();

        Ok(completion)
    }
}
