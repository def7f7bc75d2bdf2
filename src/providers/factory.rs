use crate::config::{AppConfig, ProviderConfig};
use crate::error::ImportError;
use crate::providers::{AnthropicProvider, LlmProvider, OpenAIProvider};
use std::time::Duration;

pub struct ProviderFactory;

impl ProviderFactory {
    /// Create a provider instance from configuration
    pub fn create(
        provider_name: &str,
        config: &ProviderConfig,
        timeout: Option<Duration>,
    ) -> Result<Box<dyn LlmProvider>, ImportError> {
        // Validate that provider is enabled
        if !config.enabled {
            return Err(ImportError::ProviderUnavailable(format!(
                "Provider '{}' is not enabled in configuration",
                provider_name
            )));
        }

        match provider_name {
            "anthropic" => Ok(Box::new(AnthropicProvider::new(config, timeout)?)),
            "openai" => Ok(Box::new(OpenAIProvider::new(config, timeout)?)),
            _ => Err(ImportError::ProviderUnavailable(format!(
                "Unknown provider: {}",
                provider_name
            ))),
        }
    }

    /// Get the default provider from configuration.
    ///
    /// A default provider without its own config section is created with
    /// default settings, so an API key in the environment is enough.
    pub fn get_default_provider(config: &AppConfig) -> Result<Box<dyn LlmProvider>, ImportError> {
        let timeout = Some(Duration::from_secs(config.timeout));
        Self::create(
            &config.default_provider,
            &config.default_provider_config(),
            timeout,
        )
    }

    /// List all available provider names
    pub fn available_providers() -> Vec<&'static str> {
        vec!["anthropic", "openai"]
    }
}
