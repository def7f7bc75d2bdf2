mod anthropic;
mod factory;
mod open_ai;
mod prompt;

pub use anthropic::AnthropicProvider;
pub use factory::ProviderFactory;
pub use open_ai::OpenAIProvider;
pub use prompt::{build_extraction_prompt, INGREDIENT_EXTRACTION_PROMPT};

use crate::error::ImportError;
use async_trait::async_trait;

/// A text generation service
#[async_trait]
pub trait LlmProvider: Send + Sync {
    /// Get the provider name (e.g., "openai", "anthropic")
    fn provider_name(&self) -> &str;

    /// Send a single prompt and return the completion text.
    ///
    /// One blocking round trip, no retry.
    async fn complete(&self, prompt: &str, max_tokens: u32) -> Result<String, ImportError>;
}
