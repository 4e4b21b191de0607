//! LLM provider abstraction for recipe generation.
//!
//! Providers turn a prompt into text. [`GeminiProvider`] talks to Google's
//! Generative Language API; [`FakeProvider`] answers from canned responses so
//! tests run without network access.

mod fake;
mod gemini;

pub use fake::FakeProvider;
pub use gemini::{GeminiProvider, DEFAULT_GEMINI_BASE_URL, DEFAULT_GEMINI_MODEL};

use async_trait::async_trait;
use std::fmt;
use thiserror::Error;

use crate::config::{GenerationConfig, ProviderKind};

/// Error type for LLM operations.
#[derive(Debug, Error)]
pub enum LlmError {
    #[error("API request failed: {0}")]
    RequestFailed(String),

    #[error("API returned error: {status} - {message}")]
    ApiError { status: u16, message: String },

    #[error("Failed to parse response: {0}")]
    ParseError(String),

    #[error("Rate limited, retry after {retry_after_secs:?} seconds")]
    RateLimited { retry_after_secs: Option<u64> },

    #[error("Provider not configured: {0}")]
    NotConfigured(String),
}

/// Trait for LLM providers.
///
/// Implementations are stateless and thread-safe; each call is one request
/// returning the model's text.
#[async_trait]
pub trait LlmProvider: Send + Sync + fmt::Debug {
    /// Send a prompt to the LLM and get a text response.
    async fn complete(&self, prompt: &str) -> Result<String, LlmError>;

    /// Provider name ("gemini", "fake").
    fn provider_name(&self) -> &'static str;

    fn model_name(&self) -> &str;
}

/// Build the provider selected by `config`.
pub fn create_provider(config: &GenerationConfig) -> Result<Box<dyn LlmProvider>, LlmError> {
    match config.provider {
        ProviderKind::Fake => Ok(Box::new(FakeProvider::default())),
        ProviderKind::Gemini => {
            let api_key = config
                .api_key
                .clone()
                .ok_or_else(|| LlmError::NotConfigured("GEMINI_API_KEY not set".to_string()))?;
            let provider = GeminiProvider::new(api_key, config.model.clone())
                .with_base_url(&config.base_url);
            tracing::debug!(model = %config.model, "using gemini provider");
            Ok(Box::new(provider))
        }
    }
}
