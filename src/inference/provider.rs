use std::fmt;

use async_trait::async_trait;

use crate::core::config::ResolvedConfig;
use crate::inference::providers::{ClaudeProvider, GeminiProvider, OpenAiProvider};

/// Errors that can occur during provider operations.
/// Variants carry enough info to pick the right HTTP status at the boundary.
#[derive(Debug)]
pub enum ProviderError {
    /// Provider misconfigured (missing API key). Not retryable.
    Config(String),
    /// The requested model name matched no known provider.
    Unsupported(String),
    /// Network-level failure (timeout, DNS, connection refused).
    Network(String),
    /// Upstream returned a non-2xx response. Carries the raw body text.
    Api {
        provider: String,
        status: u16,
        message: String,
    },
    /// Upstream body was not valid JSON.
    Parse(String),
}

impl fmt::Display for ProviderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProviderError::Config(msg) => write!(f, "config error: {msg}"),
            ProviderError::Unsupported(name) => write!(f, "unsupported model: {name}"),
            ProviderError::Network(msg) => write!(f, "network error: {msg}"),
            ProviderError::Api {
                provider,
                status,
                message,
            } => {
                write!(f, "{provider} API error (HTTP {status}): {message}")
            }
            ProviderError::Parse(msg) => write!(f, "parse error: {msg}"),
        }
    }
}

impl std::error::Error for ProviderError {}

/// A binding to one upstream text-generation API.
///
/// Normalization happens only at this call contract, never at the payload
/// level: `generate` hands back whatever JSON the upstream produced, so
/// adding a provider requires no changes to any consumer.
#[async_trait]
pub trait GenerationProvider: Send + Sync {
    /// Returns the name of the provider.
    fn name(&self) -> &str;

    /// Forwards the prompt upstream and returns the raw JSON response body.
    async fn generate(&self, prompt: &str) -> Result<serde_json::Value, ProviderError>;
}

// Bindings hold credentials, so render only the provider name.
impl fmt::Debug for dyn GenerationProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationProvider")
            .field("name", &self.name())
            .finish()
    }
}

/// Resolves a client-supplied model name to a configured provider binding.
///
/// Matching is case-insensitive; `chatgpt` is an alias for `openai`. An
/// unknown name or a missing credential fails here, before any network
/// activity.
pub fn provider_for(
    model: &str,
    config: &ResolvedConfig,
) -> Result<Box<dyn GenerationProvider>, ProviderError> {
    match model.to_ascii_lowercase().as_str() {
        "gemini" => {
            let api_key = config
                .gemini_api_key
                .clone()
                .ok_or_else(|| ProviderError::Config("GEMINI_API_KEY is not set".to_string()))?;
            Ok(Box::new(GeminiProvider::new(
                api_key,
                Some(config.gemini_base_url.clone()),
            )))
        }
        "claude" => {
            let api_key = config
                .anthropic_api_key
                .clone()
                .ok_or_else(|| ProviderError::Config("ANTHROPIC_API_KEY is not set".to_string()))?;
            Ok(Box::new(ClaudeProvider::new(
                api_key,
                Some(config.anthropic_base_url.clone()),
            )))
        }
        "openai" | "chatgpt" => {
            let api_key = config
                .openai_api_key
                .clone()
                .ok_or_else(|| ProviderError::Config("OPENAI_API_KEY is not set".to_string()))?;
            Ok(Box::new(OpenAiProvider::new(
                api_key,
                Some(config.openai_base_url.clone()),
            )))
        }
        other => Err(ProviderError::Unsupported(other.to_string())),
    }
}
