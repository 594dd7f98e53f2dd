//! OpenAI provider binding for the Chat Completions API.
//!
//! Also serves requests naming the `chatgpt` alias; dispatch collapses the
//! two names before this binding is constructed.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;

use crate::inference::{GenerationProvider, ProviderError};

const OPENAI_MODEL: &str = "gpt-4o-mini";
const MAX_TOKENS: u32 = 2048;

pub const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Serialize, Debug)]
struct ChatMessage {
    role: &'static str,
    content: String,
}

#[derive(Serialize, Debug)]
struct ChatCompletionsRequest {
    model: &'static str,
    messages: Vec<ChatMessage>,
    max_tokens: u32,
}

fn build_request(prompt: &str) -> ChatCompletionsRequest {
    ChatCompletionsRequest {
        model: OPENAI_MODEL,
        messages: vec![ChatMessage {
            role: "user",
            content: prompt.to_string(),
        }],
        max_tokens: MAX_TOKENS,
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// OpenAI provider (also answers for the `chatgpt` alias).
pub struct OpenAiProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl OpenAiProvider {
    /// Creates a new OpenAI provider.
    ///
    /// # Arguments
    /// * `api_key` - OpenAI API key
    /// * `base_url` - Optional custom base URL (defaults to OpenAI's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_OPENAI_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GenerationProvider for OpenAiProvider {
    fn name(&self) -> &str {
        "openai"
    }

    async fn generate(&self, prompt: &str) -> Result<serde_json::Value, ProviderError> {
        let request = build_request(prompt);

        debug!(
            "OpenAI request: model={}, prompt_len={}",
            OPENAI_MODEL,
            prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/v1/chat/completions", self.base_url))
            .bearer_auth(&self.api_key)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        debug!("OpenAI response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("OpenAI API error: {} - {}", status, message);
            return Err(ProviderError::Api {
                provider: "openai".to_string(),
                status: status.as_u16(),
                message,
            });
        }

        response
            .json::<serde_json::Value>()
            .await
            .map_err(|e| ProviderError::Parse(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_carries_fixed_model_and_ceiling() {
        let request = build_request("draft a cold open");
        let json = serde_json::to_string(&request).unwrap();
        assert!(json.contains(r#""model":"gpt-4o-mini"#));
        assert!(json.contains(r#""max_tokens":2048"#));
        assert!(json.contains(r#""content":"draft a cold open"#));
    }

    #[test]
    fn test_default_base_url() {
        let provider = OpenAiProvider::new("key".to_string(), None);
        assert_eq!(provider.base_url, DEFAULT_OPENAI_BASE_URL);
    }
}
