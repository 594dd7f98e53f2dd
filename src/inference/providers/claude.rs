//! Claude provider binding for the Anthropic Messages API.
//!
//! Authenticates with the `x-api-key` header plus a pinned
//! `anthropic-version`; the prompt is sent as a single user message.

use async_trait::async_trait;
use log::{debug, warn};
use serde::Serialize;

use crate::inference::{GenerationProvider, ProviderError};

const CLAUDE_MODEL: &str = "claude-3-5-sonnet-20241022";
const MAX_TOKENS: u32 = 2048;
const ANTHROPIC_VERSION: &str = "2023-06-01";

pub const DEFAULT_ANTHROPIC_BASE_URL: &str = "https://api.anthropic.com";

// ============================================================================
// Request Types
// ============================================================================

#[derive(Serialize, Debug)]
struct Message {
    role: &'static str,
    content: String,
}

#[derive(Serialize, Debug)]
struct MessagesRequest {
    model: &'static str,
    max_tokens: u32,
    messages: Vec<Message>,
}

fn build_request(prompt: &str) -> MessagesRequest {
    MessagesRequest {
        model: CLAUDE_MODEL,
        max_tokens: MAX_TOKENS,
        messages: vec![Message {
            role: "user",
            content: prompt.to_string(),
        }],
    }
}

// ============================================================================
// Provider Implementation
// ============================================================================

/// Anthropic Claude provider.
pub struct ClaudeProvider {
    api_key: String,
    base_url: String,
    client: reqwest::Client,
}

impl ClaudeProvider {
    /// Creates a new Claude provider.
    ///
    /// # Arguments
    /// * `api_key` - Anthropic API key
    /// * `base_url` - Optional custom base URL (defaults to Anthropic's API)
    pub fn new(api_key: String, base_url: Option<String>) -> Self {
        Self {
            api_key,
            base_url: base_url.unwrap_or_else(|| DEFAULT_ANTHROPIC_BASE_URL.to_string()),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl GenerationProvider for ClaudeProvider {
    fn name(&self) -> &str {
        "claude"
    }

    async fn generate(&self, prompt: &str) -> Result<serde_json::Value, ProviderError> {
        let request = build_request(prompt);

        debug!(
            "Claude request: model={}, prompt_len={}",
            CLAUDE_MODEL,
            prompt.len()
        );

        let response = self
            .client
            .post(format!("{}/v1/messages", self.base_url))
            .header("x-api-key", &self.api_key)
            .header("anthropic-version", ANTHROPIC_VERSION)
            .json(&request)
            .send()
            .await
            .map_err(|e| ProviderError::Network(e.to_string()))?;

        let status = response.status();
        debug!("Claude response status: {}", status);

        if !status.is_success() {
            let message = response
                .text()
                .await
                .unwrap_or_else(|_| "unknown error".to_string());
            warn!("Claude API error: {} - {}", status, message);
            return Err(ProviderError::Api {
                provider: "claude".to_string(),
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
