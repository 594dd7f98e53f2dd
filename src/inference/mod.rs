pub mod provider;
pub mod providers;

pub use provider::{GenerationProvider, ProviderError, provider_for};
pub use providers::{ClaudeProvider, GeminiProvider, OpenAiProvider};
