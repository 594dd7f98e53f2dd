mod claude;
mod gemini;
mod openai;

pub use claude::{ClaudeProvider, DEFAULT_ANTHROPIC_BASE_URL};
pub use gemini::{DEFAULT_GEMINI_BASE_URL, GeminiProvider};
pub use openai::{DEFAULT_OPENAI_BASE_URL, OpenAiProvider};
