//! Outbound model calls.
//!
//! [`CompletionClient`] is the seam between the chat orchestrator and a
//! language model. [`GeminiApiClient`] is the production implementation.

pub mod gemini_api_agent;

pub use gemini_api_agent::GeminiApiClient;

use webforge_core::error::Result;

/// Something that turns a prompt into a reply text.
#[async_trait::async_trait]
pub trait CompletionClient: Send + Sync {
    /// Short human-readable name, used in logs.
    fn name(&self) -> &str;

    /// Sends `prompt` and returns the reply text.
    async fn complete(&self, prompt: &str) -> Result<String>;
}
