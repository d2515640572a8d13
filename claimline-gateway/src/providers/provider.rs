//! Provider trait for abstracting chat-completion backends.

use claimline_core::ChatMessage;

/// Provider error types
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),
    #[error("API error: {message}")]
    ApiError { message: String },
    #[error("No content in response")]
    NoContent,
}

/// A chat-completion backend.
#[async_trait::async_trait]
pub trait Provider: Send + Sync {
    /// Provider name
    fn name(&self) -> &str;

    /// Current model
    fn model(&self) -> &str;

    /// Send a system prompt plus conversation history and get the
    /// assistant's text reply.
    async fn send_conversation(
        &self,
        system: Option<&str>,
        history: &[ChatMessage],
    ) -> Result<String, ProviderError>;
}
