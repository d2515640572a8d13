//! Session chat orchestration.

use claimline_core::{ChatMessage, MessageRole};
use claimline_db::{DbPool, SessionRepository};
use tracing::info;

use crate::providers::{Provider, ProviderError};
use crate::token_budget::trim_to_budget;

/// Reply-size budget requested from the provider.
pub const MAX_COMPLETION_TOKENS: u32 = 800;
/// Upper bound on estimated prompt tokens per request.
pub const TOKEN_LIMIT: u32 = 50_000;

/// Errors that can occur while relaying a chat turn
#[derive(Debug, thiserror::Error)]
pub enum ChatError {
    #[error("Database error: {0}")]
    Database(#[from] claimline_db::DbError),

    #[error("Provider error: {0}")]
    Provider(#[from] ProviderError),

    #[error("Session not found")]
    SessionNotFound,
}

/// High-level chat interface over a stored session.
pub struct SessionChat;

impl SessionChat {
    /// Relay one user turn.
    ///
    /// Verifies the session, persists the user message, sends the trimmed
    /// history to the provider, then persists and returns the assistant
    /// reply. The user message stays persisted even when the provider call
    /// fails, so a retried turn never loses what the user said.
    pub async fn send(
        db: &DbPool,
        provider: &dyn Provider,
        session_id: &str,
        user_input: &str,
    ) -> Result<String, ChatError> {
        SessionRepository::get_by_id(db.pool(), session_id)
            .await?
            .ok_or(ChatError::SessionNotFound)?;

        SessionRepository::add_message(db.pool(), session_id, MessageRole::User, user_input)
            .await?;

        let stored = SessionRepository::get_messages(db.pool(), session_id).await?;
        let mut history: Vec<ChatMessage> = stored
            .into_iter()
            .map(|msg| ChatMessage::new(msg.role, msg.content))
            .collect();
        trim_to_budget(&mut history, MAX_COMPLETION_TOKENS, TOKEN_LIMIT);

        let system = match history.first() {
            Some(msg) if msg.role == MessageRole::System => Some(history.remove(0).content),
            _ => None,
        };

        info!(
            "[session:{}] relaying {} message(s) to {}",
            session_id,
            history.len(),
            provider.name()
        );

        let reply = provider.send_conversation(system.as_deref(), &history).await?;

        SessionRepository::add_message(db.pool(), session_id, MessageRole::Assistant, &reply)
            .await?;

        Ok(reply)
    }
}
