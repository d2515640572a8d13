//! HTTP client for the chat gateway.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::errors::{SessionError, SessionResult};

/// Request timeout for gateway calls. The gateway itself waits on a model,
/// so this bounds the worst case instead of inheriting an unbounded wait.
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the gateway's session endpoints.
#[derive(Debug, Clone)]
pub struct SessionClient {
    base_url: String,
    client: reqwest::Client,
}

impl SessionClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: base_url.into().trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Request a new session id for this user.
    pub async fn create_session(&self, user_id: Uuid) -> SessionResult<String> {
        let url = format!("{}/new_session", self.base_url);
        let body = NewSessionRequest { user_id };

        let response = self.client.post(&url).json(&body).send().await?;
        let response = check("session creation failed", response).await?;

        let payload: NewSessionResponse = response.json().await?;
        payload.session_id.ok_or(SessionError::MissingSessionId)
    }

    /// Post one user turn and return the bot's reply.
    pub async fn send_message(&self, session_id: &str, user_input: &str) -> SessionResult<String> {
        let url = format!("{}/chat", self.base_url);
        let body = ChatRequest {
            user_input: user_input.to_string(),
            session_id: session_id.to_string(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let response = check("chat request failed", response).await?;

        let payload: ChatResponse = response.json().await?;
        payload.response.ok_or(SessionError::MissingResponse)
    }
}

async fn check(context: &str, response: reqwest::Response) -> SessionResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(SessionError::Api {
        status: status.as_u16(),
        message: format!("{context}: {message}"),
    })
}

#[derive(Debug, Serialize)]
struct NewSessionRequest {
    user_id: Uuid,
}

#[derive(Debug, Deserialize)]
struct NewSessionResponse {
    session_id: Option<String>,
}

#[derive(Debug, Serialize)]
struct ChatRequest {
    user_input: String,
    session_id: String,
}

#[derive(Debug, Deserialize)]
struct ChatResponse {
    response: Option<String>,
}
