//! Chat-completion collaborator and the seam used to script it in tests.

use std::time::Duration;

use async_trait::async_trait;
use claimline_core::RagSettings;
use serde::{Deserialize, Serialize};

use crate::errors::{RagError, RagResult};

/// A chat-completion model that turns a rendered prompt into text.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Model identifier, for logging.
    fn model_id(&self) -> &str;

    /// Complete a single rendered prompt.
    async fn complete(&self, prompt: &str) -> RagResult<String>;
}

/// OpenAI-compatible chat completions client.
#[derive(Debug, Clone)]
pub struct ChatClient {
    http_client: reqwest::Client,
    api_key: Option<String>,
    model: String,
    base_url: String,
    temperature: f32,
    max_tokens: u32,
}

impl ChatClient {
    pub fn new(settings: &RagSettings) -> Self {
        let http_client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            http_client,
            api_key: settings.chat_api_key.clone(),
            model: settings.chat_model.clone(),
            base_url: settings.chat_url.trim_end_matches('/').to_string(),
            temperature: settings.temperature,
            max_tokens: settings.max_tokens,
        }
    }
}

#[async_trait]
impl ChatModel for ChatClient {
    fn model_id(&self) -> &str {
        &self.model
    }

    async fn complete(&self, prompt: &str) -> RagResult<String> {
        let url = format!("{}/v1/chat/completions", self.base_url);
        let body = ChatCompletionsRequest {
            model: self.model.clone(),
            messages: vec![PromptMessage {
                role: "user".to_string(),
                content: prompt.to_string(),
            }],
            temperature: self.temperature,
            max_tokens: self.max_tokens,
        };

        let mut request = self.http_client.post(&url).json(&body);
        if let Some(api_key) = &self.api_key {
            request = request.bearer_auth(api_key);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            return Err(RagError::Api {
                status: status.as_u16(),
                message: format!("chat completion failed: {message}"),
            });
        }

        let payload: ChatCompletionsResponse = response.json().await?;
        payload
            .choices
            .into_iter()
            .next()
            .map(|choice| choice.message.content)
            .ok_or(RagError::EmptyCompletion)
    }
}

/// Request body for the chat completions API
#[derive(Debug, Serialize)]
struct ChatCompletionsRequest {
    model: String,
    messages: Vec<PromptMessage>,
    temperature: f32,
    max_tokens: u32,
}

#[derive(Debug, Serialize, Deserialize)]
struct PromptMessage {
    role: String,
    content: String,
}

#[derive(Debug, Deserialize)]
struct ChatCompletionsResponse {
    choices: Vec<Choice>,
}

#[derive(Debug, Deserialize)]
struct Choice {
    message: PromptMessage,
}
