//! RAG service configuration.
//!
//! Resolved (non-optional where it matters) settings for the ingestion and
//! query service. All fields carry serde defaults so a partial TOML/JSON
//! source or `..Default::default()` both work.

use serde::{Deserialize, Serialize};

/// Resolved settings for the ingestion & query service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagSettings {
    /// Embedding generator base URL.
    #[serde(default = "default_embedding_url")]
    pub embedding_url: String,
    #[serde(default = "default_embedding_model")]
    pub embedding_model: String,
    /// Expected embedding dimension. When set, the index collection is
    /// created on connect and every vector is checked against it; when
    /// unset, the collection must already exist.
    #[serde(default)]
    pub embedding_dim: Option<usize>,
    /// Vector index service base URL.
    #[serde(default = "default_index_url")]
    pub index_url: String,
    #[serde(default = "default_collection")]
    pub collection: String,
    /// Number of documents retrieved per query.
    #[serde(default = "default_top_k")]
    pub top_k: usize,
    /// OpenAI-compatible chat completion base URL.
    #[serde(default = "default_chat_url")]
    pub chat_url: String,
    #[serde(default)]
    pub chat_api_key: Option<String>,
    #[serde(default = "default_chat_model")]
    pub chat_model: String,
    #[serde(default = "default_temperature")]
    pub temperature: f32,
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,
    /// Per-request timeout for all three collaborators.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
}

impl Default for RagSettings {
    fn default() -> Self {
        Self {
            embedding_url: default_embedding_url(),
            embedding_model: default_embedding_model(),
            embedding_dim: None,
            index_url: default_index_url(),
            collection: default_collection(),
            top_k: default_top_k(),
            chat_url: default_chat_url(),
            chat_api_key: None,
            chat_model: default_chat_model(),
            temperature: default_temperature(),
            max_tokens: default_max_tokens(),
            request_timeout_secs: default_request_timeout(),
        }
    }
}

fn default_embedding_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_embedding_model() -> String {
    "nomic-embed-text".to_string()
}

fn default_index_url() -> String {
    "http://127.0.0.1:6333".to_string()
}

fn default_collection() -> String {
    "claimline_reports".to_string()
}

fn default_top_k() -> usize {
    4
}

fn default_chat_url() -> String {
    "http://127.0.0.1:11434".to_string()
}

fn default_chat_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_temperature() -> f32 {
    0.7
}

fn default_max_tokens() -> u32 {
    800
}

fn default_request_timeout() -> u64 {
    30
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_source_fills_defaults() {
        let settings: RagSettings =
            serde_json::from_str(r#"{"collection": "test_docs", "top_k": 2}"#).unwrap();
        assert_eq!(settings.collection, "test_docs");
        assert_eq!(settings.top_k, 2);
        assert_eq!(settings.embedding_model, "nomic-embed-text");
        assert_eq!(settings.request_timeout_secs, 30);
        assert!(settings.embedding_dim.is_none());
    }
}
