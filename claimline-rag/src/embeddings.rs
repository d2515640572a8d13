use std::time::Duration;

use claimline_core::RagSettings;
use serde::Deserialize;

use crate::errors::{RagError, RagResult};

/// Client for the external embedding generator.
#[derive(Debug, Clone)]
pub struct EmbeddingClient {
    base_url: String,
    model: String,
    expected_dim: Option<usize>,
    client: reqwest::Client,
}

impl EmbeddingClient {
    pub fn new(settings: &RagSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: settings.embedding_url.trim_end_matches('/').to_string(),
            model: settings.embedding_model.clone(),
            expected_dim: settings.embedding_dim,
            client,
        }
    }

    pub async fn embed_batch(&self, inputs: &[String]) -> RagResult<Vec<Vec<f32>>> {
        if inputs.is_empty() {
            return Ok(Vec::new());
        }

        let url = format!("{}/api/embed", self.base_url);
        let body = EmbedRequest {
            model: self.model.clone(),
            input: inputs.to_vec(),
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            return Err(RagError::Api {
                status: status.as_u16(),
                message: format!("embedding request failed: {text}"),
            });
        }

        let payload: EmbedResponse = response.json().await?;

        let vectors = if let Some(embeddings) = payload.embeddings {
            embeddings
        } else if let Some(embedding) = payload.embedding {
            vec![embedding]
        } else {
            return Err(RagError::Embedding(
                "embedding response missing vectors".to_string(),
            ));
        };

        if vectors.len() != inputs.len() {
            return Err(RagError::Embedding(format!(
                "embedding count mismatch: sent {}, got {}",
                inputs.len(),
                vectors.len()
            )));
        }

        if let Some(expected) = self.expected_dim {
            for vector in &vectors {
                if vector.len() != expected {
                    return Err(RagError::EmbeddingDimMismatch {
                        expected,
                        actual: vector.len(),
                    });
                }
            }
        }

        Ok(vectors)
    }

    pub async fn embed_one(&self, input: &str) -> RagResult<Vec<f32>> {
        let inputs = [input.to_string()];
        let mut vectors = self.embed_batch(&inputs).await?;
        vectors
            .pop()
            .ok_or_else(|| RagError::Embedding("embedding response was empty".to_string()))
    }
}

#[derive(Debug, Clone, serde::Serialize)]
struct EmbedRequest {
    model: String,
    input: Vec<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct EmbedResponse {
    embeddings: Option<Vec<Vec<f32>>>,
    embedding: Option<Vec<f32>>,
}
