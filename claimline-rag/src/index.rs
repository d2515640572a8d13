//! Client for the external vector index.
//!
//! Wire format follows the index service's REST surface: a collection holds
//! points `{ id, vector, payload }`, and similarity search posts a query
//! vector to get scored points back. The payload carries the document text
//! and metadata so retrieval needs no second lookup.

use std::time::Duration;

use claimline_core::RagSettings;
use serde::{Deserialize, Serialize};

use crate::errors::{RagError, RagResult};
use crate::models::{Document, DocumentMetadata, ScoredDocument};

#[derive(Debug, Clone)]
pub struct VectorIndexClient {
    base_url: String,
    collection: String,
    client: reqwest::Client,
}

impl VectorIndexClient {
    pub fn new(settings: &RagSettings) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()
            .expect("Failed to build HTTP client");

        Self {
            base_url: settings.index_url.trim_end_matches('/').to_string(),
            collection: settings.collection.clone(),
            client,
        }
    }

    pub fn collection(&self) -> &str {
        &self.collection
    }

    /// True when the collection already exists on the index service.
    pub async fn collection_exists(&self) -> RagResult<bool> {
        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let response = self.client.get(&url).send().await?;
        let status = response.status();

        if status.is_success() {
            return Ok(true);
        }
        if status == reqwest::StatusCode::NOT_FOUND {
            return Ok(false);
        }

        let message = response.text().await.unwrap_or_default();
        Err(RagError::Api {
            status: status.as_u16(),
            message: format!("collection lookup failed: {message}"),
        })
    }

    /// Create the collection for vectors of the given dimension.
    pub async fn create_collection(&self, dim: usize) -> RagResult<()> {
        let url = format!("{}/collections/{}", self.base_url, self.collection);
        let body = CreateCollectionRequest {
            vectors: VectorParams {
                size: dim,
                distance: "Cosine".to_string(),
            },
        };

        let response = self.client.put(&url).json(&body).send().await?;
        check("collection create failed", response).await?;
        Ok(())
    }

    /// Upsert one embedded document.
    pub async fn upsert(&self, document: &Document, vector: &[f32]) -> RagResult<()> {
        let url = format!("{}/collections/{}/points", self.base_url, self.collection);
        let body = UpsertRequest {
            points: vec![Point {
                id: document.id.clone(),
                vector: vector.to_vec(),
                payload: PointPayload {
                    content: document.content.clone(),
                    metadata: document.metadata.clone(),
                },
            }],
        };

        let response = self.client.put(&url).json(&body).send().await?;
        check("upsert failed", response).await?;
        Ok(())
    }

    /// Nearest-neighbour search over the collection.
    pub async fn similarity_search(
        &self,
        vector: &[f32],
        limit: usize,
    ) -> RagResult<Vec<ScoredDocument>> {
        let url = format!(
            "{}/collections/{}/points/search",
            self.base_url, self.collection
        );
        let body = SearchRequest {
            vector: vector.to_vec(),
            limit,
            with_payload: true,
        };

        let response = self.client.post(&url).json(&body).send().await?;
        let response = check("similarity search failed", response).await?;
        let payload: SearchResponse = response.json().await?;

        Ok(payload
            .result
            .into_iter()
            .map(|point| ScoredDocument {
                document: Document {
                    id: point.id,
                    content: point.payload.content,
                    metadata: point.payload.metadata,
                },
                score: point.score,
            })
            .collect())
    }
}

async fn check(context: &str, response: reqwest::Response) -> RagResult<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }
    let message = response.text().await.unwrap_or_default();
    Err(RagError::Api {
        status: status.as_u16(),
        message: format!("{context}: {message}"),
    })
}

#[derive(Debug, Serialize)]
struct CreateCollectionRequest {
    vectors: VectorParams,
}

#[derive(Debug, Serialize)]
struct VectorParams {
    size: usize,
    distance: String,
}

#[derive(Debug, Serialize)]
struct UpsertRequest {
    points: Vec<Point>,
}

#[derive(Debug, Serialize)]
struct Point {
    id: String,
    vector: Vec<f32>,
    payload: PointPayload,
}

#[derive(Debug, Serialize, Deserialize)]
struct PointPayload {
    content: String,
    #[serde(default)]
    metadata: DocumentMetadata,
}

#[derive(Debug, Serialize)]
struct SearchRequest {
    vector: Vec<f32>,
    limit: usize,
    with_payload: bool,
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    result: Vec<ScoredPoint>,
}

#[derive(Debug, Deserialize)]
struct ScoredPoint {
    id: String,
    score: f32,
    payload: PointPayload,
}
