/// Errors from the ingestion & query service.
#[derive(Debug, thiserror::Error)]
pub enum RagError {
    /// The service was used before `connect` completed (or after it failed).
    #[error("service not initialized")]
    NotInitialized,
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    #[error("remote call failed ({status}): {message}")]
    Api { status: u16, message: String },
    #[error("embedding error: {0}")]
    Embedding(String),
    #[error("embedding dimension mismatch: expected {expected}, got {actual}")]
    EmbeddingDimMismatch { expected: usize, actual: usize },
    #[error("model returned no completion")]
    EmptyCompletion,
    #[error("json error: {0}")]
    Serialization(#[from] serde_json::Error),
}

pub type RagResult<T> = Result<T, RagError>;
