//! The ingestion & query service.

use std::sync::{Arc, OnceLock};

use claimline_core::RagSettings;
use tracing::{debug, info};
use uuid::Uuid;

use crate::chat_model::{ChatClient, ChatModel};
use crate::embeddings::EmbeddingClient;
use crate::errors::{RagError, RagResult};
use crate::index::VectorIndexClient;
use crate::models::{ConversationTurn, Document, DocumentMetadata, QueryAnswer};
use crate::prompt;

/// Retrieval-augmented question answering over an external embedding
/// generator, vector index, and chat-completion model.
pub struct RagService {
    settings: RagSettings,
    embedder: EmbeddingClient,
    index: VectorIndexClient,
    model: Box<dyn ChatModel>,
}

impl std::fmt::Debug for RagService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RagService")
            .field("settings", &self.settings)
            .field("embedder", &self.embedder)
            .field("index", &self.index)
            .field("model", &"<dyn ChatModel>")
            .finish()
    }
}

impl RagService {
    /// Connect to the three collaborators and verify the index collection.
    ///
    /// When the expected embedding dimension is configured, a missing
    /// collection is created; otherwise it must already exist. Either way
    /// the caller gets a fully wired service or an error — there is no
    /// half-initialized state to observe.
    pub async fn connect(settings: RagSettings) -> RagResult<Self> {
        let embedder = EmbeddingClient::new(&settings);
        let index = VectorIndexClient::new(&settings);
        let model: Box<dyn ChatModel> = Box::new(ChatClient::new(&settings));

        match settings.embedding_dim {
            Some(dim) => {
                if !index.collection_exists().await? {
                    info!(
                        "Creating index collection '{}' for {}-dim vectors",
                        index.collection(),
                        dim
                    );
                    index.create_collection(dim).await?;
                }
            }
            None => {
                if !index.collection_exists().await? {
                    return Err(RagError::Api {
                        status: 404,
                        message: format!(
                            "index collection '{}' does not exist and no embedding \
                             dimension is configured to create it",
                            index.collection()
                        ),
                    });
                }
            }
        }

        Ok(Self {
            settings,
            embedder,
            index,
            model,
        })
    }

    /// Swap the chat model implementation. Tests use this to script replies.
    pub fn with_model(mut self, model: Box<dyn ChatModel>) -> Self {
        self.model = model;
        self
    }

    /// Embed `text` and upsert it, with `metadata`, into the vector index.
    ///
    /// Returns the id assigned to the stored document.
    pub async fn add_document(
        &self,
        text: &str,
        metadata: DocumentMetadata,
    ) -> RagResult<String> {
        let vector = self.embedder.embed_one(text).await?;
        let document = Document {
            id: Uuid::new_v4().to_string(),
            content: text.to_string(),
            metadata,
        };
        self.index.upsert(&document, &vector).await?;
        debug!(
            "Indexed document {} ({} chars)",
            document.id,
            document.content.len()
        );
        Ok(document.id)
    }

    /// Answer `question` from retrieved context.
    ///
    /// With prior turns present, the question is first rewritten into
    /// standalone form so retrieval sees the full referent ("what color was
    /// the car") instead of a bare follow-up ("what color was it").
    pub async fn query(
        &self,
        question: &str,
        chat_history: &[ConversationTurn],
    ) -> RagResult<QueryAnswer> {
        let standalone = if chat_history.is_empty() {
            question.to_string()
        } else {
            let condense = prompt::render_condense_prompt(chat_history, question);
            let rewritten = self.model.complete(&condense).await?;
            let rewritten = rewritten.trim();
            if rewritten.is_empty() {
                question.to_string()
            } else {
                rewritten.to_string()
            }
        };

        let vector = self.embedder.embed_one(&standalone).await?;
        let hits = self
            .index
            .similarity_search(&vector, self.settings.top_k)
            .await?;
        let sources: Vec<Document> = hits.into_iter().map(|hit| hit.document).collect();

        let qa_prompt = prompt::render_qa_prompt(&sources, &standalone);
        let text = self.model.complete(&qa_prompt).await?;

        debug!(
            "Answered query with {} source document(s) via {}",
            sources.len(),
            self.model.model_id()
        );
        Ok(QueryAnswer { text, sources })
    }
}

/// Set-once handle for sharing a connected service process-wide.
///
/// Initialization is asynchronous and happens once; callers that arrive
/// before `set` observe `RagError::NotInitialized` instead of a crash or an
/// empty answer.
pub struct RagCell {
    inner: OnceLock<Arc<RagService>>,
}

impl RagCell {
    pub const fn new() -> Self {
        Self {
            inner: OnceLock::new(),
        }
    }

    /// Install the connected service. Returns false when already set.
    pub fn set(&self, service: Arc<RagService>) -> bool {
        self.inner.set(service).is_ok()
    }

    pub fn get(&self) -> RagResult<Arc<RagService>> {
        self.inner.get().cloned().ok_or(RagError::NotInitialized)
    }
}

impl Default for RagCell {
    fn default() -> Self {
        Self::new()
    }
}
