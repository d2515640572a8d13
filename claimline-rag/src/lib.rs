//! Retrieval-augmented question answering for accident reports.
//!
//! `RagService::connect` wires three external collaborators — an embedding
//! generator, a vector index, and a chat-completion model — into a service
//! with two operations: `add_document` grows the retrievable corpus and
//! `query` answers a question from retrieved context, condensing follow-ups
//! against prior turns first.

pub mod chat_model;
pub mod embeddings;
pub mod errors;
pub mod index;
pub mod models;
pub mod prompt;
pub mod service;

pub use chat_model::{ChatClient, ChatModel};
pub use embeddings::EmbeddingClient;
pub use errors::{RagError, RagResult};
pub use index::VectorIndexClient;
pub use models::{ConversationTurn, Document, DocumentMetadata, QueryAnswer, ScoredDocument};
pub use service::{RagCell, RagService};
