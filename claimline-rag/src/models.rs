//! Data types for the ingestion & query flow.

use serde::{Deserialize, Serialize};

/// Structured metadata attached to an ingested document.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct DocumentMetadata {
    /// Case/claim the document belongs to.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub case_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    /// Where the text came from (upload, transcript, manual entry).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<String>,
}

impl DocumentMetadata {
    pub fn for_case(case_id: impl Into<String>) -> Self {
        Self {
            case_id: Some(case_id.into()),
            ..Default::default()
        }
    }
}

/// A document stored in the vector index. Immutable once upserted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Document {
    pub id: String,
    pub content: String,
    #[serde(default)]
    pub metadata: DocumentMetadata,
}

/// A retrieved document with its similarity score.
#[derive(Debug, Clone)]
pub struct ScoredDocument {
    pub document: Document,
    pub score: f32,
}

/// One prior (question, answer) exchange. History is append-only.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub question: String,
    pub answer: String,
}

impl ConversationTurn {
    pub fn new(question: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            answer: answer.into(),
        }
    }
}

/// Answer produced by a query, with its supporting documents.
///
/// Not persisted by the service; persistence is the caller's concern.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryAnswer {
    pub text: String,
    pub sources: Vec<Document>,
}
