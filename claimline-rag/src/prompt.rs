//! Prompt templates for the conversational retrieval flow.
//!
//! Two templates drive a query: the condense template rewrites a follow-up
//! question into standalone form against the chat history, and the QA
//! template answers the (standalone) question from retrieved context. The
//! "say you don't know" clause is a prompt-level contract with the model,
//! not something the code can enforce.

use crate::models::{ConversationTurn, Document};

pub const CONDENSE_QUESTION_TEMPLATE: &str = "\
Given the following conversation and a follow up question, rephrase the \
follow up question to be a standalone question.

Chat History:
{chat_history}

Follow Up Input: {question}
Standalone question:";

pub const QA_TEMPLATE: &str = "\
You are a helpful assistant for accident report intake. Use the following \
pieces of context to answer the question at the end. If you don't know the \
answer, just say that you don't know, don't try to make up an answer.

Context:
{context}

Question: {question}
Helpful Answer:";

/// Render prior turns the way the condense template expects them.
pub fn format_chat_history(turns: &[ConversationTurn]) -> String {
    turns
        .iter()
        .map(|turn| format!("Human: {}\nAssistant: {}", turn.question, turn.answer))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Render retrieved documents into the QA context block.
pub fn format_context(documents: &[Document]) -> String {
    documents
        .iter()
        .map(|doc| doc.content.as_str())
        .collect::<Vec<_>>()
        .join("\n\n---\n\n")
}

pub fn render_condense_prompt(history: &[ConversationTurn], question: &str) -> String {
    CONDENSE_QUESTION_TEMPLATE
        .replace("{chat_history}", &format_chat_history(history))
        .replace("{question}", question)
}

pub fn render_qa_prompt(documents: &[Document], question: &str) -> String {
    QA_TEMPLATE
        .replace("{context}", &format_context(documents))
        .replace("{question}", question)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentMetadata;

    #[test]
    fn history_formats_as_alternating_speakers() {
        let history = vec![
            ConversationTurn::new("Was anyone hurt?", "No injuries were reported."),
            ConversationTurn::new("Where did it happen?", "At the Oak Street intersection."),
        ];
        let formatted = format_chat_history(&history);
        assert_eq!(
            formatted,
            "Human: Was anyone hurt?\nAssistant: No injuries were reported.\n\
             Human: Where did it happen?\nAssistant: At the Oak Street intersection."
        );
    }

    #[test]
    fn condense_prompt_fills_both_placeholders() {
        let history = vec![ConversationTurn::new("q1", "a1")];
        let prompt = render_condense_prompt(&history, "and then?");
        assert!(prompt.contains("Human: q1\nAssistant: a1"));
        assert!(prompt.contains("Follow Up Input: and then?"));
        assert!(!prompt.contains("{chat_history}"));
        assert!(!prompt.contains("{question}"));
    }

    #[test]
    fn qa_prompt_joins_documents() {
        let docs = vec![
            Document {
                id: "1".to_string(),
                content: "The car was a red sedan".to_string(),
                metadata: DocumentMetadata::default(),
            },
            Document {
                id: "2".to_string(),
                content: "The road was wet".to_string(),
                metadata: DocumentMetadata::default(),
            },
        ];
        let prompt = render_qa_prompt(&docs, "What color was the car?");
        assert!(prompt.contains("The car was a red sedan\n\n---\n\nThe road was wet"));
        assert!(prompt.contains("Question: What color was the car?"));
        assert!(prompt.contains("just say that you don't know"));
    }

    #[test]
    fn empty_context_renders_empty_block() {
        let prompt = render_qa_prompt(&[], "anything?");
        assert!(prompt.contains("Context:\n\n"));
    }
}
