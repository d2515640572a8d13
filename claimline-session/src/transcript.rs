//! The visible conversation transcript.
//!
//! Append-only: a failed remote call never removes or rewrites what the
//! user already sees. Messages carry optional question markers (so file
//! attachments can be recorded against the last asked question) and
//! optional file metadata.

use serde::{Deserialize, Serialize};

/// Who produced a transcript message
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sender {
    User,
    Bot,
}

/// Metadata for an attached file
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileAttachment {
    pub filename: String,
    pub file_url: String,
    pub file_type: String,
}

/// One visible transcript entry
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TranscriptMessage {
    pub id: u64,
    pub text: String,
    pub sender: Sender,
    #[serde(default)]
    pub is_question: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub question_id: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file: Option<FileAttachment>,
}

/// Ordered, append-only message list
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    messages: Vec<TranscriptMessage>,
    next_id: u64,
}

impl Transcript {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn messages(&self) -> &[TranscriptMessage] {
        &self.messages
    }

    pub fn len(&self) -> usize {
        self.messages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn last(&self) -> Option<&TranscriptMessage> {
        self.messages.last()
    }

    /// The most recently asked intake question, if any.
    pub fn last_question(&self) -> Option<&TranscriptMessage> {
        self.messages.iter().rev().find(|msg| msg.is_question)
    }

    pub fn push_user(&mut self, text: impl Into<String>) -> u64 {
        self.push(text.into(), Sender::User, false, None, None)
    }

    pub fn push_bot(&mut self, text: impl Into<String>) -> u64 {
        self.push(text.into(), Sender::Bot, false, None, None)
    }

    /// A bot message that is one of the scripted intake questions.
    pub fn push_question(&mut self, text: impl Into<String>, question_id: u32) -> u64 {
        self.push(text.into(), Sender::Bot, true, Some(question_id), None)
    }

    /// A user message representing an uploaded file.
    pub fn push_file(&mut self, file: FileAttachment) -> u64 {
        let text = format!("[File: {}]", file.filename);
        self.push(text, Sender::User, false, None, Some(file))
    }

    fn push(
        &mut self,
        text: String,
        sender: Sender,
        is_question: bool,
        question_id: Option<u32>,
        file: Option<FileAttachment>,
    ) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        self.messages.push(TranscriptMessage {
            id,
            text,
            sender,
            is_question,
            question_id,
            file,
        });
        id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ids_are_monotonic() {
        let mut transcript = Transcript::new();
        let a = transcript.push_bot("hello");
        let b = transcript.push_user("hi");
        assert!(b > a);
        assert_eq!(transcript.len(), 2);
    }

    #[test]
    fn last_question_skips_later_messages() {
        let mut transcript = Transcript::new();
        transcript.push_question("Where did the accident happen?", 2);
        transcript.push_user("On Oak Street");
        transcript.push_bot("Got it.");

        let question = transcript.last_question().expect("question");
        assert_eq!(question.question_id, Some(2));
        assert_eq!(question.text, "Where did the accident happen?");
    }

    #[test]
    fn file_message_carries_attachment() {
        let mut transcript = Transcript::new();
        transcript.push_file(FileAttachment {
            filename: "crash.jpg".to_string(),
            file_url: "https://files.example.com/crash.jpg".to_string(),
            file_type: "image/jpeg".to_string(),
        });

        let last = transcript.last().unwrap();
        assert_eq!(last.text, "[File: crash.jpg]");
        assert_eq!(last.sender, Sender::User);
        assert!(last.file.is_some());
    }
}
