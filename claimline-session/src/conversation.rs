//! Conversation glue: session bootstrap, turn relay, and file records.

use claimline_db::{DbPool, DocumentRepository, UserResponseRepository};
use tracing::{debug, warn};
use uuid::Uuid;

use crate::client::SessionClient;
use crate::errors::{SessionError, SessionResult};
use crate::questions::{self, IntakeQuestion};
use crate::transcript::{FileAttachment, Transcript};

const GREETING: &str = "Hello! I'm here to help you report your accident. \
Let me ask you some questions to gather all the necessary details.";

/// Response type stamped on recorded answers.
const RESPONSE_TYPE_CHAT: &str = "chat";

/// A running intake conversation.
///
/// Owns the visible transcript and relays turns through the gateway;
/// uploaded-file metadata is recorded to the backing store best-effort.
#[derive(Debug)]
pub struct Conversation {
    client: SessionClient,
    records: DbPool,
    session_id: String,
    transcript: Transcript,
}

impl Conversation {
    /// Create a session and seed the transcript with the greeting.
    ///
    /// A gateway that fails to hand out a session id is a hard error — the
    /// conversation cannot meaningfully continue without one.
    pub async fn start(
        client: SessionClient,
        records: DbPool,
        user_id: Uuid,
    ) -> SessionResult<Self> {
        let session_id = client.create_session(user_id).await?;
        debug!("Started session {}", session_id);

        let mut transcript = Transcript::new();
        transcript.push_bot(GREETING);

        Ok(Self {
            client,
            records,
            session_id,
            transcript,
        })
    }

    pub fn session_id(&self) -> &str {
        &self.session_id
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Relay one user turn.
    ///
    /// The user's message is appended before the remote call, so a failed
    /// call leaves exactly that turn in place: no bot reply, no retry, no
    /// rollback. The error is returned for the caller to decide UI
    /// treatment.
    pub async fn send(&mut self, input: &str) -> SessionResult<String> {
        self.transcript.push_user(input);

        match self.client.send_message(&self.session_id, input).await {
            Ok(reply) => {
                self.transcript.push_bot(reply.clone());
                Ok(reply)
            }
            Err(e) => {
                warn!("[session:{}] dropped turn: {}", self.session_id, e);
                Err(e)
            }
        }
    }

    /// Put one of the scripted intake questions into the transcript.
    ///
    /// Returns the question so callers can display it; unknown ids are a
    /// no-op returning None.
    pub fn ask_intake_question(&mut self, question_id: u32) -> Option<&'static IntakeQuestion> {
        let question = questions::question_by_id(question_id)?;
        self.transcript.push_question(question.text, question.id);
        Some(question)
    }

    /// Record an uploaded file against the conversation.
    ///
    /// The transcript gets the file message first and keeps it regardless
    /// of what happens to the records — display is not transactional with
    /// the store. A `documents` row is always written; a `user_responses`
    /// row with a synthetic placeholder answer is written only when a
    /// question has been asked.
    pub async fn attach_file(&mut self, file: FileAttachment) -> SessionResult<()> {
        let last_question = self
            .transcript
            .last_question()
            .map(|msg| (msg.question_id, msg.text.clone()));
        self.transcript.push_file(file.clone());

        let result = self.record_file(&file, last_question).await;
        if let Err(e) = &result {
            warn!(
                "[session:{}] failed to record file {}: {}",
                self.session_id, file.filename, e
            );
        }
        result
    }

    async fn record_file(
        &self,
        file: &FileAttachment,
        last_question: Option<(Option<u32>, String)>,
    ) -> SessionResult<()> {
        DocumentRepository::insert(
            self.records.pool(),
            &self.session_id,
            &file.filename,
            &file.file_url,
            &file.file_type,
        )
        .await
        .map_err(SessionError::Records)?;

        if let Some((Some(question_id), question_text)) = last_question {
            let category = questions::question_by_id(question_id).map(|q| q.category);
            UserResponseRepository::insert(
                self.records.pool(),
                &self.session_id,
                i64::from(question_id),
                &question_text,
                &format!("[File uploaded: {}]", file.filename),
                category,
                RESPONSE_TYPE_CHAT,
            )
            .await
            .map_err(SessionError::Records)?;
        }

        Ok(())
    }
}
