//! Conversation session client for the claimline gateway.
//!
//! `SessionClient` speaks the gateway's `/new_session` and `/chat`
//! endpoints; `Conversation` layers the visible transcript, scripted intake
//! questions, and best-effort file records on top.

pub mod client;
pub mod conversation;
pub mod errors;
pub mod questions;
pub mod transcript;

pub use client::SessionClient;
pub use conversation::Conversation;
pub use errors::{SessionError, SessionResult};
pub use questions::{INTAKE_QUESTIONS, IntakeQuestion, question_by_id};
pub use transcript::{FileAttachment, Sender, Transcript, TranscriptMessage};
