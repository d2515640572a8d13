//! Shared configuration and message types for claimline.

pub mod config;
pub mod message;

pub use config::{Config, ConfigError, RagSettings, load_dotenv};
pub use message::{ChatMessage, MessageRole};
