//! Configuration loading.
//!
//! Environment variables (plus an optional `.env` file) drive the binaries;
//! the RAG service gets a resolved settings struct with serde defaults so it
//! can also be configured from serialized sources.

mod rag;
mod settings;

pub use rag::RagSettings;
pub use settings::{Config, ConfigError, load_dotenv};
