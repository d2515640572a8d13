//! HTTP chat gateway for accident-report intake sessions.
//!
//! Serves `/new_session`, `/chat`, and `/history` over a SQLite-backed
//! session store, relaying each turn to an OpenAI-compatible chat provider
//! with the history trimmed to a token budget.

pub mod chat;
pub mod prompt;
pub mod providers;
pub mod server;
pub mod state;
pub mod token_budget;
