//! SQLite persistence for claimline: sessions, message history, and the
//! write-only intake record tables.

pub mod db;
pub mod error;
pub mod records;
pub mod sessions;

#[cfg(feature = "test-helpers")]
pub mod test_helpers;

pub use db::DbPool;
pub use error::{DbError, DbResult};
pub use records::{
    DocumentRecord, DocumentRepository, UserResponseRecord, UserResponseRepository,
};
pub use sessions::{Session, SessionRepository, StoredMessage};
