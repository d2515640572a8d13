//! Session and message storage for conversation history.

use chrono::Utc;
use claimline_core::MessageRole;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use tracing::debug;
use uuid::Uuid;

use crate::error::{DbError, DbResult};

/// A session (conversation container)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub id: String,
    pub user_id: String,
    pub created_at: i64,
    pub updated_at: i64,
}

/// A stored message in a session
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct StoredMessage {
    pub id: String,
    pub session_id: String,
    pub role: MessageRole,
    pub content: String,
    pub created_at: i64,
}

/// Session repository for database operations
pub struct SessionRepository;

impl SessionRepository {
    /// Create a new session for a user
    pub async fn create(pool: &SqlitePool, user_id: &str) -> DbResult<Session> {
        let id = format!("sess_{}", Uuid::new_v4());
        let now = Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO sessions (id, user_id, created_at, updated_at)
             VALUES (?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(user_id)
        .bind(now)
        .bind(now)
        .execute(pool)
        .await?;

        debug!("Created session {} for user {}", id, user_id);

        Ok(Session {
            id,
            user_id: user_id.to_string(),
            created_at: now,
            updated_at: now,
        })
    }

    /// Get a session by id
    pub async fn get_by_id(pool: &SqlitePool, session_id: &str) -> DbResult<Option<Session>> {
        let row = sqlx::query(
            "SELECT id, user_id, created_at, updated_at FROM sessions WHERE id = ?",
        )
        .bind(session_id)
        .fetch_optional(pool)
        .await?;

        Ok(row.map(|r| Session {
            id: r.get("id"),
            user_id: r.get("user_id"),
            created_at: r.get("created_at"),
            updated_at: r.get("updated_at"),
        }))
    }

    /// Append a message to a session and bump its updated_at
    pub async fn add_message(
        pool: &SqlitePool,
        session_id: &str,
        role: MessageRole,
        content: &str,
    ) -> DbResult<StoredMessage> {
        let id = format!("msg_{}", Uuid::new_v4());
        let now = Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO messages (id, session_id, role, content, created_at)
             VALUES (?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(session_id)
        .bind(role.as_str())
        .bind(content)
        .bind(now)
        .execute(pool)
        .await?;

        sqlx::query("UPDATE sessions SET updated_at = ? WHERE id = ?")
            .bind(now)
            .bind(session_id)
            .execute(pool)
            .await?;

        Ok(StoredMessage {
            id,
            session_id: session_id.to_string(),
            role,
            content: content.to_string(),
            created_at: now,
        })
    }

    /// Fetch a session's messages in insertion order
    pub async fn get_messages(
        pool: &SqlitePool,
        session_id: &str,
    ) -> DbResult<Vec<StoredMessage>> {
        let rows = sqlx::query(
            "SELECT id, session_id, role, content, created_at
             FROM messages
             WHERE session_id = ?
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await?;

        rows.into_iter()
            .map(|r| {
                let raw_role: String = r.get("role");
                let role = raw_role
                    .parse::<MessageRole>()
                    .map_err(DbError::InvalidRole)?;
                Ok(StoredMessage {
                    id: r.get("id"),
                    session_id: r.get("session_id"),
                    role,
                    content: r.get("content"),
                    created_at: r.get("created_at"),
                })
            })
            .collect()
    }
}
