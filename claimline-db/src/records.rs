//! Intake record tables: uploaded documents and per-question responses.
//!
//! These tables are written by the conversation flow and never read back by
//! it; the list helpers exist for tests and offline tooling.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use sqlx::{Row, SqlitePool};
use uuid::Uuid;

use crate::error::DbResult;

/// File metadata recorded for an uploaded document
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRecord {
    pub id: String,
    pub session_id: String,
    pub filename: String,
    pub file_url: String,
    pub file_type: String,
    pub created_at: i64,
}

/// An answer (or synthetic placeholder) recorded against an intake question
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserResponseRecord {
    pub id: String,
    pub session_id: String,
    pub question_id: i64,
    pub question: String,
    pub answer: String,
    pub category: Option<String>,
    pub response_type: String,
    pub created_at: i64,
}

/// Repository for the documents table
pub struct DocumentRepository;

impl DocumentRepository {
    pub async fn insert(
        pool: &SqlitePool,
        session_id: &str,
        filename: &str,
        file_url: &str,
        file_type: &str,
    ) -> DbResult<DocumentRecord> {
        let id = format!("doc_{}", Uuid::new_v4());
        let now = Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO documents (id, session_id, filename, file_url, file_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(session_id)
        .bind(filename)
        .bind(file_url)
        .bind(file_type)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(DocumentRecord {
            id,
            session_id: session_id.to_string(),
            filename: filename.to_string(),
            file_url: file_url.to_string(),
            file_type: file_type.to_string(),
            created_at: now,
        })
    }

    pub async fn list_for_session(
        pool: &SqlitePool,
        session_id: &str,
    ) -> DbResult<Vec<DocumentRecord>> {
        let rows = sqlx::query(
            "SELECT id, session_id, filename, file_url, file_type, created_at
             FROM documents
             WHERE session_id = ?
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| DocumentRecord {
                id: r.get("id"),
                session_id: r.get("session_id"),
                filename: r.get("filename"),
                file_url: r.get("file_url"),
                file_type: r.get("file_type"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}

/// Repository for the user_responses table
pub struct UserResponseRepository;

impl UserResponseRepository {
    #[allow(clippy::too_many_arguments)]
    pub async fn insert(
        pool: &SqlitePool,
        session_id: &str,
        question_id: i64,
        question: &str,
        answer: &str,
        category: Option<&str>,
        response_type: &str,
    ) -> DbResult<UserResponseRecord> {
        let id = format!("resp_{}", Uuid::new_v4());
        let now = Utc::now().timestamp();

        sqlx::query(
            "INSERT INTO user_responses
                 (id, session_id, question_id, question, answer, category, response_type, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?)",
        )
        .bind(&id)
        .bind(session_id)
        .bind(question_id)
        .bind(question)
        .bind(answer)
        .bind(category)
        .bind(response_type)
        .bind(now)
        .execute(pool)
        .await?;

        Ok(UserResponseRecord {
            id,
            session_id: session_id.to_string(),
            question_id,
            question: question.to_string(),
            answer: answer.to_string(),
            category: category.map(|c| c.to_string()),
            response_type: response_type.to_string(),
            created_at: now,
        })
    }

    pub async fn list_for_session(
        pool: &SqlitePool,
        session_id: &str,
    ) -> DbResult<Vec<UserResponseRecord>> {
        let rows = sqlx::query(
            "SELECT id, session_id, question_id, question, answer, category, response_type, created_at
             FROM user_responses
             WHERE session_id = ?
             ORDER BY created_at ASC, rowid ASC",
        )
        .bind(session_id)
        .fetch_all(pool)
        .await?;

        Ok(rows
            .into_iter()
            .map(|r| UserResponseRecord {
                id: r.get("id"),
                session_id: r.get("session_id"),
                question_id: r.get("question_id"),
                question: r.get("question"),
                answer: r.get("answer"),
                category: r.get("category"),
                response_type: r.get("response_type"),
                created_at: r.get("created_at"),
            })
            .collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::DbPool;
    use tempfile::TempDir;

    #[tokio::test]
    async fn records_round_trip() {
        let temp = TempDir::new().expect("tempdir");
        let db = DbPool::open(&temp.path().join("test.sqlite3"))
            .await
            .expect("open db");

        DocumentRepository::insert(
            db.pool(),
            "sess_1",
            "crash.jpg",
            "https://files.example.com/crash.jpg",
            "image/jpeg",
        )
        .await
        .unwrap();

        UserResponseRepository::insert(
            db.pool(),
            "sess_1",
            4,
            "Do you have photos of the damage?",
            "[File uploaded: crash.jpg]",
            Some("evidence"),
            "chat",
        )
        .await
        .unwrap();

        let docs = DocumentRepository::list_for_session(db.pool(), "sess_1")
            .await
            .unwrap();
        assert_eq!(docs.len(), 1);
        assert_eq!(docs[0].filename, "crash.jpg");

        let responses = UserResponseRepository::list_for_session(db.pool(), "sess_1")
            .await
            .unwrap();
        assert_eq!(responses.len(), 1);
        assert_eq!(responses[0].answer, "[File uploaded: crash.jpg]");
        assert_eq!(responses[0].category.as_deref(), Some("evidence"));

        let other = DocumentRepository::list_for_session(db.pool(), "sess_2")
            .await
            .unwrap();
        assert!(other.is_empty());
    }
}
