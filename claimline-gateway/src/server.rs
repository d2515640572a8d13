use std::sync::Arc;

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
};
use chrono::Utc;
use claimline_core::{ChatMessage, MessageRole};
use claimline_db::SessionRepository;
use serde::{Deserialize, Serialize};
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::chat::{ChatError, SessionChat};
use crate::prompt::intake_system_prompt;
use crate::state::AppState;

/// New session request from HTTP API
#[derive(Debug, Deserialize)]
pub struct NewSessionRequest {
    pub user_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct NewSessionResponse {
    pub session_id: String,
}

/// Chat request from HTTP API
#[derive(Debug, Deserialize)]
pub struct ChatRequest {
    pub session_id: Option<String>,
    pub user_input: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct ChatResponse {
    pub response: String,
}

#[derive(Debug, Deserialize)]
pub struct HistoryRequest {
    pub session_id: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct HistoryResponse {
    pub messages: Vec<ChatMessage>,
}

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Error response
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Run the HTTP server
pub async fn run(state: Arc<AppState>, bind_addr: &str) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(bind_addr).await?;
    info!("Server listening on {}", bind_addr);

    axum::serve(listener, app).await?;
    Ok(())
}

/// Create the router with all routes
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health_handler))
        .route("/new_session", post(new_session_handler))
        .route("/chat", post(chat_handler))
        .route("/history", post(history_handler))
        .with_state(state)
        .layer(CorsLayer::permissive())
        .layer(tower_http::trace::TraceLayer::new_for_http())
}

/// Health check handler
async fn health_handler() -> impl IntoResponse {
    Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    })
}

fn bad_request(message: &str) -> Response {
    (
        StatusCode::BAD_REQUEST,
        Json(ErrorResponse {
            error: message.to_string(),
        }),
    )
        .into_response()
}

/// POST /new_session - create a session seeded with the system prompt
async fn new_session_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<NewSessionRequest>,
) -> Response {
    let Some(user_id) = request.user_id else {
        return bad_request("Missing user_id");
    };

    let created = async {
        let session = SessionRepository::create(state.db.pool(), &user_id).await?;
        let system = intake_system_prompt(Utc::now());
        SessionRepository::add_message(
            state.db.pool(),
            &session.id,
            MessageRole::System,
            &system,
        )
        .await?;
        Ok::<_, claimline_db::DbError>(session)
    }
    .await;

    match created {
        Ok(session) => {
            info!("Created session {} for user {}", session.id, user_id);
            (
                StatusCode::OK,
                Json(NewSessionResponse {
                    session_id: session.id,
                }),
            )
                .into_response()
        }
        Err(e) => {
            error!("Failed to create session: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Failed to create session".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /chat - relay one user turn through the provider
async fn chat_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ChatRequest>,
) -> Response {
    let (Some(session_id), Some(user_input)) = (request.session_id, request.user_input) else {
        return bad_request("Missing session_id or user_input");
    };

    match SessionChat::send(&state.db, state.provider.as_ref(), &session_id, &user_input).await {
        Ok(reply) => (StatusCode::OK, Json(ChatResponse { response: reply })).into_response(),
        Err(ChatError::SessionNotFound) => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse {
                error: "Unknown session_id".to_string(),
            }),
        )
            .into_response(),
        Err(ChatError::Provider(e)) => {
            error!("Provider error: {}", e);
            (
                StatusCode::BAD_GATEWAY,
                Json(ErrorResponse {
                    error: "Chat provider unavailable".to_string(),
                }),
            )
                .into_response()
        }
        Err(ChatError::Database(e)) => {
            error!("Database error: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}

/// POST /history - full stored message list for a session
async fn history_handler(
    State(state): State<Arc<AppState>>,
    Json(request): Json<HistoryRequest>,
) -> Response {
    let Some(session_id) = request.session_id else {
        return bad_request("Missing session_id");
    };

    match SessionRepository::get_messages(state.db.pool(), &session_id).await {
        Ok(stored) => {
            let messages = stored
                .into_iter()
                .map(|msg| ChatMessage::new(msg.role, msg.content))
                .collect();
            (StatusCode::OK, Json(HistoryResponse { messages })).into_response()
        }
        Err(e) => {
            error!("Failed to load history: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse {
                    error: "Internal error".to_string(),
                }),
            )
                .into_response()
        }
    }
}
