//! In-process stub for the three remote collaborators.
//!
//! One router serves the embedding generator, the vector index, and the
//! chat-completion endpoint, so a single base URL stands in for all three.
//! Embeddings are keyword counts over a tiny fixed vocabulary — enough for
//! similarity ranking to behave sensibly in tests.

#![allow(dead_code)]

use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::{get, post, put};
use axum::{Json, Router};
use claimline_core::RagSettings;
use serde::Deserialize;
use serde_json::{Value, json};

pub const VOCABULARY: &[&str] = &[
    "car",
    "red",
    "sedan",
    "color",
    "weather",
    "rain",
    "intersection",
    "truck",
];

/// Keyword-count embedding over the fixed vocabulary.
pub fn embed(text: &str) -> Vec<f32> {
    let lowered = text.to_lowercase();
    let words: Vec<&str> = lowered
        .split(|c: char| !c.is_alphanumeric())
        .filter(|w| !w.is_empty())
        .collect();
    VOCABULARY
        .iter()
        .map(|keyword| {
            words
                .iter()
                .filter(|word| word.starts_with(*keyword))
                .count() as f32
        })
        .collect()
}

#[derive(Default)]
pub struct StubState {
    pub collection_created: Mutex<bool>,
    pub points: Mutex<Vec<(String, Vec<f32>, Value)>>,
    pub prompts: Mutex<Vec<String>>,
    pub replies: Mutex<VecDeque<String>>,
}

pub struct StubBackend {
    pub base_url: String,
    pub state: Arc<StubState>,
}

impl StubBackend {
    /// Settings pointing every collaborator at this stub.
    pub fn settings(&self) -> RagSettings {
        RagSettings {
            embedding_url: self.base_url.clone(),
            index_url: self.base_url.clone(),
            chat_url: self.base_url.clone(),
            collection: "test_reports".to_string(),
            embedding_dim: Some(VOCABULARY.len()),
            top_k: 2,
            ..Default::default()
        }
    }

    /// Queue the next scripted model reply.
    pub fn push_reply(&self, reply: &str) {
        self.state
            .replies
            .lock()
            .unwrap()
            .push_back(reply.to_string());
    }

    /// All prompts the chat endpoint has seen, in order.
    pub fn prompts(&self) -> Vec<String> {
        self.state.prompts.lock().unwrap().clone()
    }
}

pub async fn spawn() -> StubBackend {
    let state = Arc::new(StubState::default());
    let app = Router::new()
        .route("/api/embed", post(embed_handler))
        .route("/collections/{name}", get(get_collection).put(put_collection))
        .route("/collections/{name}/points", put(upsert_points))
        .route("/collections/{name}/points/search", post(search_points))
        .route("/v1/chat/completions", post(chat_completions))
        .with_state(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind stub");
    let addr = listener.local_addr().expect("stub addr");
    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve stub");
    });

    StubBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

#[derive(Deserialize)]
struct EmbedRequest {
    input: Vec<String>,
}

async fn embed_handler(Json(request): Json<EmbedRequest>) -> Json<Value> {
    let embeddings: Vec<Vec<f32>> = request.input.iter().map(|text| embed(text)).collect();
    Json(json!({ "embeddings": embeddings }))
}

async fn get_collection(State(state): State<Arc<StubState>>) -> impl IntoResponse {
    if *state.collection_created.lock().unwrap() {
        (StatusCode::OK, Json(json!({"result": {"status": "green"}})))
    } else {
        (
            StatusCode::NOT_FOUND,
            Json(json!({"status": "collection not found"})),
        )
    }
}

async fn put_collection(State(state): State<Arc<StubState>>) -> Json<Value> {
    *state.collection_created.lock().unwrap() = true;
    Json(json!({"result": true}))
}

#[derive(Deserialize)]
struct StubUpsertRequest {
    points: Vec<StubPoint>,
}

#[derive(Deserialize)]
struct StubPoint {
    id: String,
    vector: Vec<f32>,
    payload: Value,
}

async fn upsert_points(
    State(state): State<Arc<StubState>>,
    Json(request): Json<StubUpsertRequest>,
) -> Json<Value> {
    let mut points = state.points.lock().unwrap();
    for point in request.points {
        points.push((point.id, point.vector, point.payload));
    }
    Json(json!({"result": {"status": "ok"}}))
}

#[derive(Deserialize)]
struct StubSearchRequest {
    vector: Vec<f32>,
    limit: usize,
}

async fn search_points(
    State(state): State<Arc<StubState>>,
    Json(request): Json<StubSearchRequest>,
) -> Json<Value> {
    let points = state.points.lock().unwrap();
    let mut scored: Vec<(f32, &(String, Vec<f32>, Value))> = points
        .iter()
        .map(|entry| (dot(&request.vector, &entry.1), entry))
        .collect();
    scored.sort_by(|a, b| b.0.partial_cmp(&a.0).unwrap_or(std::cmp::Ordering::Equal));

    let result: Vec<Value> = scored
        .into_iter()
        .take(request.limit)
        .map(|(score, (id, _vector, payload))| {
            json!({"id": id, "score": score, "payload": payload})
        })
        .collect();
    Json(json!({ "result": result }))
}

fn dot(a: &[f32], b: &[f32]) -> f32 {
    a.iter().zip(b.iter()).map(|(x, y)| x * y).sum()
}

#[derive(Deserialize)]
struct StubChatRequest {
    messages: Vec<StubChatMessage>,
}

#[derive(Deserialize)]
struct StubChatMessage {
    content: String,
}

async fn chat_completions(
    State(state): State<Arc<StubState>>,
    Json(request): Json<StubChatRequest>,
) -> Json<Value> {
    let prompt = request
        .messages
        .last()
        .map(|m| m.content.clone())
        .unwrap_or_default();
    state.prompts.lock().unwrap().push(prompt);

    let reply = state
        .replies
        .lock()
        .unwrap()
        .pop_front()
        .unwrap_or_else(|| "I don't know.".to_string());

    Json(json!({
        "id": "cmpl-stub",
        "model": "stub-model",
        "choices": [{
            "message": {"role": "assistant", "content": reply},
            "finish_reason": "stop"
        }]
    }))
}
