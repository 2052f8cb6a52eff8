//! Common test utilities and a mock OpenAI server for E2E testing

#![allow(dead_code)]

use axum::{
    extract::{Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use botforge_plugin_openai::OpenAIBlockConfig;
use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::sync::RwLock;

// ============================================================================
// Test Configuration
// ============================================================================

/// Test API key
pub const TEST_API_KEY: &str = "sk-test-12345";

/// Bytes served as synthesized audio
pub const FAKE_AUDIO: &[u8] = b"ID3\x03\x00fake-mp3-frames";

/// Create a block configuration pointing at a mock server
pub fn create_test_config(addr: SocketAddr) -> OpenAIBlockConfig {
    OpenAIBlockConfig {
        default_base_url: format!("http://{}/v1", addr),
        request_timeout_secs: 5,
        ..Default::default()
    }
}

/// Credentials record as the host stores it
pub fn test_credentials() -> serde_json::Value {
    serde_json::json!({ "apiKey": TEST_API_KEY })
}

// ============================================================================
// Mock OpenAI Server
// ============================================================================

/// A request seen by the mock server
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// Route path
    pub path: String,
    /// Value of the `api-key` header
    pub api_key: Option<String>,
    /// Value of the `api-version` query parameter
    pub api_version: Option<String>,
    /// JSON body, for POST routes
    pub body: Option<serde_json::Value>,
}

/// State for the mock OpenAI server
#[derive(Default)]
pub struct MockOpenAIState {
    /// Request log
    pub requests: RwLock<Vec<RecordedRequest>>,
}

impl MockOpenAIState {
    /// Number of requests received on `path`
    pub async fn count(&self, path: &str) -> usize {
        self.requests
            .read()
            .await
            .iter()
            .filter(|r| r.path == path)
            .count()
    }

    /// Total number of requests received
    pub async fn total(&self) -> usize {
        self.requests.read().await.len()
    }

    /// Last request received on `path`
    pub async fn last(&self, path: &str) -> Option<RecordedRequest> {
        self.requests
            .read()
            .await
            .iter()
            .rev()
            .find(|r| r.path == path)
            .cloned()
    }
}

/// Start a mock OpenAI server on an ephemeral port
pub async fn start_mock_openai() -> (SocketAddr, Arc<MockOpenAIState>) {
    let state = Arc::new(MockOpenAIState::default());

    let app = Router::new()
        .route("/v1/models", get(mock_list_models))
        .route("/v1/audio/speech", post(mock_create_speech))
        .with_state(state.clone());

    let addr = SocketAddr::from(([127, 0, 0, 1], 0));
    let listener = tokio::net::TcpListener::bind(addr).await.unwrap();
    let actual_addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    // Give server time to start
    tokio::time::sleep(std::time::Duration::from_millis(50)).await;

    (actual_addr, state)
}

async fn record(
    state: &MockOpenAIState,
    path: &str,
    headers: &HeaderMap,
    query: &HashMap<String, String>,
    body: Option<serde_json::Value>,
) -> Option<String> {
    let api_key = headers
        .get("api-key")
        .and_then(|v| v.to_str().ok())
        .map(str::to_owned);

    state.requests.write().await.push(RecordedRequest {
        path: path.to_string(),
        api_key: api_key.clone(),
        api_version: query.get("api-version").cloned(),
        body,
    });

    api_key.filter(|k| k == TEST_API_KEY)
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(serde_json::json!({
            "error": { "message": "Incorrect API key provided", "type": "invalid_request_error" }
        })),
    )
        .into_response()
}

/// Model catalog endpoint, deliberately unsorted
async fn mock_list_models(
    State(state): State<Arc<MockOpenAIState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
) -> Response {
    if record(&state, "/v1/models", &headers, &query, None)
        .await
        .is_none()
    {
        return unauthorized();
    }

    Json(serde_json::json!({
        "object": "list",
        "data": [
            { "id": "tts-1", "object": "model", "created": 100, "owned_by": "openai" },
            { "id": "gpt-4o", "object": "model", "created": 50, "owned_by": "openai" },
            { "id": "tts-1-hd", "object": "model", "created": 200, "owned_by": "openai" }
        ]
    }))
    .into_response()
}

/// Speech endpoint. Input text steers the outcome:
/// "fail" yields a 500 and "malformed" a JSON body on 200.
async fn mock_create_speech(
    State(state): State<Arc<MockOpenAIState>>,
    headers: HeaderMap,
    Query(query): Query<HashMap<String, String>>,
    Json(body): Json<serde_json::Value>,
) -> Response {
    let input = body["input"].as_str().unwrap_or_default().to_string();

    if record(&state, "/v1/audio/speech", &headers, &query, Some(body))
        .await
        .is_none()
    {
        return unauthorized();
    }

    if input.contains("fail") {
        return (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(serde_json::json!({
                "error": { "message": "The server had an error while processing your request" }
            })),
        )
            .into_response();
    }

    if input.contains("malformed") {
        return Json(serde_json::json!({ "status": "queued" })).into_response();
    }

    ([(header::CONTENT_TYPE, "audio/mpeg")], FAKE_AUDIO).into_response()
}
