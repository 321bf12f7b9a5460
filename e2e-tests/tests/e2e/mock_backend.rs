//! In-process mock backend for gateway end-to-end tests.
//!
//! Records every request it receives (so "no backend call happened" is
//! assertable) and responds with a configurable status, body, and delay.

#![allow(dead_code)]

use axum::{
    body::Bytes,
    extract::State,
    http::{HeaderMap, Method, StatusCode, Uri},
    Json, Router,
};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tokio::sync::RwLock;
use tokio::task::JoinHandle;

/// A request observed by the mock backend.
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    pub path: String,
    pub query: Option<String>,
    pub headers: Vec<(String, String)>,
    pub body: Vec<u8>,
}

impl RecordedRequest {
    /// Value of a header, if present (names compared case-insensitively)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }

    /// Body decoded as JSON
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap()
    }
}

#[derive(Debug)]
struct MockState {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
    requests: RwLock<Vec<RecordedRequest>>,
}

/// Mock backend server.
#[derive(Debug, Clone)]
pub struct MockBackend {
    status: StatusCode,
    body: Value,
    delay: Option<Duration>,
}

impl MockBackend {
    pub fn new() -> Self {
        Self {
            status: StatusCode::OK,
            body: json!({ "ok": true }),
            delay: None,
        }
    }

    /// Respond with the given status and JSON body.
    #[must_use]
    pub fn with_response(mut self, status: StatusCode, body: Value) -> Self {
        self.status = status;
        self.body = body;
        self
    }

    /// Sleep before responding.
    #[must_use]
    pub fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Start the mock server, returning its base URL and handle.
    pub async fn start(self) -> (String, MockBackendHandle) {
        let state = Arc::new(MockState {
            status: self.status,
            body: self.body,
            delay: self.delay,
            requests: RwLock::new(Vec::new()),
        });

        let app = Router::new()
            .fallback(record_request)
            .with_state(state.clone());

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        (
            format!("http://{}", addr),
            MockBackendHandle {
                state,
                _handle: handle,
            },
        )
    }
}

impl Default for MockBackend {
    fn default() -> Self {
        Self::new()
    }
}

/// Handle to a running mock backend.
pub struct MockBackendHandle {
    state: Arc<MockState>,
    _handle: JoinHandle<()>,
}

impl MockBackendHandle {
    /// Number of requests received so far
    pub async fn request_count(&self) -> usize {
        self.state.requests.read().await.len()
    }

    /// The most recent request, if any
    pub async fn last_request(&self) -> Option<RecordedRequest> {
        self.state.requests.read().await.last().cloned()
    }
}

/// Record any request and reply with the configured response.
async fn record_request(
    State(state): State<Arc<MockState>>,
    method: Method,
    uri: Uri,
    headers: HeaderMap,
    body: Bytes,
) -> (StatusCode, Json<Value>) {
    {
        let mut requests = state.requests.write().await;
        requests.push(RecordedRequest {
            method: method.to_string(),
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            headers: headers
                .iter()
                .map(|(key, value)| {
                    (
                        key.to_string(),
                        String::from_utf8_lossy(value.as_bytes()).to_string(),
                    )
                })
                .collect(),
            body: body.to_vec(),
        });
    }

    if let Some(delay) = state.delay {
        tokio::time::sleep(delay).await;
    }

    (state.status, Json(state.body.clone()))
}
