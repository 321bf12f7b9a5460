//! HTTP Gateway Server
//!
//! Per-request pipeline: API key check, path-key resolution, optional
//! body transformation, forward to the backend, response emission.
//! Health endpoints bypass the pipeline entirely.

use axum::{
    body::{Body, Bytes},
    extract::{Path, State},
    http::{header, request::Parts, HeaderMap, Request, Response, Uri},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use http_body_util::BodyExt;
use hyper::body::Incoming;
use hyper_util::{client::legacy::Client, rt::TokioExecutor};
use serde_json::{json, Value};
use std::sync::Arc;
use std::time::Duration;
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::{error, info, warn};

use crate::auth::validate_api_key;
use crate::config::GatewayConfig;
use crate::error::{GatewayError, Result};
use crate::router::RouteTable;
use crate::transform;

/// HTTP client type for forwarding requests
type HttpClient = Client<hyper_util::client::legacy::connect::HttpConnector, Body>;

/// Backend endpoint selected by the route prefix
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum BackendEndpoint {
    Agent,
    ContextualRetrieval,
}

impl BackendEndpoint {
    /// Fixed path suffix appended to the mapped base URL
    fn path(self) -> &'static str {
        match self {
            BackendEndpoint::Agent => "/acs/llms/agent",
            BackendEndpoint::ContextualRetrieval => "/acs/llms/contextual_retrieval",
        }
    }
}

/// Shared gateway state
pub struct GatewayState {
    /// Path-key routing table
    pub table: RouteTable,
    /// Expected API key
    pub api_key: String,
    /// HTTP client for forwarding
    pub client: HttpClient,
    /// Outbound request timeout
    pub timeout: Duration,
}

/// Gateway server
pub struct GatewayServer {
    listen_addr: String,
    state: Arc<GatewayState>,
}

impl GatewayServer {
    /// Create a new gateway server
    pub fn new(config: GatewayConfig) -> Self {
        let table = RouteTable::new(config.routes);

        // Create HTTP client
        let client: HttpClient = Client::builder(TokioExecutor::new())
            .pool_idle_timeout(Duration::from_secs(30))
            .build_http();

        let state = Arc::new(GatewayState {
            table,
            api_key: config.api_key,
            client,
            timeout: Duration::from_secs(config.server.timeout_seconds),
        });

        Self {
            listen_addr: config.server.listen_addr,
            state,
        }
    }

    /// Build the Axum router
    pub fn router(&self) -> Router {
        Router::new()
            .route("/health/liveness", get(liveness_endpoint))
            .route("/health/readiness", get(readiness_endpoint))
            .route("/agent/:path_key", get(agent_handler).post(agent_handler))
            .route(
                "/context-retrieval/:path_key",
                get(context_retrieval_handler).post(context_retrieval_handler),
            )
            .layer(TraceLayer::new_for_http())
            .with_state(self.state.clone())
    }

    /// Run the gateway server
    pub async fn run(&self) -> Result<()> {
        let router = self.router();

        info!("Starting gateway server on {}", self.listen_addr);
        if self.state.table.is_empty() {
            warn!("No route mappings configured, all proxied requests will return 404");
        } else {
            info!("Configured routes:");
            for (key, backend) in self.state.table.routes() {
                info!("  > {} -> {}", key, backend);
            }
        }

        let listener = TcpListener::bind(&self.listen_addr).await?;
        axum::serve(listener, router).await?;
        Ok(())
    }
}

/// Liveness probe, no auth
async fn liveness_endpoint() -> impl IntoResponse {
    Json(json!({ "status": "alive" }))
}

/// Readiness probe, no auth
async fn readiness_endpoint() -> impl IntoResponse {
    Json(json!({ "status": "ready" }))
}

/// Agent route: forwards with request/response schema adaptation
async fn agent_handler(
    State(state): State<Arc<GatewayState>>,
    Path(path_key): Path<String>,
    req: Request<Body>,
) -> Result<Response<Body>> {
    let backend = authorize_and_resolve(&state, &path_key, req.headers())?;

    let (mut parts, body) = req.into_parts();
    let uri = build_forward_uri(backend, BackendEndpoint::Agent, parts.uri.query())?;

    let body = axum::body::to_bytes(body, usize::MAX)
        .await
        .map_err(|e| GatewayError::BodyRead(e.to_string()))?;
    let body = rewrite_json(body, transform::prepare_agent_request);

    // Body may have been rewritten; the client recomputes the length.
    parts.headers.remove(header::CONTENT_LENGTH);

    let response = forward(&state, parts, uri, Body::from(body)).await?;
    let (mut parts, body) = response.into_parts();

    let body = body
        .collect()
        .await
        .map_err(|e| GatewayError::BackendConnection(e.to_string()))?
        .to_bytes();
    let body = rewrite_json(body, transform::flatten_agent_response);

    parts.headers.remove(header::CONTENT_LENGTH);
    parts.headers.remove(header::TRANSFER_ENCODING);
    Ok(Response::from_parts(parts, Body::from(body)))
}

/// Context-retrieval route: transparent pass-through, bytes preserved
async fn context_retrieval_handler(
    State(state): State<Arc<GatewayState>>,
    Path(path_key): Path<String>,
    req: Request<Body>,
) -> Result<Response<Body>> {
    let backend = authorize_and_resolve(&state, &path_key, req.headers())?;

    let (parts, body) = req.into_parts();
    let uri = build_forward_uri(backend, BackendEndpoint::ContextualRetrieval, parts.uri.query())?;

    let response = forward(&state, parts, uri, body).await?;

    let (parts, body) = response.into_parts();
    Ok(Response::from_parts(parts, Body::new(body)))
}

/// Shared auth and routing gate. Auth is checked first and
/// short-circuits, so no outbound call can happen for a rejected key.
fn authorize_and_resolve<'a>(
    state: &'a GatewayState,
    path_key: &str,
    headers: &HeaderMap,
) -> Result<&'a str> {
    validate_api_key(headers, &state.api_key)?;

    match state.table.resolve(path_key) {
        Some(backend) => Ok(backend),
        None => {
            warn!("No route mapped for path key '{}'", path_key);
            Err(GatewayError::RouteNotFound)
        }
    }
}

/// Build the outbound URL from the mapped base, the fixed endpoint
/// suffix, and the unchanged inbound query string.
fn build_forward_uri(backend: &str, endpoint: BackendEndpoint, query: Option<&str>) -> Result<Uri> {
    let mut target = format!("{}{}", backend.trim_end_matches('/'), endpoint.path());
    if let Some(query) = query {
        target.push('?');
        target.push_str(query);
    }

    target
        .parse()
        .map_err(|e| GatewayError::InvalidUri(format!("{}: {}", target, e)))
}

/// Run a JSON body through a transform. Bodies that do not decode as
/// JSON pass through byte-for-byte.
fn rewrite_json(body: Bytes, transform: fn(&mut Value)) -> Bytes {
    match serde_json::from_slice::<Value>(&body) {
        Ok(mut doc) => {
            transform(&mut doc);
            serde_json::to_vec(&doc).map(Bytes::from).unwrap_or(body)
        }
        Err(_) => body,
    }
}

/// Forward a request to the resolved backend.
///
/// All inbound headers are copied except Host, which the client
/// recomputes for the outbound destination, and hop-by-hop headers.
async fn forward(
    state: &GatewayState,
    mut parts: Parts,
    uri: Uri,
    body: Body,
) -> Result<Response<Incoming>> {
    info!("Forwarding: {} {}", parts.method, uri);

    parts.uri = uri;

    // Remove hop-by-hop headers
    parts.headers.remove("host");
    parts.headers.remove("connection");
    parts.headers.remove("keep-alive");
    parts.headers.remove("proxy-authenticate");
    parts.headers.remove("proxy-authorization");
    parts.headers.remove("te");
    parts.headers.remove("trailers");
    parts.headers.remove("transfer-encoding");
    parts.headers.remove("upgrade");

    let forward_req = Request::from_parts(parts, body);

    match tokio::time::timeout(state.timeout, state.client.request(forward_req)).await {
        Ok(Ok(response)) => Ok(response),
        Ok(Err(e)) => {
            error!("Backend error: {}", e);
            Err(GatewayError::BackendConnection(e.to_string()))
        }
        Err(_) => {
            error!("Backend did not respond within {}s", state.timeout.as_secs());
            Err(GatewayError::BackendConnection(format!(
                "timed out after {}s",
                state.timeout.as_secs()
            )))
        }
    }
}
