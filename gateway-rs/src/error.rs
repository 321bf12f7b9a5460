//! Error types for gateway-rs

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde_json::json;
use thiserror::Error;

/// Result type alias for gateway operations
pub type Result<T> = std::result::Result<T, GatewayError>;

/// Gateway error types
#[derive(Error, Debug)]
pub enum GatewayError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Missing or wrong API key
    #[error("Invalid API Key")]
    InvalidApiKey,

    /// No backend mapped for the requested path key
    #[error("Path not found")]
    RouteNotFound,

    /// Inbound request body could not be read
    #[error("Error reading request body: {0}")]
    BodyRead(String),

    /// Outbound URL could not be built from the mapped backend
    #[error("Invalid forward URI: {0}")]
    InvalidUri(String),

    /// Backend unreachable, timed out, or failed mid-exchange
    #[error("Error forwarding request: {0}")]
    BackendConnection(String),
}

impl GatewayError {
    /// HTTP status this error surfaces as
    pub fn status_code(&self) -> StatusCode {
        match self {
            GatewayError::InvalidApiKey => StatusCode::FORBIDDEN,
            GatewayError::RouteNotFound => StatusCode::NOT_FOUND,
            GatewayError::BodyRead(_) => StatusCode::BAD_REQUEST,
            GatewayError::Io(_) | GatewayError::InvalidUri(_) | GatewayError::BackendConnection(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for GatewayError {
    fn into_response(self) -> Response {
        let body = Json(json!({ "detail": self.to_string() }));
        (self.status_code(), body).into_response()
    }
}
