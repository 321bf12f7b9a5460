//! API key validation
//!
//! A single shared secret compared against the X-API-Key header. Checked
//! before route resolution, so an unauthenticated request never reaches
//! a backend.

use axum::http::HeaderMap;

use crate::error::{GatewayError, Result};

/// Header carrying the shared-secret API key
pub const API_KEY_HEADER: &str = "x-api-key";

/// Validate the presented API key against the configured value.
///
/// A missing header is rejected the same as a wrong value.
pub fn validate_api_key(headers: &HeaderMap, expected: &str) -> Result<()> {
    let presented = headers
        .get(API_KEY_HEADER)
        .and_then(|value| value.to_str().ok());

    match presented {
        Some(key) if key == expected => Ok(()),
        _ => Err(GatewayError::InvalidApiKey),
    }
}
