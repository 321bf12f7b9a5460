//! gateway-rs: HTTP API Gateway for LLM backends
//!
//! A single-hop reverse proxy that routes authenticated requests to
//! backend services selected by a path key, adapting the agent route's
//! JSON bodies to the backend's schema on the way through.
//!
//! # Features
//!
//! - Path-key routing from the `ROUTER_MAPPINGS` environment variable
//! - Shared-secret X-API-Key authentication
//! - Request/response schema adaptation for the agent route
//! - Transparent pass-through for the context-retrieval route
//! - Liveness/readiness probes
//!
//! # Example Configuration
//!
//! ```sh
//! export ROUTER_MAPPINGS='{"mappings":[{"assistant":"http://localhost:8081"}]}'
//! export API_KEY=super-secret
//! ```
//!
//! A request to `POST /agent/assistant` is then forwarded to
//! `http://localhost:8081/acs/llms/agent`.

pub mod auth;
pub mod config;
pub mod error;
pub mod proxy;
pub mod router;
pub mod transform;

pub use config::GatewayConfig;
pub use error::{GatewayError, Result};
pub use proxy::GatewayServer;
