//! Configuration for gateway-rs

use serde::Deserialize;
use tracing::warn;

/// Environment variable holding the route mappings JSON
pub const ROUTER_MAPPINGS_ENV: &str = "ROUTER_MAPPINGS";

/// Environment variable holding the expected API key
pub const API_KEY_ENV: &str = "API_KEY";

/// Sentinel used when no API key is configured. No sane client presents
/// this value, so an unconfigured gateway rejects every request.
pub const UNCONFIGURED_API_KEY: &str = "NOT DEFINED";

/// Main gateway configuration
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Server configuration
    pub server: ServerConfig,
    /// Expected value of the X-API-Key header
    pub api_key: String,
    /// Route configurations
    pub routes: Vec<RouteEntry>,
}

/// Server configuration
#[derive(Debug, Clone)]
pub struct ServerConfig {
    /// Listen address (e.g., "0.0.0.0:8080")
    pub listen_addr: String,
    /// Outbound request timeout in seconds
    pub timeout_seconds: u64,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            timeout_seconds: default_timeout(),
        }
    }
}

/// A single path-key to backend mapping
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteEntry {
    /// Path segment following the route prefix
    pub key: String,
    /// Backend base URL (e.g., "http://localhost:8081")
    pub backend: String,
}

/// Wire shape of the ROUTER_MAPPINGS value:
/// `{"mappings": [{"key": "http://backend"}, ...]}`
#[derive(Debug, Deserialize)]
struct RouterMappings {
    #[serde(default)]
    mappings: Vec<std::collections::HashMap<String, String>>,
}

fn default_listen_addr() -> String {
    "0.0.0.0:8080".to_string()
}

fn default_timeout() -> u64 {
    30
}

impl GatewayConfig {
    /// Load configuration from the process environment.
    ///
    /// Never fails: a malformed `ROUTER_MAPPINGS` value degrades to an
    /// empty route table, and a missing `API_KEY` falls back to the
    /// rejection sentinel.
    pub fn from_env() -> Self {
        let raw = std::env::var(ROUTER_MAPPINGS_ENV).unwrap_or_else(|_| "{}".to_string());
        let routes = parse_mappings(&raw);

        let api_key = std::env::var(API_KEY_ENV).unwrap_or_else(|_| UNCONFIGURED_API_KEY.to_string());
        if api_key == UNCONFIGURED_API_KEY {
            warn!("API_KEY is not set, all proxied requests will be rejected");
        }

        Self {
            server: ServerConfig::default(),
            api_key,
            routes,
        }
    }
}

/// Parse the route mappings JSON into a flat list of entries.
///
/// Input that fails to parse yields an empty list. Entries whose backend
/// URL does not parse are skipped.
pub fn parse_mappings(raw: &str) -> Vec<RouteEntry> {
    let parsed: RouterMappings = match serde_json::from_str(raw) {
        Ok(parsed) => parsed,
        Err(e) => {
            warn!("Malformed {} value, no routes loaded: {}", ROUTER_MAPPINGS_ENV, e);
            return Vec::new();
        }
    };

    let mut routes = Vec::new();
    for mapping in parsed.mappings {
        for (key, backend) in mapping {
            if key.is_empty() {
                warn!("Skipping mapping with empty path key");
                continue;
            }
            if let Err(e) = url::Url::parse(&backend) {
                warn!("Skipping route '{}': invalid backend URL '{}': {}", key, backend, e);
                continue;
            }
            routes.push(RouteEntry { key, backend });
        }
    }
    routes
}
