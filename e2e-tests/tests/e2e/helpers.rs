//! Shared helpers for gateway end-to-end tests.
//!
//! The gateway and its mock backends are served in-process on ephemeral
//! ports, so the tests need no external environment.

#![allow(dead_code)]

use gateway_rs::config::{GatewayConfig, RouteEntry, ServerConfig};
use gateway_rs::GatewayServer;
use std::net::SocketAddr;
use tokio::net::TcpListener;

/// API key the test gateway expects
pub const TEST_API_KEY: &str = "test-api-key";

/// Build a gateway config routing each (key, backend) pair.
pub fn gateway_config(routes: Vec<(&str, String)>) -> GatewayConfig {
    GatewayConfig {
        server: ServerConfig {
            listen_addr: "127.0.0.1:0".to_string(),
            timeout_seconds: 5,
        },
        api_key: TEST_API_KEY.to_string(),
        routes: routes
            .into_iter()
            .map(|(key, backend)| RouteEntry {
                key: key.to_string(),
                backend,
            })
            .collect(),
    }
}

/// Serve a gateway built from `config` on an ephemeral port.
pub async fn spawn_gateway(config: GatewayConfig) -> SocketAddr {
    let server = GatewayServer::new(config);
    let router = server.router();

    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    addr
}

/// Gateway with default test settings
pub async fn start_gateway(routes: Vec<(&str, String)>) -> SocketAddr {
    spawn_gateway(gateway_config(routes)).await
}

/// Absolute URL for a gateway path
pub fn url(addr: SocketAddr, path: &str) -> String {
    format!("http://{}{}", addr, path)
}
