//! gateway-rs: HTTP API Gateway for LLM backends
//!
//! Routes authenticated requests to the backend services configured
//! through the environment.

use gateway_rs::{GatewayConfig, GatewayServer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gateway_rs=info,tower_http=info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting gateway-rs v{}", env!("CARGO_PKG_VERSION"));

    let config = GatewayConfig::from_env();

    let server = GatewayServer::new(config);
    server.run().await?;

    Ok(())
}
