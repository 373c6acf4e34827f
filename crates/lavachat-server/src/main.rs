//! lavachat HTTP Server
//!
//! Binary entry point: load configuration, build the payments client, and
//! serve the API plus the static WASM front-end.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lavachat_payments::LavaClient;
use lavachat_server::{app, config::ServerConfig, state::AppState};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG").unwrap_or_else(|_| "info,tower_http=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    // Load environment
    dotenvy::dotenv().ok();

    let config = ServerConfig::from_env()?;
    let lava = LavaClient::from_env()?;
    tracing::info!("✓ Payments client configured");

    let state = AppState {
        lava: Arc::new(lava),
        config: Arc::new(config.clone()),
    };

    let router = app(state);

    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;

    tracing::info!("lavachat server running on http://{}", config.bind_addr);
    tracing::info!("model: {}", config.model);
    tracing::info!("");
    tracing::info!("Endpoints:");
    tracing::info!("  GET  /health                        - Health check");
    tracing::info!("  GET  /api/connections/{{id}}          - Wallet details");
    tracing::info!("  POST /api/create-checkout-session   - Connect a wallet");
    tracing::info!("  POST /api/create-topup-session      - Add funds");
    tracing::info!("  POST /api/chat                      - Metered chat");
    tracing::info!("");

    axum::serve(listener, router).await?;

    Ok(())
}
