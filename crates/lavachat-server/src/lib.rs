//! lavachat HTTP Server
//!
//! Axum-based server exposing the wallet and chat API consumed by the WASM
//! front-end. All state of record (balances, secrets, checkout sessions)
//! lives in the external payments service; the routes here are forwarding
//! glue plus defensive input parsing.

pub mod config;
pub mod handlers;
pub mod json;
pub mod state;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::handlers::{
    chat_handler, connection_missing_id, create_checkout_session, create_topup_session,
    get_connection, health_check,
};
use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        // Health & info
        .route("/health", get(health_check))
        // Wallet API
        .route("/api/connections/{connection_id}", get(get_connection))
        .route("/api/connections/", get(connection_missing_id))
        .route("/api/create-checkout-session", post(create_checkout_session))
        .route("/api/create-topup-session", post(create_topup_session))
        // Chat API
        .route("/api/chat", post(chat_handler))
        // Static files (WASM frontend)
        .fallback_service(tower_http::services::ServeDir::new("static"))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
