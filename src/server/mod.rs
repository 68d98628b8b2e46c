//! TruValue HTTP server
//!
//! This module provides the main HTTP server with:
//! - `POST /predict`: price prediction from the active model
//! - `POST /retrain`: CSV upload that trains and hot-swaps a new model
//! - `GET /health`: liveness and model readiness

use anyhow::Result;
use axum::{
    extract::{DefaultBodyLimit, State},
    response::IntoResponse,
    routing::get,
    Json, Router,
};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;
use tracing::info;

pub mod middleware;
pub mod routes;
pub mod state;

use state::ServerState;

/// Create the main application router
pub fn create_app(state: ServerState) -> Router {
    let upload_limit = state.config.max_upload_bytes;
    let logging = axum::middleware::from_fn_with_state(
        state.clone(),
        middleware::logging_middleware,
    );

    Router::new()
        .route("/", get(health_check))
        .route("/health", get(health_check))
        .merge(routes::predict::create_router())
        .merge(routes::retrain::create_router())
        .layer(DefaultBodyLimit::max(upload_limit))
        .layer(logging)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint
async fn health_check(State(state): State<ServerState>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "healthy",
        "service": "truvalue",
        "version": env!("CARGO_PKG_VERSION"),
        "model_loaded": state.predictor.is_ready(),
    }))
}

/// Start the HTTP server and run until Ctrl-C
pub async fn start_server(state: ServerState) -> Result<()> {
    let host = state.config.host.clone();
    let port = state.config.port;
    let app = create_app(state);

    let listener = TcpListener::bind((host.as_str(), port)).await?;
    info!("Starting TruValue server on {}", listener.local_addr()?);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::warn!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}
