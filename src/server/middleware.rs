//! Request logging middleware

use crate::server::state::ServerState;
use axum::{
    extract::{Request, State},
    middleware::Next,
    response::Response,
};
use std::time::Instant;
use tracing::{error, info, warn};

/// Log every request with its latency. Server errors also record whether a model was
/// loaded when the response went out.
pub async fn logging_middleware(
    State(state): State<ServerState>,
    request: Request,
    next: Next,
) -> Response {
    let method = request.method().clone();
    let path = request.uri().path().to_owned();
    let start = Instant::now();

    let response = next.run(request).await;

    let elapsed = start.elapsed();
    let status = response.status();

    if status.is_server_error() {
        error!(
            model_loaded = state.predictor.is_ready(),
            "{} {} {} ({:?})", method, path, status, elapsed
        );
    } else if status.is_client_error() {
        warn!("{} {} {} ({:?})", method, path, status, elapsed);
    } else {
        info!("{} {} {} ({:?})", method, path, status, elapsed);
    }

    response
}
