//! Prediction endpoint

use crate::{error::ServiceError, schema::PropertyFeatures, server::state::ServerState};
use axum::{
    extract::{rejection::JsonRejection, Json, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};

/// Create prediction router
pub fn create_router() -> Router<ServerState> {
    Router::new().route("/predict", post(predict))
}

/// Prediction response
#[derive(Debug, Serialize, Deserialize)]
pub struct PredictResponse {
    pub predicted_price: f64,
}

/// Predict the price of one property
async fn predict(
    State(state): State<ServerState>,
    payload: Result<Json<PropertyFeatures>, JsonRejection>,
) -> Result<Json<PredictResponse>, ServiceError> {
    let Json(features) = payload.map_err(|e| ServiceError::invalid_input(e.to_string()))?;
    let predicted_price = state.predictor.predict(&features)?;
    Ok(Json(PredictResponse { predicted_price }))
}
