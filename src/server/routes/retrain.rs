//! Retraining endpoint

use crate::{
    error::ServiceError,
    server::state::ServerState,
    service::CsvUpload,
};
use axum::{
    extract::{multipart::MultipartRejection, Json, Multipart, State},
    routing::post,
    Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

/// Status string returned after a successful swap.
pub const RETRAIN_STATUS: &str = "Model retrained and updated in memory.";

/// Multipart field carrying the CSV file.
const FILE_FIELD: &str = "file";

/// Create retraining router
pub fn create_router() -> Router<ServerState> {
    Router::new().route("/retrain", post(retrain))
}

/// Retraining response
#[derive(Debug, Serialize, Deserialize)]
pub struct RetrainResponse {
    pub status: String,
}

/// Replace the active model with one trained on the uploaded CSV
async fn retrain(
    State(state): State<ServerState>,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<RetrainResponse>, ServiceError> {
    let mut multipart = multipart.map_err(|e| ServiceError::invalid_input(e.to_string()))?;
    let upload = read_upload(&mut multipart).await?;
    info!(
        "Received retrain upload ({} bytes, content type {:?})",
        upload.bytes.len(),
        upload.content_type
    );

    state.retrainer.retrain(upload).await?;

    Ok(Json(RetrainResponse {
        status: RETRAIN_STATUS.to_string(),
    }))
}

async fn read_upload(multipart: &mut Multipart) -> Result<CsvUpload, ServiceError> {
    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| ServiceError::invalid_input(e.to_string()))?
    {
        if field.name() != Some(FILE_FIELD) {
            continue;
        }
        let content_type = field.content_type().map(str::to_string);
        let bytes = field
            .bytes()
            .await
            .map_err(|e| ServiceError::invalid_input(e.to_string()))?;
        return Ok(CsvUpload::new(content_type, bytes));
    }

    Err(ServiceError::invalid_input(format!(
        "Missing '{FILE_FIELD}' field in upload."
    )))
}
