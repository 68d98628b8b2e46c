//! Error types for the TruValue service.
//!
//! Every failure a request can hit is one of the [`ServiceError`] kinds. Handlers
//! return them with `?` and the single [`IntoResponse`] impl below turns them into
//! `{"detail": ...}` bodies with the right status code.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use thiserror::Error;

/// A specialized Result type for service operations.
pub type Result<T> = std::result::Result<T, ServiceError>;

/// Client-visible failure kinds.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ServiceError {
    /// No fitted model is loaded.
    #[error("Model not available.")]
    ModelUnavailable,

    /// The request itself is malformed (wrong content type, bad JSON shape).
    #[error("{0}")]
    InvalidInput(String),

    /// The pipeline rejected the input at inference time.
    #[error("Prediction failed: {0}")]
    PredictionFailed(String),

    /// Parsing, fitting or persisting a new model failed.
    #[error("Retraining failed: {0}")]
    RetrainFailed(String),
}

impl ServiceError {
    pub fn invalid_input<S: Into<String>>(msg: S) -> Self {
        ServiceError::InvalidInput(msg.into())
    }

    pub fn retrain_failed(err: impl std::fmt::Display) -> Self {
        ServiceError::RetrainFailed(err.to_string())
    }

    pub fn prediction_failed(err: impl std::fmt::Display) -> Self {
        ServiceError::PredictionFailed(err.to_string())
    }

    /// HTTP status for this kind.
    pub fn status_code(&self) -> StatusCode {
        match self {
            ServiceError::ModelUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
            ServiceError::InvalidInput(_) => StatusCode::BAD_REQUEST,
            ServiceError::PredictionFailed(_) => StatusCode::BAD_REQUEST,
            ServiceError::RetrainFailed(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ServiceError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = Json(serde_json::json!({ "detail": self.to_string() }));
        (status, body).into_response()
    }
}
