//! Prediction and retraining on top of the shared [`ModelSlot`].

use crate::dataset::TrainingDataset;
use crate::error::{Result, ServiceError};
use crate::model::ModelSlot;
use crate::pipeline::{ForestParams, Pipeline};
use crate::schema::{FeatureRow, PropertyFeatures};
use crate::storage::ArtifactStore;
use axum::body::Bytes;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, info, warn};

/// Detail returned when an upload is not CSV.
pub const NOT_CSV: &str = "Only CSV files are accepted.";

/// Round to cents and clamp at zero. Prices are non-negative but the forest is not
/// constrained to be.
pub fn finalize_price(raw: f64) -> f64 {
    let rounded = (raw * 100.0).round() / 100.0;
    if rounded > 0.0 {
        rounded
    } else {
        0.0
    }
}

/// Serves predictions from whatever model the slot holds at call time.
#[derive(Debug, Clone)]
pub struct PredictionService {
    slot: Arc<ModelSlot>,
}

impl PredictionService {
    pub fn new(slot: Arc<ModelSlot>) -> Self {
        Self { slot }
    }

    pub fn predict(&self, features: &PropertyFeatures) -> Result<f64> {
        let model = self.slot.snapshot().ok_or(ServiceError::ModelUnavailable)?;
        let row = FeatureRow::from(features);

        let prediction = model
            .predict(std::slice::from_ref(&row))
            .map_err(ServiceError::prediction_failed)?;
        let raw = prediction
            .first()
            .copied()
            .ok_or_else(|| ServiceError::prediction_failed("model returned no prediction"))?;

        Ok(finalize_price(raw))
    }

    pub fn is_ready(&self) -> bool {
        self.slot.is_loaded()
    }
}

/// An uploaded training file.
#[derive(Debug, Clone)]
pub struct CsvUpload {
    pub content_type: Option<String>,
    pub bytes: Bytes,
}

impl CsvUpload {
    pub fn new(content_type: Option<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            content_type,
            bytes: bytes.into(),
        }
    }

    /// Whether the declared media type is `text/csv`, ignoring parameters such as
    /// `charset`.
    pub fn is_csv(&self) -> bool {
        self.content_type
            .as_deref()
            .and_then(|ct| ct.split(';').next())
            .is_some_and(|essence| essence.trim().eq_ignore_ascii_case("text/csv"))
    }
}

/// Outcome of a successful training run.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TrainingSummary {
    pub rows: usize,
    pub dropped: usize,
}

/// Parse, fit and persist. Blocking and CPU-bound; callers on the async runtime must
/// run it on the blocking pool.
pub fn train_from_csv(
    bytes: &[u8],
    params: &ForestParams,
    store: &ArtifactStore,
) -> Result<(Pipeline, TrainingSummary)> {
    let started = Instant::now();

    let dataset = TrainingDataset::from_csv_bytes(bytes).map_err(ServiceError::retrain_failed)?;
    if dataset.dropped > 0 {
        debug!("Dropped {} rows without a target value", dataset.dropped);
    }

    let pipeline = Pipeline::fit(&dataset, params).map_err(ServiceError::retrain_failed)?;
    store.save(&pipeline).map_err(ServiceError::retrain_failed)?;

    info!(
        "Fitted pipeline on {} rows ({} trees) in {:?}",
        dataset.len(),
        params.n_estimators,
        started.elapsed()
    );

    Ok((
        pipeline,
        TrainingSummary {
            rows: dataset.len(),
            dropped: dataset.dropped,
        },
    ))
}

/// Trains replacement models and swaps them into the slot.
#[derive(Debug, Clone)]
pub struct RetrainCoordinator {
    slot: Arc<ModelSlot>,
    store: ArtifactStore,
    params: ForestParams,
}

impl RetrainCoordinator {
    pub fn new(slot: Arc<ModelSlot>, store: ArtifactStore, params: ForestParams) -> Self {
        Self {
            slot,
            store,
            params,
        }
    }

    pub fn store(&self) -> &ArtifactStore {
        &self.store
    }

    /// Train on `upload` and make the result the active model.
    ///
    /// Parsing, fitting and persistence run on the blocking pool without touching the
    /// slot. Only once all of them succeed is the slot's lock taken, for the swap
    /// alone. On any earlier failure the current model is left in place.
    pub async fn retrain(&self, upload: CsvUpload) -> Result<TrainingSummary> {
        if !upload.is_csv() {
            warn!(
                "Rejected retrain upload with content type {:?}",
                upload.content_type
            );
            return Err(ServiceError::invalid_input(NOT_CSV));
        }

        let store = self.store.clone();
        let params = self.params.clone();
        let (pipeline, summary) = tokio::task::spawn_blocking(move || {
            train_from_csv(&upload.bytes, &params, &store)
        })
        .await
        .map_err(ServiceError::retrain_failed)??;

        let previous = self.slot.replace(Arc::new(pipeline));
        info!(
            "Model retrained on {} rows and swapped in (replaced existing: {})",
            summary.rows,
            previous.is_some()
        );

        Ok(summary)
    }
}
