//! Server state management

use crate::{
    config::ServiceConfig,
    model::ModelSlot,
    service::{PredictionService, RetrainCoordinator},
};
use std::sync::Arc;
use tracing::{error, info};

/// Shared server state
#[derive(Clone)]
pub struct ServerState {
    /// Answers `/predict` from the active model
    pub predictor: Arc<PredictionService>,

    /// Handles `/retrain`: fit, persist, swap
    pub retrainer: Arc<RetrainCoordinator>,

    /// Service configuration
    pub config: Arc<ServiceConfig>,
}

impl ServerState {
    /// Create server state, loading the persisted pipeline if there is one.
    ///
    /// A missing or unreadable artifact is not fatal: the server starts with an empty
    /// slot and `/predict` reports the model as unavailable until a retrain succeeds.
    pub fn new(config: ServiceConfig) -> Self {
        let store = config.artifact_store();
        let pipeline = match store.load_pipeline() {
            Ok(pipeline) => {
                info!("Model loaded from {}", store.model_path().display());
                Some(pipeline)
            }
            Err(e) => {
                error!(
                    "Error loading model from {}: {}",
                    store.model_path().display(),
                    e
                );
                None
            }
        };

        Self::with_slot(config, Arc::new(ModelSlot::new(pipeline)))
    }

    /// Create server state around an existing slot.
    pub fn with_slot(config: ServiceConfig, slot: Arc<ModelSlot>) -> Self {
        let predictor = Arc::new(PredictionService::new(slot.clone()));
        let retrainer = Arc::new(RetrainCoordinator::new(
            slot,
            config.artifact_store(),
            config.forest.clone(),
        ));

        Self {
            predictor,
            retrainer,
            config: Arc::new(config),
        }
    }
}
