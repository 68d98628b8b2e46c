//! TruValue: property price estimation for the UAE market.
//!
//! A random-forest regression pipeline trained from CSV, served over HTTP with
//! `/predict` and `/retrain`. Retraining fits a replacement model off the request
//! path, persists it, and swaps it in atomically so concurrent predictions always see
//! one complete model.

pub mod cli;
pub mod config;
pub mod dataset;
pub mod error;
pub mod model;
pub mod pipeline;
pub mod schema;
pub mod server;
pub mod service;
pub mod storage;

// Re-export commonly used types
pub use config::ServiceConfig;
pub use error::ServiceError;
pub use model::ModelSlot;
pub use pipeline::{ForestParams, Pipeline};
pub use schema::PropertyFeatures;
pub use server::{create_app, start_server, state::ServerState};
pub use service::{PredictionService, RetrainCoordinator};
pub use storage::ArtifactStore;
