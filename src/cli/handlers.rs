use crate::{
    cli::commands::{PredictCommand, ServerCommand, TrainCommand},
    config::ServiceConfig,
    model::ModelSlot,
    server::{start_server, state::ServerState},
    service::{train_from_csv, PredictionService},
};
use anyhow::{Context, Result};
use std::sync::Arc;
use tracing::info;

pub async fn handle_server(cmd: ServerCommand) -> Result<()> {
    let mut config =
        ServiceConfig::load(cmd.config.as_deref()).context("Failed to load configuration")?;

    if let Some(host) = cmd.host {
        config.host = host;
    }
    if let Some(port) = cmd.port {
        config.port = port;
    }
    if let Some(path) = cmd.model_path {
        config.model_path = path;
    }
    if let Some(path) = cmd.preprocessor_path {
        config.preprocessor_path = path;
    }

    let state = ServerState::new(config);
    start_server(state).await
}

pub async fn handle_train(cmd: TrainCommand) -> Result<()> {
    let mut config =
        ServiceConfig::load(cmd.config.as_deref()).context("Failed to load configuration")?;

    if let Some(path) = cmd.model_path {
        config.model_path = path;
    }
    if let Some(path) = cmd.preprocessor_path {
        config.preprocessor_path = path;
    }
    if let Some(n) = cmd.n_estimators {
        config.forest.n_estimators = n;
    }
    if let Some(seed) = cmd.seed {
        config.forest.seed = seed;
    }

    let bytes = tokio::fs::read(&cmd.csv)
        .await
        .with_context(|| format!("Failed to read {}", cmd.csv.display()))?;
    info!("Training on {} ({} bytes)", cmd.csv.display(), bytes.len());

    let store = config.artifact_store();
    let params = config.forest.clone();
    let (_, summary) = tokio::task::spawn_blocking(move || train_from_csv(&bytes, &params, &store))
        .await
        .context("Training task panicked")??;

    println!(
        "Trained on {} rows ({} dropped without {}).",
        summary.rows,
        summary.dropped,
        crate::schema::TARGET
    );
    println!("Model saved to {}", config.model_path.display());
    println!("Preprocessor saved to {}", config.preprocessor_path.display());
    Ok(())
}

pub async fn handle_predict(cmd: PredictCommand) -> Result<()> {
    let mut config =
        ServiceConfig::load(cmd.config.as_deref()).context("Failed to load configuration")?;
    if let Some(path) = cmd.model_path.clone() {
        config.model_path = path;
    }

    let store = config.artifact_store();
    let pipeline = store
        .load_pipeline()
        .with_context(|| format!("Failed to load model from {}", store.model_path().display()))?;

    let service = PredictionService::new(Arc::new(ModelSlot::new(Some(pipeline))));
    let predicted_price = service.predict(&cmd.features())?;

    println!(
        "{}",
        serde_json::to_string_pretty(&serde_json::json!({ "predicted_price": predicted_price }))?
    );
    Ok(())
}
