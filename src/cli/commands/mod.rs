pub mod logging;
pub mod predict;
pub mod server;
pub mod train;

pub use logging::LoggingArgs;
pub use predict::PredictCommand;
pub use server::ServerCommand;
pub use train::TrainCommand;

use clap::Subcommand;

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the TruValue HTTP server
    Server(ServerCommand),
    /// Train a model from a CSV file and write the artifacts
    Train(TrainCommand),
    /// Predict one property's price with the persisted model
    Predict(PredictCommand),
}
