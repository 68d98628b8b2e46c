//! TruValue binary.
//!
//! Entry point for the property price service: run the HTTP server, train a model
//! offline, or make a single prediction from the command line.

use clap::Parser;
use tracing_subscriber::{filter::LevelFilter, EnvFilter};
use truvalue::cli::{
    commands::{Commands, LoggingArgs},
    handle_predict, handle_server, handle_train,
};

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[command(flatten)]
    pub logging: LoggingArgs,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let level = cli.logging.get_effective_level();
    let filter = cli
        .logging
        .log_filter
        .clone()
        .or_else(|| std::env::var(EnvFilter::DEFAULT_ENV).ok())
        .unwrap_or_else(|| format!("truvalue={0},tower_http={0}", level.as_str().to_lowercase()));

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::builder()
                .with_default_directive(LevelFilter::from_level(level).into())
                .parse_lossy(filter),
        )
        .with_target(true)
        .with_thread_ids(true)
        .with_file(true)
        .with_line_number(true)
        .init();

    match cli.command {
        Commands::Server(cmd) => handle_server(cmd).await,
        Commands::Train(cmd) => handle_train(cmd).await,
        Commands::Predict(cmd) => handle_predict(cmd).await,
    }
}
