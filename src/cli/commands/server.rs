use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct ServerCommand {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(long)]
    pub host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    pub port: Option<u16>,

    /// Pipeline artifact loaded at startup and overwritten by retrains
    #[arg(long, value_name = "FILE")]
    pub model_path: Option<PathBuf>,

    /// Preprocessor artifact overwritten by retrains
    #[arg(long, value_name = "FILE")]
    pub preprocessor_path: Option<PathBuf>,
}
