use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct TrainCommand {
    /// CSV file with Area_sqft, Bedrooms, Bathrooms, Location, Age_years and Price_AED
    pub csv: PathBuf,

    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Where to write the fitted pipeline
    #[arg(long, value_name = "FILE")]
    pub model_path: Option<PathBuf>,

    /// Where to write the fitted preprocessor
    #[arg(long, value_name = "FILE")]
    pub preprocessor_path: Option<PathBuf>,

    /// Number of trees in the forest
    #[arg(long)]
    pub n_estimators: Option<usize>,

    /// Random seed for bootstrap sampling
    #[arg(long)]
    pub seed: Option<u64>,
}
