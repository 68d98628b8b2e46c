use crate::schema::PropertyFeatures;
use clap::Args;
use std::path::PathBuf;

#[derive(Args, Debug)]
pub struct PredictCommand {
    /// Configuration file (TOML, JSON or YAML)
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Pipeline artifact to predict with
    #[arg(long, value_name = "FILE")]
    pub model_path: Option<PathBuf>,

    /// Floor area in square feet
    #[arg(long, allow_negative_numbers = true)]
    pub area: f64,

    #[arg(long)]
    pub bedrooms: i64,

    #[arg(long)]
    pub bathrooms: i64,

    #[arg(long)]
    pub location: String,

    /// Property age in years
    #[arg(long, allow_negative_numbers = true)]
    pub age: f64,
}

impl PredictCommand {
    pub fn features(&self) -> PropertyFeatures {
        PropertyFeatures {
            area_sqft: self.area,
            bedrooms: self.bedrooms,
            bathrooms: self.bathrooms,
            location: self.location.clone(),
            age_years: self.age,
        }
    }
}
