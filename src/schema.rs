//! Feature schema shared by the HTTP layer, dataset parsing and the pipeline.
//!
//! Column names match the CSV headers and JSON keys clients send, so they are kept
//! verbatim (`Area_sqft`, not `area_sqft`).

use serde::{Deserialize, Serialize};

pub const AREA_SQFT: &str = "Area_sqft";
pub const BEDROOMS: &str = "Bedrooms";
pub const BATHROOMS: &str = "Bathrooms";
pub const LOCATION: &str = "Location";
pub const AGE_YEARS: &str = "Age_years";

/// Regression target column of a training upload.
pub const TARGET: &str = "Price_AED";

/// Every feature column in the order the pipeline consumes them.
pub const FEATURE_COLUMNS: [&str; 5] = [AREA_SQFT, BEDROOMS, BATHROOMS, LOCATION, AGE_YEARS];

/// Numeric feature columns, in the order they appear in the transformed matrix.
pub const NUMERIC_FEATURES: [&str; 4] = [AREA_SQFT, BEDROOMS, BATHROOMS, AGE_YEARS];

/// Categorical feature columns.
pub const CATEGORICAL_FEATURES: [&str; 1] = [LOCATION];

/// One property as sent to `/predict`.
///
/// Values are taken as-is: a negative area or an unknown location is handed to the
/// pipeline without correction.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PropertyFeatures {
    #[serde(rename = "Area_sqft")]
    pub area_sqft: f64,
    #[serde(rename = "Bedrooms")]
    pub bedrooms: i64,
    #[serde(rename = "Bathrooms")]
    pub bathrooms: i64,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Age_years")]
    pub age_years: f64,
}

/// One row of features where any cell may be missing.
///
/// Training data comes from arbitrary CSV uploads, so every cell is optional until the
/// imputers fill it in. Prediction rows built from [`PropertyFeatures`] are always full.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureRow {
    pub area_sqft: Option<f64>,
    pub bedrooms: Option<f64>,
    pub bathrooms: Option<f64>,
    pub location: Option<String>,
    pub age_years: Option<f64>,
}

impl FeatureRow {
    /// Numeric cells in [`NUMERIC_FEATURES`] order.
    pub fn numeric(&self) -> [Option<f64>; 4] {
        [self.area_sqft, self.bedrooms, self.bathrooms, self.age_years]
    }

    /// Categorical cells in [`CATEGORICAL_FEATURES`] order.
    pub fn categorical(&self) -> [Option<&str>; 1] {
        [self.location.as_deref()]
    }
}

impl From<&PropertyFeatures> for FeatureRow {
    fn from(features: &PropertyFeatures) -> Self {
        Self {
            area_sqft: Some(features.area_sqft),
            bedrooms: Some(features.bedrooms as f64),
            bathrooms: Some(features.bathrooms as f64),
            location: Some(features.location.clone()),
            age_years: Some(features.age_years),
        }
    }
}
