//! Tabular regression pipeline: impute, scale/encode, regress.
//!
//! [`Pipeline`] is the unit that gets fitted, persisted and hot-swapped. It is never
//! mutated after [`Pipeline::fit`] returns.

pub mod encode;
pub mod forest;
pub mod impute;
pub mod preprocessor;
pub mod scale;

pub use forest::{ForestParams, RandomForestRegressor};
pub use preprocessor::Preprocessor;

use crate::dataset::TrainingDataset;
use crate::schema::FeatureRow;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Fit and inference errors
#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("dataset has no rows with a Price_AED value")]
    EmptyDataset,

    #[error("{rows} feature rows but {targets} targets")]
    LengthMismatch { rows: usize, targets: usize },

    #[error("target value at row {0} is not finite")]
    NonFiniteTarget(usize),

    #[error("input contains infinite or NaN feature values")]
    NonFiniteFeature,

    #[error("expected {expected} features, got {actual}")]
    FeatureWidth { expected: usize, actual: usize },

    #[error("invalid parameters: {0}")]
    InvalidParams(String),

    #[error("model produced a non-finite prediction")]
    NonFinitePrediction,

    #[error("shape error: {0}")]
    Shape(#[from] ndarray::ShapeError),
}

/// Fitted preprocessing stage plus the regressor trained on its output.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Pipeline {
    preprocessor: Preprocessor,
    regressor: RandomForestRegressor,
}

impl Pipeline {
    pub fn fit(dataset: &TrainingDataset, params: &ForestParams) -> Result<Self, PipelineError> {
        if dataset.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }
        if dataset.rows.len() != dataset.targets.len() {
            return Err(PipelineError::LengthMismatch {
                rows: dataset.rows.len(),
                targets: dataset.targets.len(),
            });
        }

        let preprocessor = Preprocessor::fit(&dataset.rows)?;
        let x = preprocessor.transform(&dataset.rows)?;
        let regressor = RandomForestRegressor::fit(x.view(), &dataset.targets, params)?;

        Ok(Self {
            preprocessor,
            regressor,
        })
    }

    pub fn predict(&self, rows: &[FeatureRow]) -> Result<Vec<f64>, PipelineError> {
        let x = self.preprocessor.transform(rows)?;
        let predictions = self.regressor.predict(x.view())?;
        if predictions.iter().any(|p| !p.is_finite()) {
            return Err(PipelineError::NonFinitePrediction);
        }
        Ok(predictions)
    }

    pub fn preprocessor(&self) -> &Preprocessor {
        &self.preprocessor
    }

    pub fn regressor(&self) -> &RandomForestRegressor {
        &self.regressor
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn dataset() -> TrainingDataset {
        let data = [
            (1000.0, 2.0, 2.0, "Dubai Marina", 5.0, 1_200_000.0),
            (1100.0, 2.0, 2.0, "Dubai Marina", 3.0, 1_350_000.0),
            (800.0, 1.0, 1.0, "JVC", 2.0, 650_000.0),
            (750.0, 1.0, 1.0, "JVC", 8.0, 580_000.0),
            (2000.0, 4.0, 3.0, "Downtown", 10.0, 3_100_000.0),
            (1800.0, 3.0, 3.0, "Downtown", 6.0, 2_800_000.0),
            (1500.0, 3.0, 2.0, "Dubai Marina", 12.0, 1_700_000.0),
            (950.0, 2.0, 1.0, "JVC", 4.0, 820_000.0),
            (2500.0, 5.0, 4.0, "Downtown", 15.0, 3_900_000.0),
            (1200.0, 2.0, 2.0, "Business Bay", 7.0, 1_400_000.0),
        ];
        let mut dataset = TrainingDataset::default();
        for (area, beds, baths, location, age, price) in data {
            dataset.rows.push(FeatureRow {
                area_sqft: Some(area),
                bedrooms: Some(beds),
                bathrooms: Some(baths),
                location: Some(location.to_string()),
                age_years: Some(age),
            });
            dataset.targets.push(price);
        }
        dataset
    }

    fn small_params() -> ForestParams {
        ForestParams {
            n_estimators: 20,
            ..ForestParams::default()
        }
    }

    #[test]
    fn test_fit_predict_in_target_range() {
        let data = dataset();
        let pipeline = Pipeline::fit(&data, &small_params()).unwrap();
        let predictions = pipeline.predict(&data.rows).unwrap();
        assert_eq!(predictions.len(), data.len());
        for p in predictions {
            assert!((580_000.0..=3_900_000.0).contains(&p));
        }
    }

    #[test]
    fn test_fit_empty_dataset() {
        let err = Pipeline::fit(&TrainingDataset::default(), &small_params()).unwrap_err();
        assert!(matches!(err, PipelineError::EmptyDataset));
    }

    #[test]
    fn test_unseen_location_predicts() {
        let pipeline = Pipeline::fit(&dataset(), &small_params()).unwrap();
        let row = FeatureRow {
            area_sqft: Some(1000.0),
            bedrooms: Some(2.0),
            bathrooms: Some(2.0),
            location: Some("Atlantis".to_string()),
            age_years: Some(5.0),
        };
        let p = pipeline.predict(&[row]).unwrap();
        assert!(p[0].is_finite());
    }

    #[test]
    fn test_width_reflects_locations() {
        let pipeline = Pipeline::fit(&dataset(), &small_params()).unwrap();
        assert_eq!(pipeline.preprocessor().locations().len(), 4);
        assert_eq!(pipeline.regressor().n_features(), 8);
    }
}
