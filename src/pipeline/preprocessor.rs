//! Column transformer turning [`FeatureRow`]s into the regressor's input matrix.
//!
//! Output layout is `[scaled numeric features..., one-hot location indicators...]`,
//! numeric features in [`NUMERIC_FEATURES`] order.

use super::{
    encode::OneHotEncoder,
    impute::{MeanImputer, MostFrequentImputer},
    scale::StandardScaler,
    PipelineError,
};
use crate::schema::{FeatureRow, CATEGORICAL_FEATURES, NUMERIC_FEATURES};
use ndarray::Array2;
use serde::{Deserialize, Serialize};

/// Fitted preprocessing stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Preprocessor {
    numeric_imputer: MeanImputer,
    scaler: StandardScaler,
    categorical_imputer: MostFrequentImputer,
    encoder: OneHotEncoder,
}

impl Preprocessor {
    /// Fit every stage on `rows`. Each stage is fit on the output of the one before.
    pub fn fit(rows: &[FeatureRow]) -> Result<Self, PipelineError> {
        if rows.is_empty() {
            return Err(PipelineError::EmptyDataset);
        }

        let numeric_columns: Vec<Vec<Option<f64>>> = (0..NUMERIC_FEATURES.len())
            .map(|j| rows.iter().map(|row| row.numeric()[j]).collect())
            .collect();
        let numeric_imputer = MeanImputer::fit(&numeric_columns);

        let mut imputed_columns = vec![Vec::with_capacity(rows.len()); NUMERIC_FEATURES.len()];
        for row in rows {
            let imputed = numeric_imputer.transform(&row.numeric())?;
            for (column, value) in imputed_columns.iter_mut().zip(imputed) {
                column.push(value);
            }
        }
        let scaler = StandardScaler::fit(&imputed_columns);

        let categorical_columns: Vec<Vec<Option<&str>>> = (0..CATEGORICAL_FEATURES.len())
            .map(|j| rows.iter().map(|row| row.categorical()[j]).collect())
            .collect();
        let categorical_imputer = MostFrequentImputer::fit(&categorical_columns);

        let mut filled_columns: Vec<Vec<&str>> =
            vec![Vec::with_capacity(rows.len()); CATEGORICAL_FEATURES.len()];
        for row in rows {
            let filled = categorical_imputer.transform(&row.categorical())?;
            for (column, value) in filled_columns.iter_mut().zip(filled) {
                column.push(value);
            }
        }
        let encoder = OneHotEncoder::fit(&filled_columns);

        Ok(Self {
            numeric_imputer,
            scaler,
            categorical_imputer,
            encoder,
        })
    }

    /// Width of each transformed row.
    pub fn n_output_features(&self) -> usize {
        NUMERIC_FEATURES.len() + self.encoder.width()
    }

    /// Categories learned for the location column.
    pub fn locations(&self) -> &[String] {
        self.encoder
            .categories()
            .first()
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    pub fn transform(&self, rows: &[FeatureRow]) -> Result<Array2<f64>, PipelineError> {
        let width = self.n_output_features();
        let mut data = Vec::with_capacity(rows.len() * width);

        for row in rows {
            let imputed = self.numeric_imputer.transform(&row.numeric())?;
            data.extend(self.scaler.transform(&imputed)?);
            let filled = self.categorical_imputer.transform(&row.categorical())?;
            self.encoder.transform_into(&filled, &mut data)?;
        }

        Ok(Array2::from_shape_vec((rows.len(), width), data)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(area: Option<f64>, location: Option<&str>) -> FeatureRow {
        FeatureRow {
            area_sqft: area,
            bedrooms: Some(2.0),
            bathrooms: Some(1.0),
            location: location.map(str::to_string),
            age_years: Some(4.0),
        }
    }

    #[test]
    fn test_fit_rejects_empty() {
        assert!(matches!(
            Preprocessor::fit(&[]),
            Err(PipelineError::EmptyDataset)
        ));
    }

    #[test]
    fn test_transform_layout() {
        let rows = vec![
            row(Some(1000.0), Some("Marina")),
            row(Some(2000.0), Some("Downtown")),
        ];
        let pre = Preprocessor::fit(&rows).unwrap();
        assert_eq!(pre.n_output_features(), 6);
        assert_eq!(pre.locations(), &["Downtown".to_string(), "Marina".to_string()]);

        let x = pre.transform(&rows).unwrap();
        assert_eq!(x.shape(), &[2, 6]);
        // Area standardizes to -1 / +1, constant columns to 0.
        assert!((x[[0, 0]] + 1.0).abs() < 1e-12);
        assert!((x[[1, 0]] - 1.0).abs() < 1e-12);
        assert_eq!(x[[0, 1]], 0.0);
        // Marina is the second category.
        assert_eq!(x[[0, 4]], 0.0);
        assert_eq!(x[[0, 5]], 1.0);
        assert_eq!(x[[1, 4]], 1.0);
    }

    #[test]
    fn test_missing_values_imputed() {
        let rows = vec![
            row(Some(1000.0), Some("Marina")),
            row(Some(3000.0), Some("Marina")),
            row(None, None),
        ];
        let pre = Preprocessor::fit(&rows).unwrap();
        let x = pre.transform(&[row(None, None)]).unwrap();
        // Mean area scales to 0, location falls back to the mode.
        assert!(x[[0, 0]].abs() < 1e-12);
        assert_eq!(x[[0, 4]], 1.0);
    }

    #[test]
    fn test_unseen_location_encodes_as_zeros() {
        let rows = vec![row(Some(1000.0), Some("Marina")), row(Some(1200.0), Some("JVC"))];
        let pre = Preprocessor::fit(&rows).unwrap();
        let x = pre.transform(&[row(Some(1100.0), Some("Atlantis"))]).unwrap();
        assert_eq!(x[[0, 4]], 0.0);
        assert_eq!(x[[0, 5]], 0.0);
    }
}
