//! Training dataset parsing.
//!
//! Uploads are read with polars' CSV reader, then projected onto the feature schema.
//! Cells that fail to coerce to the column's type, and `NaN` cells, become missing values
//! and are left for the imputers; rows with no target are dropped.

use crate::schema::{FeatureRow, AGE_YEARS, AREA_SQFT, BATHROOMS, BEDROOMS, LOCATION, TARGET};
use polars::prelude::*;
use std::io::Cursor;
use thiserror::Error;

/// Dataset parsing errors
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("failed to parse CSV: {0}")]
    Parse(#[from] PolarsError),

    #[error("missing required column '{0}'")]
    MissingColumn(String),
}

/// Feature rows paired with their targets, ready for fitting.
#[derive(Debug, Clone, Default)]
pub struct TrainingDataset {
    pub rows: Vec<FeatureRow>,
    pub targets: Vec<f64>,
    /// Rows discarded because their target was missing.
    pub dropped: usize,
}

impl TrainingDataset {
    /// Parse CSV bytes with a header row into a cleaned dataset.
    pub fn from_csv_bytes(bytes: &[u8]) -> Result<Self, DatasetError> {
        let df = CsvReadOptions::default()
            .with_has_header(true)
            .with_infer_schema_length(Some(1000))
            .into_reader_with_file_handle(Cursor::new(bytes))
            .finish()?;

        Self::from_frame(&df)
    }

    /// Project a DataFrame onto the feature schema and drop rows without a target.
    pub fn from_frame(df: &DataFrame) -> Result<Self, DatasetError> {
        let targets = numeric_column(df, TARGET)?;
        let area = numeric_column(df, AREA_SQFT)?;
        let bedrooms = numeric_column(df, BEDROOMS)?;
        let bathrooms = numeric_column(df, BATHROOMS)?;
        let age = numeric_column(df, AGE_YEARS)?;
        let location = string_column(df, LOCATION)?;

        let mut dataset = TrainingDataset::default();
        for (i, target) in targets.into_iter().enumerate() {
            let Some(target) = target else {
                dataset.dropped += 1;
                continue;
            };
            dataset.rows.push(FeatureRow {
                area_sqft: area[i],
                bedrooms: bedrooms[i],
                bathrooms: bathrooms[i],
                location: location[i].clone(),
                age_years: age[i],
            });
            dataset.targets.push(target);
        }

        Ok(dataset)
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

fn series<'a>(df: &'a DataFrame, name: &str) -> Result<&'a Series, DatasetError> {
    df.column(name)
        .map(|column| column.as_materialized_series())
        .map_err(|_| DatasetError::MissingColumn(name.to_string()))
}

fn numeric_column(df: &DataFrame, name: &str) -> Result<Vec<Option<f64>>, DatasetError> {
    let cast = series(df, name)?.cast(&DataType::Float64)?;
    Ok(cast
        .f64()?
        .into_iter()
        .map(|value| value.filter(|v| !v.is_nan()))
        .collect())
}

fn string_column(df: &DataFrame, name: &str) -> Result<Vec<Option<String>>, DatasetError> {
    let cast = series(df, name)?.cast(&DataType::String)?;
    Ok(cast
        .str()?
        .into_iter()
        .map(|value| value.map(str::to_string))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "Area_sqft,Bedrooms,Bathrooms,Location,Age_years,Price_AED\n";

    #[test]
    fn test_parse_full_rows() {
        let csv = format!(
            "{HEADER}1000,2,2,Dubai Marina,5,1200000\n1500,3,2,Downtown,10,2100000\n"
        );
        let dataset = TrainingDataset::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.dropped, 0);
        assert_eq!(dataset.targets, vec![1_200_000.0, 2_100_000.0]);
        assert_eq!(dataset.rows[0].location.as_deref(), Some("Dubai Marina"));
        assert_eq!(dataset.rows[1].bedrooms, Some(3.0));
    }

    #[test]
    fn test_rows_without_target_dropped() {
        let csv = format!("{HEADER}1000,2,2,Dubai Marina,5,\n1500,3,2,Downtown,10,2100000\n");
        let dataset = TrainingDataset::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.dropped, 1);
        assert_eq!(dataset.rows[0].area_sqft, Some(1500.0));
    }

    #[test]
    fn test_missing_features_kept_as_none() {
        let csv = format!("{HEADER},2,,,5,900000\n1500,3,2,Downtown,10,2100000\n");
        let dataset = TrainingDataset::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.rows[0].area_sqft, None);
        assert_eq!(dataset.rows[0].bathrooms, None);
        assert_eq!(dataset.rows[0].location, None);
    }

    #[test]
    fn test_extra_columns_ignored() {
        let csv = "Id,Area_sqft,Bedrooms,Bathrooms,Location,Age_years,Price_AED\n\
                   7,800,1,1,JVC,3,650000\n";
        let dataset = TrainingDataset::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.len(), 1);
        assert_eq!(dataset.rows[0].area_sqft, Some(800.0));
    }

    #[test]
    fn test_missing_column_rejected() {
        let csv = "Area_sqft,Bedrooms,Bathrooms,Age_years,Price_AED\n1000,2,2,5,1200000\n";
        let err = TrainingDataset::from_csv_bytes(csv.as_bytes()).unwrap_err();
        assert!(matches!(err, DatasetError::MissingColumn(ref c) if c == "Location"));
    }

    #[test]
    fn test_nan_cells_are_missing() {
        let csv = format!(
            "{HEADER}1300,2,2,JVC,4,NaN\nNaN,3,2,Downtown,10,2100000\n1000,2,2,Dubai Marina,5,1200000\n"
        );
        let dataset = TrainingDataset::from_csv_bytes(csv.as_bytes()).unwrap();
        assert_eq!(dataset.dropped, 1);
        assert_eq!(dataset.len(), 2);
        assert_eq!(dataset.targets, vec![2_100_000.0, 1_200_000.0]);
        assert_eq!(dataset.rows[0].area_sqft, None);
        assert!(dataset.targets.iter().all(|t| t.is_finite()));
    }
}
