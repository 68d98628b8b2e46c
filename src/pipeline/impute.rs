//! Missing-value imputation.

use super::PipelineError;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Replaces missing numeric cells with the column mean seen at fit time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MeanImputer {
    statistics: Vec<f64>,
}

impl MeanImputer {
    /// Learn per-column means. `NaN` counts as missing. A column with no observed
    /// values imputes 0.0.
    pub fn fit(columns: &[Vec<Option<f64>>]) -> Self {
        let statistics = columns
            .iter()
            .map(|column| {
                let (sum, count) = column
                    .iter()
                    .flatten()
                    .filter(|v| !v.is_nan())
                    .fold((0.0f64, 0usize), |(sum, count), v| (sum + v, count + 1));
                if count == 0 {
                    0.0
                } else {
                    sum / count as f64
                }
            })
            .collect();
        Self { statistics }
    }

    pub fn statistics(&self) -> &[f64] {
        &self.statistics
    }

    pub fn transform(&self, row: &[Option<f64>]) -> Result<Vec<f64>, PipelineError> {
        if row.len() != self.statistics.len() {
            return Err(PipelineError::FeatureWidth {
                expected: self.statistics.len(),
                actual: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(&self.statistics)
            .map(|(value, mean)| value.filter(|v| !v.is_nan()).unwrap_or(*mean))
            .collect())
    }
}

/// Replaces missing categorical cells with the most frequent value seen at fit time.
///
/// Ties go to the lexicographically smallest value so fitting is deterministic.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MostFrequentImputer {
    statistics: Vec<String>,
}

impl MostFrequentImputer {
    pub fn fit(columns: &[Vec<Option<&str>>]) -> Self {
        let statistics = columns
            .iter()
            .map(|column| {
                let mut counts: HashMap<&str, usize> = HashMap::new();
                for value in column.iter().flatten() {
                    *counts.entry(*value).or_default() += 1;
                }
                counts
                    .into_iter()
                    .max_by(|(a, ca), (b, cb)| ca.cmp(cb).then_with(|| b.cmp(a)))
                    .map(|(value, _)| value.to_string())
                    .unwrap_or_default()
            })
            .collect();
        Self { statistics }
    }

    pub fn statistics(&self) -> &[String] {
        &self.statistics
    }

    pub fn transform<'a>(&'a self, row: &[Option<&'a str>]) -> Result<Vec<&'a str>, PipelineError> {
        if row.len() != self.statistics.len() {
            return Err(PipelineError::FeatureWidth {
                expected: self.statistics.len(),
                actual: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(&self.statistics)
            .map(|(value, fill)| value.unwrap_or(fill.as_str()))
            .collect())
    }
}
