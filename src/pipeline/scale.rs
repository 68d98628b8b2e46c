//! Standardization of numeric columns.

use super::PipelineError;
use serde::{Deserialize, Serialize};

/// Centers each column on its mean and divides by its population standard deviation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StandardScaler {
    mean: Vec<f64>,
    scale: Vec<f64>,
}

impl StandardScaler {
    /// Constant columns get a scale of 1 so they map to 0 instead of NaN.
    pub fn fit(columns: &[Vec<f64>]) -> Self {
        let mut mean = Vec::with_capacity(columns.len());
        let mut scale = Vec::with_capacity(columns.len());

        for column in columns {
            let n = column.len().max(1) as f64;
            let mu = column.iter().sum::<f64>() / n;
            let var = column.iter().map(|v| (v - mu) * (v - mu)).sum::<f64>() / n;
            let std = var.sqrt();
            mean.push(mu);
            scale.push(if std > f64::EPSILON { std } else { 1.0 });
        }

        Self { mean, scale }
    }

    pub fn mean(&self) -> &[f64] {
        &self.mean
    }

    pub fn scale(&self) -> &[f64] {
        &self.scale
    }

    pub fn transform(&self, row: &[f64]) -> Result<Vec<f64>, PipelineError> {
        if row.len() != self.mean.len() {
            return Err(PipelineError::FeatureWidth {
                expected: self.mean.len(),
                actual: row.len(),
            });
        }
        Ok(row
            .iter()
            .zip(self.mean.iter().zip(&self.scale))
            .map(|(v, (mu, s))| (v - mu) / s)
            .collect())
    }
}
