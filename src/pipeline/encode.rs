//! One-hot encoding of categorical columns.

use super::PipelineError;
use serde::{Deserialize, Serialize};

/// One indicator column per category seen at fit time, categories sorted.
///
/// A value never seen during fitting encodes as all zeros for its column rather than
/// failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OneHotEncoder {
    categories: Vec<Vec<String>>,
}

impl OneHotEncoder {
    pub fn fit(columns: &[Vec<&str>]) -> Self {
        let categories = columns
            .iter()
            .map(|column| {
                let mut values: Vec<String> = column.iter().map(|v| v.to_string()).collect();
                values.sort();
                values.dedup();
                values
            })
            .collect();
        Self { categories }
    }

    pub fn categories(&self) -> &[Vec<String>] {
        &self.categories
    }

    /// Number of indicator columns produced.
    pub fn width(&self) -> usize {
        self.categories.iter().map(Vec::len).sum()
    }

    /// Append the indicators for `row` to `out`.
    pub fn transform_into(&self, row: &[&str], out: &mut Vec<f64>) -> Result<(), PipelineError> {
        if row.len() != self.categories.len() {
            return Err(PipelineError::FeatureWidth {
                expected: self.categories.len(),
                actual: row.len(),
            });
        }
        for (value, categories) in row.iter().zip(&self.categories) {
            let hit = categories.binary_search_by(|c| c.as_str().cmp(value)).ok();
            out.extend((0..categories.len()).map(|i| if Some(i) == hit { 1.0 } else { 0.0 }));
        }
        Ok(())
    }
}
