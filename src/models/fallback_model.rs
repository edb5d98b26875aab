use serde::{Deserialize, Serialize};

use crate::error::FitError;

/// Linear model fitted locally when Lachesis is unavailable.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FallbackModel {
    /// One weight per feature column
    pub coefficients: Vec<f64>,
    pub intercept: f64,
    /// Coefficient of determination on the training data
    pub r_squared: f64,
    /// Number of samples the model was fitted on
    pub n_samples: usize,
}

impl FallbackModel {
    pub fn n_features(&self) -> usize {
        self.coefficients.len()
    }

    /// Slope of a single-feature model.
    pub fn slope(&self) -> Option<f64> {
        match self.coefficients.as_slice() {
            [slope] => Some(*slope),
            _ => None,
        }
    }

    pub fn predict(&self, row: &[f64]) -> Result<f64, FitError> {
        if row.len() != self.coefficients.len() {
            return Err(FitError::FeatureCountMismatch {
                expected: self.coefficients.len(),
                found: row.len(),
            });
        }

        Ok(self.intercept
            + self
                .coefficients
                .iter()
                .zip(row)
                .map(|(weight, value)| weight * value)
                .sum::<f64>())
    }

    pub fn predict_batch(&self, rows: &[Vec<f64>]) -> Result<Vec<f64>, FitError> {
        rows.iter().map(|row| self.predict(row)).collect()
    }
}
