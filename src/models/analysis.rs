use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::FitError;

/// Metric identifier sent with every regression request.
pub const HEART_RATE_PREDICTION: &str = "heart_rate_prediction";

/// Dataset posted to Lachesis.
///
/// Serializes as `{"metric": ..., "features": [[...], ...], "target": [...]}`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    pub metric: String,
    pub features: Vec<Vec<f64>>,
    pub target: Vec<f64>,
}

impl AnalysisRequest {
    pub fn new(metric: impl Into<String>, features: Vec<Vec<f64>>, target: Vec<f64>) -> Self {
        Self {
            metric: metric.into(),
            features,
            target,
        }
    }

    pub fn heart_rate_prediction(features: Vec<Vec<f64>>, target: Vec<f64>) -> Self {
        Self::new(HEART_RATE_PREDICTION, features, target)
    }

    /// Number of samples (target values).
    pub fn len(&self) -> usize {
        self.target.len()
    }

    pub fn is_empty(&self) -> bool {
        self.features.is_empty() && self.target.is_empty()
    }

    /// Width of the first feature row, if any.
    pub fn feature_width(&self) -> Option<usize> {
        self.features.first().map(Vec::len)
    }

    /// Checks the shape of the dataset: one target per feature row and
    /// rows of equal width. An empty dataset is well-shaped.
    pub fn validate(&self) -> Result<(), FitError> {
        if self.features.len() != self.target.len() {
            return Err(FitError::LengthMismatch {
                features: self.features.len(),
                target: self.target.len(),
            });
        }

        if let Some(expected) = self.feature_width() {
            if let Some((row, found)) = self
                .features
                .iter()
                .map(Vec::len)
                .enumerate()
                .find(|(_, width)| *width != expected)
            {
                return Err(FitError::RaggedFeatures {
                    row,
                    expected,
                    found,
                });
            }
        }

        Ok(())
    }
}

/// Parsed Lachesis response: an arbitrary JSON object.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct AnalysisResult(Map<String, Value>);

impl AnalysisResult {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self(fields)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// First error metric present, looked up as `rmse`, `mse`, then `mae`.
    pub fn error_metric(&self) -> Option<f64> {
        ["rmse", "mse", "mae"]
            .iter()
            .find_map(|key| self.0.get(*key).and_then(Value::as_f64))
    }

    /// The `predictions` array, when every element is numeric.
    pub fn predictions(&self) -> Option<Vec<f64>> {
        self.0
            .get("predictions")?
            .as_array()?
            .iter()
            .map(Value::as_f64)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for AnalysisResult {
    fn from(fields: Map<String, Value>) -> Self {
        Self(fields)
    }
}
