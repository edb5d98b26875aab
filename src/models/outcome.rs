use serde::Serialize;

use super::{AnalysisResult, FallbackModel};

/// What the orchestrator hands back: the remote analysis, or the local model.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "source", content = "result", rename_all = "snake_case")]
pub enum RegressionOutcome {
    Remote(AnalysisResult),
    Fallback(FallbackModel),
}

impl RegressionOutcome {
    pub fn is_remote(&self) -> bool {
        matches!(self, RegressionOutcome::Remote(_))
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RegressionOutcome::Fallback(_))
    }

    pub fn remote(&self) -> Option<&AnalysisResult> {
        match self {
            RegressionOutcome::Remote(result) => Some(result),
            RegressionOutcome::Fallback(_) => None,
        }
    }

    pub fn fallback(&self) -> Option<&FallbackModel> {
        match self {
            RegressionOutcome::Fallback(model) => Some(model),
            RegressionOutcome::Remote(_) => None,
        }
    }

    pub fn source(&self) -> &'static str {
        match self {
            RegressionOutcome::Remote(_) => "lachesis",
            RegressionOutcome::Fallback(_) => "local",
        }
    }
}

impl std::fmt::Display for RegressionOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RegressionOutcome::Remote(result) => match result.error_metric() {
                Some(metric) => write!(f, "lachesis result (error metric {metric})"),
                None => write!(f, "lachesis result"),
            },
            RegressionOutcome::Fallback(model) => write!(
                f,
                "local linear model ({} features, r2 {:.4})",
                model.n_features(),
                model.r_squared
            ),
        }
    }
}
