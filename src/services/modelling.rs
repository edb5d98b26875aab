use std::time::Instant;

use crate::error::Result;
use crate::logging::log_performance;
use crate::models::{AnalysisRequest, RegressionOutcome, HEART_RATE_PREDICTION};
use crate::services::analysis_service::AnalysisService;
use crate::services::lachesis::{duration_millis, LachesisClient};
use crate::services::linear_regression::fit_ols;

/// Trains a regression model for workout analysis.
///
/// Lachesis is tried first; when it is unavailable the same dataset is fitted
/// locally with ordinary least squares.
pub struct RegressionOrchestrator<S = LachesisClient> {
    service: S,
    metric: String,
}

impl RegressionOrchestrator<LachesisClient> {
    /// Orchestrator backed by a client configured from `LACHESIS_*` variables.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(LachesisClient::from_env()?))
    }
}

impl<S: AnalysisService> RegressionOrchestrator<S> {
    pub fn new(service: S) -> Self {
        Self {
            service,
            metric: HEART_RATE_PREDICTION.to_string(),
        }
    }

    pub fn with_metric(mut self, metric: impl Into<String>) -> Self {
        self.metric = metric.into();
        self
    }

    pub fn metric(&self) -> &str {
        &self.metric
    }

    pub fn service(&self) -> &S {
        &self.service
    }

    pub async fn fit(&self, features: Vec<Vec<f64>>, target: Vec<f64>) -> Result<RegressionOutcome> {
        let request = AnalysisRequest::new(self.metric.clone(), features, target);
        self.fit_request(request).await
    }

    pub async fn fit_request(&self, request: AnalysisRequest) -> Result<RegressionOutcome> {
        request.validate()?;

        let started = Instant::now();
        let remote = self.service.analyze(&request).await;
        log_performance("lachesis_analyze", duration_millis(started.elapsed()), remote.is_some());

        match remote {
            Some(result) if !result.is_empty() => {
                tracing::info!(
                    metric = %request.metric,
                    samples = request.len(),
                    "[modelling] Using Lachesis API results"
                );
                Ok(RegressionOutcome::Remote(result))
            }
            _ => {
                tracing::info!(
                    metric = %request.metric,
                    samples = request.len(),
                    "[modelling] Lachesis unavailable, falling back to local linear regression"
                );
                let started = Instant::now();
                let model = fit_ols(&request.features, &request.target);
                let elapsed_ms = duration_millis(started.elapsed());
                log_performance("local_regression_fit", elapsed_ms, model.is_ok());
                Ok(RegressionOutcome::Fallback(model?))
            }
        }
    }
}
