use async_trait::async_trait;
use reqwest::header::{AUTHORIZATION, CONTENT_TYPE};
use reqwest::{Client, Response};
use std::time::Duration;
use tokio::time::timeout;

use super::errors::{duration_millis, LachesisError, RetryError};
use super::retry::{with_retry, RetryConfig, DEFAULT_BACKOFF_STEP};
use crate::env::lachesis as env_vars;
use crate::models::{AnalysisRequest, AnalysisResult};
use crate::services::analysis_service::AnalysisService;

pub const DEFAULT_URL: &str = "https://lachesis.example.com/api/v1/analyze";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(12);
pub const DEFAULT_RETRIES: usize = 2;

#[derive(Debug, Clone, PartialEq)]
pub struct LachesisConfig {
    pub url: String,
    /// Sent as `Authorization: Bearer <token>` when present
    pub token: Option<String>,
    /// Bound on each attempt, connect plus read
    pub timeout: Duration,
    /// Retries after the first attempt
    pub retries: usize,
    pub backoff_step: Duration,
}

impl Default for LachesisConfig {
    fn default() -> Self {
        Self {
            url: DEFAULT_URL.to_string(),
            token: None,
            timeout: DEFAULT_TIMEOUT,
            retries: DEFAULT_RETRIES,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl LachesisConfig {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            ..Default::default()
        }
    }

    /// Reads `LACHESIS_URL`, `LACHESIS_TOKEN`, `LACHESIS_TIMEOUT` and
    /// `LACHESIS_RETRIES`, falling back to defaults for unset variables.
    pub fn from_env() -> Result<Self, LachesisError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, LachesisError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(url) = lookup(env_vars::URL) {
            config.url = url;
        }

        config.token = lookup(env_vars::TOKEN).filter(|token| !token.is_empty());

        if let Some(raw) = lookup(env_vars::TIMEOUT) {
            config.timeout = parse_timeout(&raw)?;
        }

        if let Some(raw) = lookup(env_vars::RETRIES) {
            config.retries = raw.trim().parse::<usize>().map_err(|e| {
                LachesisError::ConfigurationError {
                    message: format!(
                        "{} must be a non-negative integer, got {raw:?}: {e}",
                        env_vars::RETRIES
                    ),
                }
            })?;
        }

        Ok(config)
    }

    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        let token = token.into();
        self.token = (!token.is_empty()).then_some(token);
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn with_retries(mut self, retries: usize) -> Self {
        self.retries = retries;
        self
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }

    pub fn total_attempts(&self) -> usize {
        self.retries.saturating_add(1)
    }

    pub fn validate(&self) -> Result<(), LachesisError> {
        if self.url.trim().is_empty() {
            return Err(LachesisError::ConfigurationError {
                message: "Lachesis URL cannot be empty".to_string(),
            });
        }

        if self.timeout.is_zero() {
            return Err(LachesisError::ConfigurationError {
                message: "Timeout must be greater than zero".to_string(),
            });
        }

        Ok(())
    }
}

fn parse_timeout(raw: &str) -> Result<Duration, LachesisError> {
    let invalid = |detail: String| LachesisError::ConfigurationError {
        message: format!(
            "{} must be a positive number of seconds, got {raw:?}{detail}",
            env_vars::TIMEOUT
        ),
    };

    let seconds = raw
        .trim()
        .parse::<f64>()
        .map_err(|e| invalid(format!(": {e}")))?;
    if !seconds.is_finite() || seconds <= 0.0 {
        return Err(invalid(String::new()));
    }

    Duration::try_from_secs_f64(seconds).map_err(|e| invalid(format!(": {e}")))
}

/// HTTP client for the Lachesis analysis API.
///
/// Failures are retried with linear backoff; [`LachesisClient::send`] never
/// fails, it reports an unavailable service as `None`.
#[derive(Debug, Clone)]
pub struct LachesisClient {
    config: LachesisConfig,
    client: Client,
}

impl LachesisClient {
    pub fn new(config: LachesisConfig) -> Result<Self, LachesisError> {
        config.validate()?;

        let client = Client::builder()
            .timeout(config.timeout)
            .connect_timeout(config.timeout)
            .build()
            .map_err(|e| LachesisError::ConfigurationError {
                message: format!("Failed to create HTTP client: {e}"),
            })?;

        Ok(Self { config, client })
    }

    pub fn from_env() -> Result<Self, LachesisError> {
        Self::new(LachesisConfig::from_env()?)
    }

    pub fn config(&self) -> &LachesisConfig {
        &self.config
    }

    /// Posts the request, retrying transient failures. `None` means every
    /// attempt failed.
    pub async fn send(&self, request: &AnalysisRequest) -> Option<AnalysisResult> {
        match self.try_send(request).await {
            Ok(result) => Some(result),
            Err(error) => {
                tracing::debug!(url = %self.config.url, error = %error, "Lachesis unavailable");
                None
            }
        }
    }

    pub async fn try_send(&self, request: &AnalysisRequest) -> Result<AnalysisResult, RetryError> {
        let body = serde_json::to_string(request).map_err(|e| RetryError::NonRetryable {
            source: LachesisError::SerializationError {
                message: e.to_string(),
            },
        })?;

        let retry_config = RetryConfig::new(self.config.total_attempts())
            .with_backoff_step(self.config.backoff_step);

        with_retry(retry_config, || self.post_once(&body)).await
    }

    /// A single attempt without retries.
    pub async fn send_once(&self, request: &AnalysisRequest) -> Result<AnalysisResult, LachesisError> {
        let body = serde_json::to_string(request).map_err(|e| LachesisError::SerializationError {
            message: e.to_string(),
        })?;
        self.post_once(&body).await
    }

    async fn post_once(&self, body: &str) -> Result<AnalysisResult, LachesisError> {
        let mut builder = self
            .client
            .post(&self.config.url)
            .header(CONTENT_TYPE, "application/json")
            .body(body.to_owned());

        if let Some(token) = &self.config.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {token}"));
        }

        let response = timeout(self.config.timeout, builder.send())
            .await
            .map_err(|_| LachesisError::Timeout {
                timeout_ms: duration_millis(self.config.timeout),
            })?
            .map_err(|e| LachesisError::from_reqwest_error(e, self.config.timeout))?;

        self.handle_response(response).await
    }

    async fn handle_response(&self, response: Response) -> Result<AnalysisResult, LachesisError> {
        let status = response.status();

        if status.is_success() {
            let response_text = response
                .text()
                .await
                .map_err(|e| LachesisError::from_reqwest_error(e, self.config.timeout))?;

            serde_json::from_str(&response_text).map_err(|e| LachesisError::ParseError {
                message: format!("Failed to parse response: {e}"),
            })
        } else {
            let error_body = response
                .text()
                .await
                .unwrap_or_else(|_| "Unable to read error response".to_string());

            Err(LachesisError::from_status_and_body(status, &error_body))
        }
    }
}

#[async_trait]
impl AnalysisService for LachesisClient {
    async fn analyze(&self, request: &AnalysisRequest) -> Option<AnalysisResult> {
        self.send(request).await
    }
}
