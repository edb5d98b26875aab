use std::time::Duration;

use thiserror::Error;

/// Failure of a single Lachesis attempt, or of client setup.
#[derive(Debug, Error)]
pub enum LachesisError {
    #[error("Request timeout after {timeout_ms}ms")]
    Timeout { timeout_ms: u64 },

    #[error("Network error: {source}")]
    NetworkError { source: reqwest::Error },

    #[error("HTTP {status}: {message}")]
    HttpStatus { status: u16, message: String },

    #[error("Parse error: {message}")]
    ParseError { message: String },

    #[error("Serialization error: {message}")]
    SerializationError { message: String },

    #[error("Configuration error: {message}")]
    ConfigurationError { message: String },
}

impl LachesisError {
    /// Transport problems, bad statuses and unparseable bodies are all
    /// transient; only local setup/serialization failures are not.
    pub fn is_retryable(&self) -> bool {
        !matches!(
            self,
            LachesisError::SerializationError { .. } | LachesisError::ConfigurationError { .. }
        )
    }

    pub fn is_timeout_error(&self) -> bool {
        matches!(self, LachesisError::Timeout { .. })
    }

    pub fn is_network_error(&self) -> bool {
        matches!(self, LachesisError::NetworkError { .. })
    }

    pub fn is_parse_error(&self) -> bool {
        matches!(self, LachesisError::ParseError { .. })
    }

    pub fn status(&self) -> Option<u16> {
        match self {
            LachesisError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    pub fn from_reqwest_error(error: reqwest::Error, timeout: Duration) -> Self {
        if error.is_timeout() {
            LachesisError::Timeout {
                timeout_ms: duration_millis(timeout),
            }
        } else if let Some(status) = error.status() {
            LachesisError::HttpStatus {
                status: status.as_u16(),
                message: error.to_string(),
            }
        } else {
            LachesisError::NetworkError { source: error }
        }
    }

    pub fn from_status_and_body(status: reqwest::StatusCode, body: &str) -> Self {
        // Prefer a structured error message when the service sends one
        let message = serde_json::from_str::<serde_json::Value>(body)
            .ok()
            .and_then(|value| {
                value
                    .get("error")
                    .and_then(|e| e.get("message").or(Some(e)))
                    .or_else(|| value.get("detail"))
                    .or_else(|| value.get("message"))
                    .and_then(|m| m.as_str())
                    .map(str::to_string)
            })
            .unwrap_or_else(|| truncate(body, 200));

        LachesisError::HttpStatus {
            status: status.as_u16(),
            message,
        }
    }
}

/// Whole milliseconds in `duration`, saturating at `u64::MAX`.
pub fn duration_millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}

fn truncate(text: &str, max_chars: usize) -> String {
    let trimmed = text.trim();
    if trimmed.chars().count() <= max_chars {
        trimmed.to_string()
    } else {
        let head: String = trimmed.chars().take(max_chars).collect();
        format!("{head}...")
    }
}

#[derive(Debug, Error)]
pub enum RetryError {
    #[error("Lachesis unavailable after {attempts} attempt(s): {last_error}")]
    MaxAttemptsExceeded {
        attempts: usize,
        last_error: LachesisError,
    },

    #[error("Non-retryable error: {source}")]
    NonRetryable { source: LachesisError },
}

impl RetryError {
    pub fn last_error(&self) -> &LachesisError {
        match self {
            RetryError::MaxAttemptsExceeded { last_error, .. } => last_error,
            RetryError::NonRetryable { source } => source,
        }
    }
}
