use backoff::backoff::Backoff;
use std::future::Future;
use std::time::Duration;

use super::errors::{duration_millis, LachesisError, RetryError};

pub const DEFAULT_BACKOFF_STEP: Duration = Duration::from_millis(700);

/// Linear backoff: `step`, `2 * step`, `3 * step`, ...
#[derive(Debug, Clone)]
pub struct LinearBackoff {
    step: Duration,
    issued: u32,
}

impl LinearBackoff {
    pub fn new(step: Duration) -> Self {
        Self { step, issued: 0 }
    }
}

impl Default for LinearBackoff {
    fn default() -> Self {
        Self::new(DEFAULT_BACKOFF_STEP)
    }
}

impl Backoff for LinearBackoff {
    fn reset(&mut self) {
        self.issued = 0;
    }

    fn next_backoff(&mut self) -> Option<Duration> {
        self.issued = self.issued.saturating_add(1);
        self.step.checked_mul(self.issued)
    }
}

#[derive(Debug, Clone)]
pub struct RetryConfig {
    /// Total attempts, including the first one
    pub max_attempts: usize,
    pub backoff_step: Duration,
}

impl Default for RetryConfig {
    fn default() -> Self {
        Self {
            max_attempts: 3,
            backoff_step: DEFAULT_BACKOFF_STEP,
        }
    }
}

impl RetryConfig {
    pub fn new(max_attempts: usize) -> Self {
        Self {
            max_attempts,
            ..Default::default()
        }
    }

    pub fn with_backoff_step(mut self, step: Duration) -> Self {
        self.backoff_step = step;
        self
    }
}

pub struct RetryHandler {
    config: RetryConfig,
    backoff: LinearBackoff,
    attempts: usize,
}

impl RetryHandler {
    pub fn new(config: RetryConfig) -> Self {
        let backoff = LinearBackoff::new(config.backoff_step);
        Self {
            config,
            backoff,
            attempts: 0,
        }
    }

    pub async fn retry<F, Fut, T>(&mut self, mut operation: F) -> Result<T, RetryError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = Result<T, LachesisError>>,
    {
        // At least one attempt is always made
        let total = self.config.max_attempts.max(1);

        loop {
            self.attempts += 1;

            match operation().await {
                Ok(result) => return Ok(result),
                Err(error) => {
                    tracing::warn!(
                        attempt = self.attempts,
                        total_attempts = total,
                        error = %error,
                        "[lachesis] request failed (attempt {}/{}): {}",
                        self.attempts,
                        total,
                        error
                    );

                    if !error.is_retryable() {
                        return Err(RetryError::NonRetryable { source: error });
                    }

                    // For the last attempt, don't wait
                    if self.attempts >= total {
                        return Err(RetryError::MaxAttemptsExceeded {
                            attempts: self.attempts,
                            last_error: error,
                        });
                    }

                    let delay = self
                        .backoff
                        .next_backoff()
                        .unwrap_or(self.config.backoff_step);

                    tracing::debug!(delay_ms = duration_millis(delay), "Backing off before retry");
                    tokio::time::sleep(delay).await;
                }
            }
        }
    }

    pub fn attempts(&self) -> usize {
        self.attempts
    }

    pub fn reset(&mut self) {
        self.attempts = 0;
        self.backoff.reset();
    }
}

pub async fn with_retry<F, Fut, T>(config: RetryConfig, operation: F) -> Result<T, RetryError>
where
    F: FnMut() -> Fut,
    Fut: Future<Output = Result<T, LachesisError>>,
{
    let mut handler = RetryHandler::new(config);
    handler.retry(operation).await
}
