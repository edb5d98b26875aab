pub mod client;
pub mod errors;
pub mod retry;

pub use client::{LachesisClient, LachesisConfig, DEFAULT_RETRIES, DEFAULT_TIMEOUT, DEFAULT_URL};
pub use errors::{duration_millis, LachesisError, RetryError};
pub use retry::{with_retry, LinearBackoff, RetryConfig, RetryHandler, DEFAULT_BACKOFF_STEP};
