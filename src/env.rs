//! Environment variable constants used throughout the crate
//!
//! This module centralizes all environment variable names so the client and
//! the logging setup read the same keys.

/// Logging configuration
pub mod logging {
    /// Log level configuration (e.g., "debug", "info", "warn", "error")
    pub const LOG_LEVEL: &str = "LACHESIS_LOG_LEVEL";

    /// Log file path for file-based logging
    pub const LOG_FILE: &str = "LACHESIS_LOG_FILE";

    /// Disable colored output (follows the NO_COLOR standard)
    pub const NO_COLOR: &str = "NO_COLOR";
}

/// Lachesis analysis API configuration
pub mod lachesis {
    /// Endpoint receiving the analysis POST
    pub const URL: &str = "LACHESIS_URL";

    /// Bearer token; empty means no Authorization header
    pub const TOKEN: &str = "LACHESIS_TOKEN";

    /// Per-attempt timeout in seconds (fractions allowed)
    pub const TIMEOUT: &str = "LACHESIS_TIMEOUT";

    /// Number of retries after the first attempt
    pub const RETRIES: &str = "LACHESIS_RETRIES";
}
