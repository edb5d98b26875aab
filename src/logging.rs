use anyhow::{Context, Result};
use std::env;
use std::path::{Path, PathBuf};
use tracing::Level;
use tracing_subscriber::{filter::LevelFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt, Registry};

use crate::env::logging as env_vars;

/// Logging configuration for the modelling helper
#[derive(Debug, Clone, PartialEq)]
pub struct LoggingConfig {
    /// Log level (error, warn, info, debug, trace)
    pub level: Level,
    /// Whether to log to stdout
    pub stdout: bool,
    /// Optional file path for logging
    pub file_path: Option<PathBuf>,
    /// Whether to use ANSI colors
    pub use_colors: bool,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Level::INFO,
            stdout: true,
            file_path: None,
            use_colors: true,
        }
    }
}

impl LoggingConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    pub fn with_stdout(mut self, enabled: bool) -> Self {
        self.stdout = enabled;
        self
    }

    pub fn with_file<P: Into<PathBuf>>(mut self, path: P) -> Self {
        self.file_path = Some(path.into());
        self
    }

    pub fn with_colors(mut self, enabled: bool) -> Self {
        self.use_colors = enabled;
        self
    }

    /// Create config from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();

        if let Some(level_str) = lookup(env_vars::LOG_LEVEL) {
            config.level = parse_level(&level_str);
        }

        if let Some(file_path) = lookup(env_vars::LOG_FILE).filter(|path| !path.is_empty()) {
            config.file_path = Some(PathBuf::from(file_path));
        }

        // Any value of NO_COLOR disables colors
        if lookup(env_vars::NO_COLOR).is_some() {
            config.use_colors = false;
        }

        config
    }

    /// Debug-level config for local work
    pub fn development() -> Self {
        Self {
            level: Level::DEBUG,
            ..Self::default()
        }
    }
}

fn parse_level(value: &str) -> Level {
    match value.trim().to_lowercase().as_str() {
        "error" => Level::ERROR,
        "warn" | "warning" => Level::WARN,
        "debug" => Level::DEBUG,
        "trace" => Level::TRACE,
        _ => Level::INFO,
    }
}

/// Initialize logging with the given configuration
pub fn init_logging(config: LoggingConfig) -> Result<()> {
    let stdout_layer = config.stdout.then(|| {
        fmt::layer()
            .with_ansi(config.use_colors)
            .with_level(true)
            .with_target(true)
    });

    let file_layer = match &config.file_path {
        Some(path) => {
            let file_name = path
                .file_name()
                .with_context(|| format!("Log file path has no file name: {}", path.display()))?;
            let directory = path
                .parent()
                .filter(|dir| !dir.as_os_str().is_empty())
                .unwrap_or_else(|| Path::new("."));

            Some(
                fmt::layer()
                    .with_ansi(false)
                    .with_target(true)
                    .with_writer(tracing_appender::rolling::never(directory, file_name)),
            )
        }
        None => None,
    };

    Registry::default()
        .with(LevelFilter::from_level(config.level))
        .with(stdout_layer)
        .with(file_layer)
        .try_init()
        .context("Failed to install tracing subscriber")?;

    tracing::debug!(
        level = ?config.level,
        stdout = config.stdout,
        file_path = ?config.file_path,
        "Logging initialized"
    );

    Ok(())
}

/// Initialize logging from environment variables
pub fn init_from_env() -> Result<()> {
    init_logging(LoggingConfig::from_env())
}

/// Log how long an operation took; failures are reported at warn level
pub fn log_performance(operation: &str, duration_ms: u64, success: bool) {
    if success {
        tracing::debug!(
            operation = operation,
            duration_ms = duration_ms,
            success = success,
            "Operation completed"
        );
    } else {
        tracing::warn!(
            operation = operation,
            duration_ms = duration_ms,
            success = success,
            "Operation failed"
        );
    }
}
