pub mod models;
pub mod services;

pub mod env;
pub mod error;
pub mod logging;

pub use error::{FitError, ModellingError, Result};
pub use logging::{init_logging, LoggingConfig};
pub use models::{AnalysisRequest, AnalysisResult, FallbackModel, RegressionOutcome};
pub use services::{AnalysisService, LachesisClient, LachesisConfig, RegressionOrchestrator};
