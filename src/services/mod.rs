pub mod analysis_service;
pub mod lachesis;
pub mod linear_regression;
pub mod modelling;

pub use analysis_service::AnalysisService;
pub use lachesis::{LachesisClient, LachesisConfig, LachesisError, RetryError};
pub use linear_regression::fit_ols;
pub use modelling::RegressionOrchestrator;
