pub mod analysis;
pub mod fallback_model;
pub mod outcome;

pub use analysis::{AnalysisRequest, AnalysisResult, HEART_RATE_PREDICTION};
pub use fallback_model::FallbackModel;
pub use outcome::RegressionOutcome;
