use thiserror::Error;

use crate::services::lachesis::LachesisError;

pub type Result<T> = std::result::Result<T, ModellingError>;

/// Errors surfaced to callers of the regression orchestrator.
///
/// Remote failures never show up here: the client downgrades them to
/// "unavailable" and the local fit takes over.
#[derive(Debug, Error)]
pub enum ModellingError {
    #[error("Lachesis client setup failed: {0}")]
    Client(#[from] LachesisError),

    #[error("Local regression fit failed: {0}")]
    Fit(#[from] FitError),
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum FitError {
    #[error("Cannot fit a model on an empty dataset")]
    EmptyDataset,

    #[error("Feature rows ({features}) and target values ({target}) differ in length")]
    LengthMismatch { features: usize, target: usize },

    #[error("Feature row {row} has {found} values, expected {expected}")]
    RaggedFeatures {
        row: usize,
        expected: usize,
        found: usize,
    },

    #[error("Feature rows must contain at least one value")]
    NoFeatures,

    #[error("Need at least {required} samples to fit, got {samples}")]
    InsufficientSamples { samples: usize, required: usize },

    #[error("Non-finite value in {location}")]
    NonFinite { location: String },

    #[error("Normal equations are singular; features are constant or linearly dependent")]
    SingularMatrix,

    #[error("Model expects {expected} features, got {found}")]
    FeatureCountMismatch { expected: usize, found: usize },
}

impl ModellingError {
    pub fn is_fit_error(&self) -> bool {
        matches!(self, ModellingError::Fit(_))
    }

    pub fn as_fit_error(&self) -> Option<&FitError> {
        match self {
            ModellingError::Fit(error) => Some(error),
            ModellingError::Client(_) => None,
        }
    }
}
