use async_trait::async_trait;

use crate::models::{AnalysisRequest, AnalysisResult};

/// Remote regression backend consulted before the local fallback.
///
/// Implementations must not fail: an unreachable or misbehaving backend is
/// reported as `None`.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait AnalysisService {
    async fn analyze(&self, request: &AnalysisRequest) -> Option<AnalysisResult>;
}
