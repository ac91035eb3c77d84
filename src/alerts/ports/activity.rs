//! Read access to review scores and worker runs.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use crate::alerts::domain::WorkerRun;

/// Result type for activity source operations.
pub type ActivitySourceResult<T> = Result<T, ActivitySourceError>;

/// Source of recent review scores and worker outcomes.
#[async_trait]
pub trait ActivitySource: Send + Sync {
    /// Returns at most `limit` review scores, newest first.
    ///
    /// # Errors
    ///
    /// Returns [`ActivitySourceError::Persistence`] on storage failure.
    async fn recent_review_scores(&self, limit: usize) -> ActivitySourceResult<Vec<f64>>;

    /// Returns the recorded worker runs.
    ///
    /// # Errors
    ///
    /// Returns [`ActivitySourceError::Persistence`] on storage failure.
    async fn worker_runs(&self) -> ActivitySourceResult<Vec<WorkerRun>>;
}

/// Errors returned by activity source implementations.
#[derive(Debug, Clone, Error)]
pub enum ActivitySourceError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ActivitySourceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
