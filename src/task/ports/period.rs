//! Repository port for period persistence and lookup.

use crate::task::domain::{Period, PeriodId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for period repository operations.
pub type PeriodRepositoryResult<T> = Result<T, PeriodRepositoryError>;

/// Period persistence contract.
#[async_trait]
pub trait PeriodRepository: Send + Sync {
    /// Stores a new period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodRepositoryError::DuplicatePeriod`] when the identifier
    /// already exists.
    async fn store(&self, period: &Period) -> PeriodRepositoryResult<()>;

    /// Persists changes to an existing period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodRepositoryError::NotFound`] when the period does not
    /// exist.
    async fn update(&self, period: &Period) -> PeriodRepositoryResult<()>;

    /// Finds a period by identifier.
    async fn find_by_id(&self, id: &PeriodId) -> PeriodRepositoryResult<Option<Period>>;

    /// Returns every period that has not been closed, oldest first.
    async fn list_active(&self) -> PeriodRepositoryResult<Vec<Period>>;
}

/// Errors returned by period repository implementations.
#[derive(Debug, Clone, Error)]
pub enum PeriodRepositoryError {
    /// A period with the same identifier already exists.
    #[error("duplicate period identifier: {0}")]
    DuplicatePeriod(PeriodId),

    /// The period was not found.
    #[error("period not found: {0}")]
    NotFound(PeriodId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PeriodRepositoryError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
