//! Service layer for opening and closing periods.

use crate::task::{
    domain::{Period, PeriodId, TaskDomainError},
    ports::{PeriodRepository, PeriodRepositoryError},
};
use mockable::Clock;
use std::sync::Arc;
use thiserror::Error;

/// Service-level errors for period operations.
#[derive(Debug, Error)]
pub enum PeriodLifecycleError {
    /// Domain validation failed.
    #[error(transparent)]
    Domain(#[from] TaskDomainError),
    /// Repository operation failed.
    #[error(transparent)]
    Repository(#[from] PeriodRepositoryError),
    /// No period exists with the given identifier.
    #[error("period {0} not found")]
    NotFound(PeriodId),
}

/// Period lifecycle orchestration service.
#[derive(Clone)]
pub struct PeriodLifecycleService<P, C>
where
    P: PeriodRepository,
    C: Clock + Send + Sync,
{
    repository: Arc<P>,
    clock: Arc<C>,
}

impl<P, C> PeriodLifecycleService<P, C>
where
    P: PeriodRepository,
    C: Clock + Send + Sync,
{
    /// Creates a new period lifecycle service.
    #[must_use]
    pub const fn new(repository: Arc<P>, clock: Arc<C>) -> Self {
        Self { repository, clock }
    }

    /// Opens and stores a period starting now.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodLifecycleError::Repository`] when the identifier is
    /// taken or persistence fails.
    pub async fn open_period(
        &self,
        id: PeriodId,
        name: impl Into<String> + Send,
    ) -> Result<Period, PeriodLifecycleError> {
        let period = Period::open(id, name, &*self.clock);
        self.repository.store(&period).await?;
        Ok(period)
    }

    /// Closes an open period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodLifecycleError::NotFound`] for unknown periods,
    /// [`TaskDomainError::PeriodAlreadyClosed`] for closed ones, or
    /// repository errors.
    pub async fn close_period(&self, id: &PeriodId) -> Result<Period, PeriodLifecycleError> {
        let mut period = self
            .repository
            .find_by_id(id)
            .await?
            .ok_or_else(|| PeriodLifecycleError::NotFound(id.clone()))?;
        period.close(&*self.clock)?;
        self.repository.update(&period).await?;
        Ok(period)
    }
}
