//! In-memory repository for periods.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::task::{
    domain::{Period, PeriodId},
    ports::{PeriodRepository, PeriodRepositoryError, PeriodRepositoryResult},
};

/// Thread-safe in-memory period repository.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPeriodRepository {
    periods: Arc<RwLock<Vec<Period>>>,
}

impl InMemoryPeriodRepository {
    /// Creates an empty in-memory repository.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PeriodRepository for InMemoryPeriodRepository {
    async fn store(&self, period: &Period) -> PeriodRepositoryResult<()> {
        let mut periods = self.periods.write().map_err(|err| {
            PeriodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if periods.iter().any(|existing| existing.id() == period.id()) {
            return Err(PeriodRepositoryError::DuplicatePeriod(period.id().clone()));
        }
        periods.push(period.clone());
        Ok(())
    }

    async fn update(&self, period: &Period) -> PeriodRepositoryResult<()> {
        let mut periods = self.periods.write().map_err(|err| {
            PeriodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = periods
            .iter_mut()
            .find(|existing| existing.id() == period.id())
            .ok_or_else(|| PeriodRepositoryError::NotFound(period.id().clone()))?;
        *stored = period.clone();
        Ok(())
    }

    async fn find_by_id(&self, id: &PeriodId) -> PeriodRepositoryResult<Option<Period>> {
        let periods = self.periods.read().map_err(|err| {
            PeriodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(periods.iter().find(|period| period.id() == id).cloned())
    }

    async fn list_active(&self) -> PeriodRepositoryResult<Vec<Period>> {
        let periods = self.periods.read().map_err(|err| {
            PeriodRepositoryError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(periods
            .iter()
            .filter(|period| period.is_active())
            .cloned()
            .collect())
    }
}
