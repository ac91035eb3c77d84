//! In-memory retrospective store.

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::{Arc, RwLock};

use crate::feedback::{
    domain::{Retrospective, RetrospectivePatch},
    ports::{RetrospectiveStore, RetrospectiveStoreError, RetrospectiveStoreResult},
};
use crate::task::domain::PeriodId;

/// Thread-safe in-memory retrospective store preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryRetrospectiveStore {
    retrospectives: Arc<RwLock<Vec<Retrospective>>>,
}

impl InMemoryRetrospectiveStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl RetrospectiveStore for InMemoryRetrospectiveStore {
    async fn upsert(&self, retrospective: &Retrospective) -> RetrospectiveStoreResult<()> {
        let mut stored = self.retrospectives.write().map_err(|err| {
            RetrospectiveStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        match stored
            .iter_mut()
            .find(|existing| existing.period_id() == retrospective.period_id())
        {
            Some(existing) => *existing = retrospective.clone(),
            None => stored.push(retrospective.clone()),
        }
        Ok(())
    }

    async fn get(&self, period_id: &PeriodId) -> RetrospectiveStoreResult<Option<Retrospective>> {
        let stored = self.retrospectives.read().map_err(|err| {
            RetrospectiveStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(stored
            .iter()
            .find(|existing| existing.period_id() == period_id)
            .cloned())
    }

    async fn update(
        &self,
        period_id: &PeriodId,
        patch: RetrospectivePatch,
        updated_at: DateTime<Utc>,
    ) -> RetrospectiveStoreResult<Retrospective> {
        let mut stored = self.retrospectives.write().map_err(|err| {
            RetrospectiveStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let existing = stored
            .iter_mut()
            .find(|existing| existing.period_id() == period_id)
            .ok_or_else(|| RetrospectiveStoreError::NotFound(period_id.clone()))?;
        existing.apply(patch, updated_at);
        Ok(existing.clone())
    }

    async fn list_all(&self) -> RetrospectiveStoreResult<Vec<Retrospective>> {
        let stored = self.retrospectives.read().map_err(|err| {
            RetrospectiveStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(stored.clone())
    }
}
