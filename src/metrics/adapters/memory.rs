//! In-memory period metrics store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::metrics::{
    domain::PeriodMetrics,
    ports::{PeriodMetricsStore, PeriodMetricsStoreError, PeriodMetricsStoreResult},
};
use crate::task::domain::PeriodId;

/// Thread-safe in-memory metrics store.
///
/// Rows keep the position of their first upsert, so recollecting a
/// period replaces it in place.
#[derive(Debug, Clone, Default)]
pub struct InMemoryPeriodMetricsStore {
    rows: Arc<RwLock<Vec<PeriodMetrics>>>,
}

impl InMemoryPeriodMetricsStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PeriodMetricsStore for InMemoryPeriodMetricsStore {
    async fn upsert(&self, metrics: &PeriodMetrics) -> PeriodMetricsStoreResult<()> {
        let mut rows = self.rows.write().map_err(|err| {
            PeriodMetricsStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if let Some(row) = rows
            .iter_mut()
            .find(|row| row.period_id() == metrics.period_id())
        {
            row.clone_from(metrics);
            return Ok(());
        }
        rows.push(metrics.clone());
        Ok(())
    }

    async fn get(&self, period_id: &PeriodId) -> PeriodMetricsStoreResult<Option<PeriodMetrics>> {
        let rows = self.rows.read().map_err(|err| {
            PeriodMetricsStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(rows.iter().find(|row| row.period_id() == period_id).cloned())
    }

    async fn list_all(&self) -> PeriodMetricsStoreResult<Vec<PeriodMetrics>> {
        let rows = self.rows.read().map_err(|err| {
            PeriodMetricsStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let mut newest_first: Vec<PeriodMetrics> = rows.iter().rev().cloned().collect();
        newest_first.sort_by(|left, right| right.started_at().cmp(&left.started_at()));
        Ok(newest_first)
    }
}
