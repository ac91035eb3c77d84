//! Period metrics store port.

use crate::metrics::domain::PeriodMetrics;
use crate::task::domain::PeriodId;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for metrics store operations.
pub type PeriodMetricsStoreResult<T> = Result<T, PeriodMetricsStoreError>;

/// Key-value store of period metrics keyed by period.
#[async_trait]
pub trait PeriodMetricsStore: Send + Sync {
    /// Inserts or fully replaces the row for the metrics' period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodMetricsStoreError::Persistence`] on storage failure.
    async fn upsert(&self, metrics: &PeriodMetrics) -> PeriodMetricsStoreResult<()>;

    /// Returns the metrics of one period.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodMetricsStoreError::Persistence`] on storage failure.
    async fn get(&self, period_id: &PeriodId) -> PeriodMetricsStoreResult<Option<PeriodMetrics>>;

    /// Returns all metrics, latest period start first.
    ///
    /// Recollecting a period must not move it. Rows without a known start
    /// follow the dated ones, latest first collection first.
    ///
    /// # Errors
    ///
    /// Returns [`PeriodMetricsStoreError::Persistence`] on storage failure.
    async fn list_all(&self) -> PeriodMetricsStoreResult<Vec<PeriodMetrics>>;
}

/// Errors returned by metrics store implementations.
#[derive(Debug, Clone, Error)]
pub enum PeriodMetricsStoreError {
    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl PeriodMetricsStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
