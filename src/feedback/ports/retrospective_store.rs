//! Retrospective store port.

use crate::feedback::domain::{Retrospective, RetrospectivePatch};
use crate::task::domain::PeriodId;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::sync::Arc;
use thiserror::Error;

/// Result type for retrospective store operations.
pub type RetrospectiveStoreResult<T> = Result<T, RetrospectiveStoreError>;

/// Key-value store of retrospectives keyed by period.
#[async_trait]
pub trait RetrospectiveStore: Send + Sync {
    /// Inserts or fully replaces the retrospective of its period.
    ///
    /// # Errors
    ///
    /// Returns [`RetrospectiveStoreError::Persistence`] on storage failure.
    async fn upsert(&self, retrospective: &Retrospective) -> RetrospectiveStoreResult<()>;

    /// Returns the retrospective of one period.
    ///
    /// # Errors
    ///
    /// Returns [`RetrospectiveStoreError::Persistence`] on storage failure.
    async fn get(&self, period_id: &PeriodId) -> RetrospectiveStoreResult<Option<Retrospective>>;

    /// Applies a partial update and returns the stored result.
    ///
    /// # Errors
    ///
    /// Returns [`RetrospectiveStoreError::NotFound`] when the period has no
    /// retrospective, or [`RetrospectiveStoreError::Persistence`] on storage
    /// failure.
    async fn update(
        &self,
        period_id: &PeriodId,
        patch: RetrospectivePatch,
        updated_at: DateTime<Utc>,
    ) -> RetrospectiveStoreResult<Retrospective>;

    /// Returns every retrospective in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`RetrospectiveStoreError::Persistence`] on storage failure.
    async fn list_all(&self) -> RetrospectiveStoreResult<Vec<Retrospective>>;
}

/// Errors returned by retrospective store implementations.
#[derive(Debug, Clone, Error)]
pub enum RetrospectiveStoreError {
    /// No retrospective exists for the period.
    #[error("retrospective not found for period {0}")]
    NotFound(PeriodId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl RetrospectiveStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
