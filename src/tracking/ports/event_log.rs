//! Append-only event log port.

use crate::task::domain::{PeriodId, TaskId};
use crate::tracking::domain::TransitionEvent;
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for event log operations.
pub type EventLogResult<T> = Result<T, EventLogError>;

/// Selection criteria for event queries. Unset fields match everything.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct EventFilter {
    /// Only events of this task.
    pub task_id: Option<TaskId>,
    /// Only events of this period.
    pub period_id: Option<PeriodId>,
}

impl EventFilter {
    /// Matches every event.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Matches the events of one task.
    #[must_use]
    pub const fn for_task(task_id: TaskId) -> Self {
        Self {
            task_id: Some(task_id),
            period_id: None,
        }
    }

    /// Matches the events of one period.
    #[must_use]
    pub const fn for_period(period_id: PeriodId) -> Self {
        Self {
            task_id: None,
            period_id: Some(period_id),
        }
    }

    /// Returns `true` when `event` satisfies every set criterion.
    #[must_use]
    pub fn matches(&self, event: &TransitionEvent) -> bool {
        let task_matches = self
            .task_id
            .is_none_or(|task_id| event.task_id() == Some(task_id));
        let period_matches = self
            .period_id
            .as_ref()
            .is_none_or(|period_id| event.period_id() == Some(period_id));
        task_matches && period_matches
    }
}

/// Append-only store of transition events.
#[async_trait]
pub trait EventLog: Send + Sync {
    /// Appends an event.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::DuplicateEvent`] when the event identifier is
    /// already present, or [`EventLogError::Persistence`] on storage failure.
    async fn append(&self, event: &TransitionEvent) -> EventLogResult<()>;

    /// Returns matching events in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`EventLogError::Persistence`] on storage failure.
    async fn query(&self, filter: &EventFilter) -> EventLogResult<Vec<TransitionEvent>>;
}

/// Errors returned by event log implementations.
#[derive(Debug, Clone, Error)]
pub enum EventLogError {
    /// An event with the same identifier already exists.
    #[error("duplicate event identifier: {0}")]
    DuplicateEvent(crate::tracking::domain::EventId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl EventLogError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
