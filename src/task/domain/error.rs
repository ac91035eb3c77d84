//! Error types for task and period domain validation and parsing.

use super::{PeriodId, TaskId, TaskStatus};
use thiserror::Error;

/// Errors returned while constructing or mutating task registry values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum TaskDomainError {
    /// The task title is empty after trimming.
    #[error("task title must not be empty")]
    EmptyTitle,

    /// The period identifier is empty after trimming.
    #[error("period identifier must not be empty")]
    EmptyPeriodId,

    /// The requested status transition is not permitted.
    #[error("invalid status transition for task {task_id}: {from:?} -> {to:?}")]
    InvalidStatusTransition {
        /// Task identifier.
        task_id: TaskId,
        /// Current status.
        from: TaskStatus,
        /// Requested status.
        to: TaskStatus,
    },

    /// The period has already been closed.
    #[error("period {0} is already closed")]
    PeriodAlreadyClosed(PeriodId),
}

/// Error returned while parsing task statuses from persistence.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown task status: {0}")]
pub struct ParseTaskStatusError(pub String);
