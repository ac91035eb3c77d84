//! Domain model for the task and period registry.
//!
//! Tasks carry the status, timestamps and period assignment the analytics
//! pipeline reads. Status changes follow a small validated state machine that
//! is independent of the configurable process steps.

mod error;
mod ids;
mod period;
mod task;

pub use error::{ParseTaskStatusError, TaskDomainError};
pub use ids::{PeriodId, TaskId};
pub use period::Period;
pub use task::{NewTask, PersistedTaskData, Task, TaskStatus};
