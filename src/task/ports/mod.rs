//! Port contracts for the task and period registry.
//!
//! Ports define infrastructure-agnostic interfaces used by task services and
//! by the analytics components that read task state.

pub mod period;
pub mod repository;

pub use period::{PeriodRepository, PeriodRepositoryError, PeriodRepositoryResult};
pub use repository::{TaskRepository, TaskRepositoryError, TaskRepositoryResult};
