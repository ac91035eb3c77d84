//! Application services for the task and period registry.

mod lifecycle;
mod period;

pub use lifecycle::{
    CreateTaskRequest, TaskLifecycleError, TaskLifecycleResult, TaskLifecycleService,
    TransitionTaskRequest,
};
pub use period::{PeriodLifecycleError, PeriodLifecycleService};
