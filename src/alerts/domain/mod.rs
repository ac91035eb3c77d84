//! Alert model, per-check configuration and the pure checks.

mod alert;
mod checks;
mod config;

pub use alert::{Alert, AlertKind, AlertSeverity, WorkerRun};
pub use checks::{
    check_quality_drift, check_rework_rate, check_schedule_pace, check_stale_backlog,
    check_stuck_tasks, check_worker_failures,
};
pub use config::{
    AlertConfig, QualityDriftCheck, ReworkRateCheck, SchedulePaceCheck, StaleBacklogCheck,
    StuckTaskCheck, WorkerFailureCheck,
};
