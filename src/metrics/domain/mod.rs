//! Domain model for period metrics.

mod compute;
mod period_metrics;

pub use compute::{average_delivery_hours, first_pass_rate_percent, rework_event_count};
pub use period_metrics::{MetricsInput, PeriodMetrics, PersistedPeriodMetrics};
