//! Port contracts for metrics persistence.

pub mod store;

pub use store::{PeriodMetricsStore, PeriodMetricsStoreError, PeriodMetricsStoreResult};
