//! Application services for metrics collection.

mod aggregator;

pub use aggregator::{AggregatorSettings, MetricsAggregator};
