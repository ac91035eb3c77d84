//! Port contracts for live activity data.

pub mod activity;

pub use activity::{ActivitySource, ActivitySourceError, ActivitySourceResult};
