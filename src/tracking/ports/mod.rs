//! Port contracts for the transition event log.

pub mod event_log;

pub use event_log::{EventFilter, EventLog, EventLogError, EventLogResult};
