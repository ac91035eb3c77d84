//! Real-time alerting over live task, event and activity state.
//!
//! Unlike [`crate::patterns`], nothing here mines history. Each check is a
//! pure function over the current state with its own thresholds and its own
//! `enabled` switch, and [`services::AlertEngine`] simply concatenates their
//! output. There is no deduplication across checks.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
