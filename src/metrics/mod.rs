//! Per-period aggregate metrics derived from the transition log.
//!
//! Metrics are recomputed wholesale from the task registry and the event
//! log and upserted by period key. Nothing here patches a stored row.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
