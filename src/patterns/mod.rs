//! Multi-period pattern mining and suggestion generation.
//!
//! Detectors are pure functions over the full event and metrics history.
//! Each one is gated on a minimum sample size and stays silent below it.
//! Findings map deterministically to [`domain::WorkflowSuggestion`]s, some
//! of which carry a machine-applicable process config change.

pub mod domain;
pub mod services;

#[cfg(test)]
mod tests;
