//! Period-close improvement cycle.
//!
//! Wires the analytics pipeline end to end: metrics are collected for the
//! closing period, history is mined for patterns, applicable suggestions are
//! written back to the process config, the retrospective records what was
//! found and accepted, and the feedback promoter learns from it.

mod cycle;

pub use cycle::{CycleReport, ImprovementCycle};

#[cfg(test)]
mod tests;
