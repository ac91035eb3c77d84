//! Adapter implementations for the metrics store port.

pub mod memory;
