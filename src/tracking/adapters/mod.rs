//! Adapter implementations for the event log port.

pub mod memory;
