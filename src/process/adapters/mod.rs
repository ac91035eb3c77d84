//! Adapter implementations for the process source port.

pub mod file;
pub mod memory;
