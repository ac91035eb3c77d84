//! Adapter implementations for task and period registry ports.

pub mod memory;
