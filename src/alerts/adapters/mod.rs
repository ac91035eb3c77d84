//! Adapter implementations for the activity source port.

pub mod memory;
