//! Adapter implementations for the feedback ports.

pub mod memory;
