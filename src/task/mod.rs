//! Task and period registry.
//!
//! The registry records what work exists, which period it is planned into,
//! and where it stands in its status lifecycle. The analytics components only
//! read it. The module follows hexagonal architecture:
//!
//! - Domain types in [`domain`]
//! - Port contracts in [`ports`]
//! - Adapter implementations in [`adapters`]
//! - Orchestration services in [`services`]

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
