//! Process definition: steps, transitions and checkpoint policies.
//!
//! The process graph is data, not code. It is parsed from a declarative
//! document, cached behind [`services::ProcessConfigStore`], queried for
//! membership and adjacency, and edited only through suggestion application.
//! The module follows hexagonal architecture:
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
