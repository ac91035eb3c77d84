//! Cadence: workflow state machine and continuous-improvement analytics.
//!
//! Work moves through a configurable sequence of steps. Every move is logged,
//! periods are summarised into metrics, history is mined for recurring
//! patterns, live state is watched for threshold breaches, and retrospective
//! feedback that recurs across periods is promoted into standing rules.
//!
//! # Architecture
//!
//! Cadence follows hexagonal architecture principles:
//!
//! - **Domain**: Pure business logic with no infrastructure dependencies
//! - **Ports**: Abstract trait interfaces for storage and activity feeds
//! - **Adapters**: Concrete implementations of ports (in-memory, file)
//! - **Services**: Orchestration over ports that logs and absorbs failures
//!
//! # Modules
//!
//! - [`process`]: Step graph, checkpoint policies and the config store
//! - [`task`]: Task and period registry
//! - [`tracking`]: Transition events and the per-task tracker
//! - [`metrics`]: Per-period summaries
//! - [`patterns`]: Multi-period pattern mining and suggestions
//! - [`alerts`]: Real-time threshold checks over live state
//! - [`feedback`]: Retrospectives and rule promotion
//! - [`improvement`]: The period-close pipeline tying the above together

pub mod alerts;
pub mod feedback;
pub mod improvement;
pub mod metrics;
pub mod patterns;
pub mod process;
pub mod task;
pub mod tracking;
