//! Domain model for the configurable process graph.
//!
//! A process is a set of steps, the transitions allowed between them, and
//! the checkpoint policy each step applies. The model is a plain value: it is
//! parsed once, queried freely, and only ever replaced wholesale.

mod change;
mod checkpoint;
mod config;
mod error;
mod ids;
mod step;

pub use change::ConfigChange;
pub use checkpoint::{
    CheckpointMode, CheckpointModePolicy, CheckpointModes, CheckpointPolicy, CheckpointResult,
};
pub use config::{ProcessConfig, ProcessDocument};
pub use error::{
    ParseCheckpointModeError, ParseCheckpointResultError, ParseConfigChangeError,
    ProcessDomainError, ProcessParseError,
};
pub use ids::StepId;
pub use step::{ProcessStep, SkipCondition, Transition};
