//! Error types for process model validation and parsing.

use super::StepId;
use thiserror::Error;

/// Errors returned while constructing process model values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ProcessDomainError {
    /// The step identifier is empty after trimming or contains whitespace.
    #[error("invalid step identifier '{0}'")]
    InvalidStepId(String),

    /// The process defines no steps.
    #[error("process must define at least one step")]
    EmptyProcess,

    /// Two steps share the same identifier.
    #[error("duplicate step identifier: {0}")]
    DuplicateStep(StepId),

    /// A transition references a step that is not defined.
    #[error("transition {from} -> {to} references an unknown step")]
    UnknownTransitionEndpoint {
        /// Source step of the offending transition.
        from: StepId,
        /// Destination step of the offending transition.
        to: StepId,
    },
}

/// Error returned when a process document cannot be turned into a config.
#[derive(Debug, Error)]
pub enum ProcessParseError {
    /// The document is not valid JSON for the process schema.
    #[error("malformed process document: {0}")]
    Malformed(#[from] serde_json::Error),

    /// The document parsed but violates a structural rule.
    #[error(transparent)]
    Invalid(#[from] ProcessDomainError),
}

/// Error returned while parsing checkpoint modes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown checkpoint mode: {0}")]
pub struct ParseCheckpointModeError(pub String);

/// Error returned while parsing checkpoint results.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unknown checkpoint result: {0}")]
pub struct ParseCheckpointResultError(pub String);

/// Error returned while parsing machine-applicable config changes.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error("unsupported config change: {0}")]
pub struct ParseConfigChangeError(pub String);
