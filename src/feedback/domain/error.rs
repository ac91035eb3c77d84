//! Feedback domain validation errors.

use thiserror::Error;

/// Validation failures for feedback values.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FeedbackDomainError {
    /// A behaviour target identifier was blank.
    #[error("behaviour target must not be empty")]
    EmptyTarget,
}
