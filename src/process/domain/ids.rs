//! Identifier types for the process model.

use super::ProcessDomainError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of a step in the process graph (for example `review`).
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct StepId(String);

impl StepId {
    /// Creates a validated step identifier.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError::InvalidStepId`] when the value is empty
    /// after trimming or contains inner whitespace.
    pub fn new(value: impl Into<String>) -> Result<Self, ProcessDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() || normalized.chars().any(char::is_whitespace) {
            return Err(ProcessDomainError::InvalidStepId(raw));
        }
        Ok(Self(normalized.to_owned()))
    }

    /// Wraps a literal identifier known to be valid.
    pub(crate) fn builtin(raw: &'static str) -> Self {
        Self(raw.to_owned())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for StepId {
    type Error = ProcessDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<StepId> for String {
    fn from(value: StepId) -> Self {
        value.0
    }
}

impl AsRef<str> for StepId {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}
