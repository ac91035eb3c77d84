//! Machine-applicable process config edits.

use super::{CheckpointMode, ParseConfigChangeError};
use serde::{Deserialize, Serialize};
use std::fmt;

const CHECKPOINT_MODE_KEY: &str = "checkpoint.mode";

/// A config edit that can be applied to a single step.
///
/// The textual form is `checkpoint.mode: <mode>`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ConfigChange {
    /// Switch the step's checkpoint to the given mode.
    CheckpointMode(CheckpointMode),
}

impl ConfigChange {
    /// Parses a change string such as `checkpoint.mode: light`.
    ///
    /// # Errors
    ///
    /// Returns [`ParseConfigChangeError`] when the key is not
    /// `checkpoint.mode` or the value is not a known mode.
    pub fn parse(raw: &str) -> Result<Self, ParseConfigChangeError> {
        let (key, value) = raw
            .split_once(':')
            .ok_or_else(|| ParseConfigChangeError(raw.to_owned()))?;
        if key.trim() != CHECKPOINT_MODE_KEY {
            return Err(ParseConfigChangeError(raw.to_owned()));
        }
        CheckpointMode::try_from(value)
            .map(Self::CheckpointMode)
            .map_err(|_| ParseConfigChangeError(raw.to_owned()))
    }
}

impl TryFrom<String> for ConfigChange {
    type Error = ParseConfigChangeError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::parse(&value)
    }
}

impl From<ConfigChange> for String {
    fn from(value: ConfigChange) -> Self {
        value.to_string()
    }
}

impl fmt::Display for ConfigChange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::CheckpointMode(mode) => write!(f, "{CHECKPOINT_MODE_KEY}: {mode}"),
        }
    }
}
