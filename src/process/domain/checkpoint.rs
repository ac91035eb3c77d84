//! Checkpoint policies attached to process steps.

use super::{ParseCheckpointModeError, ParseCheckpointResultError};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Strictness of a step's quality gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointMode {
    /// No evaluation; every pass through the step is recorded as skipped.
    #[default]
    Off,
    /// Lightweight evaluation with a single retry.
    Light,
    /// Full evaluation with several retries.
    Strict,
}

impl CheckpointMode {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Off => "off",
            Self::Light => "light",
            Self::Strict => "strict",
        }
    }
}

impl TryFrom<&str> for CheckpointMode {
    type Error = ParseCheckpointModeError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "off" => Ok(Self::Off),
            "light" => Ok(Self::Light),
            "strict" => Ok(Self::Strict),
            _ => Err(ParseCheckpointModeError(value.to_owned())),
        }
    }
}

impl fmt::Display for CheckpointMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of a checkpoint evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CheckpointResult {
    /// The evaluation passed first time.
    Pass,
    /// The evaluation failed.
    Fail,
    /// No evaluation ran.
    Skipped,
    /// The evaluation failed and the work was corrected in place.
    Corrected,
}

impl CheckpointResult {
    /// Returns the canonical storage representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pass => "pass",
            Self::Fail => "fail",
            Self::Skipped => "skipped",
            Self::Corrected => "corrected",
        }
    }
}

impl TryFrom<&str> for CheckpointResult {
    type Error = ParseCheckpointResultError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        let normalized = value.trim().to_ascii_lowercase();
        match normalized.as_str() {
            "pass" => Ok(Self::Pass),
            "fail" => Ok(Self::Fail),
            "skipped" => Ok(Self::Skipped),
            "corrected" => Ok(Self::Corrected),
            _ => Err(ParseCheckpointResultError(value.to_owned())),
        }
    }
}

impl fmt::Display for CheckpointResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Checkpoint configuration of a single step.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct CheckpointPolicy {
    /// Whether the step runs a checkpoint at all.
    #[serde(default)]
    pub enabled: bool,
    /// Strictness of the checkpoint.
    #[serde(default)]
    pub mode: CheckpointMode,
    /// Ordered evaluation criteria.
    #[serde(default)]
    pub criteria: Vec<String>,
}

impl CheckpointPolicy {
    /// Policy used for steps without a checkpoint and for unknown steps.
    #[must_use]
    pub const fn disabled() -> Self {
        Self {
            enabled: false,
            mode: CheckpointMode::Off,
            criteria: Vec::new(),
        }
    }

    /// Creates an enabled policy with the given mode and criteria.
    #[must_use]
    pub fn enabled(mode: CheckpointMode, criteria: impl IntoIterator<Item = String>) -> Self {
        Self {
            enabled: true,
            mode,
            criteria: criteria.into_iter().collect(),
        }
    }

    /// Returns `true` when passing through the step never evaluates anything.
    #[must_use]
    pub fn auto_skips(&self) -> bool {
        !self.enabled || self.mode == CheckpointMode::Off
    }

    /// Returns a copy of this policy switched to `mode`.
    ///
    /// Switching to [`CheckpointMode::Off`] disables the checkpoint; any other
    /// mode enables it. Criteria are kept.
    #[must_use]
    pub fn with_mode(&self, mode: CheckpointMode) -> Self {
        Self {
            enabled: mode != CheckpointMode::Off,
            mode,
            criteria: self.criteria.clone(),
        }
    }
}

/// Behaviour shared by every step that uses a given mode.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CheckpointModePolicy {
    /// Human-readable description of the mode.
    pub description: String,
    /// Whether the mode passes without evaluating.
    #[serde(default)]
    pub auto_pass: bool,
    /// Maximum evaluation retries, when the mode evaluates at all.
    #[serde(default)]
    pub max_retries: Option<u32>,
}

/// Mode policies for all three checkpoint modes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct CheckpointModes {
    /// Policy of [`CheckpointMode::Off`].
    pub off: CheckpointModePolicy,
    /// Policy of [`CheckpointMode::Light`].
    pub light: CheckpointModePolicy,
    /// Policy of [`CheckpointMode::Strict`].
    pub strict: CheckpointModePolicy,
}

impl CheckpointModes {
    /// Returns the policy for `mode`.
    #[must_use]
    pub const fn get(&self, mode: CheckpointMode) -> &CheckpointModePolicy {
        match mode {
            CheckpointMode::Off => &self.off,
            CheckpointMode::Light => &self.light,
            CheckpointMode::Strict => &self.strict,
        }
    }
}

impl Default for CheckpointModes {
    fn default() -> Self {
        Self {
            off: CheckpointModePolicy {
                description: "No checkpoint; the step is recorded as skipped".to_owned(),
                auto_pass: true,
                max_retries: None,
            },
            light: CheckpointModePolicy {
                description: "Quick sanity check of the step output".to_owned(),
                auto_pass: false,
                max_retries: Some(1),
            },
            strict: CheckpointModePolicy {
                description: "Full evaluation against every criterion".to_owned(),
                auto_pass: false,
                max_retries: Some(3),
            },
        }
    }
}
