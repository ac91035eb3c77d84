//! Findings and suggestions.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::process::domain::{ConfigChange, StepId};
use crate::task::domain::PeriodId;

/// Classification of a detected pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternKind {
    /// A step consistently takes long.
    SlowStep,
    /// A checkpoint never catches anything.
    UselessCheckpoint,
    /// A checkpoint frequently catches problems.
    CriticalCheckpoint,
    /// A period carries a high share of rework.
    HighRework,
    /// Completion rates are rising.
    Improving,
    /// Completion rates are falling.
    Degrading,
}

impl PatternKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::SlowStep => "slow_step",
            Self::UselessCheckpoint => "useless_checkpoint",
            Self::CriticalCheckpoint => "critical_checkpoint",
            Self::HighRework => "high_rework",
            Self::Improving => "improving",
            Self::Degrading => "degrading",
        }
    }
}

impl fmt::Display for PatternKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Severity of a detected pattern.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PatternSeverity {
    /// Worth knowing.
    Info,
    /// Worth acting on.
    Warning,
    /// Needs action.
    Critical,
}

/// Structured evidence backing a finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PatternEvidence {
    /// Duration statistics for a step.
    SlowStep {
        /// Step the durations were spent in.
        step: StepId,
        /// Number of duration samples.
        samples: usize,
        /// Arithmetic mean in seconds.
        mean_seconds: f64,
        /// Median in seconds.
        median_seconds: f64,
    },
    /// Checkpoint outcome tallies for a step.
    CheckpointUtility {
        /// Step whose checkpoint was evaluated.
        step: StepId,
        /// Passed evaluations.
        pass: usize,
        /// Failed evaluations.
        fail: usize,
        /// Evaluations that passed after correction.
        corrected: usize,
        /// Skipped evaluations.
        skipped: usize,
    },
    /// Rework share of a period.
    Rework {
        /// Period the events belong to.
        period: PeriodId,
        /// Events flagged as rework.
        rework_events: usize,
        /// All events of the period.
        total_events: usize,
    },
    /// Completion-rate trend.
    Trend {
        /// Chronological completion rates the line was fitted to.
        completion_rates: Vec<f64>,
        /// Fitted slope per period.
        slope: f64,
    },
}

impl PatternEvidence {
    /// Returns the step the evidence concerns, if any.
    #[must_use]
    pub const fn step(&self) -> Option<&StepId> {
        match self {
            Self::SlowStep { step, .. } | Self::CheckpointUtility { step, .. } => Some(step),
            Self::Rework { .. } | Self::Trend { .. } => None,
        }
    }
}

/// A classified finding.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DetectedPattern {
    /// Finding classification.
    pub kind: PatternKind,
    /// Finding severity.
    pub severity: PatternSeverity,
    /// Human-readable summary.
    pub description: String,
    /// Structured evidence.
    pub evidence: PatternEvidence,
}

impl DetectedPattern {
    /// Renders the finding as a single line for retrospectives.
    #[must_use]
    pub fn summary(&self) -> String {
        format!("[{}] {}", self.kind, self.description)
    }
}

/// Urgency of a suggestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SuggestionPriority {
    /// Can wait.
    Low,
    /// Should be considered.
    Medium,
    /// Should be done next.
    High,
}

/// A proposed process improvement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkflowSuggestion {
    /// What to do.
    pub action: String,
    /// Why.
    pub reason: String,
    /// Urgency.
    pub priority: SuggestionPriority,
    /// Step the suggestion targets, if any.
    pub target_step: Option<StepId>,
    /// Machine-applicable config edit, if any.
    pub change: Option<ConfigChange>,
}

impl WorkflowSuggestion {
    /// Returns `true` when the suggestion can be applied to the config.
    #[must_use]
    pub const fn is_applicable(&self) -> bool {
        self.target_step.is_some() && self.change.is_some()
    }
}
