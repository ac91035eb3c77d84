//! Alerts and the activity samples some checks consume.

use serde::{Deserialize, Serialize};
use std::fmt;

/// What an alert is about.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertKind {
    /// An active task has not been updated for too long.
    StuckTask,
    /// The running period carries too much rework.
    HighRework,
    /// Completion lags behind the elapsed share of the period.
    BehindSchedule,
    /// Review scores dropped compared with the previous window.
    QualityDrift,
    /// Recent review scores are low in absolute terms.
    LowQuality,
    /// A worker fails more often than it succeeds.
    WorkerFailures,
    /// A planned item was never picked up.
    StaleBacklog,
}

impl AlertKind {
    /// Returns the canonical representation.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::StuckTask => "stuck_task",
            Self::HighRework => "high_rework",
            Self::BehindSchedule => "behind_schedule",
            Self::QualityDrift => "quality_drift",
            Self::LowQuality => "low_quality",
            Self::WorkerFailures => "worker_failures",
            Self::StaleBacklog => "stale_backlog",
        }
    }
}

impl fmt::Display for AlertKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Alert urgency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertSeverity {
    /// Needs attention soon.
    Warning,
    /// Needs attention now.
    Critical,
}

impl AlertSeverity {
    /// Picks [`Self::Critical`] when `critical` holds.
    #[must_use]
    pub const fn escalated_if(critical: bool) -> Self {
        if critical { Self::Critical } else { Self::Warning }
    }
}

/// A raised alert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Alert {
    /// Check that raised it.
    pub kind: AlertKind,
    /// Urgency.
    pub severity: AlertSeverity,
    /// Task, period or actor the alert concerns.
    pub subject: String,
    /// Human-readable detail.
    pub message: String,
}

impl Alert {
    pub(crate) fn new(
        kind: AlertKind,
        severity: AlertSeverity,
        subject: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            severity,
            subject: subject.into(),
            message: message.into(),
        }
    }
}

/// Outcome of one worker run.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WorkerRun {
    /// Worker or agent that executed the run.
    pub actor: String,
    /// Whether the run succeeded.
    pub succeeded: bool,
}

impl WorkerRun {
    /// Creates a run record.
    #[must_use]
    pub fn new(actor: impl Into<String>, succeeded: bool) -> Self {
        Self {
            actor: actor.into(),
            succeeded,
        }
    }
}
