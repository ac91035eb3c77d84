//! Per-check alert thresholds.
//!
//! Every section deserializes with defaults, so a partial JSON document only
//! overrides what it names.

use chrono::Duration;
use serde::{Deserialize, Serialize};

/// Thresholds for every alert check.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AlertConfig {
    /// Active tasks without updates.
    pub stuck_task: StuckTaskCheck,
    /// Rework share of running periods.
    pub rework_rate: ReworkRateCheck,
    /// Completion pace of running periods.
    pub schedule_pace: SchedulePaceCheck,
    /// Review score trend.
    pub quality_drift: QualityDriftCheck,
    /// Per-worker failure ratio.
    pub worker_failures: WorkerFailureCheck,
    /// Queued items nobody picked up.
    pub stale_backlog: StaleBacklogCheck,
}

/// Stuck task check. Critical beyond twice the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StuckTaskCheck {
    /// Whether the check runs.
    pub enabled: bool,
    /// Hours without an update before an active task counts as stuck.
    pub threshold_hours: u32,
}

impl StuckTaskCheck {
    /// Returns the threshold as a duration.
    #[must_use]
    pub fn threshold(&self) -> Duration {
        Duration::hours(i64::from(self.threshold_hours))
    }
}

impl Default for StuckTaskCheck {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_hours: 24,
        }
    }
}

/// Rework rate check over the events of a running period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReworkRateCheck {
    /// Whether the check runs.
    pub enabled: bool,
    /// Events a period needs before the rate is judged.
    pub min_events: usize,
    /// Rework percentage above which the check fires.
    pub threshold_percent: f64,
    /// Rework percentage above which the alert is critical.
    pub critical_percent: f64,
}

impl Default for ReworkRateCheck {
    fn default() -> Self {
        Self {
            enabled: true,
            min_events: 5,
            threshold_percent: 40.0,
            critical_percent: 60.0,
        }
    }
}

/// Schedule pace check for running periods.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SchedulePaceCheck {
    /// Whether the check runs.
    pub enabled: bool,
    /// Assumed period length in days.
    pub period_days: f64,
    /// Expected progress the period must exceed before pace is judged.
    pub min_expected_progress: f64,
    /// Fires when actual progress is below this share of the expected.
    pub behind_ratio: f64,
    /// Critical when actual progress is below this share of the expected.
    pub critical_ratio: f64,
}

impl Default for SchedulePaceCheck {
    fn default() -> Self {
        Self {
            enabled: true,
            period_days: 7.0,
            min_expected_progress: 0.5,
            behind_ratio: 0.6,
            critical_ratio: 0.3,
        }
    }
}

/// Quality drift check over review scores.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QualityDriftCheck {
    /// Whether the check runs.
    pub enabled: bool,
    /// Scores per comparison window.
    pub window: usize,
    /// Drop in mean score, in points, that fires the drift alert.
    pub drop_points: f64,
    /// Drop in mean score, in points, that makes the drift alert critical.
    pub critical_drop_points: f64,
    /// Recent mean below which the low quality alert fires.
    pub floor: f64,
}

impl Default for QualityDriftCheck {
    fn default() -> Self {
        Self {
            enabled: true,
            window: 5,
            drop_points: 15.0,
            critical_drop_points: 25.0,
            floor: 50.0,
        }
    }
}

/// Worker failure check.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerFailureCheck {
    /// Whether the check runs.
    pub enabled: bool,
    /// Runs an actor needs before its failure ratio is judged.
    pub min_runs: usize,
    /// Failure ratio above which the check fires.
    pub failure_ratio: f64,
    /// Failure ratio above which the alert is critical.
    pub critical_ratio: f64,
}

impl Default for WorkerFailureCheck {
    fn default() -> Self {
        Self {
            enabled: true,
            min_runs: 3,
            failure_ratio: 0.5,
            critical_ratio: 0.75,
        }
    }
}

/// Stale backlog check. Critical beyond twice the threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct StaleBacklogCheck {
    /// Whether the check runs.
    pub enabled: bool,
    /// Hours a queued item may wait before it counts as stale.
    pub threshold_hours: u32,
}

impl StaleBacklogCheck {
    /// Returns the threshold as a duration.
    #[must_use]
    pub fn threshold(&self) -> Duration {
        Duration::hours(i64::from(self.threshold_hours))
    }
}

impl Default for StaleBacklogCheck {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold_hours: 48,
        }
    }
}
