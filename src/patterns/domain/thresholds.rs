//! Detector thresholds.

use serde::{Deserialize, Serialize};

/// Sample gates and cut-offs for the pattern detectors.
///
/// Deserialises from partial documents; missing fields keep their defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorThresholds {
    /// Minimum duration samples per step.
    pub slow_min_samples: usize,
    /// Mean duration, in seconds, above which a step is slow.
    pub slow_mean_seconds: f64,
    /// Median duration, in seconds, above which a step is slow.
    pub slow_median_seconds: f64,
    /// Mean duration, in seconds, above which a slow step is a warning.
    pub slow_warning_mean_seconds: f64,
    /// Minimum evaluations before a checkpoint can be called useless.
    pub useless_min_samples: usize,
    /// Minimum evaluations before a checkpoint can be called critical.
    pub critical_min_samples: usize,
    /// Catch ratio above which a checkpoint is critical.
    pub critical_ratio: f64,
    /// Catch ratio above which a critical checkpoint is severe.
    pub critical_severe_ratio: f64,
    /// Minimum events per period for rework analysis.
    pub rework_min_events: usize,
    /// Rework share above which a period is flagged.
    pub rework_ratio: f64,
    /// Rework share above which a flagged period is critical.
    pub rework_critical_ratio: f64,
    /// Minimum periods with planned work for trend analysis.
    pub trend_min_periods: usize,
    /// Number of most recent periods fitted.
    pub trend_window: usize,
    /// Absolute slope beyond which a trend is reported.
    pub trend_slope: f64,
}

impl Default for DetectorThresholds {
    fn default() -> Self {
        Self {
            slow_min_samples: 3,
            slow_mean_seconds: 3600.0,
            slow_median_seconds: 2700.0,
            slow_warning_mean_seconds: 7200.0,
            useless_min_samples: 5,
            critical_min_samples: 3,
            critical_ratio: 0.3,
            critical_severe_ratio: 0.5,
            rework_min_events: 3,
            rework_ratio: 0.25,
            rework_critical_ratio: 0.5,
            trend_min_periods: 2,
            trend_window: 3,
            trend_slope: 0.05,
        }
    }
}
