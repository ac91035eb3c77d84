//! Pure pattern detectors.

use std::collections::BTreeMap;

use tracing::debug;

use super::{
    DetectedPattern, DetectorThresholds, PatternEvidence, PatternKind, PatternSeverity,
    stats::{mean, median, ols_slope},
};
use crate::metrics::domain::PeriodMetrics;
use crate::process::domain::{CheckpointMode, CheckpointResult, StepId};
use crate::task::domain::PeriodId;
use crate::tracking::domain::TransitionEvent;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Runs every detector over the history.
///
/// `metrics` is expected newest first, as the metrics store lists it.
#[must_use]
pub fn detect_all(
    events: &[TransitionEvent],
    metrics: &[PeriodMetrics],
    thresholds: &DetectorThresholds,
) -> Vec<DetectedPattern> {
    let mut patterns = detect_slow_steps(events, thresholds);
    patterns.extend(detect_checkpoint_utility(events, thresholds));
    patterns.extend(detect_high_rework(events, thresholds));
    patterns.extend(detect_trend(metrics, thresholds));
    patterns
}

/// Flags steps whose mean and median durations both exceed the limits.
///
/// Self-loops carry no duration and are excluded.
#[must_use]
pub fn detect_slow_steps(
    events: &[TransitionEvent],
    thresholds: &DetectorThresholds,
) -> Vec<DetectedPattern> {
    let mut durations: BTreeMap<&StepId, Vec<f64>> = BTreeMap::new();
    for event in events.iter().filter(|event| !event.is_self_loop()) {
        durations
            .entry(event.step_from())
            .or_default()
            .push(event.duration_seconds() as f64);
    }

    durations
        .into_iter()
        .filter_map(|(step, samples)| {
            if samples.len() < thresholds.slow_min_samples {
                debug!(step = %step, samples = samples.len(), "too few samples for slow-step check");
                return None;
            }
            let mean_seconds = mean(&samples)?;
            let median_seconds = median(&samples)?;
            if mean_seconds <= thresholds.slow_mean_seconds
                || median_seconds <= thresholds.slow_median_seconds
            {
                return None;
            }
            let severity = if mean_seconds > thresholds.slow_warning_mean_seconds {
                PatternSeverity::Warning
            } else {
                PatternSeverity::Info
            };
            Some(DetectedPattern {
                kind: PatternKind::SlowStep,
                severity,
                description: format!(
                    "step {step} averages {:.1}h (median {:.1}h) over {} transitions",
                    mean_seconds / SECONDS_PER_HOUR,
                    median_seconds / SECONDS_PER_HOUR,
                    samples.len()
                ),
                evidence: PatternEvidence::SlowStep {
                    step: step.clone(),
                    samples: samples.len(),
                    mean_seconds,
                    median_seconds,
                },
            })
        })
        .collect()
}

#[derive(Debug, Default, Clone, Copy)]
struct Tally {
    pass: usize,
    fail: usize,
    corrected: usize,
    skipped: usize,
}

impl Tally {
    const fn record(&mut self, result: CheckpointResult) {
        match result {
            CheckpointResult::Pass => self.pass += 1,
            CheckpointResult::Fail => self.fail += 1,
            CheckpointResult::Corrected => self.corrected += 1,
            CheckpointResult::Skipped => self.skipped += 1,
        }
    }

    const fn total(self) -> usize {
        self.pass + self.fail + self.corrected + self.skipped
    }

    const fn caught(self) -> usize {
        self.fail + self.corrected
    }

    fn evidence(self, step: &StepId) -> PatternEvidence {
        PatternEvidence::CheckpointUtility {
            step: step.clone(),
            pass: self.pass,
            fail: self.fail,
            corrected: self.corrected,
            skipped: self.skipped,
        }
    }
}

/// Flags checkpoints that never catch anything and ones that catch a lot.
///
/// Events recorded while the step's checkpoint was off are not evaluations.
#[must_use]
pub fn detect_checkpoint_utility(
    events: &[TransitionEvent],
    thresholds: &DetectorThresholds,
) -> Vec<DetectedPattern> {
    let mut tallies: BTreeMap<&StepId, Tally> = BTreeMap::new();
    let evaluated = events
        .iter()
        .filter(|event| event.checkpoint_mode() != CheckpointMode::Off);
    for event in evaluated {
        if let Some(result) = event.checkpoint_result() {
            tallies.entry(event.step_from()).or_default().record(result);
        }
    }

    let mut patterns = Vec::new();
    for (step, tally) in tallies {
        let total = tally.total();
        if total >= thresholds.useless_min_samples && tally.caught() == 0 {
            patterns.push(DetectedPattern {
                kind: PatternKind::UselessCheckpoint,
                severity: PatternSeverity::Info,
                description: format!(
                    "checkpoint at {step} passed or skipped all {total} evaluations"
                ),
                evidence: tally.evidence(step),
            });
        }
        if total < thresholds.critical_min_samples {
            continue;
        }
        let ratio = tally.caught() as f64 / total as f64;
        if ratio > thresholds.critical_ratio {
            let severity = if ratio > thresholds.critical_severe_ratio {
                PatternSeverity::Critical
            } else {
                PatternSeverity::Warning
            };
            patterns.push(DetectedPattern {
                kind: PatternKind::CriticalCheckpoint,
                severity,
                description: format!(
                    "checkpoint at {step} caught problems in {:.0}% of {total} evaluations",
                    ratio * 100.0
                ),
                evidence: tally.evidence(step),
            });
        }
    }
    patterns
}

/// Flags periods whose share of rework events exceeds the limit.
#[must_use]
pub fn detect_high_rework(
    events: &[TransitionEvent],
    thresholds: &DetectorThresholds,
) -> Vec<DetectedPattern> {
    let mut periods: BTreeMap<&PeriodId, (usize, usize)> = BTreeMap::new();
    for event in events {
        if let Some(period) = event.period_id() {
            let (rework, total) = periods.entry(period).or_default();
            *total += 1;
            if event.had_rework() {
                *rework += 1;
            }
        }
    }

    periods
        .into_iter()
        .filter(|(_, (_, total))| *total >= thresholds.rework_min_events)
        .filter_map(|(period, (rework_events, total_events))| {
            let ratio = rework_events as f64 / total_events as f64;
            (ratio > thresholds.rework_ratio).then(|| DetectedPattern {
                kind: PatternKind::HighRework,
                severity: if ratio > thresholds.rework_critical_ratio {
                    PatternSeverity::Critical
                } else {
                    PatternSeverity::Warning
                },
                description: format!(
                    "period {period} had {rework_events} rework events out of {total_events} ({:.0}%)",
                    ratio * 100.0
                ),
                evidence: PatternEvidence::Rework {
                    period: period.clone(),
                    rework_events,
                    total_events,
                },
            })
        })
        .collect()
}

/// Fits a line to the most recent completion rates and reports its sign.
///
/// `metrics` is expected newest first. Periods without planned work are
/// ignored.
#[must_use]
pub fn detect_trend(
    metrics: &[PeriodMetrics],
    thresholds: &DetectorThresholds,
) -> Option<DetectedPattern> {
    let mut completion_rates: Vec<f64> = metrics
        .iter()
        .filter_map(PeriodMetrics::completion_rate)
        .take(thresholds.trend_window)
        .collect();
    if completion_rates.len() < thresholds.trend_min_periods {
        debug!(
            periods = completion_rates.len(),
            "too few planned periods for trend check"
        );
        return None;
    }
    completion_rates.reverse();
    let slope = ols_slope(&completion_rates)?;

    let (kind, severity, direction) = if slope > thresholds.trend_slope {
        (PatternKind::Improving, PatternSeverity::Info, "rising")
    } else if slope < -thresholds.trend_slope {
        (PatternKind::Degrading, PatternSeverity::Warning, "falling")
    } else {
        return None;
    };
    Some(DetectedPattern {
        kind,
        severity,
        description: format!(
            "completion rate {direction} by {:.2} per period over the last {} periods",
            slope.abs(),
            completion_rates.len()
        ),
        evidence: PatternEvidence::Trend {
            completion_rates,
            slope,
        },
    })
}
