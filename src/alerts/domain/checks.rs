//! Pure alert checks over current state.
//!
//! Each check returns every alert it raises, in input order where the input
//! has one and in subject order where it is grouped. Checks never look at
//! the `enabled` switch; the engine decides what runs.

use std::collections::{BTreeMap, HashSet};

use chrono::{DateTime, Utc};

use super::{
    Alert, AlertKind, AlertSeverity, QualityDriftCheck, ReworkRateCheck, SchedulePaceCheck,
    StaleBacklogCheck, StuckTaskCheck, WorkerFailureCheck, WorkerRun,
};
use crate::patterns::domain::mean;
use crate::task::domain::{Period, PeriodId, Task, TaskStatus};
use crate::tracking::domain::TransitionEvent;

const SECONDS_PER_DAY: f64 = 86_400.0;

/// Flags active tasks whose last update is older than the threshold.
#[must_use]
pub fn check_stuck_tasks(
    tasks: &[Task],
    config: &StuckTaskCheck,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let threshold = config.threshold();
    tasks
        .iter()
        .filter(|task| task.status() == TaskStatus::Active)
        .filter_map(|task| {
            let idle = now - task.updated_at();
            (idle > threshold).then(|| {
                Alert::new(
                    AlertKind::StuckTask,
                    AlertSeverity::escalated_if(idle > threshold * 2),
                    task.id().to_string(),
                    format!(
                        "task '{}' has been active without updates for {}h",
                        task.title(),
                        idle.num_hours()
                    ),
                )
            })
        })
        .collect()
}

/// Flags periods whose rework share exceeds the threshold.
///
/// `events` are grouped by period; events without a period are ignored.
#[must_use]
pub fn check_rework_rate(events: &[TransitionEvent], config: &ReworkRateCheck) -> Vec<Alert> {
    let mut per_period: BTreeMap<&PeriodId, (usize, usize)> = BTreeMap::new();
    for event in events {
        let Some(period_id) = event.period_id() else {
            continue;
        };
        let tally = per_period.entry(period_id).or_default();
        tally.0 += 1;
        if event.had_rework() {
            tally.1 += 1;
        }
    }

    per_period
        .into_iter()
        .filter(|(_, (total, _))| *total >= config.min_events)
        .filter_map(|(period_id, (total, reworked))| {
            let percent = reworked as f64 * 100.0 / total as f64;
            (percent > config.threshold_percent).then(|| {
                Alert::new(
                    AlertKind::HighRework,
                    AlertSeverity::escalated_if(percent > config.critical_percent),
                    period_id.to_string(),
                    format!(
                        "{percent:.1}% of transitions in {period_id} were rework ({reworked}/{total})"
                    ),
                )
            })
        })
        .collect()
}

/// Flags running periods whose completion lags the elapsed share of the
/// period.
///
/// Expected progress is the period age over its assumed length, capped at
/// one. Pace is only judged once expected progress passes the configured
/// minimum and something was planned.
#[must_use]
pub fn check_schedule_pace(
    periods: &[Period],
    tasks: &[Task],
    config: &SchedulePaceCheck,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    periods
        .iter()
        .filter(|period| period.is_active())
        .filter_map(|period| {
            let planned: Vec<&Task> = tasks
                .iter()
                .filter(|task| task.period_id() == Some(period.id()))
                .collect();
            if planned.is_empty() || config.period_days <= 0.0 {
                return None;
            }
            let age_days = (now - period.started_at()).num_seconds() as f64 / SECONDS_PER_DAY;
            let expected = (age_days / config.period_days).min(1.0);
            if expected <= config.min_expected_progress {
                return None;
            }
            let completed = planned.iter().filter(|task| task.is_completed()).count();
            let actual = completed as f64 / planned.len() as f64;
            (actual < config.behind_ratio * expected).then(|| {
                Alert::new(
                    AlertKind::BehindSchedule,
                    AlertSeverity::escalated_if(actual < config.critical_ratio * expected),
                    period.id().to_string(),
                    format!(
                        "{completed}/{} tasks done in {} with {:.0}% of the period elapsed",
                        planned.len(),
                        period.id(),
                        expected * 100.0
                    ),
                )
            })
        })
        .collect()
}

/// Compares recent review scores with the window before them.
///
/// `scores` are newest first. The drift alert needs two full windows; the
/// low quality alert needs one and fires independently.
#[must_use]
pub fn check_quality_drift(scores: &[f64], config: &QualityDriftCheck) -> Vec<Alert> {
    let window = config.window;
    let mut alerts = Vec::new();
    if window == 0 {
        return alerts;
    }
    let Some(recent_mean) = scores.get(..window).and_then(mean) else {
        return alerts;
    };
    let previous_mean = window
        .checked_mul(2)
        .and_then(|end| scores.get(window..end))
        .and_then(mean);

    if let Some(previous) = previous_mean {
        let drop = previous - recent_mean;
        if drop > config.drop_points {
            alerts.push(Alert::new(
                AlertKind::QualityDrift,
                AlertSeverity::escalated_if(drop > config.critical_drop_points),
                "review",
                format!(
                    "mean review score fell {drop:.1} points ({previous:.1} -> {recent_mean:.1})"
                ),
            ));
        }
    }
    if recent_mean < config.floor {
        alerts.push(Alert::new(
            AlertKind::LowQuality,
            AlertSeverity::Warning,
            "review",
            format!(
                "mean of the last {window} review scores is {recent_mean:.1}, below {:.1}",
                config.floor
            ),
        ));
    }
    alerts
}

/// Flags actors whose failure ratio exceeds the threshold.
#[must_use]
pub fn check_worker_failures(runs: &[WorkerRun], config: &WorkerFailureCheck) -> Vec<Alert> {
    let mut per_actor: BTreeMap<&str, (usize, usize)> = BTreeMap::new();
    for run in runs {
        let tally = per_actor.entry(run.actor.as_str()).or_default();
        tally.0 += 1;
        if !run.succeeded {
            tally.1 += 1;
        }
    }

    per_actor
        .into_iter()
        .filter(|(_, (total, _))| *total >= config.min_runs)
        .filter_map(|(actor, (total, failed))| {
            let ratio = failed as f64 / total as f64;
            (ratio > config.failure_ratio).then(|| {
                Alert::new(
                    AlertKind::WorkerFailures,
                    AlertSeverity::escalated_if(ratio > config.critical_ratio),
                    actor,
                    format!("{actor} failed {failed} of its last {total} runs"),
                )
            })
        })
        .collect()
}

/// Flags queued, never started tasks of running periods that have waited
/// longer than the threshold.
#[must_use]
pub fn check_stale_backlog(
    tasks: &[Task],
    periods: &[Period],
    config: &StaleBacklogCheck,
    now: DateTime<Utc>,
) -> Vec<Alert> {
    let running: HashSet<&PeriodId> = periods
        .iter()
        .filter(|period| period.is_active())
        .map(Period::id)
        .collect();
    let threshold = config.threshold();
    tasks
        .iter()
        .filter(|task| task.status() == TaskStatus::Queued && task.started_at().is_none())
        .filter(|task| task.period_id().is_some_and(|id| running.contains(id)))
        .filter_map(|task| {
            let waiting = now - task.created_at();
            (waiting > threshold).then(|| {
                Alert::new(
                    AlertKind::StaleBacklog,
                    AlertSeverity::escalated_if(waiting > threshold * 2),
                    task.id().to_string(),
                    format!(
                        "task '{}' has been queued for {}h without being picked up",
                        task.title(),
                        waiting.num_hours()
                    ),
                )
            })
        })
        .collect()
}
