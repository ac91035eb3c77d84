//! Unit tests for the patterns module.


use chrono::Utc;
use mockable::DefaultClock;

use crate::metrics::domain::{PeriodMetrics, PersistedPeriodMetrics};
use crate::process::domain::{CheckpointMode, CheckpointResult, StepId};
use crate::task::domain::PeriodId;
use crate::tracking::domain::{TransitionEvent, TransitionRecord};

pub(crate) fn step(raw: &str) -> StepId {
    StepId::new(raw).expect("valid step identifier")
}

pub(crate) fn period(raw: &str) -> PeriodId {
    PeriodId::new(raw).expect("valid period id")
}

/// Builder for synthetic history events.
#[derive(Debug, Clone)]
pub(crate) struct EventSpec {
    record: TransitionRecord,
}

impl EventSpec {
    pub(crate) fn moving(from: &str, to: &str) -> Self {
        Self {
            record: TransitionRecord {
                task_id: None,
                period_id: None,
                step_from: step(from),
                step_to: step(to),
                duration_seconds: 0,
                had_rework: false,
                checkpoint_mode: CheckpointMode::Light,
                checkpoint_result: None,
                notes: String::new(),
            },
        }
    }

    pub(crate) fn lasting(mut self, seconds: u64) -> Self {
        self.record.duration_seconds = seconds;
        self
    }

    pub(crate) fn in_period(mut self, raw: &str) -> Self {
        self.record.period_id = Some(period(raw));
        self
    }

    pub(crate) fn rework(mut self) -> Self {
        self.record.had_rework = true;
        self
    }

    pub(crate) fn mode(mut self, mode: CheckpointMode) -> Self {
        self.record.checkpoint_mode = mode;
        self
    }

    pub(crate) fn result(mut self, result: CheckpointResult) -> Self {
        self.record.checkpoint_result = Some(result);
        self
    }

    pub(crate) fn build(self) -> TransitionEvent {
        TransitionEvent::new(self.record, &DefaultClock)
    }
}

/// Metrics rows for the given chronological completion rates, returned
/// newest first as the metrics store lists them.
pub(crate) fn metrics_history(rates: &[(usize, usize)]) -> Vec<PeriodMetrics> {
    let now = Utc::now();
    let mut rows: Vec<PeriodMetrics> = rates
        .iter()
        .enumerate()
        .map(|(index, (planned, completed))| {
            let age = i64::try_from(rates.len() - index).expect("small history");
            PeriodMetrics::from_persisted(PersistedPeriodMetrics {
                period_id: period(&format!("sprint-{index}")),
                tasks_planned: *planned,
                tasks_completed: *completed,
                average_delivery_hours: None,
                first_pass_rate_percent: None,
                rework_event_count: 0,
                started_at: Some(now - chrono::Duration::days(age)),
                closed_at: None,
                collected_at: now - chrono::Duration::days(age),
            })
        })
        .collect();
    rows.reverse();
    rows
}
