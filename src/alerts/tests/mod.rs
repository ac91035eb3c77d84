//! Unit tests for the alerts module.


use chrono::{DateTime, Duration, Utc};
use mockable::DefaultClock;

use crate::process::domain::{CheckpointMode, StepId};
use crate::task::domain::{Period, PeriodId, PersistedTaskData, Task, TaskId, TaskStatus};
use crate::tracking::domain::{TransitionEvent, TransitionRecord};

pub(crate) fn period_id(raw: &str) -> PeriodId {
    PeriodId::new(raw).expect("valid period id")
}

pub(crate) fn period_started(raw: &str, started_at: DateTime<Utc>) -> Period {
    Period::starting_at(period_id(raw), raw, started_at)
}

/// Builder for tasks with explicit timestamps.
#[derive(Debug, Clone)]
pub(crate) struct TaskSpec {
    data: PersistedTaskData,
}

impl TaskSpec {
    pub(crate) fn new(status: TaskStatus, now: DateTime<Utc>) -> Self {
        Self {
            data: PersistedTaskData {
                id: TaskId::new(),
                title: "Ship the importer".to_owned(),
                priority: 2,
                period_id: None,
                status,
                created_at: now,
                updated_at: now,
                started_at: None,
                completed_at: None,
            },
        }
    }

    pub(crate) fn in_period(mut self, raw: &str) -> Self {
        self.data.period_id = Some(period_id(raw));
        self
    }

    pub(crate) fn idle_for(mut self, hours: i64) -> Self {
        self.data.updated_at -= Duration::hours(hours);
        self
    }

    pub(crate) fn created_hours_ago(mut self, hours: i64) -> Self {
        self.data.created_at -= Duration::hours(hours);
        self
    }

    pub(crate) fn started(mut self) -> Self {
        self.data.started_at = Some(self.data.created_at);
        self
    }

    pub(crate) fn build(self) -> Task {
        Task::from_persisted(self.data)
    }
}

/// Events of `raw` period, the first `reworked` of them flagged as rework.
pub(crate) fn period_events(raw: &str, total: usize, reworked: usize) -> Vec<TransitionEvent> {
    (0..total)
        .map(|index| {
            TransitionEvent::new(
                TransitionRecord {
                    task_id: None,
                    period_id: Some(period_id(raw)),
                    step_from: StepId::new("execution").expect("valid step"),
                    step_to: StepId::new("review").expect("valid step"),
                    duration_seconds: 60,
                    had_rework: index < reworked,
                    checkpoint_mode: CheckpointMode::Light,
                    checkpoint_result: None,
                    notes: String::new(),
                },
                &DefaultClock,
            )
        })
        .collect()
}
