//! Period metrics snapshot.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use super::compute::{average_delivery_hours, first_pass_rate_percent, rework_event_count};
use crate::process::domain::StepId;
use crate::task::domain::{PeriodId, Task};
use crate::tracking::domain::TransitionEvent;

/// Inputs for a metrics computation.
#[derive(Debug, Clone, Copy)]
pub struct MetricsInput<'a> {
    /// Period being summarised.
    pub period_id: &'a PeriodId,
    /// Tasks planned into the period.
    pub tasks: &'a [Task],
    /// Events tagged with the period, in insertion order.
    pub events: &'a [TransitionEvent],
    /// Step whose first entry decides first-pass quality.
    pub review_step: &'a StepId,
    /// Start timestamp of the period, if the period is registered.
    pub started_at: Option<DateTime<Utc>>,
    /// Close timestamp of the period, if closed.
    pub closed_at: Option<DateTime<Utc>>,
}

/// Aggregate summary of one period.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PeriodMetrics {
    period_id: PeriodId,
    tasks_planned: usize,
    tasks_completed: usize,
    average_delivery_hours: Option<f64>,
    first_pass_rate_percent: Option<f64>,
    rework_event_count: usize,
    started_at: Option<DateTime<Utc>>,
    closed_at: Option<DateTime<Utc>>,
    collected_at: DateTime<Utc>,
}

/// Parameter object for reconstructing stored metrics.
#[derive(Debug, Clone, PartialEq)]
pub struct PersistedPeriodMetrics {
    /// Period key.
    pub period_id: PeriodId,
    /// Tasks planned into the period.
    pub tasks_planned: usize,
    /// Tasks delivered.
    pub tasks_completed: usize,
    /// Mean creation-to-completion time of delivered tasks.
    pub average_delivery_hours: Option<f64>,
    /// Share of reviewed tasks that reached review without rework.
    pub first_pass_rate_percent: Option<f64>,
    /// Events flagged as rework.
    pub rework_event_count: usize,
    /// Start timestamp of the period.
    pub started_at: Option<DateTime<Utc>>,
    /// Close timestamp of the period.
    pub closed_at: Option<DateTime<Utc>>,
    /// When the snapshot was computed.
    pub collected_at: DateTime<Utc>,
}

impl PeriodMetrics {
    /// Computes a fresh snapshot from the period's tasks and events.
    #[must_use]
    pub fn compute(input: MetricsInput<'_>, clock: &impl Clock) -> Self {
        Self {
            period_id: input.period_id.clone(),
            tasks_planned: input.tasks.len(),
            tasks_completed: input.tasks.iter().filter(|task| task.is_completed()).count(),
            average_delivery_hours: average_delivery_hours(input.tasks),
            first_pass_rate_percent: first_pass_rate_percent(input.events, input.review_step),
            rework_event_count: rework_event_count(input.events),
            started_at: input.started_at,
            closed_at: input.closed_at,
            collected_at: clock.utc(),
        }
    }

    /// Reconstructs metrics from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedPeriodMetrics) -> Self {
        Self {
            period_id: data.period_id,
            tasks_planned: data.tasks_planned,
            tasks_completed: data.tasks_completed,
            average_delivery_hours: data.average_delivery_hours,
            first_pass_rate_percent: data.first_pass_rate_percent,
            rework_event_count: data.rework_event_count,
            started_at: data.started_at,
            closed_at: data.closed_at,
            collected_at: data.collected_at,
        }
    }

    /// Returns the period key.
    #[must_use]
    pub const fn period_id(&self) -> &PeriodId {
        &self.period_id
    }

    /// Returns the number of tasks planned into the period.
    #[must_use]
    pub const fn tasks_planned(&self) -> usize {
        self.tasks_planned
    }

    /// Returns the number of delivered tasks.
    #[must_use]
    pub const fn tasks_completed(&self) -> usize {
        self.tasks_completed
    }

    /// Returns the mean delivery time in hours, if any task was delivered.
    #[must_use]
    pub const fn average_delivery_hours(&self) -> Option<f64> {
        self.average_delivery_hours
    }

    /// Returns the first-pass rate, if any task entered review.
    #[must_use]
    pub const fn first_pass_rate_percent(&self) -> Option<f64> {
        self.first_pass_rate_percent
    }

    /// Returns the number of rework events.
    #[must_use]
    pub const fn rework_event_count(&self) -> usize {
        self.rework_event_count
    }

    /// Returns the start timestamp of the period.
    ///
    /// Stores list metrics by this value, so it orders the history
    /// regardless of when each summary was last recomputed.
    #[must_use]
    pub const fn started_at(&self) -> Option<DateTime<Utc>> {
        self.started_at
    }

    /// Returns the close timestamp of the period.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns when the snapshot was computed.
    #[must_use]
    pub const fn collected_at(&self) -> DateTime<Utc> {
        self.collected_at
    }

    /// Returns completed over planned, or `None` when nothing was planned.
    #[must_use]
    pub fn completion_rate(&self) -> Option<f64> {
        (self.tasks_planned > 0)
            .then(|| self.tasks_completed as f64 / self.tasks_planned as f64)
    }
}
