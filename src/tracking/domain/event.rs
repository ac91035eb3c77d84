//! Immutable transition events.

use crate::process::domain::{CheckpointMode, CheckpointResult, StepId};
use crate::task::domain::{PeriodId, TaskId};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a transition event.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct EventId(Uuid);

impl EventId {
    /// Creates a new random event identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for EventId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for EventId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Parameter object describing a transition to record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransitionRecord {
    /// Task the transition belongs to, if any.
    pub task_id: Option<TaskId>,
    /// Period the transition belongs to, if any.
    pub period_id: Option<PeriodId>,
    /// Step being left.
    pub step_from: StepId,
    /// Step being entered; equal to `step_from` for checkpoint-only events.
    pub step_to: StepId,
    /// Seconds spent in `step_from` before this event.
    pub duration_seconds: u64,
    /// Whether the move re-does previously completed work.
    pub had_rework: bool,
    /// Checkpoint mode in effect for `step_from` when recorded.
    pub checkpoint_mode: CheckpointMode,
    /// Checkpoint outcome, if one was determined.
    pub checkpoint_result: Option<CheckpointResult>,
    /// Free-form notes.
    pub notes: String,
}

/// Append-only record of a step transition or checkpoint evaluation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TransitionEvent {
    id: EventId,
    task_id: Option<TaskId>,
    period_id: Option<PeriodId>,
    step_from: StepId,
    step_to: StepId,
    duration_seconds: u64,
    had_rework: bool,
    checkpoint_mode: CheckpointMode,
    checkpoint_result: Option<CheckpointResult>,
    notes: String,
    recorded_at: DateTime<Utc>,
}

impl TransitionEvent {
    /// Creates an event stamped with the current clock time.
    #[must_use]
    pub fn new(record: TransitionRecord, clock: &impl Clock) -> Self {
        Self {
            id: EventId::new(),
            task_id: record.task_id,
            period_id: record.period_id,
            step_from: record.step_from,
            step_to: record.step_to,
            duration_seconds: record.duration_seconds,
            had_rework: record.had_rework,
            checkpoint_mode: record.checkpoint_mode,
            checkpoint_result: record.checkpoint_result,
            notes: record.notes,
            recorded_at: clock.utc(),
        }
    }

    /// Returns the event identifier.
    #[must_use]
    pub const fn id(&self) -> EventId {
        self.id
    }

    /// Returns the owning task, if any.
    #[must_use]
    pub const fn task_id(&self) -> Option<TaskId> {
        self.task_id
    }

    /// Returns the owning period, if any.
    #[must_use]
    pub const fn period_id(&self) -> Option<&PeriodId> {
        self.period_id.as_ref()
    }

    /// Returns the step being left.
    #[must_use]
    pub const fn step_from(&self) -> &StepId {
        &self.step_from
    }

    /// Returns the step being entered.
    #[must_use]
    pub const fn step_to(&self) -> &StepId {
        &self.step_to
    }

    /// Returns the seconds spent in `step_from`.
    #[must_use]
    pub const fn duration_seconds(&self) -> u64 {
        self.duration_seconds
    }

    /// Returns whether the move re-does previous work.
    #[must_use]
    pub const fn had_rework(&self) -> bool {
        self.had_rework
    }

    /// Returns the checkpoint mode snapshot.
    #[must_use]
    pub const fn checkpoint_mode(&self) -> CheckpointMode {
        self.checkpoint_mode
    }

    /// Returns the checkpoint outcome, if any.
    #[must_use]
    pub const fn checkpoint_result(&self) -> Option<CheckpointResult> {
        self.checkpoint_result
    }

    /// Returns the free-form notes.
    #[must_use]
    pub fn notes(&self) -> &str {
        &self.notes
    }

    /// Returns when the event was recorded.
    #[must_use]
    pub const fn recorded_at(&self) -> DateTime<Utc> {
        self.recorded_at
    }

    /// Returns `true` for checkpoint-only events that did not change step.
    #[must_use]
    pub fn is_self_loop(&self) -> bool {
        self.step_from == self.step_to
    }
}
