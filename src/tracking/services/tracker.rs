//! Per-task transition tracker.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, error};

use crate::process::{
    domain::{CheckpointResult, StepId},
    ports::ProcessConfigSource,
    services::ProcessConfigStore,
};
use crate::task::domain::{PeriodId, TaskId};
use crate::tracking::{
    domain::{TransitionEvent, TransitionRecord},
    ports::EventLog,
};

/// Owner of a tracker: a task, a period, or both.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TrackerKey {
    /// Owning task, if any.
    pub task_id: Option<TaskId>,
    /// Owning period, if any.
    pub period_id: Option<PeriodId>,
}

impl TrackerKey {
    /// Key for a task outside any period.
    #[must_use]
    pub const fn for_task(task_id: TaskId) -> Self {
        Self {
            task_id: Some(task_id),
            period_id: None,
        }
    }

    /// Key for period-level work without a task.
    #[must_use]
    pub const fn for_period(period_id: PeriodId) -> Self {
        Self {
            task_id: None,
            period_id: Some(period_id),
        }
    }

    /// Tags the key with a period.
    #[must_use]
    pub fn with_period(mut self, period_id: PeriodId) -> Self {
        self.period_id = Some(period_id);
        self
    }
}

/// Optional details of a transition.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransitionOptions {
    /// Whether the move re-does previously completed work.
    pub had_rework: bool,
    /// Explicit checkpoint outcome; derived from the policy when unset.
    pub checkpoint_result: Option<CheckpointResult>,
    /// Free-form notes.
    pub notes: String,
}

impl TransitionOptions {
    /// Marks the move as rework.
    #[must_use]
    pub const fn rework(mut self) -> Self {
        self.had_rework = true;
        self
    }

    /// Sets an explicit checkpoint outcome.
    #[must_use]
    pub const fn with_result(mut self, result: CheckpointResult) -> Self {
        self.checkpoint_result = Some(result);
        self
    }

    /// Sets the notes.
    #[must_use]
    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = notes.into();
        self
    }
}

/// Tracks one unit of work through the process and logs every move.
///
/// The tracker's in-memory step pointer is authoritative for its caller: a
/// failed append is logged and reported, but the step still advances.
/// Moves absent from the configured transition set are recorded as well.
pub struct TransitionTracker<L, S, C>
where
    L: EventLog,
    S: ProcessConfigSource,
    C: Clock + Send + Sync,
{
    key: TrackerKey,
    current_step: StepId,
    step_entered_at: DateTime<Utc>,
    log: Arc<L>,
    config: Arc<ProcessConfigStore<S>>,
    clock: Arc<C>,
}

impl<L, S, C> TransitionTracker<L, S, C>
where
    L: EventLog,
    S: ProcessConfigSource,
    C: Clock + Send + Sync,
{
    /// Starts tracking at `start`, or at the process's first step.
    pub async fn start(
        key: TrackerKey,
        start: Option<StepId>,
        log: Arc<L>,
        config: Arc<ProcessConfigStore<S>>,
        clock: Arc<C>,
    ) -> Self {
        let current_step = match start {
            Some(step) => step,
            None => config
                .load()
                .await
                .first_step()
                .map_or_else(|| StepId::builtin("request"), |step| step.id().clone()),
        };
        let step_entered_at = clock.utc();
        Self {
            key,
            current_step,
            step_entered_at,
            log,
            config,
            clock,
        }
    }

    /// Returns the owning key.
    #[must_use]
    pub const fn key(&self) -> &TrackerKey {
        &self.key
    }

    /// Returns the step the work is currently in.
    #[must_use]
    pub const fn current_step(&self) -> &StepId {
        &self.current_step
    }

    /// Returns when the current step was entered.
    #[must_use]
    pub const fn step_entered_at(&self) -> DateTime<Utc> {
        self.step_entered_at
    }

    /// Moves to `to`, logging the time spent in the current step.
    ///
    /// The checkpoint policy of the step being left decides the default
    /// outcome: `skipped` when it never evaluates, unset otherwise. Returns
    /// `false` when the event could not be persisted; the move happens
    /// regardless.
    pub async fn transition(&mut self, to: StepId, options: TransitionOptions) -> bool {
        let now = self.clock.utc();
        let config = self.config.load().await;
        if !config.can_transition(&self.current_step, &to) {
            debug!(
                from = %self.current_step,
                to = %to,
                "recording transition outside the configured transition set"
            );
        }

        let policy = config.checkpoint_policy(&self.current_step);
        let checkpoint_result = options
            .checkpoint_result
            .or_else(|| policy.auto_skips().then_some(CheckpointResult::Skipped));
        let event = TransitionEvent::new(
            TransitionRecord {
                task_id: self.key.task_id,
                period_id: self.key.period_id.clone(),
                step_from: self.current_step.clone(),
                step_to: to.clone(),
                duration_seconds: elapsed_seconds(self.step_entered_at, now),
                had_rework: options.had_rework,
                checkpoint_mode: policy.mode,
                checkpoint_result,
                notes: options.notes,
            },
            &*self.clock,
        );

        let persisted = self.append(&event).await;
        self.current_step = to;
        self.step_entered_at = now;
        persisted
    }

    /// Records a checkpoint outcome for the current step without moving.
    ///
    /// Returns `false` when the event could not be persisted.
    pub async fn log_checkpoint(
        &self,
        result: CheckpointResult,
        notes: impl Into<String> + Send,
    ) -> bool {
        let policy = self
            .config
            .load()
            .await
            .checkpoint_policy(&self.current_step);
        let event = TransitionEvent::new(
            TransitionRecord {
                task_id: self.key.task_id,
                period_id: self.key.period_id.clone(),
                step_from: self.current_step.clone(),
                step_to: self.current_step.clone(),
                duration_seconds: 0,
                had_rework: false,
                checkpoint_mode: policy.mode,
                checkpoint_result: Some(result),
                notes: notes.into(),
            },
            &*self.clock,
        );
        self.append(&event).await
    }

    async fn append(&self, event: &TransitionEvent) -> bool {
        match self.log.append(event).await {
            Ok(()) => true,
            Err(err) => {
                error!(
                    event_id = %event.id(),
                    from = %event.step_from(),
                    to = %event.step_to(),
                    error = %err,
                    "failed to append transition event, in-memory state kept"
                );
                false
            }
        }
    }
}

fn elapsed_seconds(since: DateTime<Utc>, now: DateTime<Utc>) -> u64 {
    u64::try_from((now - since).num_seconds()).unwrap_or(0)
}
