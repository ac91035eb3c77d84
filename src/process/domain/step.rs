//! Process steps and the transitions between them.

use super::{CheckpointPolicy, StepId};
use serde::{Deserialize, Serialize};

/// Condition under which a step may be skipped for a task.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SkipCondition {
    /// Skip the step for tasks whose priority is at most `value`.
    PriorityAtMost {
        /// Inclusive priority ceiling.
        value: u8,
    },
}

impl SkipCondition {
    /// Returns `true` when the condition holds for a task of `priority`.
    #[must_use]
    pub const fn applies_to(self, priority: u8) -> bool {
        match self {
            Self::PriorityAtMost { value } => priority <= value,
        }
    }
}

/// A named stage in the process graph.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessStep {
    id: StepId,
    label: String,
    #[serde(default)]
    checkpoint: CheckpointPolicy,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    skip_conditions: Vec<SkipCondition>,
}

impl ProcessStep {
    /// Creates a step without a checkpoint.
    #[must_use]
    pub fn new(id: StepId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            checkpoint: CheckpointPolicy::disabled(),
            skip_conditions: Vec::new(),
        }
    }

    /// Sets the checkpoint policy.
    #[must_use]
    pub fn with_checkpoint(mut self, checkpoint: CheckpointPolicy) -> Self {
        self.checkpoint = checkpoint;
        self
    }

    /// Adds a skip condition.
    #[must_use]
    pub fn with_skip_condition(mut self, condition: SkipCondition) -> Self {
        self.skip_conditions.push(condition);
        self
    }

    /// Returns the step identifier.
    #[must_use]
    pub const fn id(&self) -> &StepId {
        &self.id
    }

    /// Returns the display label.
    #[must_use]
    pub fn label(&self) -> &str {
        &self.label
    }

    /// Returns the checkpoint policy.
    #[must_use]
    pub const fn checkpoint(&self) -> &CheckpointPolicy {
        &self.checkpoint
    }

    /// Returns the configured skip conditions.
    #[must_use]
    pub fn skip_conditions(&self) -> &[SkipCondition] {
        &self.skip_conditions
    }

    /// Returns `true` when any skip condition holds for `priority`.
    #[must_use]
    pub fn should_skip(&self, priority: u8) -> bool {
        self.skip_conditions
            .iter()
            .any(|condition| condition.applies_to(priority))
    }

    pub(crate) fn replace_checkpoint(&mut self, checkpoint: CheckpointPolicy) {
        self.checkpoint = checkpoint;
    }
}

/// Directed edge between two steps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Transition {
    from: StepId,
    to: StepId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    guard: Option<String>,
}

impl Transition {
    /// Creates an unguarded transition.
    #[must_use]
    pub const fn new(from: StepId, to: StepId) -> Self {
        Self {
            from,
            to,
            guard: None,
        }
    }

    /// Attaches a descriptive guard condition.
    #[must_use]
    pub fn with_guard(mut self, guard: impl Into<String>) -> Self {
        self.guard = Some(guard.into());
        self
    }

    /// Returns the source step.
    #[must_use]
    pub const fn from_step(&self) -> &StepId {
        &self.from
    }

    /// Returns the destination step.
    #[must_use]
    pub const fn to_step(&self) -> &StepId {
        &self.to
    }

    /// Returns the guard condition, if any.
    #[must_use]
    pub fn guard(&self) -> Option<&str> {
        self.guard.as_deref()
    }

    /// Returns `true` when the edge leads from `from` to `to`.
    #[must_use]
    pub fn connects(&self, from: &StepId, to: &StepId) -> bool {
        &self.from == from && &self.to == to
    }
}
