//! Immutable process configuration and its declarative document form.

use super::{
    CheckpointMode, CheckpointModePolicy, CheckpointModes, CheckpointPolicy, ProcessDomainError,
    ProcessParseError, ProcessStep, SkipCondition, StepId, Transition,
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Serialised form of a process definition.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProcessDocument {
    /// Steps in declaration order; the first one is the entry step.
    pub steps: Vec<ProcessStep>,
    /// Legal moves between steps.
    #[serde(default)]
    pub transitions: Vec<Transition>,
    /// Per-mode checkpoint behaviour.
    #[serde(default)]
    pub checkpoint_modes: CheckpointModes,
}

/// Validated, immutable process definition.
///
/// Edits never mutate a config in place; they build a new value that
/// replaces the old one wholesale.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessConfig {
    steps: Vec<ProcessStep>,
    transitions: Vec<Transition>,
    modes: CheckpointModes,
}

impl ProcessConfig {
    /// Builds a config from a document, validating its structure.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessDomainError`] when the document has no steps,
    /// repeats a step identifier, or declares a transition with an unknown
    /// endpoint.
    pub fn from_document(document: ProcessDocument) -> Result<Self, ProcessDomainError> {
        if document.steps.is_empty() {
            return Err(ProcessDomainError::EmptyProcess);
        }

        let mut seen = HashSet::with_capacity(document.steps.len());
        for step in &document.steps {
            if !seen.insert(step.id()) {
                return Err(ProcessDomainError::DuplicateStep(step.id().clone()));
            }
        }

        if let Some(orphan) = document
            .transitions
            .iter()
            .find(|edge| !seen.contains(edge.from_step()) || !seen.contains(edge.to_step()))
        {
            return Err(ProcessDomainError::UnknownTransitionEndpoint {
                from: orphan.from_step().clone(),
                to: orphan.to_step().clone(),
            });
        }

        Ok(Self {
            steps: document.steps,
            transitions: document.transitions,
            modes: document.checkpoint_modes,
        })
    }

    /// Parses a JSON process document.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessParseError`] for malformed JSON or structurally
    /// invalid documents.
    pub fn parse(raw: &str) -> Result<Self, ProcessParseError> {
        let document: ProcessDocument = serde_json::from_str(raw)?;
        Ok(Self::from_document(document)?)
    }

    /// Returns the built-in process used when no document can be parsed.
    ///
    /// `request -> decomposition -> validation -> execution -> review ->
    /// closure`, with validation skippable for low-priority work and a
    /// rework loop from review back to execution.
    #[must_use]
    pub fn default_process() -> Self {
        let request = StepId::builtin("request");
        let decomposition = StepId::builtin("decomposition");
        let validation = StepId::builtin("validation");
        let execution = StepId::builtin("execution");
        let review = StepId::builtin("review");
        let closure = StepId::builtin("closure");

        let steps = vec![
            ProcessStep::new(request.clone(), "Request"),
            ProcessStep::new(decomposition.clone(), "Decomposition").with_checkpoint(
                CheckpointPolicy::enabled(
                    CheckpointMode::Light,
                    ["Every work item has a clear deliverable".to_owned()],
                ),
            ),
            ProcessStep::new(validation.clone(), "Validation")
                .with_checkpoint(CheckpointPolicy::enabled(
                    CheckpointMode::Strict,
                    [
                        "Acceptance criteria are explicit".to_owned(),
                        "Criteria are testable".to_owned(),
                    ],
                ))
                .with_skip_condition(SkipCondition::PriorityAtMost { value: 1 }),
            ProcessStep::new(execution.clone(), "Execution").with_checkpoint(
                CheckpointPolicy::enabled(
                    CheckpointMode::Light,
                    ["Tests pass for the changed behaviour".to_owned()],
                ),
            ),
            ProcessStep::new(review.clone(), "Review").with_checkpoint(CheckpointPolicy::enabled(
                CheckpointMode::Strict,
                [
                    "Deliverable matches the request".to_owned(),
                    "No open defects".to_owned(),
                ],
            )),
            ProcessStep::new(closure.clone(), "Closure"),
        ];

        let transitions = vec![
            Transition::new(request, decomposition.clone()),
            Transition::new(decomposition.clone(), validation.clone()),
            Transition::new(decomposition, execution.clone()).with_guard("priority <= 1"),
            Transition::new(validation, execution.clone()),
            Transition::new(execution.clone(), review.clone()),
            Transition::new(review.clone(), execution).with_guard("review requested changes"),
            Transition::new(review, closure),
        ];

        Self {
            steps,
            transitions,
            modes: CheckpointModes::default(),
        }
    }

    /// Returns the serialisable document form of this config.
    #[must_use]
    pub fn to_document(&self) -> ProcessDocument {
        ProcessDocument {
            steps: self.steps.clone(),
            transitions: self.transitions.clone(),
            checkpoint_modes: self.modes.clone(),
        }
    }

    /// Returns all steps in declaration order.
    #[must_use]
    pub fn steps(&self) -> &[ProcessStep] {
        &self.steps
    }

    /// Returns all transitions in declaration order.
    #[must_use]
    pub fn transitions(&self) -> &[Transition] {
        &self.transitions
    }

    /// Finds a step by identifier.
    #[must_use]
    pub fn step(&self, id: &StepId) -> Option<&ProcessStep> {
        self.steps.iter().find(|step| step.id() == id)
    }

    /// Returns every step identifier in declaration order.
    #[must_use]
    pub fn step_ids(&self) -> Vec<StepId> {
        self.steps.iter().map(|step| step.id().clone()).collect()
    }

    /// Returns the entry step.
    #[must_use]
    pub fn first_step(&self) -> Option<&ProcessStep> {
        self.steps.first()
    }

    /// Returns the steps that have no outgoing transition.
    #[must_use]
    pub fn terminal_steps(&self) -> Vec<&ProcessStep> {
        self.steps
            .iter()
            .filter(|step| self.valid_transitions(step.id()).is_empty())
            .collect()
    }

    /// Returns the transitions leaving `from`.
    #[must_use]
    pub fn valid_transitions(&self, from: &StepId) -> Vec<&Transition> {
        self.transitions
            .iter()
            .filter(|edge| edge.from_step() == from)
            .collect()
    }

    /// Returns `true` when a configured transition leads from `from` to `to`.
    #[must_use]
    pub fn can_transition(&self, from: &StepId, to: &StepId) -> bool {
        self.transitions.iter().any(|edge| edge.connects(from, to))
    }

    /// Returns the checkpoint policy of `step`.
    ///
    /// Unknown steps get [`CheckpointPolicy::disabled`].
    #[must_use]
    pub fn checkpoint_policy(&self, step: &StepId) -> CheckpointPolicy {
        self.step(step)
            .map_or_else(CheckpointPolicy::disabled, |found| {
                found.checkpoint().clone()
            })
    }

    /// Returns the shared behaviour of `mode`.
    #[must_use]
    pub const fn mode_policy(&self, mode: CheckpointMode) -> &CheckpointModePolicy {
        self.modes.get(mode)
    }

    /// Returns a new config with the checkpoint of `step` switched to `mode`.
    ///
    /// Returns `None` when the step does not exist.
    #[must_use]
    pub fn with_checkpoint_mode(&self, step: &StepId, mode: CheckpointMode) -> Option<Self> {
        let mut updated = self.clone();
        let target = updated.steps.iter_mut().find(|candidate| candidate.id() == step)?;
        let checkpoint = target.checkpoint().with_mode(mode);
        target.replace_checkpoint(checkpoint);
        Some(updated)
    }

    /// Serialises the config as pretty-printed JSON.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialisation fails.
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(&self.to_document())
    }

    /// Returns the SHA-256 digest of the canonical JSON form, hex encoded.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when serialisation fails.
    pub fn fingerprint(&self) -> Result<String, serde_json::Error> {
        let canonical = serde_json::to_vec(&self.to_document())?;
        Ok(Sha256::digest(&canonical)
            .iter()
            .map(|byte| format!("{byte:02x}"))
            .collect())
    }
}

impl Default for ProcessConfig {
    fn default() -> Self {
        Self::default_process()
    }
}
