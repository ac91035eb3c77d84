//! Mapping from findings to suggestions.

use super::{
    DetectedPattern, PatternEvidence, PatternKind, PatternSeverity, SuggestionPriority,
    WorkflowSuggestion,
};
use crate::process::domain::{CheckpointMode, ConfigChange, ProcessConfig, StepId};

/// Maps each finding to at most one suggestion.
///
/// Checkpoint suggestions consult `config` so that a step already in the
/// proposed mode is not proposed again.
#[must_use]
pub fn suggest(patterns: &[DetectedPattern], config: &ProcessConfig) -> Vec<WorkflowSuggestion> {
    patterns
        .iter()
        .filter_map(|pattern| suggestion_for(pattern, config))
        .collect()
}

fn suggestion_for(pattern: &DetectedPattern, config: &ProcessConfig) -> Option<WorkflowSuggestion> {
    let mode_of = |step: &StepId| config.checkpoint_policy(step).mode;
    match (&pattern.kind, &pattern.evidence) {
        (PatternKind::SlowStep, PatternEvidence::SlowStep { step, .. }) => {
            if mode_of(step) == CheckpointMode::Strict {
                Some(mode_change(
                    step,
                    CheckpointMode::Light,
                    SuggestionPriority::Medium,
                    &pattern.description,
                ))
            } else {
                Some(WorkflowSuggestion {
                    action: format!("Split work entering {step} into smaller increments"),
                    reason: pattern.description.clone(),
                    priority: SuggestionPriority::Low,
                    target_step: Some(step.clone()),
                    change: None,
                })
            }
        }
        (PatternKind::UselessCheckpoint, PatternEvidence::CheckpointUtility { step, .. }) => {
            (mode_of(step) != CheckpointMode::Off).then(|| {
                mode_change(
                    step,
                    CheckpointMode::Off,
                    SuggestionPriority::Low,
                    &pattern.description,
                )
            })
        }
        (PatternKind::CriticalCheckpoint, PatternEvidence::CheckpointUtility { step, .. }) => {
            (mode_of(step) != CheckpointMode::Strict).then(|| {
                mode_change(
                    step,
                    CheckpointMode::Strict,
                    SuggestionPriority::High,
                    &pattern.description,
                )
            })
        }
        (PatternKind::HighRework, _) => Some(WorkflowSuggestion {
            action: "Confirm acceptance criteria before execution starts".to_owned(),
            reason: pattern.description.clone(),
            priority: if pattern.severity == PatternSeverity::Critical {
                SuggestionPriority::High
            } else {
                SuggestionPriority::Medium
            },
            target_step: None,
            change: None,
        }),
        (PatternKind::Degrading, _) => Some(WorkflowSuggestion {
            action: "Reduce planned scope for the next period".to_owned(),
            reason: pattern.description.clone(),
            priority: SuggestionPriority::High,
            target_step: None,
            change: None,
        }),
        _ => None,
    }
}

fn mode_change(
    step: &StepId,
    mode: CheckpointMode,
    priority: SuggestionPriority,
    reason: &str,
) -> WorkflowSuggestion {
    WorkflowSuggestion {
        action: format!("Set checkpoint at {step} to {mode}"),
        reason: reason.to_owned(),
        priority,
        target_step: Some(step.clone()),
        change: Some(ConfigChange::CheckpointMode(mode)),
    }
}

/// Drops suggestions whose action text already appears in an accepted
/// action, compared case-insensitively.
#[must_use]
pub fn filter_accepted(
    suggestions: Vec<WorkflowSuggestion>,
    accepted_actions: &[String],
) -> Vec<WorkflowSuggestion> {
    let accepted: Vec<String> = accepted_actions
        .iter()
        .map(|action| action.to_lowercase())
        .collect();
    suggestions
        .into_iter()
        .filter(|suggestion| {
            let action = suggestion.action.to_lowercase();
            !accepted.iter().any(|previous| previous.contains(&action))
        })
        .collect()
}
