//! Pure metric computations.

use std::collections::HashMap;

use crate::process::domain::StepId;
use crate::task::domain::{Task, TaskId};
use crate::tracking::domain::TransitionEvent;

const SECONDS_PER_HOUR: f64 = 3600.0;

/// Mean creation-to-completion time, in hours, of delivered tasks.
///
/// Tasks without a completion timestamp are ignored. Returns `None` when no
/// task qualifies.
#[must_use]
pub fn average_delivery_hours(tasks: &[Task]) -> Option<f64> {
    let hours: Vec<f64> = tasks
        .iter()
        .filter(|task| task.is_completed())
        .filter_map(|task| {
            task.completed_at().map(|completed| {
                (completed - task.created_at()).num_seconds() as f64 / SECONDS_PER_HOUR
            })
        })
        .collect();
    if hours.is_empty() {
        return None;
    }
    Some(hours.iter().sum::<f64>() / hours.len() as f64)
}

#[derive(Debug, Clone, Copy)]
enum ReviewProgress {
    Pending { rework_seen: bool },
    Entered { first_pass: bool },
}

/// Percentage of tasks whose first entry into `review_step` was reached
/// without any rework event up to and including that entry.
///
/// Events without a task are ignored. Returns `None` when no task entered
/// review.
#[must_use]
pub fn first_pass_rate_percent(events: &[TransitionEvent], review_step: &StepId) -> Option<f64> {
    let mut progress: HashMap<TaskId, ReviewProgress> = HashMap::new();
    for event in events {
        let Some(task_id) = event.task_id() else {
            continue;
        };
        let state = progress
            .entry(task_id)
            .or_insert(ReviewProgress::Pending { rework_seen: false });
        if let ReviewProgress::Pending {
            rework_seen: earlier,
        } = *state
        {
            let rework_seen = earlier || event.had_rework();
            *state = if !event.is_self_loop() && event.step_to() == review_step {
                ReviewProgress::Entered {
                    first_pass: !rework_seen,
                }
            } else {
                ReviewProgress::Pending { rework_seen }
            };
        }
    }

    let entered: Vec<bool> = progress
        .values()
        .filter_map(|state| match state {
            ReviewProgress::Entered { first_pass } => Some(*first_pass),
            ReviewProgress::Pending { .. } => None,
        })
        .collect();
    if entered.is_empty() {
        return None;
    }
    let passed = entered.iter().filter(|first_pass| **first_pass).count();
    Some(100.0 * passed as f64 / entered.len() as f64)
}

/// Number of events flagged as rework.
#[must_use]
pub fn rework_event_count(events: &[TransitionEvent]) -> usize {
    events.iter().filter(|event| event.had_rework()).count()
}
