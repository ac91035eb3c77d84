//! Tests for the in-memory event log and its filters.

use crate::process::domain::{CheckpointMode, StepId};
use crate::task::domain::{PeriodId, TaskId};
use crate::tracking::{
    adapters::memory::InMemoryEventLog,
    domain::{TransitionEvent, TransitionRecord},
    ports::{EventFilter, EventLog, EventLogError},
};
use mockable::DefaultClock;
use rstest::rstest;

fn event(task_id: Option<TaskId>, period: Option<&str>, from: &str, to: &str) -> TransitionEvent {
    TransitionEvent::new(
        TransitionRecord {
            task_id,
            period_id: period.map(|raw| PeriodId::new(raw).expect("valid period id")),
            step_from: StepId::new(from).expect("valid step"),
            step_to: StepId::new(to).expect("valid step"),
            duration_seconds: 5,
            had_rework: false,
            checkpoint_mode: CheckpointMode::Off,
            checkpoint_result: None,
            notes: String::new(),
        },
        &DefaultClock,
    )
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn query_preserves_insertion_order() {
    let log = InMemoryEventLog::new();
    let task = TaskId::new();
    let first = event(Some(task), None, "request", "decomposition");
    let second = event(Some(task), None, "decomposition", "execution");

    log.append(&first).await.expect("append first");
    log.append(&second).await.expect("append second");

    let events = log.query(&EventFilter::all()).await.expect("query");
    assert_eq!(events, vec![first, second]);
    assert_eq!(log.len(), 2);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn append_rejects_duplicate_identifier() {
    let log = InMemoryEventLog::new();
    let recorded = event(None, Some("sprint-1"), "request", "decomposition");
    log.append(&recorded).await.expect("first append");

    let result = log.append(&recorded).await;

    assert!(matches!(result, Err(EventLogError::DuplicateEvent(id)) if id == recorded.id()));
    assert_eq!(log.len(), 1);
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn filters_select_by_task_and_period() {
    let log = InMemoryEventLog::new();
    let task_a = TaskId::new();
    let task_b = TaskId::new();
    let a_in_one = event(Some(task_a), Some("sprint-1"), "request", "execution");
    let b_in_one = event(Some(task_b), Some("sprint-1"), "request", "execution");
    let b_in_two = event(Some(task_b), Some("sprint-2"), "execution", "review");
    for recorded in [&a_in_one, &b_in_one, &b_in_two] {
        log.append(recorded).await.expect("append");
    }
    let sprint_one = PeriodId::new("sprint-1").expect("valid period id");

    let by_period = log
        .query(&EventFilter::for_period(sprint_one.clone()))
        .await
        .expect("period query");
    let by_task = log
        .query(&EventFilter::for_task(task_b))
        .await
        .expect("task query");
    let both = log
        .query(&EventFilter {
            task_id: Some(task_b),
            period_id: Some(sprint_one),
        })
        .await
        .expect("combined query");

    assert_eq!(by_period, vec![a_in_one, b_in_one.clone()]);
    assert_eq!(by_task, vec![b_in_one.clone(), b_in_two]);
    assert_eq!(both, vec![b_in_one]);
}

#[rstest]
fn self_loop_detection() {
    assert!(event(None, None, "review", "review").is_self_loop());
    assert!(!event(None, None, "review", "closure").is_self_loop());
}
