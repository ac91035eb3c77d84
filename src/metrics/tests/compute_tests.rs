//! Tests for the pure metric computations.

use chrono::{DateTime, Duration, TimeZone, Utc};
use mockable::DefaultClock;
use rstest::{fixture, rstest};

use crate::metrics::domain::{
    MetricsInput, PeriodMetrics, PersistedPeriodMetrics, average_delivery_hours,
    first_pass_rate_percent, rework_event_count,
};
use crate::process::domain::{CheckpointMode, StepId};
use crate::task::domain::{PeriodId, PersistedTaskData, Task, TaskId, TaskStatus};
use crate::tracking::domain::{TransitionEvent, TransitionRecord};

fn step(raw: &str) -> StepId {
    StepId::new(raw).expect("valid step identifier")
}

#[fixture]
fn epoch() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 3, 2, 9, 0, 0)
        .single()
        .expect("valid timestamp")
}

fn task(status: TaskStatus, created_at: DateTime<Utc>, hours: Option<i64>) -> Task {
    Task::from_persisted(PersistedTaskData {
        id: TaskId::new(),
        title: "Ship feature".to_owned(),
        priority: 2,
        period_id: None,
        status,
        created_at,
        updated_at: created_at,
        started_at: Some(created_at),
        completed_at: hours.map(|elapsed| created_at + Duration::hours(elapsed)),
    })
}

fn moved(task_id: TaskId, from: &str, to: &str, had_rework: bool) -> TransitionEvent {
    TransitionEvent::new(
        TransitionRecord {
            task_id: Some(task_id),
            period_id: None,
            step_from: step(from),
            step_to: step(to),
            duration_seconds: 60,
            had_rework,
            checkpoint_mode: CheckpointMode::Light,
            checkpoint_result: None,
            notes: String::new(),
        },
        &DefaultClock,
    )
}

#[rstest]
fn average_delivery_covers_completed_tasks_only(epoch: DateTime<Utc>) {
    let tasks = vec![
        task(TaskStatus::Done, epoch, Some(2)),
        task(TaskStatus::Done, epoch, Some(4)),
        task(TaskStatus::Active, epoch, None),
        task(TaskStatus::Cancelled, epoch, None),
    ];

    assert_eq!(average_delivery_hours(&tasks), Some(3.0));
}

#[rstest]
fn average_delivery_is_none_without_deliveries(epoch: DateTime<Utc>) {
    let tasks = vec![task(TaskStatus::Queued, epoch, None)];

    assert_eq!(average_delivery_hours(&tasks), None);
    assert_eq!(average_delivery_hours(&[]), None);
}

#[rstest]
fn first_pass_rate_counts_rework_before_first_review() {
    let clean = TaskId::new();
    let reworked = TaskId::new();
    let late_rework = TaskId::new();
    let never_reviewed = TaskId::new();
    let events = vec![
        moved(clean, "request", "execution", false),
        moved(clean, "execution", "review", false),
        moved(reworked, "request", "execution", true),
        moved(reworked, "execution", "review", false),
        moved(late_rework, "execution", "review", false),
        moved(late_rework, "review", "execution", true),
        moved(late_rework, "execution", "review", false),
        moved(never_reviewed, "request", "execution", false),
    ];

    let rate = first_pass_rate_percent(&events, &step("review")).expect("tasks entered review");

    assert!((rate - 200.0 / 3.0).abs() < 1e-9);
}

#[rstest]
fn rework_on_the_entering_event_fails_first_pass() {
    let task_id = TaskId::new();
    let events = vec![moved(task_id, "execution", "review", true)];

    assert_eq!(
        first_pass_rate_percent(&events, &step("review")),
        Some(0.0)
    );
}

#[rstest]
fn checkpoint_self_loops_do_not_count_as_review_entry() {
    let task_id = TaskId::new();
    let events = vec![moved(task_id, "review", "review", false)];

    assert_eq!(first_pass_rate_percent(&events, &step("review")), None);
}

#[rstest]
fn rework_events_are_counted() {
    let task_id = TaskId::new();
    let events = vec![
        moved(task_id, "execution", "review", false),
        moved(task_id, "review", "execution", true),
        moved(task_id, "execution", "review", true),
    ];

    assert_eq!(rework_event_count(&events), 2);
}

#[rstest]
fn compute_summarises_period(epoch: DateTime<Utc>) {
    let period = PeriodId::new("sprint-1").expect("valid period id");
    let tasks = vec![
        task(TaskStatus::Done, epoch, Some(6)),
        task(TaskStatus::Active, epoch, None),
    ];

    let metrics = PeriodMetrics::compute(
        MetricsInput {
            period_id: &period,
            tasks: &tasks,
            events: &[],
            review_step: &step("review"),
            started_at: Some(epoch),
            closed_at: Some(epoch),
        },
        &DefaultClock,
    );

    assert_eq!(metrics.period_id(), &period);
    assert_eq!(metrics.tasks_planned(), 2);
    assert_eq!(metrics.tasks_completed(), 1);
    assert_eq!(metrics.average_delivery_hours(), Some(6.0));
    assert_eq!(metrics.first_pass_rate_percent(), None);
    assert_eq!(metrics.started_at(), Some(epoch));
    assert_eq!(metrics.closed_at(), Some(epoch));
    assert_eq!(metrics.completion_rate(), Some(0.5));
}

#[rstest]
fn completion_rate_is_none_without_plan(epoch: DateTime<Utc>) {
    let metrics = PeriodMetrics::from_persisted(PersistedPeriodMetrics {
        period_id: PeriodId::new("empty").expect("valid period id"),
        tasks_planned: 0,
        tasks_completed: 0,
        average_delivery_hours: None,
        first_pass_rate_percent: None,
        rework_event_count: 0,
        started_at: None,
        closed_at: None,
        collected_at: epoch,
    });

    assert_eq!(metrics.completion_rate(), None);
}
