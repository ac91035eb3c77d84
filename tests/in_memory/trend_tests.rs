//! Trend findings over a multi-period history.

use cadence::{
    patterns::domain::PatternKind,
    process::adapters::memory::InMemoryProcessSource,
    task::{
        domain::{Period, PeriodId},
        ports::PeriodRepository,
        services::CreateTaskRequest,
    },
};
use eyre::{Result, WrapErr};
use rstest::rstest;

use super::helpers::{HAPPY_PATH, Pipeline, pipeline};

const PLANNED: usize = 3;

async fn sprint_with_deliveries(
    pipeline: &Pipeline<InMemoryProcessSource>,
    raw: &str,
    weeks_ago: i64,
    delivered: usize,
) -> Result<PeriodId> {
    let id = PeriodId::new(raw)?;
    let started_at = chrono::Utc::now() - chrono::Duration::weeks(weeks_ago);
    pipeline
        .periods
        .store(&Period::starting_at(id.clone(), raw, started_at))
        .await
        .wrap_err("store period")?;
    for _ in 0..delivered {
        pipeline.deliver(&id, &HAPPY_PATH).await?;
    }
    for _ in delivered..PLANNED {
        pipeline
            .task_service
            .create_task(CreateTaskRequest::new("Carry over").in_period(id.clone()))
            .await
            .wrap_err("plan task")?;
    }
    Ok(id)
}

async fn trend_kinds(pipeline: &Pipeline<InMemoryProcessSource>) -> Vec<PatternKind> {
    pipeline
        .detector
        .analyze()
        .await
        .patterns
        .into_iter()
        .map(|pattern| pattern.kind)
        .filter(|kind| matches!(kind, PatternKind::Improving | PatternKind::Degrading))
        .collect()
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn recollecting_an_earlier_period_keeps_the_trend(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    let mut sprints = Vec::new();
    for (raw, weeks_ago, delivered) in [("sprint-0", 3, 1), ("sprint-1", 2, 2), ("sprint-2", 1, 3)] {
        sprints.push(sprint_with_deliveries(&pipeline, raw, weeks_ago, delivered).await?);
    }
    for sprint in &sprints {
        assert!(pipeline.aggregator.collect_period_metrics(sprint).await);
    }
    let before = trend_kinds(&pipeline).await;

    let earliest = sprints
        .first()
        .ok_or_else(|| eyre::eyre!("three sprints opened"))?;
    assert!(pipeline.aggregator.collect_period_metrics(earliest).await);
    let after = trend_kinds(&pipeline).await;

    assert_eq!(before, vec![PatternKind::Improving]);
    assert_eq!(after, before);
    Ok(())
}
