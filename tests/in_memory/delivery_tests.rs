//! Tracked delivery feeding period metrics.

use cadence::{
    metrics::ports::PeriodMetricsStore,
    patterns::domain::PatternKind,
    process::adapters::memory::InMemoryProcessSource,
    tracking::ports::{EventFilter, EventLog},
};
use eyre::Result;
use rstest::rstest;

use super::helpers::{HAPPY_PATH, Pipeline, SHAKY_PATH, pipeline};

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn five_delivered_tasks_summarise_cleanly(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    let sprint = pipeline.open_period("sprint-14").await?;
    for _ in 0..5 {
        pipeline.deliver(&sprint, &HAPPY_PATH).await?;
    }

    assert!(pipeline.aggregator.collect_period_metrics(&sprint).await);

    let events = pipeline
        .events
        .query(&EventFilter::for_period(sprint.clone()))
        .await?;
    let metrics = pipeline
        .metrics
        .get(&sprint)
        .await?
        .ok_or_else(|| eyre::eyre!("metrics stored for {sprint}"))?;
    eyre::ensure!(events.len() == 20, "expected 20 events, got {}", events.len());
    assert_eq!(metrics.tasks_planned(), 5);
    assert_eq!(metrics.tasks_completed(), 5);
    assert_eq!(metrics.rework_event_count(), 0);
    assert_eq!(metrics.first_pass_rate_percent(), Some(100.0));
    assert!(metrics.average_delivery_hours().is_some());
    assert_eq!(metrics.completion_rate(), Some(1.0));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn closing_the_period_is_reflected_on_recollection(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    let sprint = pipeline.open_period("sprint-15").await?;
    pipeline.deliver(&sprint, &HAPPY_PATH).await?;
    pipeline.deliver(&sprint, &SHAKY_PATH).await?;
    assert!(pipeline.aggregator.collect_period_metrics(&sprint).await);
    let open = pipeline
        .aggregator
        .period_metrics(&sprint)
        .await
        .ok_or_else(|| eyre::eyre!("open metrics"))?;

    pipeline.period_service.close_period(&sprint).await?;
    assert!(pipeline.aggregator.collect_period_metrics(&sprint).await);
    let closed = pipeline
        .aggregator
        .period_metrics(&sprint)
        .await
        .ok_or_else(|| eyre::eyre!("closed metrics"))?;

    assert_eq!(open.closed_at(), None);
    assert!(closed.closed_at().is_some());
    assert_eq!(closed.rework_event_count(), 1);
    assert_eq!(closed.first_pass_rate_percent(), Some(50.0));
    assert_eq!(pipeline.aggregator.all_period_metrics().await.len(), 1);
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn steps_without_a_checkpoint_are_not_judged(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    let sprint = pipeline.open_period("sprint-16").await?;
    for _ in 0..6 {
        pipeline.deliver(&sprint, &HAPPY_PATH).await?;
    }

    let report = pipeline.detector.analyze().await;

    assert!(
        report
            .patterns
            .iter()
            .all(|pattern| pattern.kind != PatternKind::UselessCheckpoint),
        "unexpected patterns: {:?}",
        report.patterns
    );
    Ok(())
}
