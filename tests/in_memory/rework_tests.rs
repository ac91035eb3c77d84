//! Real-time alerts and history mining over the same rework-heavy period.

use cadence::{
    alerts::domain::{AlertConfig, AlertKind, AlertSeverity},
    patterns::domain::{PatternEvidence, PatternKind, PatternSeverity},
    process::adapters::memory::InMemoryProcessSource,
};
use eyre::Result;
use rstest::rstest;

use super::helpers::{Pipeline, REWORKED_PATH, SHAKY_PATH, pipeline};

async fn five_of_eight_reworked(pipeline: &Pipeline<InMemoryProcessSource>) -> Result<()> {
    let sprint = pipeline.open_period("sprint-5").await?;
    pipeline.deliver(&sprint, &REWORKED_PATH).await?;
    pipeline.deliver(&sprint, &SHAKY_PATH).await?;
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn alert_and_detector_fire_independently(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    five_of_eight_reworked(&pipeline).await?;

    let alerts = pipeline.alerts.run_checks().await;
    let report = pipeline.detector.analyze().await;

    let alert = alerts
        .iter()
        .find(|alert| alert.kind == AlertKind::HighRework)
        .ok_or_else(|| eyre::eyre!("rework alert raised"))?;
    assert_eq!(alert.severity, AlertSeverity::Critical);
    assert!(alert.message.contains("62.5%"));

    let pattern = report
        .patterns
        .iter()
        .find(|pattern| pattern.kind == PatternKind::HighRework)
        .ok_or_else(|| eyre::eyre!("rework pattern detected"))?;
    assert_eq!(pattern.severity, PatternSeverity::Critical);
    assert!(matches!(
        pattern.evidence,
        PatternEvidence::Rework {
            rework_events: 5,
            total_events: 8,
            ..
        }
    ));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn raising_the_alert_threshold_leaves_mining_untouched(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    five_of_eight_reworked(&pipeline).await?;
    let mut config = AlertConfig::default();
    config.rework_rate.threshold_percent = 70.0;
    config.rework_rate.critical_percent = 90.0;
    let Pipeline {
        alerts: engine,
        detector,
        ..
    } = pipeline;
    let tuned = engine.with_config(config);

    let raised = tuned.run_checks().await;
    let report = detector.analyze().await;

    assert!(raised.iter().all(|alert| alert.kind != AlertKind::HighRework));
    assert!(report
        .patterns
        .iter()
        .any(|pattern| pattern.kind == PatternKind::HighRework));
    Ok(())
}
