//! Period-close cycle over the assembled pipeline.

use camino::Utf8Path;
use cadence::{
    feedback::{domain::BehaviorTarget, ports::RetrospectiveStore},
    patterns::domain::PatternKind,
    process::{
        adapters::{file::FileProcessSource, memory::InMemoryProcessSource},
        domain::{CheckpointMode, ProcessConfig, StepId},
        ports::ProcessConfigSource,
    },
    task::domain::PeriodId,
    tracking::{
        domain::{TransitionEvent, TransitionRecord},
        ports::EventLog,
    },
};
use eyre::{Result, WrapErr};
use mockable::DefaultClock;
use rstest::rstest;

use super::helpers::{Pipeline, REWORKED_PATH, SHAKY_PATH, pipeline};

async fn record_slow_reviews<S: ProcessConfigSource>(
    pipeline: &Pipeline<S>,
    period: &PeriodId,
) -> Result<()> {
    for _ in 0..3 {
        let event = TransitionEvent::new(
            TransitionRecord {
                task_id: None,
                period_id: Some(period.clone()),
                step_from: StepId::new("review")?,
                step_to: StepId::new("closure")?,
                duration_seconds: 9000,
                had_rework: false,
                checkpoint_mode: CheckpointMode::Strict,
                checkpoint_result: None,
                notes: String::new(),
            },
            &DefaultClock,
        );
        pipeline.events.append(&event).await?;
    }
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn slow_review_relaxes_the_persisted_checkpoint() -> Result<()> {
    let temp = tempfile::tempdir().wrap_err("create temp dir")?;
    let dir = Utf8Path::from_path(temp.path())
        .ok_or_else(|| eyre::eyre!("temp dir is not utf-8"))?;
    std::fs::write(
        temp.path().join("process.json"),
        ProcessConfig::default_process().to_json()?,
    )?;
    let pipeline = Pipeline::over(FileProcessSource::open(dir, "process.json")?);
    let sprint = pipeline.open_period("sprint-1").await?;
    record_slow_reviews(&pipeline, &sprint).await?;

    let report = pipeline.cycle.run(&sprint).await;

    assert_eq!(
        report.applied_changes,
        vec!["review: checkpoint.mode strict -> light".to_owned()]
    );
    let persisted = ProcessConfig::parse(&std::fs::read_to_string(
        temp.path().join("process.json"),
    )?)?;
    assert_eq!(
        persisted.checkpoint_policy(&StepId::new("review")?).mode,
        CheckpointMode::Light
    );
    let retrospective = pipeline
        .retrospectives
        .get(&sprint)
        .await?
        .ok_or_else(|| eyre::eyre!("retrospective written"))?;
    assert!(retrospective
        .actions_accepted()
        .iter()
        .any(|action| action.starts_with("Set checkpoint at review to light")));
    Ok(())
}

#[rstest]
#[tokio::test(flavor = "multi_thread")]
async fn rework_in_consecutive_periods_becomes_a_standing_rule(
    pipeline: Pipeline<InMemoryProcessSource>,
) -> Result<()> {
    let executor = BehaviorTarget::new("executor")?;
    for raw in ["sprint-5", "sprint-6"] {
        let sprint = pipeline.open_period(raw).await?;
        pipeline.deliver(&sprint, &REWORKED_PATH).await?;
        pipeline.deliver(&sprint, &SHAKY_PATH).await?;
    }

    let first = pipeline.cycle.run(&PeriodId::new("sprint-5")?).await;
    let block_after_first = pipeline.promoter.build_context_block(&executor);
    let second = pipeline.cycle.run(&PeriodId::new("sprint-6")?).await;

    assert!(first.metrics_collected);
    assert!(first
        .patterns
        .iter()
        .any(|pattern| pattern.kind == PatternKind::HighRework));
    assert_eq!(block_after_first, "");
    let promotion = second
        .promotion
        .ok_or_else(|| eyre::eyre!("rule store readable"))?;
    assert_eq!(promotion.activated.len(), 1);
    assert!(pipeline
        .promoter
        .build_context_block(&executor)
        .starts_with("Learned rules for executor:"));
    Ok(())
}
