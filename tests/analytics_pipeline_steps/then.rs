//! Then steps for analytics pipeline BDD scenarios.

use cadence::{
    alerts::domain::AlertSeverity,
    feedback::domain::BehaviorTarget,
    metrics::domain::PeriodMetrics,
    patterns::domain::PatternSeverity,
    process::domain::{CheckpointMode, StepId},
    tracking::ports::{EventFilter, EventLog},
};
use rstest_bdd_macros::then;

use super::world::{PipelineWorld, run_async};

fn collected(world: &PipelineWorld) -> Result<PeriodMetrics, eyre::Report> {
    let period = world.period()?;
    run_async(world.pipeline.aggregator.period_metrics(&period))
        .ok_or_else(|| eyre::eyre!("no metrics stored for {period}"))
}

#[then("{count:usize} transition events are logged for the period")]
fn events_logged(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let period = world.period()?;
    let events = run_async(world.pipeline.events.query(&EventFilter::for_period(period)))?;
    eyre::ensure!(
        events.len() == count,
        "expected {count} events, found {}",
        events.len()
    );
    Ok(())
}

#[then("the period reports {planned:usize} planned and {completed:usize} completed tasks")]
fn planned_and_completed(
    world: &PipelineWorld,
    planned: usize,
    completed: usize,
) -> Result<(), eyre::Report> {
    let metrics = collected(world)?;
    eyre::ensure!(
        metrics.tasks_planned() == planned && metrics.tasks_completed() == completed,
        "expected {planned}/{completed}, found {}/{}",
        metrics.tasks_planned(),
        metrics.tasks_completed()
    );
    Ok(())
}

#[then("the period reports {count:usize} rework events")]
fn rework_events(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let metrics = collected(world)?;
    eyre::ensure!(
        metrics.rework_event_count() == count,
        "expected {count} rework events, found {}",
        metrics.rework_event_count()
    );
    Ok(())
}

#[then(r#"a critical "{kind}" alert is raised"#)]
fn critical_alert(world: &PipelineWorld, kind: String) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.alerts.iter().any(|alert| {
            alert.kind.as_str() == kind && alert.severity == AlertSeverity::Critical
        }),
        "no critical {kind} alert among {:?}",
        world.alerts
    );
    Ok(())
}

#[then(r#"a critical "{kind}" pattern is detected"#)]
fn critical_pattern(world: &PipelineWorld, kind: String) -> Result<(), eyre::Report> {
    let report = world
        .report
        .as_ref()
        .ok_or_else(|| eyre::eyre!("history has not been analysed"))?;
    eyre::ensure!(
        report.patterns.iter().any(|pattern| {
            pattern.kind.as_str() == kind && pattern.severity == PatternSeverity::Critical
        }),
        "no critical {kind} pattern among {:?}",
        report.patterns
    );
    Ok(())
}

#[then("exactly {count:usize} suggestion was applied")]
fn suggestions_applied(world: &PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    eyre::ensure!(
        world.applied_suggestions == count,
        "expected {count} applied suggestions, found {}",
        world.applied_suggestions
    );
    Ok(())
}

#[then(r#"step "{step}" has checkpoint mode "{mode}""#)]
fn step_has_mode(world: &PipelineWorld, step: String, mode: String) -> Result<(), eyre::Report> {
    let expected = CheckpointMode::try_from(mode.as_str())?;
    let config = run_async(world.pipeline.config.load());
    let actual = config.checkpoint_policy(&StepId::new(step)?).mode;
    eyre::ensure!(actual == expected, "expected {expected}, found {actual}");
    Ok(())
}

#[then(r#"no rule is active for "{target}""#)]
fn no_active_rule(world: &PipelineWorld, target: String) -> Result<(), eyre::Report> {
    let behavior = BehaviorTarget::new(target)?;
    eyre::ensure!(
        world.pipeline.promoter.active_rules(&behavior).is_empty(),
        "unexpected active rules for {behavior}"
    );
    Ok(())
}

#[then(r#"the context block for "{target}" mentions "{text}""#)]
fn context_block_mentions(
    world: &PipelineWorld,
    target: String,
    text: String,
) -> Result<(), eyre::Report> {
    let behavior = BehaviorTarget::new(target)?;
    let block = world.pipeline.promoter.build_context_block(&behavior);
    eyre::ensure!(block.contains(&text), "context block lacks {text:?}: {block}");
    Ok(())
}
