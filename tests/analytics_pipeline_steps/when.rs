//! When steps for analytics pipeline BDD scenarios.

use rstest_bdd_macros::when;

use super::helpers::{HAPPY_PATH, REWORKED_PATH, SHAKY_PATH};
use super::world::{PipelineWorld, run_async};

#[when("{count:usize} tasks are delivered along the standard path")]
fn deliver_clean_tasks(world: &mut PipelineWorld, count: usize) -> Result<(), eyre::Report> {
    let period = world.period()?;
    for _ in 0..count {
        run_async(world.pipeline.deliver(&period, &HAPPY_PATH))?;
    }
    Ok(())
}

#[when("a task is delivered with rework on every move")]
fn deliver_reworked_task(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let period = world.period()?;
    run_async(world.pipeline.deliver(&period, &REWORKED_PATH))?;
    Ok(())
}

#[when("a task is delivered with rework on its first move")]
fn deliver_shaky_task(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let period = world.period()?;
    run_async(world.pipeline.deliver(&period, &SHAKY_PATH))?;
    Ok(())
}

#[when("metrics are collected for the period")]
fn collect_metrics(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let period = world.period()?;
    eyre::ensure!(
        run_async(world.pipeline.aggregator.collect_period_metrics(&period)),
        "metrics collection for {period} failed"
    );
    Ok(())
}

#[when("the alert checks run")]
fn run_alert_checks(world: &mut PipelineWorld) {
    world.alerts = run_async(world.pipeline.alerts.run_checks());
}

#[when("the history is analysed")]
fn analyse_history(world: &mut PipelineWorld) {
    world.report = Some(run_async(world.pipeline.detector.analyze()));
}

#[when(r#"the suggestion "{change}" is applied to step "{step}""#)]
fn apply_suggestion(world: &mut PipelineWorld, change: String, step: String) {
    let outcome = run_async(world.pipeline.config.apply_suggestion(&step, &change));
    if outcome.applied {
        world.applied_suggestions += 1;
    }
}

#[when("the retrospective is processed")]
fn process_retrospective(world: &mut PipelineWorld) -> Result<(), eyre::Report> {
    let retrospective = world
        .retrospective
        .take()
        .ok_or_else(|| eyre::eyre!("missing retrospective in scenario world"))?;
    let outcome = run_async(world.pipeline.promoter.process_retrospective(&retrospective));
    world.promotions.push(outcome);
    Ok(())
}
