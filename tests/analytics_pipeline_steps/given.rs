//! Given steps for analytics pipeline BDD scenarios.

use cadence::{feedback::domain::Retrospective, task::domain::PeriodId};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest_bdd_macros::given;

use super::world::{PipelineWorld, run_async};

#[given(r#"an open period "{raw}""#)]
fn open_period(world: &mut PipelineWorld, raw: String) -> Result<(), eyre::Report> {
    let period = run_async(world.pipeline.open_period(&raw)).wrap_err("open scenario period")?;
    world.period = Some(period);
    Ok(())
}

#[given(r#"a retrospective for "{raw}" noting "{item}""#)]
fn retrospective_noting(
    world: &mut PipelineWorld,
    raw: String,
    item: String,
) -> Result<(), eyre::Report> {
    let period = PeriodId::new(raw)?;
    world.retrospective =
        Some(Retrospective::new(period, &DefaultClock).with_didnt_work(vec![item]));
    Ok(())
}
