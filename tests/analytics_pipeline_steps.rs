//! Behaviour tests for the workflow analytics pipeline.

#[path = "analytics_pipeline_steps/mod.rs"]
mod analytics_pipeline_steps_defs;

use analytics_pipeline_steps_defs::world::{PipelineWorld, world};
use rstest_bdd_macros::scenario;

#[scenario(
    path = "tests/features/analytics_pipeline.feature",
    name = "Delivered tasks are summarised per period"
)]
#[tokio::test(flavor = "multi_thread")]
async fn delivered_tasks_are_summarised(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/analytics_pipeline.feature",
    name = "Rework is flagged by alerting and mining independently"
)]
#[tokio::test(flavor = "multi_thread")]
async fn rework_is_flagged_independently(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/analytics_pipeline.feature",
    name = "A suggestion is applied to the process only once"
)]
#[tokio::test(flavor = "multi_thread")]
async fn suggestion_applied_once(world: PipelineWorld) {
    let _ = world;
}

#[scenario(
    path = "tests/features/analytics_pipeline.feature",
    name = "Feedback recurring across periods becomes a standing rule"
)]
#[tokio::test(flavor = "multi_thread")]
async fn recurring_feedback_is_promoted(world: PipelineWorld) {
    let _ = world;
}
