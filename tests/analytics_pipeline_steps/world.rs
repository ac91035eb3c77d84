//! Shared world state for analytics pipeline BDD scenarios.

use cadence::{
    alerts::domain::Alert,
    feedback::{domain::Retrospective, services::PromotionOutcome},
    patterns::services::PatternReport,
    process::adapters::memory::InMemoryProcessSource,
    task::domain::PeriodId,
};
use rstest::fixture;

use super::helpers::{Pipeline, pipeline};

/// Scenario world for analytics pipeline behaviour tests.
pub struct PipelineWorld {
    pub pipeline: Pipeline<InMemoryProcessSource>,
    pub period: Option<PeriodId>,
    pub alerts: Vec<Alert>,
    pub report: Option<PatternReport>,
    pub applied_suggestions: usize,
    pub retrospective: Option<Retrospective>,
    pub promotions: Vec<Option<PromotionOutcome>>,
}

impl PipelineWorld {
    /// Creates a world over the default process held in memory.
    #[must_use]
    pub fn new() -> Self {
        Self {
            pipeline: pipeline(),
            period: None,
            alerts: Vec::new(),
            report: None,
            applied_suggestions: 0,
            retrospective: None,
            promotions: Vec::new(),
        }
    }

    /// Returns the period opened by the scenario.
    ///
    /// # Errors
    ///
    /// Returns an error when no period has been opened yet.
    pub fn period(&self) -> Result<PeriodId, eyre::Report> {
        self.period
            .clone()
            .ok_or_else(|| eyre::eyre!("missing open period in scenario world"))
    }
}

impl Default for PipelineWorld {
    fn default() -> Self {
        Self::new()
    }
}

/// Fixture that creates a new scenario world.
#[fixture]
pub fn world() -> PipelineWorld {
    PipelineWorld::default()
}

/// Runs an async operation within sync step definitions.
pub fn run_async<T>(future: impl std::future::Future<Output = T>) -> T {
    tokio::task::block_in_place(|| tokio::runtime::Handle::current().block_on(future))
}
