//! Orchestration of one improvement pass.

use std::sync::Arc;

use mockable::Clock;
use tracing::{info, warn};

use crate::feedback::{
    domain::{Retrospective, RetrospectivePatch},
    ports::{FeedbackRuleStore, RetrospectiveStore},
    services::{FeedbackPromoter, PromotionOutcome},
};
use crate::metrics::{ports::PeriodMetricsStore, services::MetricsAggregator};
use crate::patterns::{
    domain::{DetectedPattern, WorkflowSuggestion},
    services::PatternDetector,
};
use crate::process::{ports::ProcessConfigSource, services::ProcessConfigStore};
use crate::task::{
    domain::PeriodId,
    ports::{PeriodRepository, TaskRepository},
};
use crate::tracking::ports::EventLog;

/// Everything one pass produced.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CycleReport {
    /// Whether the period summary was recomputed and stored.
    pub metrics_collected: bool,
    /// Patterns found across the full history.
    pub patterns: Vec<DetectedPattern>,
    /// Suggestions not accepted in an earlier retrospective.
    pub suggestions: Vec<WorkflowSuggestion>,
    /// `<old> -> <new>` descriptions of the config edits applied.
    pub applied_changes: Vec<String>,
    /// Promotion result, `None` when the retrospective could not be stored
    /// or the rule store could not be read.
    pub promotion: Option<PromotionOutcome>,
}

/// Runs the improvement pipeline for a closing period.
pub struct ImprovementCycle<T, P, L, M, R, S, F, C>
where
    T: TaskRepository,
    P: PeriodRepository,
    L: EventLog,
    M: PeriodMetricsStore,
    R: RetrospectiveStore,
    S: ProcessConfigSource,
    F: FeedbackRuleStore,
    C: Clock + Send + Sync,
{
    aggregator: Arc<MetricsAggregator<T, P, L, M, C>>,
    detector: Arc<PatternDetector<L, M, R, S>>,
    config: Arc<ProcessConfigStore<S>>,
    retrospectives: Arc<R>,
    promoter: Arc<FeedbackPromoter<F, C>>,
    clock: Arc<C>,
}

impl<T, P, L, M, R, S, F, C> ImprovementCycle<T, P, L, M, R, S, F, C>
where
    T: TaskRepository,
    P: PeriodRepository,
    L: EventLog,
    M: PeriodMetricsStore,
    R: RetrospectiveStore,
    S: ProcessConfigSource,
    F: FeedbackRuleStore,
    C: Clock + Send + Sync,
{
    /// Creates a cycle over already configured services.
    #[must_use]
    pub const fn new(
        aggregator: Arc<MetricsAggregator<T, P, L, M, C>>,
        detector: Arc<PatternDetector<L, M, R, S>>,
        config: Arc<ProcessConfigStore<S>>,
        retrospectives: Arc<R>,
        promoter: Arc<FeedbackPromoter<F, C>>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            aggregator,
            detector,
            config,
            retrospectives,
            promoter,
            clock,
        }
    }

    /// Runs one pass for `period_id`.
    ///
    /// Every stage runs even when an earlier one failed; failures show up as
    /// `false`, empty collections or `None` in the report.
    pub async fn run(&self, period_id: &PeriodId) -> CycleReport {
        let metrics_collected = self.aggregator.collect_period_metrics(period_id).await;
        let analysis = self.detector.analyze().await;

        let mut applied_changes = Vec::new();
        let mut accepted = Vec::new();
        for suggestion in &analysis.suggestions {
            let (Some(step), Some(change)) = (&suggestion.target_step, &suggestion.change) else {
                continue;
            };
            let outcome = self
                .config
                .apply_suggestion(step.as_str(), &change.to_string())
                .await;
            if let Some(description) = outcome.description.filter(|_| outcome.applied) {
                accepted.push(format!("{} ({description})", suggestion.action));
                applied_changes.push(description);
            }
        }

        let summaries = analysis
            .patterns
            .iter()
            .map(DetectedPattern::summary)
            .collect();
        let stored = self.record(period_id, summaries, accepted).await;
        let promotion = self.promote(stored).await;

        info!(
            period = %period_id,
            metrics_collected,
            patterns = analysis.patterns.len(),
            suggestions = analysis.suggestions.len(),
            applied = applied_changes.len(),
            "improvement cycle complete"
        );
        CycleReport {
            metrics_collected,
            patterns: analysis.patterns,
            suggestions: analysis.suggestions,
            applied_changes,
            promotion,
        }
    }

    /// Creates or patches the period's retrospective and returns the stored
    /// version. Human-written fields of an existing record are kept.
    async fn record(
        &self,
        period_id: &PeriodId,
        summaries: Vec<String>,
        accepted: Vec<String>,
    ) -> Option<Retrospective> {
        let existing = match self.retrospectives.get(period_id).await {
            Ok(existing) => existing,
            Err(err) => {
                warn!(period = %period_id, error = %err, "failed to read retrospective");
                return None;
            }
        };

        let stored = match existing {
            None => {
                let created = Retrospective::new(period_id.clone(), &*self.clock)
                    .with_patterns_detected(summaries)
                    .with_actions_accepted(accepted);
                self.retrospectives
                    .upsert(&created)
                    .await
                    .map(|()| created)
            }
            Some(current) => {
                let mut actions = current.actions_accepted().to_vec();
                actions.extend(
                    accepted
                        .into_iter()
                        .filter(|action| !current.actions_accepted().contains(action)),
                );
                let patch = RetrospectivePatch::default()
                    .with_patterns_detected(summaries)
                    .with_actions_accepted(actions);
                self.retrospectives
                    .update(period_id, patch, self.clock.utc())
                    .await
            }
        };
        stored
            .inspect_err(|err| {
                warn!(period = %period_id, error = %err, "failed to store retrospective");
            })
            .ok()
    }

    async fn promote(&self, stored: Option<Retrospective>) -> Option<PromotionOutcome> {
        let retrospective = stored?;
        self.promoter.process_retrospective(&retrospective).await
    }
}
