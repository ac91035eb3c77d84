//! History-wide pattern detection service.

use std::sync::Arc;

use tracing::{info, warn};

use crate::feedback::ports::RetrospectiveStore;
use crate::metrics::ports::PeriodMetricsStore;
use crate::patterns::domain::{
    DetectedPattern, DetectorThresholds, WorkflowSuggestion, detect_all, filter_accepted,
    suggest,
};
use crate::process::{ports::ProcessConfigSource, services::ProcessConfigStore};
use crate::tracking::ports::{EventFilter, EventLog};

/// Findings and the suggestions derived from them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PatternReport {
    /// Detected patterns.
    pub patterns: Vec<DetectedPattern>,
    /// Suggestions not yet accepted in an earlier retrospective.
    pub suggestions: Vec<WorkflowSuggestion>,
}

/// Mines the full event and metrics history.
pub struct PatternDetector<L, M, R, S>
where
    L: EventLog,
    M: PeriodMetricsStore,
    R: RetrospectiveStore,
    S: ProcessConfigSource,
{
    events: Arc<L>,
    metrics: Arc<M>,
    retrospectives: Arc<R>,
    config: Arc<ProcessConfigStore<S>>,
    thresholds: DetectorThresholds,
}

impl<L, M, R, S> PatternDetector<L, M, R, S>
where
    L: EventLog,
    M: PeriodMetricsStore,
    R: RetrospectiveStore,
    S: ProcessConfigSource,
{
    /// Creates a detector with default thresholds.
    #[must_use]
    pub fn new(
        events: Arc<L>,
        metrics: Arc<M>,
        retrospectives: Arc<R>,
        config: Arc<ProcessConfigStore<S>>,
    ) -> Self {
        Self {
            events,
            metrics,
            retrospectives,
            config,
            thresholds: DetectorThresholds::default(),
        }
    }

    /// Replaces the thresholds.
    #[must_use]
    pub fn with_thresholds(mut self, thresholds: DetectorThresholds) -> Self {
        self.thresholds = thresholds;
        self
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn thresholds(&self) -> &DetectorThresholds {
        &self.thresholds
    }

    /// Runs every detector and derives suggestions.
    ///
    /// Unreadable inputs are treated as empty. Suggestions already accepted
    /// in any retrospective are dropped.
    pub async fn analyze(&self) -> PatternReport {
        let events = self
            .events
            .query(&EventFilter::all())
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "event history unavailable, skipping event detectors");
                Vec::new()
            });
        let metrics = self.metrics.list_all().await.unwrap_or_else(|err| {
            warn!(error = %err, "metrics history unavailable, skipping trend detection");
            Vec::new()
        });
        let accepted: Vec<String> = self
            .retrospectives
            .list_all()
            .await
            .unwrap_or_else(|err| {
                warn!(error = %err, "retrospectives unavailable, not filtering suggestions");
                Vec::new()
            })
            .iter()
            .flat_map(|retrospective| retrospective.actions_accepted().iter().cloned())
            .collect();
        let config = self.config.load().await;

        let patterns = detect_all(&events, &metrics, &self.thresholds);
        let suggestions = filter_accepted(suggest(&patterns, &config), &accepted);
        info!(
            events = events.len(),
            periods = metrics.len(),
            patterns = patterns.len(),
            suggestions = suggestions.len(),
            "pattern analysis complete"
        );
        PatternReport {
            patterns,
            suggestions,
        }
    }
}
