//! Period metrics collection service.

use std::sync::Arc;

use mockable::Clock;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::metrics::{
    domain::{MetricsInput, PeriodMetrics},
    ports::PeriodMetricsStore,
};
use crate::process::domain::StepId;
use crate::task::{
    domain::{Period, PeriodId},
    ports::{PeriodRepository, TaskRepository},
};
use crate::tracking::ports::{EventFilter, EventLog};

/// Tunables for metrics collection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AggregatorSettings {
    /// Step whose first entry decides first-pass quality.
    pub review_step: StepId,
}

impl Default for AggregatorSettings {
    fn default() -> Self {
        Self {
            review_step: StepId::builtin("review"),
        }
    }
}

/// Recomputes period summaries from the task registry and event log.
#[derive(Clone)]
pub struct MetricsAggregator<T, P, L, M, C>
where
    T: TaskRepository,
    P: PeriodRepository,
    L: EventLog,
    M: PeriodMetricsStore,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    periods: Arc<P>,
    events: Arc<L>,
    store: Arc<M>,
    clock: Arc<C>,
    settings: AggregatorSettings,
}

impl<T, P, L, M, C> MetricsAggregator<T, P, L, M, C>
where
    T: TaskRepository,
    P: PeriodRepository,
    L: EventLog,
    M: PeriodMetricsStore,
    C: Clock + Send + Sync,
{
    /// Creates an aggregator with default settings.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        periods: Arc<P>,
        events: Arc<L>,
        store: Arc<M>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            periods,
            events,
            store,
            clock,
            settings: AggregatorSettings::default(),
        }
    }

    /// Replaces the settings.
    #[must_use]
    pub fn with_settings(mut self, settings: AggregatorSettings) -> Self {
        self.settings = settings;
        self
    }

    /// Recomputes and upserts the metrics of `period_id`.
    ///
    /// Returns `false` without writing when any input cannot be read, and
    /// `false` when the upsert fails.
    pub async fn collect_period_metrics(&self, period_id: &PeriodId) -> bool {
        let tasks = match self.tasks.list_by_period(period_id).await {
            Ok(tasks) => tasks,
            Err(err) => {
                warn!(period = %period_id, error = %err, "failed to read period tasks");
                return false;
            }
        };
        let events = match self
            .events
            .query(&EventFilter::for_period(period_id.clone()))
            .await
        {
            Ok(events) => events,
            Err(err) => {
                warn!(period = %period_id, error = %err, "failed to read period events");
                return false;
            }
        };
        let period = match self.periods.find_by_id(period_id).await {
            Ok(period) => period,
            Err(err) => {
                warn!(period = %period_id, error = %err, "failed to read period");
                return false;
            }
        };

        let metrics = PeriodMetrics::compute(
            MetricsInput {
                period_id,
                tasks: &tasks,
                events: &events,
                review_step: &self.settings.review_step,
                started_at: period.as_ref().map(Period::started_at),
                closed_at: period.as_ref().and_then(Period::closed_at),
            },
            &*self.clock,
        );
        if let Err(err) = self.store.upsert(&metrics).await {
            warn!(period = %period_id, error = %err, "failed to store period metrics");
            return false;
        }
        info!(
            period = %period_id,
            planned = metrics.tasks_planned(),
            completed = metrics.tasks_completed(),
            rework = metrics.rework_event_count(),
            "collected period metrics"
        );
        true
    }

    /// Returns the stored metrics of `period_id`, or `None` when absent or
    /// unreadable.
    pub async fn period_metrics(&self, period_id: &PeriodId) -> Option<PeriodMetrics> {
        match self.store.get(period_id).await {
            Ok(metrics) => metrics,
            Err(err) => {
                warn!(period = %period_id, error = %err, "failed to read period metrics");
                None
            }
        }
    }

    /// Returns all stored metrics, most recent period first; empty when
    /// unreadable.
    pub async fn all_period_metrics(&self) -> Vec<PeriodMetrics> {
        self.store.list_all().await.unwrap_or_else(|err| {
            warn!(error = %err, "failed to list period metrics");
            Vec::new()
        })
    }
}
