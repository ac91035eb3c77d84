//! Runs the enabled alert checks against live state.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use mockable::Clock;
use tracing::{debug, warn};

use crate::alerts::{
    domain::{
        Alert, AlertConfig, check_quality_drift, check_rework_rate, check_schedule_pace,
        check_stale_backlog, check_stuck_tasks, check_worker_failures,
    },
    ports::ActivitySource,
};
use crate::task::{
    domain::{Period, Task},
    ports::{PeriodRepository, TaskRepository},
};
use crate::tracking::{
    domain::TransitionEvent,
    ports::{EventFilter, EventLog},
};

/// Evaluates every enabled check and concatenates the alerts.
///
/// A read failure silences only the checks that needed the unreadable data.
#[derive(Clone)]
pub struct AlertEngine<T, P, L, A, C>
where
    T: TaskRepository,
    P: PeriodRepository,
    L: EventLog,
    A: ActivitySource,
    C: Clock + Send + Sync,
{
    tasks: Arc<T>,
    periods: Arc<P>,
    events: Arc<L>,
    activity: Arc<A>,
    clock: Arc<C>,
    config: AlertConfig,
}

impl<T, P, L, A, C> AlertEngine<T, P, L, A, C>
where
    T: TaskRepository,
    P: PeriodRepository,
    L: EventLog,
    A: ActivitySource,
    C: Clock + Send + Sync,
{
    /// Creates an engine with default thresholds.
    #[must_use]
    pub fn new(
        tasks: Arc<T>,
        periods: Arc<P>,
        events: Arc<L>,
        activity: Arc<A>,
        clock: Arc<C>,
    ) -> Self {
        Self {
            tasks,
            periods,
            events,
            activity,
            clock,
            config: AlertConfig::default(),
        }
    }

    /// Replaces the thresholds.
    #[must_use]
    pub fn with_config(mut self, config: AlertConfig) -> Self {
        self.config = config;
        self
    }

    /// Returns the thresholds in use.
    #[must_use]
    pub const fn config(&self) -> &AlertConfig {
        &self.config
    }

    /// Runs every enabled check in a fixed order: stuck tasks, rework rate,
    /// schedule pace, quality drift, worker failures, stale backlog.
    pub async fn run_checks(&self) -> Vec<Alert> {
        let now = self.clock.utc();
        let mut alerts = self.stuck_alerts(now).await;
        alerts.extend(self.rework_alerts().await);
        alerts.extend(self.pace_alerts(now).await);
        alerts.extend(self.quality_alerts().await);
        alerts.extend(self.worker_alerts().await);
        alerts.extend(self.stale_alerts(now).await);
        debug!(alerts = alerts.len(), "alert checks complete");
        alerts
    }

    async fn stuck_alerts(&self, now: DateTime<Utc>) -> Vec<Alert> {
        let check = &self.config.stuck_task;
        if !check.enabled {
            return Vec::new();
        }
        self.all_tasks()
            .await
            .map(|tasks| check_stuck_tasks(&tasks, check, now))
            .unwrap_or_default()
    }

    async fn rework_alerts(&self) -> Vec<Alert> {
        let check = &self.config.rework_rate;
        if !check.enabled {
            return Vec::new();
        }
        let Some(periods) = self.running_periods().await else {
            return Vec::new();
        };
        check_rework_rate(&self.events_of(&periods).await, check)
    }

    async fn pace_alerts(&self, now: DateTime<Utc>) -> Vec<Alert> {
        let check = &self.config.schedule_pace;
        if !check.enabled {
            return Vec::new();
        }
        match (self.running_periods().await, self.all_tasks().await) {
            (Some(periods), Some(tasks)) => check_schedule_pace(&periods, &tasks, check, now),
            _ => Vec::new(),
        }
    }

    async fn worker_alerts(&self) -> Vec<Alert> {
        let check = &self.config.worker_failures;
        if !check.enabled {
            return Vec::new();
        }
        match self.activity.worker_runs().await {
            Ok(runs) => check_worker_failures(&runs, check),
            Err(err) => {
                warn!(error = %err, "worker runs unavailable, skipping failure check");
                Vec::new()
            }
        }
    }

    async fn stale_alerts(&self, now: DateTime<Utc>) -> Vec<Alert> {
        let check = &self.config.stale_backlog;
        if !check.enabled {
            return Vec::new();
        }
        match (self.all_tasks().await, self.running_periods().await) {
            (Some(tasks), Some(periods)) => check_stale_backlog(&tasks, &periods, check, now),
            _ => Vec::new(),
        }
    }

    async fn quality_alerts(&self) -> Vec<Alert> {
        let check = &self.config.quality_drift;
        if !check.enabled {
            return Vec::new();
        }
        let Some(limit) = check.window.checked_mul(2) else {
            return Vec::new();
        };
        match self.activity.recent_review_scores(limit).await {
            Ok(scores) => check_quality_drift(&scores, check),
            Err(err) => {
                warn!(error = %err, "review scores unavailable, skipping quality check");
                Vec::new()
            }
        }
    }

    async fn all_tasks(&self) -> Option<Vec<Task>> {
        self.tasks
            .list_all()
            .await
            .inspect_err(|err| warn!(error = %err, "tasks unavailable, skipping task checks"))
            .ok()
    }

    async fn running_periods(&self) -> Option<Vec<Period>> {
        self.periods
            .list_active()
            .await
            .inspect_err(|err| warn!(error = %err, "periods unavailable, skipping period checks"))
            .ok()
    }

    async fn events_of(&self, periods: &[Period]) -> Vec<TransitionEvent> {
        let mut events = Vec::new();
        for period in periods {
            match self
                .events
                .query(&EventFilter::for_period(period.id().clone()))
                .await
            {
                Ok(found) => events.extend(found),
                Err(err) => {
                    warn!(period = %period.id(), error = %err, "period events unavailable");
                }
            }
        }
        events
    }
}
