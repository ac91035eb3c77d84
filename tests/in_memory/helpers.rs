//! Shared pipeline wiring for in-memory integration tests.

use std::sync::Arc;

use cadence::{
    alerts::{adapters::memory::InMemoryActivitySource, services::AlertEngine},
    feedback::{
        adapters::memory::{InMemoryFeedbackRuleStore, InMemoryRetrospectiveStore},
        services::FeedbackPromoter,
    },
    improvement::ImprovementCycle,
    metrics::{adapters::memory::InMemoryPeriodMetricsStore, services::MetricsAggregator},
    patterns::services::PatternDetector,
    process::{
        adapters::memory::InMemoryProcessSource,
        domain::{ProcessConfig, StepId},
        ports::ProcessConfigSource,
        services::ProcessConfigStore,
    },
    task::{
        adapters::memory::{InMemoryPeriodRepository, InMemoryTaskRepository},
        domain::{PeriodId, TaskId},
        services::{
            CreateTaskRequest, PeriodLifecycleService, TaskLifecycleService, TransitionTaskRequest,
        },
    },
    tracking::{
        adapters::memory::InMemoryEventLog,
        services::{TrackerKey, TransitionOptions, TransitionTracker},
    },
};
use eyre::WrapErr;
use mockable::DefaultClock;
use rstest::fixture;

/// Aggregator type wired over in-memory adapters.
pub type Aggregator = MetricsAggregator<
    InMemoryTaskRepository,
    InMemoryPeriodRepository,
    InMemoryEventLog,
    InMemoryPeriodMetricsStore,
    DefaultClock,
>;

/// Detector type wired over in-memory adapters.
pub type Detector<S> =
    PatternDetector<InMemoryEventLog, InMemoryPeriodMetricsStore, InMemoryRetrospectiveStore, S>;

/// Alert engine type wired over in-memory adapters.
pub type Alerts = AlertEngine<
    InMemoryTaskRepository,
    InMemoryPeriodRepository,
    InMemoryEventLog,
    InMemoryActivitySource,
    DefaultClock,
>;

/// Promoter type wired over the in-memory rule store.
pub type Promoter = FeedbackPromoter<InMemoryFeedbackRuleStore, DefaultClock>;

/// Improvement cycle type wired over in-memory adapters.
pub type Cycle<S> = ImprovementCycle<
    InMemoryTaskRepository,
    InMemoryPeriodRepository,
    InMemoryEventLog,
    InMemoryPeriodMetricsStore,
    InMemoryRetrospectiveStore,
    S,
    InMemoryFeedbackRuleStore,
    DefaultClock,
>;

/// Every component of the pipeline over shared in-memory storage.
pub struct Pipeline<S: ProcessConfigSource> {
    pub tasks: Arc<InMemoryTaskRepository>,
    pub periods: Arc<InMemoryPeriodRepository>,
    pub events: Arc<InMemoryEventLog>,
    pub metrics: Arc<InMemoryPeriodMetricsStore>,
    pub retrospectives: Arc<InMemoryRetrospectiveStore>,
    pub activity: Arc<InMemoryActivitySource>,
    pub config: Arc<ProcessConfigStore<S>>,
    pub task_service: TaskLifecycleService<InMemoryTaskRepository, DefaultClock>,
    pub period_service: PeriodLifecycleService<InMemoryPeriodRepository, DefaultClock>,
    pub aggregator: Arc<Aggregator>,
    pub detector: Arc<Detector<S>>,
    pub alerts: Alerts,
    pub promoter: Arc<Promoter>,
    pub cycle: Cycle<S>,
}

impl<S: ProcessConfigSource> Pipeline<S> {
    /// Wires every component over fresh stores and the given config source.
    pub fn over(source: S) -> Self {
        let clock = Arc::new(DefaultClock);
        let tasks = Arc::new(InMemoryTaskRepository::new());
        let periods = Arc::new(InMemoryPeriodRepository::new());
        let events = Arc::new(InMemoryEventLog::new());
        let metrics = Arc::new(InMemoryPeriodMetricsStore::new());
        let retrospectives = Arc::new(InMemoryRetrospectiveStore::new());
        let activity = Arc::new(InMemoryActivitySource::new());
        let config = Arc::new(ProcessConfigStore::new(Arc::new(source)));

        let aggregator = Arc::new(MetricsAggregator::new(
            Arc::clone(&tasks),
            Arc::clone(&periods),
            Arc::clone(&events),
            Arc::clone(&metrics),
            Arc::clone(&clock),
        ));
        let detector = Arc::new(PatternDetector::new(
            Arc::clone(&events),
            Arc::clone(&metrics),
            Arc::clone(&retrospectives),
            Arc::clone(&config),
        ));
        let alerts = AlertEngine::new(
            Arc::clone(&tasks),
            Arc::clone(&periods),
            Arc::clone(&events),
            Arc::clone(&activity),
            Arc::clone(&clock),
        );
        let promoter = Arc::new(FeedbackPromoter::new(
            Arc::new(InMemoryFeedbackRuleStore::new()),
            Arc::clone(&clock),
        ));
        let cycle = ImprovementCycle::new(
            Arc::clone(&aggregator),
            Arc::clone(&detector),
            Arc::clone(&config),
            Arc::clone(&retrospectives),
            Arc::clone(&promoter),
            Arc::clone(&clock),
        );

        Self {
            task_service: TaskLifecycleService::new(Arc::clone(&tasks), Arc::clone(&clock)),
            period_service: PeriodLifecycleService::new(Arc::clone(&periods), Arc::clone(&clock)),
            tasks,
            periods,
            events,
            metrics,
            retrospectives,
            activity,
            config,
            aggregator,
            detector,
            alerts,
            promoter,
            cycle,
        }
    }

    /// Opens a period.
    ///
    /// # Errors
    ///
    /// Returns an error if the identifier is invalid or already taken.
    pub async fn open_period(&self, raw: &str) -> eyre::Result<PeriodId> {
        let id = PeriodId::new(raw)?;
        self.period_service
            .open_period(id.clone(), raw)
            .await
            .wrap_err("open period")?;
        Ok(id)
    }

    /// Creates a task in `period`, tracks it along `path` and delivers it.
    ///
    /// Each entry of `path` names a destination step and whether the move
    /// was rework.
    ///
    /// # Errors
    ///
    /// Returns an error if the task cannot be created or moved.
    pub async fn deliver(&self, period: &PeriodId, path: &[(&str, bool)]) -> eyre::Result<TaskId> {
        let task = self
            .task_service
            .create_task(CreateTaskRequest::new("Deliver increment").in_period(period.clone()))
            .await
            .wrap_err("create task")?;
        self.task_service
            .transition_task(TransitionTaskRequest::new(task.id(), "active"))
            .await
            .wrap_err("start task")?;

        let mut tracker = TransitionTracker::start(
            TrackerKey::for_task(task.id()).with_period(period.clone()),
            None,
            Arc::clone(&self.events),
            Arc::clone(&self.config),
            Arc::new(DefaultClock),
        )
        .await;
        for (target, rework) in path {
            let options = if *rework {
                TransitionOptions::default().rework()
            } else {
                TransitionOptions::default()
            };
            eyre::ensure!(
                tracker.transition(StepId::new(*target)?, options).await,
                "transition to {target} was not logged"
            );
        }

        self.task_service
            .transition_task(TransitionTaskRequest::new(task.id(), "done"))
            .await
            .wrap_err("deliver task")?;
        Ok(task.id())
    }
}

/// Clean path through the default process.
pub const HAPPY_PATH: [(&str, bool); 4] = [
    ("decomposition", false),
    ("execution", false),
    ("review", false),
    ("closure", false),
];

/// Path where every move was rework.
pub const REWORKED_PATH: [(&str, bool); 4] = [
    ("decomposition", true),
    ("execution", true),
    ("review", true),
    ("closure", true),
];

/// Path with rework on the first move only.
pub const SHAKY_PATH: [(&str, bool); 4] = [
    ("decomposition", true),
    ("execution", false),
    ("review", false),
    ("closure", false),
];

/// Provides a pipeline over the default process held in memory.
#[fixture]
pub fn pipeline() -> Pipeline<InMemoryProcessSource> {
    let source = InMemoryProcessSource::with_config(&ProcessConfig::default_process())
        .expect("serialise default process");
    Pipeline::over(source)
}
