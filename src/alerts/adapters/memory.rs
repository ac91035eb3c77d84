//! In-memory activity source.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::alerts::{
    domain::WorkerRun,
    ports::{ActivitySource, ActivitySourceError, ActivitySourceResult},
};

#[derive(Debug, Default)]
struct ActivityState {
    review_scores: Vec<f64>,
    worker_runs: Vec<WorkerRun>,
}

/// Thread-safe in-memory activity source. Scores are recorded oldest first.
#[derive(Debug, Clone, Default)]
pub struct InMemoryActivitySource {
    state: Arc<RwLock<ActivityState>>,
}

impl InMemoryActivitySource {
    /// Creates an empty source.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Records a review score as the newest one.
    ///
    /// # Errors
    ///
    /// Returns [`ActivitySourceError::Persistence`] when the lock is poisoned.
    pub fn record_review_score(&self, score: f64) -> ActivitySourceResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ActivitySourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.review_scores.push(score);
        Ok(())
    }

    /// Records a worker run.
    ///
    /// # Errors
    ///
    /// Returns [`ActivitySourceError::Persistence`] when the lock is poisoned.
    pub fn record_run(&self, run: WorkerRun) -> ActivitySourceResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ActivitySourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.worker_runs.push(run);
        Ok(())
    }
}

#[async_trait]
impl ActivitySource for InMemoryActivitySource {
    async fn recent_review_scores(&self, limit: usize) -> ActivitySourceResult<Vec<f64>> {
        let state = self.state.read().map_err(|err| {
            ActivitySourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state
            .review_scores
            .iter()
            .rev()
            .take(limit)
            .copied()
            .collect())
    }

    async fn worker_runs(&self) -> ActivitySourceResult<Vec<WorkerRun>> {
        let state = self.state.read().map_err(|err| {
            ActivitySourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(state.worker_runs.clone())
    }
}
