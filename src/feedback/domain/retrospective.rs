//! Period retrospectives.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

use crate::task::domain::PeriodId;

/// Retrospective record of one period.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Retrospective {
    period_id: PeriodId,
    went_well: Vec<String>,
    didnt_work: Vec<String>,
    patterns_detected: Vec<String>,
    actions_accepted: Vec<String>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
}

/// Partial update of a retrospective. Set fields replace the stored list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RetrospectivePatch {
    /// Replacement for what went well.
    pub went_well: Option<Vec<String>>,
    /// Replacement for what did not work.
    pub didnt_work: Option<Vec<String>>,
    /// Replacement for detected patterns.
    pub patterns_detected: Option<Vec<String>>,
    /// Replacement for accepted actions.
    pub actions_accepted: Option<Vec<String>>,
}

impl RetrospectivePatch {
    /// Sets the detected patterns.
    #[must_use]
    pub fn with_patterns_detected(mut self, patterns: Vec<String>) -> Self {
        self.patterns_detected = Some(patterns);
        self
    }

    /// Sets the accepted actions.
    #[must_use]
    pub fn with_actions_accepted(mut self, actions: Vec<String>) -> Self {
        self.actions_accepted = Some(actions);
        self
    }

    /// Sets what did not work.
    #[must_use]
    pub fn with_didnt_work(mut self, items: Vec<String>) -> Self {
        self.didnt_work = Some(items);
        self
    }

    /// Returns `true` when the patch changes nothing.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.went_well.is_none()
            && self.didnt_work.is_none()
            && self.patterns_detected.is_none()
            && self.actions_accepted.is_none()
    }
}

impl Retrospective {
    /// Creates an empty retrospective for `period_id`.
    #[must_use]
    pub fn new(period_id: PeriodId, clock: &impl Clock) -> Self {
        let timestamp = clock.utc();
        Self {
            period_id,
            went_well: Vec::new(),
            didnt_work: Vec::new(),
            patterns_detected: Vec::new(),
            actions_accepted: Vec::new(),
            created_at: timestamp,
            updated_at: timestamp,
        }
    }

    /// Sets what went well.
    #[must_use]
    pub fn with_went_well(mut self, items: Vec<String>) -> Self {
        self.went_well = items;
        self
    }

    /// Sets what did not work.
    #[must_use]
    pub fn with_didnt_work(mut self, items: Vec<String>) -> Self {
        self.didnt_work = items;
        self
    }

    /// Sets the detected patterns.
    #[must_use]
    pub fn with_patterns_detected(mut self, items: Vec<String>) -> Self {
        self.patterns_detected = items;
        self
    }

    /// Sets the accepted actions.
    #[must_use]
    pub fn with_actions_accepted(mut self, items: Vec<String>) -> Self {
        self.actions_accepted = items;
        self
    }

    /// Returns the period key.
    #[must_use]
    pub const fn period_id(&self) -> &PeriodId {
        &self.period_id
    }

    /// Returns what went well.
    #[must_use]
    pub fn went_well(&self) -> &[String] {
        &self.went_well
    }

    /// Returns what did not work.
    #[must_use]
    pub fn didnt_work(&self) -> &[String] {
        &self.didnt_work
    }

    /// Returns the detected patterns.
    #[must_use]
    pub fn patterns_detected(&self) -> &[String] {
        &self.patterns_detected
    }

    /// Returns the accepted actions.
    #[must_use]
    pub fn actions_accepted(&self) -> &[String] {
        &self.actions_accepted
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns the latest update timestamp.
    #[must_use]
    pub const fn updated_at(&self) -> DateTime<Utc> {
        self.updated_at
    }

    /// Returns the free-text items scanned for feedback, in scan order.
    pub fn feedback_items(&self) -> impl Iterator<Item = &str> {
        self.didnt_work
            .iter()
            .chain(&self.patterns_detected)
            .chain(&self.actions_accepted)
            .map(String::as_str)
    }

    /// Applies `patch` at `updated_at`, replacing every field it sets.
    pub fn apply(&mut self, patch: RetrospectivePatch, updated_at: DateTime<Utc>) {
        if let Some(items) = patch.went_well {
            self.went_well = items;
        }
        if let Some(items) = patch.didnt_work {
            self.didnt_work = items;
        }
        if let Some(items) = patch.patterns_detected {
            self.patterns_detected = items;
        }
        if let Some(items) = patch.actions_accepted {
            self.actions_accepted = items;
        }
        self.updated_at = updated_at;
    }
}
