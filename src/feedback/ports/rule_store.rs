//! Feedback rule store port.

use crate::feedback::domain::{FeedbackRule, FeedbackRuleId};
use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for feedback rule store operations.
pub type FeedbackRuleStoreResult<T> = Result<T, FeedbackRuleStoreError>;

/// Store of feedback rules. Rules are inserted and updated, never deleted.
#[async_trait]
pub trait FeedbackRuleStore: Send + Sync {
    /// Returns every rule in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRuleStoreError::Persistence`] on storage failure.
    async fn list_all(&self) -> FeedbackRuleStoreResult<Vec<FeedbackRule>>;

    /// Returns the active rules in insertion order.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRuleStoreError::Persistence`] on storage failure.
    async fn list_active(&self) -> FeedbackRuleStoreResult<Vec<FeedbackRule>>;

    /// Inserts a new rule.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRuleStoreError::DuplicateRule`] when the identifier
    /// exists, or [`FeedbackRuleStoreError::Persistence`] on storage failure.
    async fn insert(&self, rule: &FeedbackRule) -> FeedbackRuleStoreResult<()>;

    /// Replaces a stored rule.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackRuleStoreError::NotFound`] when the rule is absent,
    /// or [`FeedbackRuleStoreError::Persistence`] on storage failure.
    async fn update(&self, rule: &FeedbackRule) -> FeedbackRuleStoreResult<()>;
}

/// Errors returned by feedback rule store implementations.
#[derive(Debug, Clone, Error)]
pub enum FeedbackRuleStoreError {
    /// A rule with the same identifier already exists.
    #[error("duplicate feedback rule: {0}")]
    DuplicateRule(FeedbackRuleId),

    /// The rule was not found.
    #[error("feedback rule not found: {0}")]
    NotFound(FeedbackRuleId),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl FeedbackRuleStoreError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
