//! In-memory feedback rule store.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::feedback::{
    domain::FeedbackRule,
    ports::{FeedbackRuleStore, FeedbackRuleStoreError, FeedbackRuleStoreResult},
};

/// Thread-safe in-memory rule store preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryFeedbackRuleStore {
    rules: Arc<RwLock<Vec<FeedbackRule>>>,
}

impl InMemoryFeedbackRuleStore {
    /// Creates an empty store.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl FeedbackRuleStore for InMemoryFeedbackRuleStore {
    async fn list_all(&self) -> FeedbackRuleStoreResult<Vec<FeedbackRule>> {
        let rules = self.rules.read().map_err(|err| {
            FeedbackRuleStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(rules.clone())
    }

    async fn list_active(&self) -> FeedbackRuleStoreResult<Vec<FeedbackRule>> {
        let rules = self.rules.read().map_err(|err| {
            FeedbackRuleStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        Ok(rules.iter().filter(|rule| rule.is_active()).cloned().collect())
    }

    async fn insert(&self, rule: &FeedbackRule) -> FeedbackRuleStoreResult<()> {
        let mut rules = self.rules.write().map_err(|err| {
            FeedbackRuleStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if rules.iter().any(|existing| existing.id() == rule.id()) {
            return Err(FeedbackRuleStoreError::DuplicateRule(rule.id()));
        }
        rules.push(rule.clone());
        Ok(())
    }

    async fn update(&self, rule: &FeedbackRule) -> FeedbackRuleStoreResult<()> {
        let mut rules = self.rules.write().map_err(|err| {
            FeedbackRuleStoreError::persistence(std::io::Error::other(err.to_string()))
        })?;
        let stored = rules
            .iter_mut()
            .find(|existing| existing.id() == rule.id())
            .ok_or(FeedbackRuleStoreError::NotFound(rule.id()))?;
        *stored = rule.clone();
        Ok(())
    }
}
