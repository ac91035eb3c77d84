//! Promotion of recurring retrospective feedback into active rules.

use std::sync::{Arc, PoisonError, RwLock};

use minijinja::{Environment, context};
use mockable::Clock;
use tracing::{debug, info, warn};

use crate::feedback::{
    domain::{
        BehaviorTarget, ExtractedFeedback, FeedbackMapping, FeedbackRule, FeedbackRuleId,
        Retrospective,
    },
    ports::FeedbackRuleStore,
};

const CONTEXT_TEMPLATE: &str =
    "Learned rules for {{ target }}:{% for rule in rules %}\n- {{ rule }}{% endfor %}";

/// Counts of rules touched by one retrospective.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PromotionOutcome {
    /// Rules inserted for first-time feedback.
    pub new_rules: usize,
    /// Existing rules observed in a new period.
    pub updated_rules: usize,
    /// Rules that became active during this run.
    pub activated: Vec<FeedbackRuleId>,
}

/// Turns retrospective feedback into rules and serves active ones.
///
/// Active rules are cached; [`refresh`](Self::refresh) reloads them
/// wholesale and runs after every processed retrospective.
pub struct FeedbackPromoter<F, C>
where
    F: FeedbackRuleStore,
    C: Clock + Send + Sync,
{
    rules: Arc<F>,
    clock: Arc<C>,
    mapping: FeedbackMapping,
    active: RwLock<Vec<FeedbackRule>>,
}

impl<F, C> FeedbackPromoter<F, C>
where
    F: FeedbackRuleStore,
    C: Clock + Send + Sync,
{
    /// Creates a promoter with the default mapping and an empty cache.
    #[must_use]
    pub fn new(rules: Arc<F>, clock: Arc<C>) -> Self {
        Self {
            rules,
            clock,
            mapping: FeedbackMapping::default(),
            active: RwLock::new(Vec::new()),
        }
    }

    /// Replaces the keyword mapping.
    #[must_use]
    pub fn with_mapping(mut self, mapping: FeedbackMapping) -> Self {
        self.mapping = mapping;
        self
    }

    /// Maps the retrospective's free-text items to targets.
    ///
    /// Scans what did not work, detected patterns and accepted actions in
    /// that order. Each item yields at most one entry.
    #[must_use]
    pub fn extract_from_retrospective(
        &self,
        retrospective: &Retrospective,
    ) -> Vec<ExtractedFeedback> {
        retrospective
            .feedback_items()
            .filter_map(|item| self.mapping.extract(item))
            .collect()
    }

    /// Records the retrospective's feedback against stored rules.
    ///
    /// Returns `None` when the rule store cannot be read.
    pub async fn process_retrospective(
        &self,
        retrospective: &Retrospective,
    ) -> Option<PromotionOutcome> {
        let period = retrospective.period_id();
        let mut known = match self.rules.list_all().await {
            Ok(rules) => rules,
            Err(err) => {
                warn!(period = %period, error = %err, "failed to read feedback rules");
                return None;
            }
        };

        let mut outcome = PromotionOutcome::default();
        for item in self.extract_from_retrospective(retrospective) {
            if let Some(rule) = known
                .iter_mut()
                .find(|rule| rule.matches(&item.target, &item.pattern))
            {
                let was_active = rule.is_active();
                if !rule.observe(period) {
                    debug!(
                        rule = %rule.id(),
                        period = %period,
                        "feedback already recorded for period"
                    );
                    continue;
                }
                if let Err(err) = self.rules.update(rule).await {
                    warn!(rule = %rule.id(), error = %err, "failed to update feedback rule");
                    continue;
                }
                outcome.updated_rules += 1;
                if rule.is_active() && !was_active {
                    info!(
                        rule = %rule.id(),
                        behavior = %rule.target(),
                        occurrences = rule.occurrences(),
                        "promoted feedback rule"
                    );
                    outcome.activated.push(rule.id());
                }
            } else {
                let rule = FeedbackRule::first_observed(
                    item.target,
                    item.pattern,
                    item.instruction,
                    period.clone(),
                    &*self.clock,
                );
                if let Err(err) = self.rules.insert(&rule).await {
                    warn!(rule = %rule.id(), error = %err, "failed to insert feedback rule");
                    continue;
                }
                outcome.new_rules += 1;
                known.push(rule);
            }
        }

        self.refresh().await;
        Some(outcome)
    }

    /// Reloads the active-rule cache from the store.
    ///
    /// Returns `false` and keeps the previous cache when the store cannot be
    /// read.
    pub async fn refresh(&self) -> bool {
        match self.rules.list_active().await {
            Ok(active) => {
                *self.active.write().unwrap_or_else(PoisonError::into_inner) = active;
                true
            }
            Err(err) => {
                warn!(error = %err, "failed to refresh active feedback rules");
                false
            }
        }
    }

    /// Returns the cached active rules for `target`.
    #[must_use]
    pub fn active_rules(&self, target: &BehaviorTarget) -> Vec<FeedbackRule> {
        self.active
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .iter()
            .filter(|rule| rule.target() == target)
            .cloned()
            .collect()
    }

    /// Renders the cached active rules for `target` as instruction lines.
    ///
    /// Returns an empty string when the target has no active rule.
    #[must_use]
    pub fn build_context_block(&self, target: &BehaviorTarget) -> String {
        let instructions: Vec<String> = self
            .active_rules(target)
            .iter()
            .map(|rule| rule.instruction().to_owned())
            .collect();
        if instructions.is_empty() {
            return String::new();
        }
        Environment::new()
            .render_str(
                CONTEXT_TEMPLATE,
                context! { target => target.as_str(), rules => instructions },
            )
            .unwrap_or_else(|err| {
                warn!(behavior = %target, error = %err, "failed to render feedback context");
                String::new()
            })
    }
}
