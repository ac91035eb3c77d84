//! Feedback rules and their promotion rule.

use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

use super::FeedbackDomainError;
use crate::task::domain::PeriodId;

/// Occurrences needed before a rule is active.
const ACTIVATION_OCCURRENCES: u32 = 2;

/// Characters compared when matching pattern text to an existing rule.
const PATTERN_PREFIX_CHARS: usize = 20;

/// Unique identifier for a feedback rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct FeedbackRuleId(Uuid);

impl FeedbackRuleId {
    /// Creates a new random identifier.
    #[must_use]
    pub fn new() -> Self {
        Self(Uuid::new_v4())
    }
}

impl Default for FeedbackRuleId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for FeedbackRuleId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Identifier of the behaviour a rule shapes, such as `planner`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct BehaviorTarget(String);

impl BehaviorTarget {
    /// Creates a validated target identifier.
    ///
    /// # Errors
    ///
    /// Returns [`FeedbackDomainError::EmptyTarget`] when the value is blank.
    pub fn new(value: impl Into<String>) -> Result<Self, FeedbackDomainError> {
        let raw = value.into();
        let normalized = raw.trim();
        if normalized.is_empty() {
            return Err(FeedbackDomainError::EmptyTarget);
        }
        Ok(Self(normalized.to_owned()))
    }

    pub(crate) fn builtin(raw: &'static str) -> Self {
        Self(raw.to_owned())
    }

    /// Returns the identifier as `str`.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl TryFrom<String> for BehaviorTarget {
    type Error = FeedbackDomainError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<BehaviorTarget> for String {
    fn from(value: BehaviorTarget) -> Self {
        value.0
    }
}

impl fmt::Display for BehaviorTarget {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A behavioural instruction learned from recurring retrospective feedback.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FeedbackRule {
    id: FeedbackRuleId,
    target: BehaviorTarget,
    pattern: String,
    instruction: String,
    occurrences: u32,
    periods: Vec<PeriodId>,
    active: bool,
    created_at: DateTime<Utc>,
}

/// Parameter object for reconstructing a stored rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PersistedFeedbackRule {
    /// Rule identifier.
    pub id: FeedbackRuleId,
    /// Behaviour the rule shapes.
    pub target: BehaviorTarget,
    /// Feedback text the rule was learned from.
    pub pattern: String,
    /// Instruction given to the target.
    pub instruction: String,
    /// Number of distinct periods observed.
    pub occurrences: u32,
    /// Periods the pattern was observed in.
    pub periods: Vec<PeriodId>,
    /// Whether the rule is in force.
    pub active: bool,
    /// Creation timestamp.
    pub created_at: DateTime<Utc>,
}

impl FeedbackRule {
    /// Creates an inactive rule observed once in `period`.
    #[must_use]
    pub fn first_observed(
        target: BehaviorTarget,
        pattern: impl Into<String>,
        instruction: impl Into<String>,
        period: PeriodId,
        clock: &impl Clock,
    ) -> Self {
        Self {
            id: FeedbackRuleId::new(),
            target,
            pattern: pattern.into(),
            instruction: instruction.into(),
            occurrences: 1,
            periods: vec![period],
            active: false,
            created_at: clock.utc(),
        }
    }

    /// Reconstructs a rule from storage.
    #[must_use]
    pub fn from_persisted(data: PersistedFeedbackRule) -> Self {
        Self {
            id: data.id,
            target: data.target,
            pattern: data.pattern,
            instruction: data.instruction,
            occurrences: data.occurrences,
            periods: data.periods,
            active: data.active,
            created_at: data.created_at,
        }
    }

    /// Returns the rule identifier.
    #[must_use]
    pub const fn id(&self) -> FeedbackRuleId {
        self.id
    }

    /// Returns the behaviour target.
    #[must_use]
    pub const fn target(&self) -> &BehaviorTarget {
        &self.target
    }

    /// Returns the pattern text.
    #[must_use]
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Returns the instruction text.
    #[must_use]
    pub fn instruction(&self) -> &str {
        &self.instruction
    }

    /// Returns the number of distinct periods observed.
    #[must_use]
    pub const fn occurrences(&self) -> u32 {
        self.occurrences
    }

    /// Returns the periods the pattern was observed in.
    #[must_use]
    pub fn periods(&self) -> &[PeriodId] {
        &self.periods
    }

    /// Returns `true` when the rule is in force.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.active
    }

    /// Returns the creation timestamp.
    #[must_use]
    pub const fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    /// Returns `true` when `pattern` for `target` is the same feedback as
    /// this rule: same target and equal leading characters, ignoring case.
    #[must_use]
    pub fn matches(&self, target: &BehaviorTarget, pattern: &str) -> bool {
        self.target == *target && pattern_prefix(&self.pattern) == pattern_prefix(pattern)
    }

    /// Records an observation in `period`.
    ///
    /// Returns `false` when the period was already recorded. Activation is
    /// monotonic: an active rule stays active.
    pub fn observe(&mut self, period: &PeriodId) -> bool {
        if self.periods.contains(period) {
            return false;
        }
        self.periods.push(period.clone());
        self.occurrences = self.occurrences.saturating_add(1);
        self.active = self.active || self.occurrences >= ACTIVATION_OCCURRENCES;
        true
    }
}

fn pattern_prefix(pattern: &str) -> String {
    pattern
        .trim()
        .chars()
        .take(PATTERN_PREFIX_CHARS)
        .flat_map(char::to_lowercase)
        .collect()
}
