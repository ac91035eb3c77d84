//! Domain model for retrospectives and feedback rules.

mod error;
mod mapping;
mod retrospective;
mod rule;

pub use error::FeedbackDomainError;
pub use mapping::{ExtractedFeedback, FeedbackMapping, MappingEntry};
pub use retrospective::{Retrospective, RetrospectivePatch};
pub use rule::{BehaviorTarget, FeedbackRule, FeedbackRuleId, PersistedFeedbackRule};
