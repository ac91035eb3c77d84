//! In-memory adapters for feedback rules and retrospectives.

mod retrospective;
mod rule;

pub use retrospective::InMemoryRetrospectiveStore;
pub use rule::InMemoryFeedbackRuleStore;
