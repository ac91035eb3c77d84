//! Port contracts for feedback persistence.

pub mod retrospective_store;
pub mod rule_store;

pub use retrospective_store::{
    RetrospectiveStore, RetrospectiveStoreError, RetrospectiveStoreResult,
};
pub use rule_store::{FeedbackRuleStore, FeedbackRuleStoreError, FeedbackRuleStoreResult};
