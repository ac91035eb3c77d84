//! Application services for process configuration.

mod store;

pub use store::{ProcessConfigStore, SuggestionOutcome};
