//! Application services for transition tracking.

mod tracker;

pub use tracker::{TrackerKey, TransitionOptions, TransitionTracker};
