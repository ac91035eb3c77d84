//! Domain model and pure detectors for pattern mining.

mod detectors;
mod pattern;
mod stats;
mod suggest;
mod thresholds;

pub use detectors::{
    detect_all, detect_checkpoint_utility, detect_high_rework, detect_slow_steps, detect_trend,
};
pub use pattern::{
    DetectedPattern, PatternEvidence, PatternKind, PatternSeverity, SuggestionPriority,
    WorkflowSuggestion,
};
pub use stats::{mean, median, ols_slope};
pub use suggest::{filter_accepted, suggest};
pub use thresholds::DetectorThresholds;
