//! Application services for pattern mining.

mod detector;

pub use detector::{PatternDetector, PatternReport};
