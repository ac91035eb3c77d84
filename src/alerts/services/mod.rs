//! Application services for alerting.

mod engine;

pub use engine::AlertEngine;
