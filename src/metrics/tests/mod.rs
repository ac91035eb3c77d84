//! Unit tests for the metrics module.

mod compute_tests;
