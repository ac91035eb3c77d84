//! Unit tests for the tracking module.

mod event_log_tests;
