//! Unit tests for the improvement cycle.
