//! Transition tracking: the append-only log of step moves.
//!
//! A [`services::TransitionTracker`] follows one task (or period) through the
//! process graph. Every move, and every checkpoint evaluated without moving,
//! becomes an immutable [`domain::TransitionEvent`] carrying the time spent
//! in the step being left and the checkpoint mode in force at that moment.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
