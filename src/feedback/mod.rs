//! Retrospectives and feedback rule promotion.
//!
//! Retrospective text is matched against an ordered keyword mapping. Each
//! hit becomes a [`domain::FeedbackRule`] for a behaviour target, which turns
//! active once it has been observed in two distinct periods. Active rules
//! are rendered into a context block for downstream consumers.

pub mod adapters;
pub mod domain;
pub mod ports;
pub mod services;

#[cfg(test)]
mod tests;
