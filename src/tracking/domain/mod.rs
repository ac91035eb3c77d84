//! Domain model for logged step transitions.

mod event;

pub use event::{EventId, TransitionEvent, TransitionRecord};
