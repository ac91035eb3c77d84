//! In-memory append-only event log.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::tracking::{
    domain::TransitionEvent,
    ports::{EventFilter, EventLog, EventLogError, EventLogResult},
};

/// Thread-safe in-memory event log preserving insertion order.
#[derive(Debug, Clone, Default)]
pub struct InMemoryEventLog {
    events: Arc<RwLock<Vec<TransitionEvent>>>,
}

impl InMemoryEventLog {
    /// Creates an empty log.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the number of stored events.
    #[must_use]
    pub fn len(&self) -> usize {
        self.events.read().map_or(0, |events| events.len())
    }

    /// Returns `true` when no event has been appended.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl EventLog for InMemoryEventLog {
    async fn append(&self, event: &TransitionEvent) -> EventLogResult<()> {
        let mut events = self
            .events
            .write()
            .map_err(|err| EventLogError::persistence(std::io::Error::other(err.to_string())))?;
        if events.iter().any(|existing| existing.id() == event.id()) {
            return Err(EventLogError::DuplicateEvent(event.id()));
        }
        events.push(event.clone());
        Ok(())
    }

    async fn query(&self, filter: &EventFilter) -> EventLogResult<Vec<TransitionEvent>> {
        let events = self
            .events
            .read()
            .map_err(|err| EventLogError::persistence(std::io::Error::other(err.to_string())))?;
        Ok(events
            .iter()
            .filter(|event| filter.matches(event))
            .cloned()
            .collect())
    }
}
