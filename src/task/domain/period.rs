//! Work periods used to scope metrics and pattern mining.

use super::{PeriodId, TaskDomainError};
use chrono::{DateTime, Utc};
use mockable::Clock;
use serde::{Deserialize, Serialize};

/// A bounded unit of work such as a sprint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Period {
    id: PeriodId,
    name: String,
    started_at: DateTime<Utc>,
    closed_at: Option<DateTime<Utc>>,
}

impl Period {
    /// Opens a period starting now.
    #[must_use]
    pub fn open(id: PeriodId, name: impl Into<String>, clock: &impl Clock) -> Self {
        Self::starting_at(id, name, clock.utc())
    }

    /// Opens a period that started at `started_at`.
    #[must_use]
    pub fn starting_at(id: PeriodId, name: impl Into<String>, started_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: name.into(),
            started_at,
            closed_at: None,
        }
    }

    /// Returns the period identifier.
    #[must_use]
    pub const fn id(&self) -> &PeriodId {
        &self.id
    }

    /// Returns the display name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the start timestamp.
    #[must_use]
    pub const fn started_at(&self) -> DateTime<Utc> {
        self.started_at
    }

    /// Returns the close timestamp, if closed.
    #[must_use]
    pub const fn closed_at(&self) -> Option<DateTime<Utc>> {
        self.closed_at
    }

    /// Returns `true` while the period has not been closed.
    #[must_use]
    pub const fn is_active(&self) -> bool {
        self.closed_at.is_none()
    }

    /// Closes the period.
    ///
    /// # Errors
    ///
    /// Returns [`TaskDomainError::PeriodAlreadyClosed`] when the period was
    /// closed before.
    pub fn close(&mut self, clock: &impl Clock) -> Result<(), TaskDomainError> {
        if self.closed_at.is_some() {
            return Err(TaskDomainError::PeriodAlreadyClosed(self.id.clone()));
        }
        self.closed_at = Some(clock.utc());
        Ok(())
    }
}
