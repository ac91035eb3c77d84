//! Port for the declarative document backing the process config.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

/// Result type for process source operations.
pub type ProcessSourceResult<T> = Result<T, ProcessSourceError>;

/// Backing store of the serialised process document.
#[async_trait]
pub trait ProcessConfigSource: Send + Sync {
    /// Reads the raw document.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessSourceError::NotFound`] when no document exists, or
    /// [`ProcessSourceError::Persistence`] when reading fails.
    async fn read(&self) -> ProcessSourceResult<String>;

    /// Replaces the raw document.
    ///
    /// # Errors
    ///
    /// Returns [`ProcessSourceError::Persistence`] when writing fails.
    async fn write(&self, document: &str) -> ProcessSourceResult<()>;
}

/// Errors returned by process source implementations.
#[derive(Debug, Clone, Error)]
pub enum ProcessSourceError {
    /// No document is present at the source location.
    #[error("process document not found: {0}")]
    NotFound(String),

    /// Persistence-layer failure.
    #[error("persistence error: {0}")]
    Persistence(Arc<dyn std::error::Error + Send + Sync>),
}

impl ProcessSourceError {
    /// Wraps a persistence error.
    pub fn persistence(err: impl std::error::Error + Send + Sync + 'static) -> Self {
        Self::Persistence(Arc::new(err))
    }
}
