//! In-memory process source for tests and embedding.

use async_trait::async_trait;
use std::sync::{Arc, RwLock};

use crate::process::{
    domain::ProcessConfig,
    ports::{ProcessConfigSource, ProcessSourceError, ProcessSourceResult},
};

/// Thread-safe in-memory process document.
#[derive(Debug, Clone, Default)]
pub struct InMemoryProcessSource {
    state: Arc<RwLock<InMemoryProcessState>>,
}

#[derive(Debug, Default)]
struct InMemoryProcessState {
    document: Option<String>,
    reject_writes: bool,
    reads: usize,
}

impl InMemoryProcessSource {
    /// Creates a source with no document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a source holding the given raw document.
    #[must_use]
    pub fn with_document(document: impl Into<String>) -> Self {
        let source = Self::default();
        if let Ok(mut state) = source.state.write() {
            state.document = Some(document.into());
        }
        source
    }

    /// Creates a source holding the serialised form of `config`.
    ///
    /// # Errors
    ///
    /// Returns [`serde_json::Error`] when the config cannot be serialised.
    pub fn with_config(config: &ProcessConfig) -> Result<Self, serde_json::Error> {
        Ok(Self::with_document(config.to_json()?))
    }

    /// Makes every subsequent write fail.
    #[must_use]
    pub fn rejecting_writes(self) -> Self {
        if let Ok(mut state) = self.state.write() {
            state.reject_writes = true;
        }
        self
    }

    /// Returns the current raw document.
    #[must_use]
    pub fn document(&self) -> Option<String> {
        self.state
            .read()
            .ok()
            .and_then(|state| state.document.clone())
    }

    /// Returns how many times the document has been read.
    #[must_use]
    pub fn read_count(&self) -> usize {
        self.state.read().map_or(0, |state| state.reads)
    }
}

#[async_trait]
impl ProcessConfigSource for InMemoryProcessSource {
    async fn read(&self) -> ProcessSourceResult<String> {
        let mut state = self.state.write().map_err(|err| {
            ProcessSourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        state.reads += 1;
        state
            .document
            .clone()
            .ok_or_else(|| ProcessSourceError::NotFound("in-memory".to_owned()))
    }

    async fn write(&self, document: &str) -> ProcessSourceResult<()> {
        let mut state = self.state.write().map_err(|err| {
            ProcessSourceError::persistence(std::io::Error::other(err.to_string()))
        })?;
        if state.reject_writes {
            return Err(ProcessSourceError::persistence(std::io::Error::new(
                std::io::ErrorKind::PermissionDenied,
                "process source is read-only",
            )));
        }
        state.document = Some(document.to_owned());
        Ok(())
    }
}
