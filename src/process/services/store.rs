//! Cached process config with explicit reload and suggestion application.

use std::sync::{Arc, PoisonError, RwLock};

use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use crate::process::{
    domain::{ConfigChange, ProcessConfig, StepId},
    ports::ProcessConfigSource,
};

/// Result of applying a config suggestion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SuggestionOutcome {
    /// Whether the config changed.
    pub applied: bool,
    /// Human-readable `<old> -> <new>` summary when applied.
    pub description: Option<String>,
}

impl SuggestionOutcome {
    /// Outcome reporting zero effect.
    #[must_use]
    pub const fn not_applied() -> Self {
        Self {
            applied: false,
            description: None,
        }
    }

    fn applied(description: String) -> Self {
        Self {
            applied: true,
            description: Some(description),
        }
    }
}

/// Process-scoped holder of the current [`ProcessConfig`] snapshot.
///
/// The first [`load`](Self::load) parses the source; later calls return the
/// cached snapshot until [`reload`](Self::reload) drops it. Snapshots are
/// replaced atomically, never patched, so readers holding an `Arc` keep a
/// consistent view.
pub struct ProcessConfigStore<S>
where
    S: ProcessConfigSource,
{
    source: Arc<S>,
    cache: RwLock<Option<Arc<ProcessConfig>>>,
    edits: Mutex<()>,
}

impl<S> ProcessConfigStore<S>
where
    S: ProcessConfigSource,
{
    /// Creates a store with an empty cache.
    #[must_use]
    pub fn new(source: Arc<S>) -> Self {
        Self {
            source,
            cache: RwLock::new(None),
            edits: Mutex::new(()),
        }
    }

    /// Returns the cached config, parsing the source on first use.
    ///
    /// An unreadable or invalid document falls back to
    /// [`ProcessConfig::default_process`].
    pub async fn load(&self) -> Arc<ProcessConfig> {
        if let Some(cached) = self.cached() {
            return cached;
        }
        let parsed = Arc::new(self.parse_source().await);
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        Arc::clone(cache.get_or_insert(parsed))
    }

    /// Drops the cached config and parses the source again.
    pub async fn reload(&self) -> Arc<ProcessConfig> {
        let parsed = Arc::new(self.parse_source().await);
        self.replace(Arc::clone(&parsed));
        parsed
    }

    /// Applies a textual suggestion such as `checkpoint.mode: light` to the
    /// step named `target_step`.
    ///
    /// Unknown steps, unparseable changes and no-op changes are reported as
    /// not applied.
    pub async fn apply_suggestion(&self, target_step: &str, change: &str) -> SuggestionOutcome {
        let Ok(step) = StepId::new(target_step) else {
            debug!(target_step, "ignoring suggestion for invalid step identifier");
            return SuggestionOutcome::not_applied();
        };
        match ConfigChange::parse(change) {
            Ok(parsed) => self.apply_change(&step, parsed).await,
            Err(err) => {
                debug!(step = %step, error = %err, "ignoring unparseable suggestion");
                SuggestionOutcome::not_applied()
            }
        }
    }

    /// Applies a typed change to `step`, persisting the new document.
    pub async fn apply_change(&self, step: &StepId, change: ConfigChange) -> SuggestionOutcome {
        let _edit = self.edits.lock().await;
        let current = self.load().await;

        let Some(existing) = current.step(step) else {
            debug!(step = %step, "ignoring suggestion for unknown step");
            return SuggestionOutcome::not_applied();
        };

        let ConfigChange::CheckpointMode(requested) = change;
        let previous = existing.checkpoint().mode;
        if previous == requested {
            return SuggestionOutcome::not_applied();
        }

        let Some(updated) = current.with_checkpoint_mode(step, requested) else {
            return SuggestionOutcome::not_applied();
        };

        let document = match updated.to_json() {
            Ok(document) => document,
            Err(err) => {
                warn!(step = %step, error = %err, "failed to serialise updated process config");
                return SuggestionOutcome::not_applied();
            }
        };

        if let Err(err) = self.source.write(&document).await {
            warn!(step = %step, error = %err, "failed to persist process config change");
            return SuggestionOutcome::not_applied();
        }

        let fingerprint = updated
            .fingerprint()
            .inspect_err(|err| {
                warn!(step = %step, error = %err, "failed to fingerprint process config");
            })
            .ok();
        self.replace(Arc::new(updated));
        info!(
            step = %step,
            from = %previous,
            to = %requested,
            fingerprint = fingerprint.as_deref(),
            "applied process config change"
        );
        SuggestionOutcome::applied(format!(
            "{step}: checkpoint.mode {previous} -> {requested}"
        ))
    }

    fn cached(&self) -> Option<Arc<ProcessConfig>> {
        self.cache
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(Arc::clone)
    }

    fn replace(&self, config: Arc<ProcessConfig>) {
        let mut cache = self.cache.write().unwrap_or_else(PoisonError::into_inner);
        *cache = Some(config);
    }

    async fn parse_source(&self) -> ProcessConfig {
        let raw = match self.source.read().await {
            Ok(raw) => raw,
            Err(err) => {
                warn!(error = %err, "process document unavailable, using default process");
                return ProcessConfig::default_process();
            }
        };
        match ProcessConfig::parse(&raw) {
            Ok(config) => {
                let fingerprint = config
                    .fingerprint()
                    .inspect_err(|err| warn!(error = %err, "failed to fingerprint process config"))
                    .ok();
                debug!(
                    steps = config.steps().len(),
                    fingerprint = fingerprint.as_deref(),
                    "loaded process config"
                );
                config
            }
            Err(err) => {
                warn!(error = %err, "invalid process document, using default process");
                ProcessConfig::default_process()
            }
        }
    }
}
