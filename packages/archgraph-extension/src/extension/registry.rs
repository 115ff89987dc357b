use std::sync::Arc;

use archgraph_lang::EvaluationResult;
use parking_lot::RwLock;

use super::{EvaluatedRule, Extension, ResultStore};
use crate::config::{validate_identifier, ArchConfig, ExtensionConfig};
use crate::error::{ExtensionError, Result};
use crate::snapshot::Snapshot;

struct RegisteredExtension {
    extension: Box<dyn Extension>,
    config: ExtensionConfig,
}

impl RegisteredExtension {
    fn identifier(&self) -> &str {
        self.extension.unique_identifier()
    }
}

/// Registered extensions and the results they are waiting for
///
/// One registry lives for one analysis run and is shared (e.g. via `Arc`)
/// by every concurrently evaluating rule. It is never a process global.
///
/// # Lifecycle
///
/// 1. [`register`](Self::register) every extension
/// 2. [`on_rule_evaluated`](Self::on_rule_evaluated) per rule and snapshot
/// 3. [`on_analysis_finished`](Self::on_analysis_finished) per snapshot
///
/// Precondition of step 3: every `on_rule_evaluated` call for that snapshot
/// has returned. Results filed later are not seen by the extensions and this
/// is not detected.
///
/// Finishing any snapshot clears the results of *all* snapshots.
pub struct ExtensionRegistry {
    config: ArchConfig,
    extensions: RwLock<Vec<Arc<RegisteredExtension>>>,
    results: ResultStore,
}

impl Default for ExtensionRegistry {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtensionRegistry {
    pub fn new() -> Self {
        Self::with_config(ArchConfig::default())
    }

    pub fn with_config(config: ArchConfig) -> Self {
        Self {
            config,
            extensions: RwLock::new(Vec::new()),
            results: ResultStore::new(),
        }
    }

    pub fn config(&self) -> &ArchConfig {
        &self.config
    }

    /// Validate, configure and store `extension`
    ///
    /// Fails with a configuration error if the identifier is empty, contains
    /// `.`, or is already taken; the extension is then not added.
    pub fn register(&self, mut extension: Box<dyn Extension>) -> Result<()> {
        let identifier = extension.unique_identifier().to_string();
        if let Err(err) = validate_identifier(&identifier) {
            tracing::warn!("Rejected extension '{}': {}", identifier, err);
            return Err(err);
        }
        if self.is_registered(&identifier) {
            tracing::warn!("Rejected extension '{}': identifier taken", identifier);
            return Err(ExtensionError::duplicate_identifier(&identifier));
        }

        let config = self.config.extension(&identifier);
        extension.configure(&config)?;

        let mut extensions = self.extensions.write();
        // Re-check under the write lock, a concurrent register may have won
        if extensions.iter().any(|e| e.identifier() == identifier) {
            tracing::warn!("Rejected extension '{}': identifier taken", identifier);
            return Err(ExtensionError::duplicate_identifier(&identifier));
        }
        tracing::info!(
            "Registered extension '{}' (enabled={})",
            identifier,
            config.enabled
        );
        extensions.push(Arc::new(RegisteredExtension { extension, config }));
        Ok(())
    }

    pub fn is_registered(&self, identifier: &str) -> bool {
        self.extensions
            .read()
            .iter()
            .any(|e| e.identifier() == identifier)
    }

    /// Identifiers in registration order
    pub fn identifiers(&self) -> Vec<String> {
        self.extensions
            .read()
            .iter()
            .map(|e| e.identifier().to_string())
            .collect()
    }

    /// Configuration stored for a registered extension
    pub fn extension_config(&self, identifier: &str) -> Option<ExtensionConfig> {
        self.extensions
            .read()
            .iter()
            .find(|e| e.identifier() == identifier)
            .map(|e| e.config.clone())
    }

    /// File `result` under `snapshot` and pass it to every enabled extension
    ///
    /// Extensions see every evaluated rule; only the stored result set
    /// collapses a result filed twice.
    pub fn on_rule_evaluated(&self, snapshot: &Snapshot, result: Arc<EvaluationResult>) {
        if self.results.append(snapshot, Arc::clone(&result)) {
            tracing::debug!(
                "Filed result of '{}' for {}",
                result.rule_description(),
                snapshot
            );
        } else {
            tracing::debug!(
                "Result of '{}' already filed for {}",
                result.rule_description(),
                snapshot
            );
        }

        let evaluated_rule = EvaluatedRule::new(snapshot.clone(), result);
        for registered in self.enabled_extensions() {
            registered.extension.handle(&evaluated_rule);
        }
    }

    /// Hand the accumulated results of `snapshot` to every enabled extension
    ///
    /// The results of all snapshots are cleared before any extension runs,
    /// on success and on failure alike. Fails with a state error if nothing
    /// was filed for `snapshot` since the last clear; otherwise the first
    /// extension error is returned and the remaining extensions are skipped.
    pub fn on_analysis_finished(&self, snapshot: &Snapshot) -> Result<()> {
        let results = self.results.take(snapshot);
        self.results.clear();

        let Some(results) = results else {
            tracing::warn!("{} finished without any evaluated rule", snapshot);
            return Err(ExtensionError::unknown_snapshot(snapshot.to_string()));
        };

        let extensions = self.enabled_extensions();
        tracing::info!(
            "Finishing {} with {} result(s) across {} extension(s)",
            snapshot,
            results.len(),
            extensions.len()
        );
        for registered in extensions {
            registered.extension.on_finished(snapshot, &results)?;
        }
        Ok(())
    }

    /// Whether results are pending for `snapshot`
    pub fn has_results(&self, snapshot: &Snapshot) -> bool {
        self.results.contains(snapshot)
    }

    pub fn pending_results(&self, snapshot: &Snapshot) -> Option<Vec<Arc<EvaluationResult>>> {
        self.results.results_for(snapshot)
    }

    /// Drop all pending results, e.g. when a run is aborted
    pub fn clear(&self) {
        self.results.clear();
    }

    fn enabled_extensions(&self) -> Vec<Arc<RegisteredExtension>> {
        self.extensions
            .read()
            .iter()
            .filter(|e| e.config.enabled)
            .cloned()
            .collect()
    }
}
