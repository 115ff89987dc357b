//! Pluggable observers of rule evaluation
//!
//! An [`Extension`] is registered under a unique identifier, receives every
//! evaluated rule through [`Extension::handle`] and gets the accumulated
//! results of a snapshot once its analysis is finished.

mod registry;
mod results;

pub use registry::ExtensionRegistry;
pub use results::ResultStore;

use std::sync::Arc;

use archgraph_lang::EvaluationResult;

use crate::config::ExtensionConfig;
use crate::error::Result;
use crate::snapshot::Snapshot;

/// One rule evaluated against one snapshot
#[derive(Debug, Clone)]
pub struct EvaluatedRule {
    snapshot: Snapshot,
    result: Arc<EvaluationResult>,
}

impl EvaluatedRule {
    pub fn new(snapshot: Snapshot, result: Arc<EvaluationResult>) -> Self {
        Self { snapshot, result }
    }

    pub fn snapshot(&self) -> &Snapshot {
        &self.snapshot
    }

    pub fn result(&self) -> &Arc<EvaluationResult> {
        &self.result
    }

    pub fn rule_description(&self) -> &str {
        self.result.rule_description()
    }
}

/// Observer plugged into an analysis run
///
/// Hooks run synchronously on the caller's thread; `handle` may be called
/// concurrently for different rules.
pub trait Extension: Send + Sync {
    /// Identifier, unique per run; non-empty and without `.`
    fn unique_identifier(&self) -> &str;

    /// Called once at registration with this extension's configuration
    fn configure(&mut self, _config: &ExtensionConfig) -> Result<()> {
        Ok(())
    }

    /// Called for every evaluated rule
    fn handle(&self, _evaluated_rule: &EvaluatedRule) {}

    /// Called once all rules of `snapshot` have been evaluated
    fn on_finished(&self, snapshot: &Snapshot, results: &[Arc<EvaluationResult>]) -> Result<()>;
}
