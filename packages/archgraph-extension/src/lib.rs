//! archgraph-extension - Extension lifecycle of an analysis run
//!
//! Extensions observe rule evaluation: they are registered under a unique
//! identifier, see every evaluated rule, and receive the accumulated results
//! of a [`Snapshot`] once its analysis is finished.
//!
//! ## Core Principles
//!
//! 1. **Snapshot identity**: results are keyed by the snapshot *instance*, not
//!    by its content
//! 2. **Explicit run context**: one [`ExtensionRegistry`] per analysis run,
//!    shared between concurrently evaluating rules
//! 3. **Destructive finalization**: finishing a snapshot clears all pending
//!    results
//!
//! ## Usage
//!
//! ```rust
//! use std::sync::Arc;
//! use archgraph_extension::{
//!     EvaluationResult, Extension, ExtensionRegistry, Result, Snapshot,
//! };
//! use archgraph_lang::EventAggregator;
//!
//! struct Counter;
//!
//! impl Extension for Counter {
//!     fn unique_identifier(&self) -> &str {
//!         "counter"
//!     }
//!
//!     fn on_finished(&self, snapshot: &Snapshot, results: &[Arc<EvaluationResult>]) -> Result<()> {
//!         println!("{}: {} rule(s)", snapshot, results.len());
//!         Ok(())
//!     }
//! }
//!
//! let registry = ExtensionRegistry::new();
//! registry.register(Box::new(Counter))?;
//!
//! let snapshot = Snapshot::new("core", vec![]);
//! let result = Arc::new(EvaluationResult::new("no cycles", EventAggregator::new()));
//! registry.on_rule_evaluated(&snapshot, result);
//! registry.on_analysis_finished(&snapshot)?;
//! # Ok::<(), archgraph_extension::ExtensionError>(())
//! ```

pub mod config;
pub mod error;
pub mod extension;
pub mod report;
pub mod snapshot;

pub use error::{ErrorKind, ExtensionError, Result};

pub use archgraph_lang::EvaluationResult;
pub use config::{ArchConfig, ExtensionConfig};
pub use extension::{EvaluatedRule, Extension, ExtensionRegistry, ResultStore};
pub use report::{JsonReportWriter, ReportExtension, ReportWriter};
pub use snapshot::Snapshot;
