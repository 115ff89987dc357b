//! Report output of finished snapshots
//!
//! [`ReportExtension`] forwards the accumulated results of a snapshot to a
//! [`ReportWriter`] together with the resolved target directory.
//! [`JsonReportWriter`] is the bundled writer.

mod json;

pub use json::{JsonReportWriter, ReportDocument, RuleReport};

use std::path::{Path, PathBuf};
use std::sync::Arc;

use archgraph_lang::EvaluationResult;

use crate::config::{ArchConfig, ExtensionConfig};
use crate::error::Result;
use crate::extension::Extension;
use crate::snapshot::Snapshot;

/// Identifier of [`ReportExtension`]
pub const REPORT_EXTENSION_ID: &str = "archgraph-report";

const ONLY_VIOLATIONS_KEY: &str = "only_violations";

/// Writes the results of one snapshot into a directory
pub trait ReportWriter: Send + Sync {
    /// Returns the path of the written report
    fn write(
        &self,
        snapshot: &Snapshot,
        results: &[Arc<EvaluationResult>],
        target_dir: &Path,
    ) -> Result<PathBuf>;
}

/// Extension writing a report per finished snapshot
///
/// Properties:
/// - `only_violations` (`true`/`false`, default `false`): leave rules without
///   violations out of the report
pub struct ReportExtension {
    writer: Box<dyn ReportWriter>,
    target_dir: PathBuf,
    only_violations: bool,
}

impl ReportExtension {
    pub fn new(writer: Box<dyn ReportWriter>, target_dir: impl Into<PathBuf>) -> Self {
        Self {
            writer,
            target_dir: target_dir.into(),
            only_violations: false,
        }
    }

    /// JSON report into the directory resolved from `config` and env
    pub fn from_config(config: &ArchConfig) -> Self {
        Self::new(Box::new(JsonReportWriter::new()), config.report_dir())
    }

    pub fn target_dir(&self) -> &Path {
        &self.target_dir
    }
}

impl Extension for ReportExtension {
    fn unique_identifier(&self) -> &str {
        REPORT_EXTENSION_ID
    }

    fn configure(&mut self, config: &ExtensionConfig) -> Result<()> {
        if let Some(only_violations) = config.get_bool(ONLY_VIOLATIONS_KEY)? {
            self.only_violations = only_violations;
        }
        Ok(())
    }

    fn on_finished(&self, snapshot: &Snapshot, results: &[Arc<EvaluationResult>]) -> Result<()> {
        tracing::info!("Writing report to {}", self.target_dir.display());
        let selected: Vec<Arc<EvaluationResult>> = results
            .iter()
            .filter(|r| !self.only_violations || r.has_violation())
            .cloned()
            .collect();
        let path = self.writer.write(snapshot, &selected, &self.target_dir)?;
        tracing::info!("Report of {} written to {}", snapshot, path.display());
        Ok(())
    }
}
