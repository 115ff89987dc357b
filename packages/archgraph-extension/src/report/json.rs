use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};
use std::sync::Arc;

use archgraph_lang::{CorrespondingObject, Dependency, EvaluationResult, Priority};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::ReportWriter;
use crate::error::{ExtensionError, Result};
use crate::snapshot::Snapshot;

/// Default report file name
pub const REPORT_FILE_NAME: &str = "report.json";

/// Serialized form of one finished snapshot
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportDocument {
    pub snapshot: String,
    pub generated_at: DateTime<Utc>,
    pub rules: Vec<RuleReport>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RuleReport {
    pub rule: String,
    pub priority: Priority,
    pub violated: bool,
    pub failures: Vec<String>,
    /// Violating objects, as recorded on the events
    pub violating_objects: Vec<CorrespondingObject>,
    /// Dependencies the violations stand for, after conversion
    pub dependencies: Vec<Dependency>,
}

impl RuleReport {
    pub fn from_result(result: &EvaluationResult) -> Self {
        let violating_objects = result
            .events()
            .violating()
            .iter()
            .flat_map(|event| event.corresponding_objects().iter().cloned())
            .collect();

        let mut dependencies = Vec::new();
        result.handle_violations(&mut |found: Vec<Dependency>, _: &str| {
            dependencies.extend(found);
        });

        Self {
            rule: result.rule_description().to_string(),
            priority: result.priority(),
            violated: result.has_violation(),
            failures: result.failure_report().into_lines(),
            violating_objects,
            dependencies,
        }
    }
}

impl ReportDocument {
    pub fn build(snapshot: &Snapshot, results: &[Arc<EvaluationResult>]) -> Self {
        Self {
            snapshot: snapshot.description().to_string(),
            generated_at: Utc::now(),
            rules: results
                .iter()
                .map(|result| RuleReport::from_result(result))
                .collect(),
        }
    }
}

/// Writes a pretty-printed [`ReportDocument`] as JSON
#[derive(Debug, Clone)]
pub struct JsonReportWriter {
    file_name: String,
}

impl Default for JsonReportWriter {
    fn default() -> Self {
        Self {
            file_name: REPORT_FILE_NAME.to_string(),
        }
    }
}

impl JsonReportWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_file_name(file_name: impl Into<String>) -> Self {
        Self {
            file_name: file_name.into(),
        }
    }
}

impl ReportWriter for JsonReportWriter {
    fn write(
        &self,
        snapshot: &Snapshot,
        results: &[Arc<EvaluationResult>],
        target_dir: &Path,
    ) -> Result<PathBuf> {
        std::fs::create_dir_all(target_dir).map_err(|err| {
            ExtensionError::report(format!(
                "Cannot create report directory {}",
                target_dir.display()
            ))
            .with_source(err)
        })?;

        let document = ReportDocument::build(snapshot, results);
        let path = target_dir.join(&self.file_name);
        let mut writer = BufWriter::new(File::create(&path)?);
        serde_json::to_writer_pretty(&mut writer, &document)?;
        writer.flush()?;

        tracing::debug!(
            "Wrote {} rule(s) of {} to {}",
            document.rules.len(),
            snapshot,
            path.display()
        );
        Ok(path)
    }
}
