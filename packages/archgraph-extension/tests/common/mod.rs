//! Test extensions shared by the integration tests

#![allow(dead_code)]

use std::sync::Arc;

use archgraph_extension::{
    EvaluatedRule, EvaluationResult, Extension, ExtensionConfig, ExtensionError, Result, Snapshot,
};
use archgraph_lang::{ConditionEvent, Element, EventAggregator};
use parking_lot::Mutex;

/// Everything a [`RecordingExtension`] observed
#[derive(Debug, Default)]
pub struct Recording {
    pub configured: Mutex<Option<ExtensionConfig>>,
    pub handled: Mutex<Vec<String>>,
    pub finished: Mutex<Vec<(Snapshot, Vec<Arc<EvaluationResult>>)>>,
}

pub struct RecordingExtension {
    identifier: String,
    recording: Arc<Recording>,
}

impl RecordingExtension {
    pub fn new(identifier: &str) -> (Self, Arc<Recording>) {
        let recording = Arc::new(Recording::default());
        let extension = Self {
            identifier: identifier.to_string(),
            recording: Arc::clone(&recording),
        };
        (extension, recording)
    }
}

impl Extension for RecordingExtension {
    fn unique_identifier(&self) -> &str {
        &self.identifier
    }

    fn configure(&mut self, config: &ExtensionConfig) -> Result<()> {
        *self.recording.configured.lock() = Some(config.clone());
        Ok(())
    }

    fn handle(&self, evaluated_rule: &EvaluatedRule) {
        self.recording
            .handled
            .lock()
            .push(evaluated_rule.rule_description().to_string());
    }

    fn on_finished(&self, snapshot: &Snapshot, results: &[Arc<EvaluationResult>]) -> Result<()> {
        self.recording
            .finished
            .lock()
            .push((snapshot.clone(), results.to_vec()));
        Ok(())
    }
}

/// Fails in its finalize hook
pub struct FailingExtension;

impl Extension for FailingExtension {
    fn unique_identifier(&self) -> &str {
        "failing"
    }

    fn on_finished(&self, _snapshot: &Snapshot, _results: &[Arc<EvaluationResult>]) -> Result<()> {
        Err(ExtensionError::report("renderer unavailable"))
    }
}

pub fn snapshot(description: &str) -> Snapshot {
    Snapshot::new(
        description,
        vec![Element::new("app.Web"), Element::new("app.Db")],
    )
}

pub fn result(rule: &str, violations: &[&str]) -> Arc<EvaluationResult> {
    let events = EventAggregator::new();
    for violation in violations {
        events.add(ConditionEvent::violated(
            vec![Element::new(*violation).into()],
            format!("{} violates '{}'", violation, rule),
        ));
    }
    Arc::new(EvaluationResult::new(rule, events))
}
