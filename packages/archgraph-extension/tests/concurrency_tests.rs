//! Concurrent rule evaluation against a shared registry
//!
//! Many rules file results for the same and for different snapshots at once;
//! no result may be lost.

mod common;

use std::sync::Arc;

use archgraph_extension::ExtensionRegistry;
use common::{result, snapshot, RecordingExtension};
use rayon::prelude::*;

const RULES: usize = 256;

#[test]
fn test_concurrent_results_for_one_snapshot() {
    let registry = Arc::new(ExtensionRegistry::new());
    let (extension, recording) = RecordingExtension::new("foo");
    registry.register(Box::new(extension)).unwrap();

    let s = snapshot("core");
    (0..RULES).into_par_iter().for_each(|i| {
        registry.on_rule_evaluated(&s, result(&format!("rule-{}", i), &[]));
    });

    assert_eq!(registry.pending_results(&s).unwrap().len(), RULES);
    registry.on_analysis_finished(&s).unwrap();

    let finished = recording.finished.lock();
    assert_eq!(finished.len(), 1);
    assert_eq!(finished[0].1.len(), RULES);
    assert_eq!(recording.handled.lock().len(), RULES);
}

#[test]
fn test_concurrent_results_for_many_snapshots() {
    let registry = Arc::new(ExtensionRegistry::new());
    let snapshots: Vec<_> = (0..8).map(|i| snapshot(&format!("s{}", i))).collect();

    (0..RULES).into_par_iter().for_each(|i| {
        let s = &snapshots[i % snapshots.len()];
        registry.on_rule_evaluated(s, result(&format!("rule-{}", i), &["app.Web"]));
    });

    for s in &snapshots {
        assert_eq!(
            registry.pending_results(s).unwrap().len(),
            RULES / snapshots.len()
        );
    }
}

#[test]
fn test_concurrent_duplicate_filing_keeps_one() {
    let registry = Arc::new(ExtensionRegistry::new());
    let s = snapshot("core");
    let shared = result("shared", &[]);

    (0..RULES).into_par_iter().for_each(|_| {
        registry.on_rule_evaluated(&s, Arc::clone(&shared));
    });

    assert_eq!(registry.pending_results(&s).unwrap().len(), 1);
}
