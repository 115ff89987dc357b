//! Result of evaluating one rule

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::ObjectType;
use crate::events::{EventAggregator, FailureMessages, ViolationHandler};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    Low,
    #[default]
    Medium,
    High,
}

impl Priority {
    pub fn as_str(&self) -> &'static str {
        match self {
            Priority::Low => "low",
            Priority::Medium => "medium",
            Priority::High => "high",
        }
    }
}

impl fmt::Display for Priority {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Events of one rule checked against one snapshot
#[derive(Debug, Serialize)]
pub struct EvaluationResult {
    rule_description: String,
    events: EventAggregator,
    priority: Priority,
}

impl EvaluationResult {
    pub fn new(rule_description: impl Into<String>, events: EventAggregator) -> Self {
        Self::with_priority(rule_description, events, Priority::default())
    }

    pub fn with_priority(
        rule_description: impl Into<String>,
        events: EventAggregator,
        priority: Priority,
    ) -> Self {
        Self {
            rule_description: rule_description.into(),
            events,
            priority,
        }
    }

    pub fn rule_description(&self) -> &str {
        &self.rule_description
    }

    pub fn events(&self) -> &EventAggregator {
        &self.events
    }

    pub fn priority(&self) -> Priority {
        self.priority
    }

    pub fn has_violation(&self) -> bool {
        self.events.contains_violation()
    }

    /// Failure lines of all violating events, in insertion order
    pub fn failure_report(&self) -> FailureMessages {
        let mut messages = FailureMessages::new();
        self.events.describe_failures_to(&mut messages);
        messages
    }

    pub fn handle_violations<T, H>(&self, handler: &mut H) -> usize
    where
        T: ObjectType,
        H: ViolationHandler<T> + ?Sized,
    {
        self.events.dispatch_violations(handler)
    }
}

impl fmt::Display for EvaluationResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let violations = self.events.violating().len();
        write!(
            f,
            "Rule '{}' ({}) - {} violation(s)",
            self.rule_description, self.priority, violations
        )
    }
}
