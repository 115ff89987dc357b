//! Rule evaluation events
//!
//! A [`ConditionEvent`] is one outcome of checking a rule against one
//! correspondence of domain objects. Events are collected per rule check in an
//! [`EventAggregator`]; violating ones can be handed to kind-specific
//! [`ViolationHandler`]s.

mod aggregator;
mod dispatch;

pub use aggregator::EventAggregator;
pub use dispatch::{ViolationDispatcher, ViolationHandler};

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::domain::CorrespondingObject;

/// Sink for human-readable description lines
pub trait CollectsLines {
    fn add(&mut self, line: String);
}

impl CollectsLines for Vec<String> {
    fn add(&mut self, line: String) {
        self.push(line);
    }
}

/// Ordered failure description lines
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FailureMessages {
    lines: Vec<String>,
}

impl FailureMessages {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl CollectsLines for FailureMessages {
    fn add(&mut self, line: String) {
        self.lines.push(line);
    }
}

impl fmt::Display for FailureMessages {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.lines.join("\n"))
    }
}

/// Outcome of checking a rule against one correspondence of objects
///
/// Immutable once created.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConditionEvent {
    violation: bool,
    description: String,
    corresponding_objects: Vec<CorrespondingObject>,
}

impl ConditionEvent {
    pub fn new(
        violation: bool,
        corresponding_objects: Vec<CorrespondingObject>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            violation,
            description: description.into(),
            corresponding_objects,
        }
    }

    pub fn satisfied(
        corresponding_objects: Vec<CorrespondingObject>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(false, corresponding_objects, description)
    }

    pub fn violated(
        corresponding_objects: Vec<CorrespondingObject>,
        description: impl Into<String>,
    ) -> Self {
        Self::new(true, corresponding_objects, description)
    }

    pub fn is_violation(&self) -> bool {
        self.violation
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn corresponding_objects(&self) -> &[CorrespondingObject] {
        &self.corresponding_objects
    }

    /// Same event with the violation flag flipped, as needed by negated
    /// conditions
    pub fn inverted(&self) -> Self {
        Self {
            violation: !self.violation,
            description: self.description.clone(),
            corresponding_objects: self.corresponding_objects.clone(),
        }
    }

    pub fn describe_to(&self, lines: &mut dyn CollectsLines) {
        lines.add(self.description.clone());
    }
}

impl fmt::Display for ConditionEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let tag = if self.violation { "violated" } else { "satisfied" };
        write!(f, "[{}] {}", tag, self.description)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::Element;

    #[test]
    fn test_inverted_flips_only_the_flag() {
        let event = ConditionEvent::satisfied(
            vec![Element::new("a.A").into()],
            "a.A resides in package a",
        );
        let inverted = event.inverted();

        assert!(!event.is_violation());
        assert!(inverted.is_violation());
        assert_eq!(inverted.description(), event.description());
        assert_eq!(
            inverted.corresponding_objects(),
            event.corresponding_objects()
        );
    }

    #[test]
    fn test_describe_to_appends_description() {
        let event = ConditionEvent::violated(Vec::new(), "a.A calls b.B");
        let mut lines: Vec<String> = Vec::new();
        event.describe_to(&mut lines);
        event.describe_to(&mut lines);

        assert_eq!(lines, vec!["a.A calls b.B", "a.A calls b.B"]);
    }

    #[test]
    fn test_failure_messages_display() {
        let mut messages = FailureMessages::new();
        messages.add("first".to_string());
        messages.add("second".to_string());

        assert_eq!(messages.len(), 2);
        assert_eq!(messages.to_string(), "first\nsecond");
    }
}
