use std::fmt;
use std::sync::Arc;

use parking_lot::{MappedRwLockReadGuard, RwLock, RwLockReadGuard};
use serde::ser::SerializeStruct;
use serde::{Serialize, Serializer};

use super::dispatch::{ViolationDispatcher, ViolationHandler};
use super::{CollectsLines, ConditionEvent};
use crate::domain::ObjectType;

#[derive(Debug, Default)]
struct Buckets {
    allowed: Vec<Arc<ConditionEvent>>,
    violating: Vec<Arc<ConditionEvent>>,
}

/// Events of one rule check, partitioned by violation flag
///
/// Every event lands in exactly one bucket; within a bucket insertion order is
/// kept. `add` and reads may interleave from the owning evaluation's threads.
#[derive(Debug, Default)]
pub struct EventAggregator {
    buckets: RwLock<Buckets>,
}

impl EventAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&self, event: ConditionEvent) {
        let event = Arc::new(event);
        let mut buckets = self.buckets.write();
        if event.is_violation() {
            buckets.violating.push(event);
        } else {
            buckets.allowed.push(event);
        }
    }

    /// Live view of the violating bucket
    ///
    /// Holds a read lock; calling `add` on the same thread while the guard is
    /// alive deadlocks. To add events while traversing, walk [`Self::iter`]
    /// or [`Self::snapshot`] instead.
    #[must_use = "the view holds a read lock only while it is alive"]
    pub fn violating(&self) -> MappedRwLockReadGuard<'_, [Arc<ConditionEvent>]> {
        RwLockReadGuard::map(self.buckets.read(), |b| b.violating.as_slice())
    }

    /// Live view of the allowed bucket, same locking rules as [`Self::violating`]
    #[must_use = "the view holds a read lock only while it is alive"]
    pub fn allowed(&self) -> MappedRwLockReadGuard<'_, [Arc<ConditionEvent>]> {
        RwLockReadGuard::map(self.buckets.read(), |b| b.allowed.as_slice())
    }

    pub fn contains_violation(&self) -> bool {
        !self.buckets.read().violating.is_empty()
    }

    pub fn is_empty(&self) -> bool {
        let buckets = self.buckets.read();
        buckets.allowed.is_empty() && buckets.violating.is_empty()
    }

    pub fn len(&self) -> usize {
        let buckets = self.buckets.read();
        buckets.allowed.len() + buckets.violating.len()
    }

    pub fn describe_failures_to(&self, lines: &mut dyn CollectsLines) {
        for event in self.violating_snapshot() {
            event.describe_to(lines);
        }
    }

    /// Point-in-time copy of all events: violating first, then allowed
    pub fn snapshot(&self) -> Vec<Arc<ConditionEvent>> {
        let buckets = self.buckets.read();
        buckets
            .violating
            .iter()
            .chain(buckets.allowed.iter())
            .cloned()
            .collect()
    }

    /// Iterate a point-in-time copy; later `add`s are not observed
    pub fn iter(&self) -> std::vec::IntoIter<Arc<ConditionEvent>> {
        self.snapshot().into_iter()
    }

    pub(crate) fn violating_snapshot(&self) -> Vec<Arc<ConditionEvent>> {
        self.buckets.read().violating.clone()
    }

    /// Hand violations to `handler`, see [`ViolationDispatcher`]
    pub fn dispatch_violations<T, H>(&self, handler: &mut H) -> usize
    where
        T: ObjectType,
        H: ViolationHandler<T> + ?Sized,
    {
        ViolationDispatcher::new(self).dispatch(handler)
    }
}

impl<'a> IntoIterator for &'a EventAggregator {
    type Item = Arc<ConditionEvent>;
    type IntoIter = std::vec::IntoIter<Arc<ConditionEvent>>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl fmt::Display for EventAggregator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let buckets = self.buckets.read();
        let join = |events: &[Arc<ConditionEvent>]| {
            events
                .iter()
                .map(|e| e.to_string())
                .collect::<Vec<_>>()
                .join(", ")
        };
        write!(
            f,
            "EventAggregator{{allowed: [{}]; violating: [{}]}}",
            join(buckets.allowed.as_slice()),
            join(buckets.violating.as_slice())
        )
    }
}

impl Serialize for EventAggregator {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let buckets = self.buckets.read();
        let allowed: Vec<&ConditionEvent> = buckets.allowed.iter().map(Arc::as_ref).collect();
        let violating: Vec<&ConditionEvent> = buckets.violating.iter().map(Arc::as_ref).collect();

        let mut state = serializer.serialize_struct("EventAggregator", 2)?;
        state.serialize_field("allowed", &allowed)?;
        state.serialize_field("violating", &violating)?;
        state.end()
    }
}
