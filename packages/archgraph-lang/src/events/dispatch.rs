use crate::domain::{collect_matching, ObjectType};

use super::EventAggregator;

/// Receiver of violations of one object kind `T`
///
/// The accepted kind is the explicit type parameter; closures
/// `FnMut(Vec<T>, &str)` are handlers too.
pub trait ViolationHandler<T: ObjectType> {
    fn handle(&mut self, violating_objects: Vec<T>, message: &str);
}

impl<T, F> ViolationHandler<T> for F
where
    T: ObjectType,
    F: FnMut(Vec<T>, &str),
{
    fn handle(&mut self, violating_objects: Vec<T>, message: &str) {
        self(violating_objects, message)
    }
}

/// Filters and converts violating events' objects for a [`ViolationHandler`]
///
/// For every violating event, in insertion order: objects of kind `T` are
/// taken directly, convertible objects contribute what they convert into,
/// everything else is skipped. The handler runs once per event with a
/// non-empty, duplicate-free collection and never for an empty one.
pub struct ViolationDispatcher<'a> {
    events: &'a EventAggregator,
}

impl<'a> ViolationDispatcher<'a> {
    pub fn new(events: &'a EventAggregator) -> Self {
        Self { events }
    }

    /// Returns how many times `handler` was invoked
    pub fn dispatch<T, H>(&self, handler: &mut H) -> usize
    where
        T: ObjectType,
        H: ViolationHandler<T> + ?Sized,
    {
        let mut invocations = 0;
        for event in self.events.violating_snapshot() {
            let objects: Vec<T> = collect_matching(event.corresponding_objects());
            if objects.is_empty() {
                tracing::debug!(
                    "No {} among objects of violation '{}', skipping",
                    T::KIND,
                    event.description()
                );
                continue;
            }
            handler.handle(objects, event.description());
            invocations += 1;
        }
        invocations
    }
}
