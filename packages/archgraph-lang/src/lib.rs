//! archgraph-lang - Rule evaluation results and violation dispatch
//!
//! After a rule has been checked against a snapshot of analyzed code, the
//! outcome is a set of [`ConditionEvent`]s. This crate collects them and
//! hands violations to handlers that only understand one kind of object.
//!
//! ## Core Pieces
//!
//! 1. **Corresponding objects**: closed set of domain objects an event refers
//!    to ([`CorrespondingObject`]), each tagged with an [`ObjectKind`]
//! 2. **Conversion**: [`Convertible`] turns an object into the objects of a
//!    requested kind, flattening nested parts ([`Edge`], [`Cycle`])
//! 3. **Aggregation**: [`EventAggregator`] partitions events into allowed and
//!    violating buckets
//! 4. **Dispatch**: [`ViolationHandler`] declares its accepted kind through an
//!    associated type, [`ViolationDispatcher`] filters and converts for it
//!
//! ## Usage
//!
//! ```rust
//! use archgraph_lang::{
//!     Access, AccessKind, ConditionEvent, Dependency, Element, EventAggregator,
//! };
//!
//! let access = Access::new(Element::new("app.Web"), Element::new("app.Db"), AccessKind::MethodCall, 12);
//! let events = EventAggregator::new();
//! events.add(ConditionEvent::violated(vec![access.into()], "Web calls Db directly"));
//!
//! let mut seen = Vec::new();
//! events.dispatch_violations(&mut |deps: Vec<Dependency>, message: &str| {
//!     seen.push((deps.len(), message.to_string()));
//! });
//! assert_eq!(seen, vec![(1, "Web calls Db directly".to_string())]);
//! ```

pub mod domain;
pub mod evaluation;
pub mod events;
pub mod graph;

pub use domain::{
    Access, AccessKind, ConversionRule, Convertible, CorrespondingObject, Dependency, Element,
    ObjectKind, ObjectType,
};
pub use evaluation::{EvaluationResult, Priority};
pub use events::{
    CollectsLines, ConditionEvent, EventAggregator, FailureMessages, ViolationDispatcher,
    ViolationHandler,
};
pub use graph::{Cycle, Edge, Graph};
