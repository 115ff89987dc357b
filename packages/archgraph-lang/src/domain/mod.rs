//! Domain layer - objects that rule events refer to
//!
//! # Domain Models
//!
//! - `Element`: an analyzed code element (class, module)
//! - `Access`: a raw access from one element to another
//! - `Dependency`: a higher-level relation derived from accesses
//! - `CorrespondingObject`: closed set of everything an event can refer to
//!
//! # Kinds
//!
//! Every payload type declares its [`ObjectKind`] through [`ObjectType`]. The
//! kind carries the static [`ConversionRule`] that decides whether (and into
//! what) an object of that kind can be converted.

mod convert;

pub use convert::{collect_matching, Convertible};

use std::fmt;
use std::hash::Hash;

use serde::{Deserialize, Serialize};

use crate::graph::{Cycle, Edge};

// ═══════════════════════════════════════════════════════════════════════════
// Object kinds
// ═══════════════════════════════════════════════════════════════════════════

/// Runtime tag of a [`CorrespondingObject`] variant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ObjectKind {
    Element,
    Access,
    Dependency,
    Edge,
    Cycle,
    Message,
}

/// How objects of a kind turn into objects of another kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConversionRule {
    /// Not convertible; only a direct kind match selects it
    Terminal,
    /// Converts directly into the listed kinds
    Into(&'static [ObjectKind]),
    /// Converts by flattening its nested parts
    Flatten,
}

impl ObjectKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ObjectKind::Element => "element",
            ObjectKind::Access => "access",
            ObjectKind::Dependency => "dependency",
            ObjectKind::Edge => "edge",
            ObjectKind::Cycle => "cycle",
            ObjectKind::Message => "message",
        }
    }

    /// Conversion table
    pub const fn conversion_rule(self) -> ConversionRule {
        match self {
            ObjectKind::Access => ConversionRule::Into(&[ObjectKind::Dependency]),
            ObjectKind::Edge | ObjectKind::Cycle => ConversionRule::Flatten,
            ObjectKind::Element | ObjectKind::Dependency | ObjectKind::Message => {
                ConversionRule::Terminal
            }
        }
    }

    /// Whether conversion from this kind may ever yield `target`
    ///
    /// `Flatten` kinds answer `true` for every target, since the answer depends
    /// on their parts.
    pub fn may_convert_to(self, target: ObjectKind) -> bool {
        match self.conversion_rule() {
            ConversionRule::Terminal => false,
            ConversionRule::Into(targets) => targets.contains(&target),
            ConversionRule::Flatten => true,
        }
    }
}

impl fmt::Display for ObjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Explicit type descriptor for a [`CorrespondingObject`] payload
///
/// Handlers name the kind they accept by naming a type implementing this
/// trait; nothing is inferred at runtime.
pub trait ObjectType: Clone + Eq + Hash + Into<CorrespondingObject> {
    const KIND: ObjectKind;

    /// Borrow the payload if `object` is of this kind
    fn downcast(object: &CorrespondingObject) -> Option<&Self>;
}

// ═══════════════════════════════════════════════════════════════════════════
// Domain Models
// ═══════════════════════════════════════════════════════════════════════════

/// Analyzed code element, identified by its fully qualified name
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Element {
    pub name: String,
}

impl Element {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl fmt::Display for Element {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.name)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AccessKind {
    FieldAccess,
    MethodCall,
    ConstructorCall,
}

impl AccessKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            AccessKind::FieldAccess => "accesses field of",
            AccessKind::MethodCall => "calls method of",
            AccessKind::ConstructorCall => "calls constructor of",
        }
    }
}

/// Raw access observed in code
///
/// Two accesses between the same elements on different lines are distinct.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Access {
    pub origin: Element,
    pub target: Element,
    pub kind: AccessKind,
    /// Source line of the access (1-indexed)
    pub line: u32,
}

impl Access {
    pub fn new(origin: Element, target: Element, kind: AccessKind, line: u32) -> Self {
        Self {
            origin,
            target,
            kind,
            line,
        }
    }

    /// The dependency this access is evidence of
    pub fn to_dependency(&self) -> Dependency {
        Dependency::new(self.origin.clone(), self.target.clone(), self.to_string())
    }
}

impl fmt::Display for Access {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {} {} (line {})",
            self.origin,
            self.kind.as_str(),
            self.target,
            self.line
        )
    }
}

/// Dependency between two elements
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Dependency {
    pub origin: Element,
    pub target: Element,
    pub description: String,
}

impl Dependency {
    pub fn new(origin: Element, target: Element, description: impl Into<String>) -> Self {
        Self {
            origin,
            target,
            description: description.into(),
        }
    }
}

impl fmt::Display for Dependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.description)
    }
}

/// Everything a [`ConditionEvent`](crate::ConditionEvent) can refer to
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum CorrespondingObject {
    Element(Element),
    Access(Access),
    Dependency(Dependency),
    Edge(Edge<Element, CorrespondingObject>),
    Cycle(Cycle),
    /// Free text shown in failure reports
    ///
    /// Has no [`ObjectType`] and converts into nothing, so dispatch never
    /// hands it to a handler.
    Message { text: String },
}

impl CorrespondingObject {
    pub fn message(text: impl Into<String>) -> Self {
        CorrespondingObject::Message { text: text.into() }
    }

    pub fn kind(&self) -> ObjectKind {
        match self {
            CorrespondingObject::Element(_) => ObjectKind::Element,
            CorrespondingObject::Access(_) => ObjectKind::Access,
            CorrespondingObject::Dependency(_) => ObjectKind::Dependency,
            CorrespondingObject::Edge(_) => ObjectKind::Edge,
            CorrespondingObject::Cycle(_) => ObjectKind::Cycle,
            CorrespondingObject::Message { .. } => ObjectKind::Message,
        }
    }

    /// Borrow as `T` if this object is of `T`'s kind
    pub fn downcast<T: ObjectType>(&self) -> Option<&T> {
        T::downcast(self)
    }
}

impl fmt::Display for CorrespondingObject {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CorrespondingObject::Element(element) => write!(f, "{}", element),
            CorrespondingObject::Access(access) => write!(f, "{}", access),
            CorrespondingObject::Dependency(dependency) => write!(f, "{}", dependency),
            CorrespondingObject::Edge(edge) => write!(f, "{} -> {}", edge.from(), edge.to()),
            CorrespondingObject::Cycle(cycle) => write!(f, "{}", cycle),
            CorrespondingObject::Message { text } => f.write_str(text),
        }
    }
}

macro_rules! object_type {
    ($ty:ty, $variant:ident) => {
        impl ObjectType for $ty {
            const KIND: ObjectKind = ObjectKind::$variant;

            fn downcast(object: &CorrespondingObject) -> Option<&Self> {
                match object {
                    CorrespondingObject::$variant(inner) => Some(inner),
                    _ => None,
                }
            }
        }

        impl From<$ty> for CorrespondingObject {
            fn from(value: $ty) -> Self {
                CorrespondingObject::$variant(value)
            }
        }
    };
}

object_type!(Element, Element);
object_type!(Access, Access);
object_type!(Dependency, Dependency);
object_type!(Edge<Element, CorrespondingObject>, Edge);
object_type!(Cycle, Cycle);
