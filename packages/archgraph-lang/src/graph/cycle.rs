use std::collections::HashSet;
use std::fmt;

use serde::{Deserialize, Serialize};

use super::Edge;
use crate::domain::{collect_matching, Convertible, CorrespondingObject, Element, ObjectType};

/// Closed path of edges, e.g. a dependency cycle between slices
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "CycleEdges")]
pub struct Cycle {
    edges: Vec<Edge<Element, CorrespondingObject>>,
}

/// Unchecked wire form, validated through [`Cycle::new`]
#[derive(Deserialize)]
struct CycleEdges {
    edges: Vec<Edge<Element, CorrespondingObject>>,
}

impl TryFrom<CycleEdges> for Cycle {
    type Error = String;

    fn try_from(raw: CycleEdges) -> Result<Self, Self::Error> {
        let len = raw.edges.len();
        Cycle::new(raw.edges).ok_or_else(|| format!("{} edge(s) do not form a closed path", len))
    }
}

impl Cycle {
    /// Build a cycle from consecutive edges
    ///
    /// Returns `None` unless every edge starts where the previous one ended
    /// and the last edge returns to the start of the first.
    pub fn new(edges: Vec<Edge<Element, CorrespondingObject>>) -> Option<Self> {
        let first = edges.first()?;
        let last = edges.last()?;
        if last.to() != first.from() {
            return None;
        }
        let connected = edges.windows(2).all(|pair| pair[0].to() == pair[1].from());
        connected.then_some(Self { edges })
    }

    pub fn edges(&self) -> &[Edge<Element, CorrespondingObject>] {
        &self.edges
    }
}

impl fmt::Display for Cycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for edge in &self.edges {
            write!(f, "{} -> ", edge.from())?;
        }
        match self.edges.first() {
            Some(first) => write!(f, "{}", first.from()),
            None => Ok(()),
        }
    }
}

impl Convertible for Cycle {
    fn convert_to<T: ObjectType>(&self) -> HashSet<T> {
        let parts: Vec<CorrespondingObject> =
            self.edges.iter().cloned().map(CorrespondingObject::from).collect();
        collect_matching(&parts).into_iter().collect()
    }
}
