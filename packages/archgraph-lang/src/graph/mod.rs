//! Relations between analyzed elements
//!
//! - [`Edge`]: one directed relation, carrying every observation of it
//! - [`Cycle`]: a closed path of edges
//! - [`Graph`]: merges repeated observations of the same relation into a
//!   single edge

mod cycle;
mod edge;

pub use cycle::Cycle;
pub use edge::Edge;

use std::collections::HashMap;
use std::hash::Hash;

/// Edges keyed by `(from, to)`
///
/// Adding an edge that already exists appends its attachments to the existing
/// one instead of replacing it.
#[derive(Debug, Clone)]
pub struct Graph<N, A> {
    edges: HashMap<(N, N), Edge<N, A>>,
}

impl<N, A> Default for Graph<N, A> {
    fn default() -> Self {
        Self {
            edges: HashMap::new(),
        }
    }
}

impl<N: Clone + Eq + Hash, A> Graph<N, A> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_edge(&mut self, edge: Edge<N, A>) {
        let key = (edge.from().clone(), edge.to().clone());
        match self.edges.get_mut(&key) {
            Some(existing) => existing.extend_attachments(edge.into_attachments()),
            None => {
                self.edges.insert(key, edge);
            }
        }
    }

    pub fn edge(&self, from: &N, to: &N) -> Option<&Edge<N, A>> {
        self.edges.get(&(from.clone(), to.clone()))
    }

    pub fn outgoing<'a>(&'a self, from: &'a N) -> impl Iterator<Item = &'a Edge<N, A>> + 'a {
        self.edges.values().filter(move |edge| edge.from() == from)
    }

    pub fn edges(&self) -> impl Iterator<Item = &Edge<N, A>> {
        self.edges.values()
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_add_edge_merges_attachments() {
        let mut graph: Graph<&str, u32> = Graph::new();
        graph.add_edge(Edge::with_attachments("A", "B", vec![1]));
        graph.add_edge(Edge::with_attachments("A", "B", vec![2, 3]));
        graph.add_edge(Edge::with_attachments("A", "C", vec![4]));

        assert_eq!(graph.len(), 2);
        assert_eq!(graph.edge(&"A", &"B").unwrap().attachments(), &[1, 2, 3]);
        assert_eq!(graph.outgoing(&"A").count(), 2);
        assert_eq!(graph.outgoing(&"B").count(), 0);
    }
}
