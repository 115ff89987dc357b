use std::collections::HashSet;
use std::hash::{Hash, Hasher};

use serde::{Deserialize, Serialize};

use crate::domain::{collect_matching, Convertible, CorrespondingObject, ObjectType};

/// Directed relation between two nodes
///
/// Identity is `(from, to)` only. Attachments are the observations that make
/// up the relation (e.g. every access from `from` to `to`); they only grow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Edge<N, A> {
    from: N,
    to: N,
    attachments: Vec<A>,
}

impl<N, A> Edge<N, A> {
    pub fn new(from: N, to: N) -> Self {
        Self {
            from,
            to,
            attachments: Vec::new(),
        }
    }

    pub fn with_attachments(from: N, to: N, attachments: impl IntoIterator<Item = A>) -> Self {
        Self {
            from,
            to,
            attachments: attachments.into_iter().collect(),
        }
    }

    pub fn from(&self) -> &N {
        &self.from
    }

    pub fn to(&self) -> &N {
        &self.to
    }

    pub fn attachments(&self) -> &[A] {
        &self.attachments
    }

    pub fn add_attachment(&mut self, attachment: A) {
        self.attachments.push(attachment);
    }

    pub fn extend_attachments(&mut self, attachments: impl IntoIterator<Item = A>) {
        self.attachments.extend(attachments);
    }

    pub fn into_attachments(self) -> Vec<A> {
        self.attachments
    }
}

impl<N: PartialEq, A> PartialEq for Edge<N, A> {
    fn eq(&self, other: &Self) -> bool {
        self.from == other.from && self.to == other.to
    }
}

impl<N: Eq, A> Eq for Edge<N, A> {}

impl<N: Hash, A> Hash for Edge<N, A> {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.from.hash(state);
        self.to.hash(state);
    }
}

impl<N> Convertible for Edge<N, CorrespondingObject> {
    fn convert_to<T: ObjectType>(&self) -> HashSet<T> {
        collect_matching(&self.attachments).into_iter().collect()
    }
}
