//! Identity handle for one analyzed set of code elements

use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::Arc;

use archgraph_lang::Element;

#[derive(Debug)]
struct SnapshotInner {
    description: String,
    elements: Vec<Element>,
}

/// Opaque handle for one complete set of analyzed code elements
///
/// # Identity
///
/// Equality and hashing are by reference: clones of a handle are equal, two
/// snapshots built from equal inputs are not.
///
/// ```rust
/// use archgraph_extension::Snapshot;
///
/// let first = Snapshot::new("core", vec![]);
/// let second = Snapshot::new("core", vec![]);
/// assert_eq!(first, first.clone());
/// assert_ne!(first, second);
/// ```
#[derive(Clone)]
pub struct Snapshot {
    inner: Arc<SnapshotInner>,
}

impl Snapshot {
    pub fn new(description: impl Into<String>, elements: Vec<Element>) -> Self {
        Self {
            inner: Arc::new(SnapshotInner {
                description: description.into(),
                elements,
            }),
        }
    }

    pub fn description(&self) -> &str {
        &self.inner.description
    }

    pub fn elements(&self) -> &[Element] {
        &self.inner.elements
    }

    fn address(&self) -> usize {
        Arc::as_ptr(&self.inner) as usize
    }
}

impl PartialEq for Snapshot {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

impl Eq for Snapshot {}

impl Hash for Snapshot {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.address().hash(state);
    }
}

impl fmt::Debug for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Snapshot")
            .field("description", &self.inner.description)
            .field("elements", &self.inner.elements.len())
            .field("address", &format_args!("{:#x}", self.address()))
            .finish()
    }
}

impl fmt::Display for Snapshot {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Snapshot '{}' ({} elements)",
            self.inner.description,
            self.inner.elements.len()
        )
    }
}
