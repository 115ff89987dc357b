//! Conversion of corresponding objects into a requested kind

use std::collections::HashSet;

use super::{Access, CorrespondingObject, ObjectKind, ObjectType};

/// Objects that can produce the objects of kind `T` they stand for
///
/// Absence of a match is not an error: the result is simply empty.
pub trait Convertible {
    fn convert_to<T: ObjectType>(&self) -> HashSet<T>;
}

/// Select the objects of kind `T` from `objects`
///
/// An object of kind `T` is taken as is; any other object is converted if its
/// kind allows it. Duplicates collapse, first occurrence wins the position.
pub fn collect_matching<'a, T, I>(objects: I) -> Vec<T>
where
    T: ObjectType,
    I: IntoIterator<Item = &'a CorrespondingObject>,
{
    let mut seen = HashSet::new();
    let mut result = Vec::new();
    let mut push = |item: T| {
        if seen.insert(item.clone()) {
            result.push(item);
        }
    };

    for object in objects {
        if let Some(matched) = T::downcast(object) {
            push(matched.clone());
        } else if object.kind().may_convert_to(T::KIND) {
            for converted in object.convert_to::<T>() {
                push(converted);
            }
        }
    }
    result
}

impl Convertible for CorrespondingObject {
    fn convert_to<T: ObjectType>(&self) -> HashSet<T> {
        match self {
            CorrespondingObject::Access(access) => access.convert_to(),
            CorrespondingObject::Edge(edge) => edge.convert_to(),
            CorrespondingObject::Cycle(cycle) => cycle.convert_to(),
            CorrespondingObject::Element(_)
            | CorrespondingObject::Dependency(_)
            | CorrespondingObject::Message { .. } => HashSet::new(),
        }
    }
}

impl Convertible for Access {
    fn convert_to<T: ObjectType>(&self) -> HashSet<T> {
        if !ObjectKind::Access.may_convert_to(T::KIND) {
            return HashSet::new();
        }
        let dependency = CorrespondingObject::from(self.to_dependency());
        T::downcast(&dependency).cloned().into_iter().collect()
    }
}
