// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type resolution.
//!
//! Maps a [`TypeRef`] to the concrete nominal type it denotes, or to
//! nothing when it cannot be named (type variables, opaque types).
//!
//! # Resolution Table
//!
//! | `TypeRef` | Result |
//! |-----------|--------|
//! | `Named { path, args: [] }` | `Class(path)` |
//! | `Named { path, args: [..] }` | resolution of the raw `Named { path }` |
//! | `Array(T)` | `Array(resolve(T))`, or nothing if `T` does not resolve |
//! | `Variable(_)` | nothing |
//! | `Void`, `Opaque(_)` | nothing |

use crate::metadata::{TypeRef, last_segment};

/// Collection types whose first type argument is the element type.
pub const COLLECTIONS: &[&str] = &[
    "Vec",
    "VecDeque",
    "LinkedList",
    "HashSet",
    "BTreeSet",
    "BinaryHeap",
    "IndexSet"
];

/// A resolved, nominal type.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum ConcreteType {
    /// Nominal class, path as written.
    Class(String),

    /// Array of a resolved component.
    Array(Box<ConcreteType>)
}

impl ConcreteType {
    /// Simple name, `[]`-suffixed for arrays.
    #[must_use]
    pub fn simple_name(&self) -> String {
        match self {
            Self::Class(path) => last_segment(path).to_string(),
            Self::Array(component) => format!("{}[]", component.simple_name())
        }
    }

    /// Whether this is a collection class from [`COLLECTIONS`].
    #[must_use]
    pub fn is_collection(&self) -> bool {
        matches!(self, Self::Class(path) if is_collection_path(path))
    }

    /// Whether this is an array or a collection.
    #[must_use]
    pub fn is_container(&self) -> bool {
        matches!(self, Self::Array(_)) || self.is_collection()
    }
}

/// Resolve a type reference.
///
/// Pure and total; recursion only descends into array components and
/// raw forms, so it terminates on every input.
#[must_use]
pub fn resolve(ty: &TypeRef) -> Option<ConcreteType> {
    match ty {
        TypeRef::Named { path, args } if !args.is_empty() => resolve(&TypeRef::named(path.as_str())),
        TypeRef::Named { path, .. } => Some(ConcreteType::Class(path.clone())),
        TypeRef::Array(component) => {
            resolve(component).map(|component| ConcreteType::Array(Box::new(component)))
        }
        TypeRef::Variable(_) | TypeRef::Void | TypeRef::Opaque(_) => None
    }
}

/// Element type reference of a container, one level down.
///
/// Arrays yield their component; collections their first type argument.
/// Anything else, including a raw collection, yields `None`.
#[must_use]
pub fn element_type_ref(ty: &TypeRef) -> Option<&TypeRef> {
    match ty {
        TypeRef::Array(component) => Some(component),
        TypeRef::Named { path, args } if is_collection_path(path) => args.first(),
        _ => None
    }
}

/// Target type of a field when its marker names none.
///
/// The element type for arrays and collections, the declared type
/// otherwise.
///
/// ```
/// use jdl_reverse::{
///     metadata::TypeRef,
///     model::resolve::{ConcreteType, extract_element_type}
/// };
///
/// let orders = TypeRef::array(TypeRef::named("Order"));
/// assert_eq!(
///     extract_element_type(&orders),
///     Some(ConcreteType::Class("Order".to_string()))
/// );
/// ```
#[must_use]
pub fn extract_element_type(ty: &TypeRef) -> Option<ConcreteType> {
    resolve(element_type_ref(ty).unwrap_or(ty))
}

fn is_collection_path(path: &str) -> bool {
    COLLECTIONS.contains(&last_segment(path))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn class(path: &str) -> ConcreteType {
        ConcreteType::Class(path.to_string())
    }

    #[test]
    fn concrete_class_resolves_to_itself() {
        assert_eq!(resolve(&TypeRef::named("Order")), Some(class("Order")));
    }

    #[test]
    fn parameterized_resolves_to_raw() {
        let ty = TypeRef::generic("std::collections::HashSet", vec![TypeRef::named("Tag")]);
        assert_eq!(resolve(&ty), Some(class("std::collections::HashSet")));
    }

    #[test]
    fn array_of_resolvable_component() {
        let ty = TypeRef::array(TypeRef::generic("Vec", vec![TypeRef::named("Order")]));
        assert_eq!(
            resolve(&ty),
            Some(ConcreteType::Array(Box::new(class("Vec"))))
        );
    }

    #[test]
    fn array_of_variable_is_unresolved() {
        assert_eq!(resolve(&TypeRef::array(TypeRef::variable("T"))), None);
    }

    #[test]
    fn unresolvable_references() {
        assert_eq!(resolve(&TypeRef::variable("T")), None);
        assert_eq!(resolve(&TypeRef::Void), None);
        assert_eq!(resolve(&TypeRef::Opaque("(i32, i32)".into())), None);
    }

    #[test]
    fn container_detection() {
        assert!(class("std::vec::Vec").is_collection());
        assert!(class("IndexSet").is_container());
        assert!(!class("HashMap").is_container());
        assert!(ConcreteType::Array(Box::new(class("Order"))).is_container());
    }

    #[test]
    fn element_type_of_collection() {
        let ty = TypeRef::generic("Vec", vec![TypeRef::named("crate::model::Order")]);
        assert_eq!(extract_element_type(&ty), Some(class("crate::model::Order")));
    }

    #[test]
    fn element_type_of_plain_type_is_the_type() {
        assert_eq!(extract_element_type(&TypeRef::named("Customer")), Some(class("Customer")));
        let map = TypeRef::generic("HashMap", vec![TypeRef::named("K"), TypeRef::named("V")]);
        assert_eq!(extract_element_type(&map), Some(class("HashMap")));
    }

    #[test]
    fn element_type_of_generic_collection_is_unresolved() {
        let ty = TypeRef::generic("Vec", vec![TypeRef::variable("T")]);
        assert_eq!(extract_element_type(&ty), None);
    }

    #[test]
    fn raw_collection_has_no_element_ref() {
        assert_eq!(element_type_ref(&TypeRef::named("Vec")), None);
        assert_eq!(extract_element_type(&TypeRef::named("Vec")), Some(class("Vec")));
    }

    #[test]
    fn simple_names() {
        assert_eq!(class("crate::model::Order").simple_name(), "Order");
        assert_eq!(ConcreteType::Array(Box::new(class("u8"))).simple_name(), "u8[]");
    }
}
