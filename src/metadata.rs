// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Class metadata model.
//!
//! This is the only input the extraction engine understands. Front ends
//! (see [`crate::source`]) lower whatever they read into these structures,
//! and everything in [`crate::model`] works on them alone.
//!
//! # Data Structures
//!
//! ```text
//! TypeRegistry
//! └── ClassMetadata            (one per declared struct or enum)
//!     ├── name: String         (simple name, e.g. "Customer")
//!     ├── module: String       (e.g. "crate::model")
//!     ├── kind: ClassKind      (Struct | Enum)
//!     ├── is_entity: bool      (#[entity] present)
//!     ├── supertype: Option    (#[extends(Base)])
//!     └── fields: Vec<FieldMetadata>
//!         └── FieldMetadata
//!             ├── name: String
//!             ├── ty: TypeRef          (Named | Array | Variable | Void | Opaque)
//!             ├── modifiers: Modifiers (static, final, synthetic)
//!             ├── transient: bool
//!             └── relations: Vec<RelationMarker>
//! ```

use std::{collections::HashMap, fmt};

use indexmap::IndexMap;

/// Relationship multiplicity declared by a field marker.
///
/// | Kind | `from_many` | `to_many` | Marker |
/// |------|-------------|-----------|--------|
/// | `OneToMany` | false | true | `#[one_to_many]` |
/// | `OneToOne` | false | false | `#[one_to_one]` |
/// | `ManyToMany` | true | true | `#[many_to_many]` |
/// | `ManyToOne` | true | false | `#[many_to_one]` |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RelationKind {
    /// `#[one_to_one]`
    OneToOne,

    /// `#[one_to_many]`
    OneToMany,

    /// `#[many_to_one]`
    ManyToOne,

    /// `#[many_to_many]`
    ManyToMany
}

impl RelationKind {
    /// Every kind, in the order markers are looked up on a field.
    pub const ALL: [Self; 4] = [
        Self::OneToOne,
        Self::OneToMany,
        Self::ManyToOne,
        Self::ManyToMany
    ];

    /// Whether the declaring side is the "many" side.
    #[must_use]
    pub const fn from_many(self) -> bool {
        matches!(self, Self::ManyToOne | Self::ManyToMany)
    }

    /// Whether the target side is the "many" side.
    #[must_use]
    pub const fn to_many(self) -> bool {
        matches!(self, Self::OneToMany | Self::ManyToMany)
    }

    /// Keyword used in `relationship <Kind> { .. }` blocks.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::OneToOne => "OneToOne",
            Self::OneToMany => "OneToMany",
            Self::ManyToOne => "ManyToOne",
            Self::ManyToMany => "ManyToMany"
        }
    }

    /// Attribute name of the marker in Rust source.
    #[must_use]
    pub const fn marker(self) -> &'static str {
        match self {
            Self::OneToOne => "one_to_one",
            Self::OneToMany => "one_to_many",
            Self::ManyToOne => "many_to_one",
            Self::ManyToMany => "many_to_many"
        }
    }

    /// Find the kind whose marker attribute is `name`.
    #[must_use]
    pub fn from_marker(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|kind| kind.marker() == name)
    }
}

impl fmt::Display for RelationKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A type reference as written on a field, after front-end lowering.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum TypeRef {
    /// Nominal type, possibly parameterized (`Order`, `Vec<Order>`).
    Named {
        /// Path as written (`Order`, `crate::model::Order`).
        path: String,

        /// Type arguments, empty for a raw type.
        args: Vec<TypeRef>
    },

    /// Array or slice of the component type.
    Array(Box<TypeRef>),

    /// Unbound type parameter of the declaring item.
    Variable(String),

    /// The unit type, used as the "no explicit target" sentinel.
    Void,

    /// Anything the model cannot name (tuples, fn pointers, ...).
    Opaque(String)
}

impl TypeRef {
    /// Raw nominal type.
    #[must_use]
    pub fn named(path: impl Into<String>) -> Self {
        Self::Named {
            path: path.into(),
            args: Vec::new()
        }
    }

    /// Parameterized nominal type.
    #[must_use]
    pub fn generic(path: impl Into<String>, args: Vec<TypeRef>) -> Self {
        Self::Named {
            path: path.into(),
            args
        }
    }

    /// Array of `component`.
    #[must_use]
    pub fn array(component: TypeRef) -> Self {
        Self::Array(Box::new(component))
    }

    /// Type variable named `name`.
    #[must_use]
    pub fn variable(name: impl Into<String>) -> Self {
        Self::Variable(name.into())
    }

    /// Whether this is the void sentinel.
    #[must_use]
    pub const fn is_void(&self) -> bool {
        matches!(self, Self::Void)
    }

    /// Simple name of the erased type.
    ///
    /// Generic arguments are dropped and paths are cut to their last
    /// segment; arrays append `[]` to their component's simple name.
    ///
    /// ```
    /// use jdl_reverse::metadata::TypeRef;
    ///
    /// let ty = TypeRef::generic("std::vec::Vec", vec![TypeRef::named("Order")]);
    /// assert_eq!(ty.simple_name(), "Vec");
    /// assert_eq!(TypeRef::array(TypeRef::named("u8")).simple_name(), "u8[]");
    /// ```
    #[must_use]
    pub fn simple_name(&self) -> String {
        match self {
            Self::Named { path, .. } => last_segment(path).to_string(),
            Self::Array(component) => format!("{}[]", component.simple_name()),
            Self::Variable(name) | Self::Opaque(name) => name.clone(),
            Self::Void => "()".to_string()
        }
    }
}

/// Last `::`-separated segment of a path.
#[must_use]
pub fn last_segment(path: &str) -> &str {
    path.rsplit("::").next().unwrap_or(path)
}

/// Declaration modifiers of a field.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Modifiers {
    /// Belongs to the type rather than to instances.
    pub is_static: bool,

    /// Cannot be reassigned.
    pub is_final: bool,

    /// Not written by the author (compiler or macro support field).
    pub is_synthetic: bool
}

impl Modifiers {
    /// Ordinary instance field.
    pub const INSTANCE: Self = Self {
        is_static:    false,
        is_final:     false,
        is_synthetic: false
    };

    /// Static final field: associated constants and enum variants.
    pub const CONSTANT: Self = Self {
        is_static:    true,
        is_final:     true,
        is_synthetic: false
    };

    /// Synthetic instance field.
    pub const SYNTHETIC: Self = Self {
        is_static:    false,
        is_final:     false,
        is_synthetic: true
    };
}

/// A relationship marker attached to a field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationMarker {
    /// Multiplicity.
    pub kind: RelationKind,

    /// Explicit target type (`target_entity = "Order"`).
    pub target_entity: Option<TypeRef>,

    /// Owning field on the other side (`mapped_by = "customer"`).
    pub mapped_by: Option<String>
}

impl RelationMarker {
    /// Marker without arguments.
    #[must_use]
    pub const fn new(kind: RelationKind) -> Self {
        Self {
            kind,
            target_entity: None,
            mapped_by:     None
        }
    }

    /// Set the explicit target type.
    #[must_use]
    pub fn with_target(mut self, target: TypeRef) -> Self {
        self.target_entity = Some(target);
        self
    }

    /// Set the `mapped_by` key.
    #[must_use]
    pub fn with_mapped_by(mut self, mapped_by: impl Into<String>) -> Self {
        self.mapped_by = Some(mapped_by.into());
        self
    }
}

/// One declared field of a class.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldMetadata {
    /// Field name.
    pub name: String,

    /// Declared type.
    pub ty: TypeRef,

    /// Declaration modifiers.
    pub modifiers: Modifiers,

    /// `#[transient]` present.
    pub transient: bool,

    /// Relationship markers in declaration order.
    pub relations: Vec<RelationMarker>
}

impl FieldMetadata {
    /// Instance field without markers.
    #[must_use]
    pub fn new(name: impl Into<String>, ty: TypeRef) -> Self {
        Self {
            name:      name.into(),
            ty,
            modifiers: Modifiers::INSTANCE,
            transient: false,
            relations: Vec::new()
        }
    }

    /// Static final field.
    #[must_use]
    pub fn constant(name: impl Into<String>, ty: TypeRef) -> Self {
        Self::new(name, ty).with_modifiers(Modifiers::CONSTANT)
    }

    /// Replace the modifiers.
    #[must_use]
    pub const fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Mark as transient.
    #[must_use]
    pub const fn transient(mut self) -> Self {
        self.transient = true;
        self
    }

    /// Attach a relationship marker.
    #[must_use]
    pub fn with_relation(mut self, marker: RelationMarker) -> Self {
        self.relations.push(marker);
        self
    }

    /// The marker that decides the relationship: the first one declared.
    #[must_use]
    pub fn relation(&self) -> Option<&RelationMarker> {
        self.relations.first()
    }
}

/// Declaration kind of a class.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ClassKind {
    /// Struct (entity candidates and plain types).
    Struct,

    /// Enum (constant holders).
    Enum
}

/// One declared struct or enum.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassMetadata {
    /// Simple name.
    pub name: String,

    /// Declaring module, `crate::a::b`.
    pub module: String,

    /// Struct or enum.
    pub kind: ClassKind,

    /// `#[entity]` present.
    pub is_entity: bool,

    /// Path named by `#[extends(..)]`.
    pub supertype: Option<String>,

    /// Declared fields, in declaration order.
    pub fields: Vec<FieldMetadata>
}

impl ClassMetadata {
    /// Struct without fields or markers.
    #[must_use]
    pub fn new_struct(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            name:      name.into(),
            module:    module.into(),
            kind:      ClassKind::Struct,
            is_entity: false,
            supertype: None,
            fields:    Vec::new()
        }
    }

    /// Enum without constants.
    #[must_use]
    pub fn new_enum(module: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            kind: ClassKind::Enum,
            ..Self::new_struct(module, name)
        }
    }

    /// Mark as entity.
    #[must_use]
    pub const fn entity(mut self) -> Self {
        self.is_entity = true;
        self
    }

    /// Declare a supertype.
    #[must_use]
    pub fn extends(mut self, base: impl Into<String>) -> Self {
        self.supertype = Some(base.into());
        self
    }

    /// Append a field.
    #[must_use]
    pub fn with_field(mut self, field: FieldMetadata) -> Self {
        self.fields.push(field);
        self
    }

    /// `module::Name`.
    #[must_use]
    pub fn qualified_name(&self) -> String {
        format!("{}::{}", self.module, self.name)
    }

    /// Whether this is an enum.
    #[must_use]
    pub const fn is_enum(&self) -> bool {
        matches!(self.kind, ClassKind::Enum)
    }
}

/// Handle to a class inside a [`TypeRegistry`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ClassId(usize);

/// Every class known to one run, keyed by qualified name.
///
/// Registration order is preserved and is the iteration order. Lookups by
/// a field's type go through the simple name; when two classes share one,
/// the first registered wins.
#[derive(Debug, Clone, Default)]
pub struct TypeRegistry {
    classes:        IndexMap<String, ClassMetadata>,
    by_simple_name: HashMap<String, ClassId>
}

impl TypeRegistry {
    /// Empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry holding `classes` in order.
    #[must_use]
    pub fn from_classes(classes: impl IntoIterator<Item = ClassMetadata>) -> Self {
        let mut registry = Self::new();
        for class in classes {
            registry.register(class);
        }
        registry
    }

    /// Add a class and return its handle.
    ///
    /// Registering the same qualified name twice replaces the earlier
    /// declaration in place and keeps its handle.
    pub fn register(&mut self, class: ClassMetadata) -> ClassId {
        let simple = class.name.clone();
        let (index, _) = self.classes.insert_full(class.qualified_name(), class);
        let id = ClassId(index);
        match self.by_simple_name.get(&simple) {
            Some(existing) if *existing != id => {
                tracing::debug!(
                    name = %simple,
                    kept = %self.classes[existing.0].qualified_name(),
                    shadowed = %self.classes[index].qualified_name(),
                    "simple name declared more than once"
                );
            }
            Some(_) => {}
            None => {
                self.by_simple_name.insert(simple, id);
            }
        }
        id
    }

    /// Class behind `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was issued by another registry.
    #[must_use]
    pub fn get(&self, id: ClassId) -> &ClassMetadata {
        &self.classes[id.0]
    }

    /// Handle of the class a type path names, by its last segment.
    #[must_use]
    pub fn lookup(&self, path: &str) -> Option<ClassId> {
        self.by_simple_name.get(last_segment(path)).copied()
    }

    /// Handle of the enum a field type names, if it names one.
    ///
    /// Only a nominal type can be an enum; arrays of enums are not.
    #[must_use]
    pub fn enum_for(&self, ty: &TypeRef) -> Option<ClassId> {
        let TypeRef::Named { path, .. } = ty else {
            return None;
        };
        self.lookup(path).filter(|id| self.get(*id).is_enum())
    }

    /// All classes in registration order.
    pub fn iter(&self) -> impl Iterator<Item = (ClassId, &ClassMetadata)> {
        self.classes
            .values()
            .enumerate()
            .map(|(index, class)| (ClassId(index), class))
    }

    /// Number of classes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.classes.len()
    }

    /// Whether no class is registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn kind_multiplicity_table() {
        assert!(!RelationKind::OneToMany.from_many());
        assert!(RelationKind::OneToMany.to_many());
        assert!(!RelationKind::OneToOne.from_many());
        assert!(!RelationKind::OneToOne.to_many());
        assert!(RelationKind::ManyToMany.from_many());
        assert!(RelationKind::ManyToMany.to_many());
        assert!(RelationKind::ManyToOne.from_many());
        assert!(!RelationKind::ManyToOne.to_many());
    }

    #[test]
    fn kind_from_marker() {
        assert_eq!(
            RelationKind::from_marker("many_to_one"),
            Some(RelationKind::ManyToOne)
        );
        assert_eq!(RelationKind::from_marker("has_many"), None);
    }

    #[test]
    fn simple_names() {
        assert_eq!(TypeRef::named("crate::model::Order").simple_name(), "Order");
        assert_eq!(TypeRef::variable("T").simple_name(), "T");
        assert_eq!(
            TypeRef::array(TypeRef::array(TypeRef::named("i32"))).simple_name(),
            "i32[][]"
        );
        assert_eq!(TypeRef::Void.simple_name(), "()");
        assert_eq!(TypeRef::Opaque("(i32, i32)".into()).simple_name(), "(i32, i32)");
    }

    #[test]
    fn registry_lookup_by_simple_name() {
        let registry = TypeRegistry::from_classes([
            ClassMetadata::new_struct("crate::model", "Customer").entity(),
            ClassMetadata::new_enum("crate::model", "Status")
        ]);

        let customer = registry.lookup("crate::other::Customer").unwrap();
        assert_eq!(registry.get(customer).name, "Customer");
        assert!(registry.enum_for(&TypeRef::named("Status")).is_some());
        assert!(registry.enum_for(&TypeRef::named("Customer")).is_none());
        assert!(
            registry
                .enum_for(&TypeRef::array(TypeRef::named("Status")))
                .is_none()
        );
    }

    #[test]
    fn first_simple_name_wins() {
        let registry = TypeRegistry::from_classes([
            ClassMetadata::new_enum("crate::a", "Status"),
            ClassMetadata::new_struct("crate::b", "Status")
        ]);

        assert_eq!(registry.len(), 2);
        let id = registry.lookup("Status").unwrap();
        assert_eq!(registry.get(id).module, "crate::a");
    }

    #[test]
    fn first_marker_decides() {
        let field = FieldMetadata::new("owner", TypeRef::named("User"))
            .with_relation(RelationMarker::new(RelationKind::ManyToOne))
            .with_relation(RelationMarker::new(RelationKind::OneToOne));

        assert_eq!(field.relation().unwrap().kind, RelationKind::ManyToOne);
    }
}
