// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Typed descriptors accumulated by the model builder.
//!
//! Descriptors reference entities by simple name only; nothing here owns
//! another class. All of them are created once and never mutated after
//! the builder returns.

use crate::metadata::RelationKind;

/// Plain attribute of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AttributeDescriptor {
    /// Field name.
    pub name: String,

    /// Simple, unqualified type name.
    pub type_name: String
}

impl AttributeDescriptor {
    /// Create an attribute descriptor.
    #[must_use]
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name:      name.into(),
            type_name: type_name.into()
        }
    }
}

/// One candidate class and its plain attributes.
///
/// The relationships an entity declares are not stored here. They live in
/// [`Model::relationships`](crate::model::Model::relationships) in field
/// order, and [`Model::relationships_declared_by`](crate::model::Model::relationships_declared_by)
/// yields those of one entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDescriptor {
    /// Simple class name.
    pub name: String,

    /// Plain attributes in declaration order.
    pub attributes: Vec<AttributeDescriptor>
}

impl EntityDescriptor {
    /// Entity without attributes.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name:       name.into(),
            attributes: Vec::new()
        }
    }
}

/// Enum type referenced by at least one candidate field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EnumDescriptor {
    /// Simple enum name.
    pub name: String,

    /// Constant names in declaration order.
    pub constants: Vec<String>
}

/// One end of a relationship, as declared by `source_entity`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RelationshipDescriptor {
    /// Multiplicity.
    pub kind: RelationKind,

    /// Declaring entity.
    pub source_entity: String,

    /// Declaring field.
    pub source_field: String,

    /// Target entity simple name, empty when unresolved.
    pub target_entity: String,

    /// Owning field on the other side, empty when this side owns.
    pub mapped_by: String
}

impl RelationshipDescriptor {
    /// Whether a back-reference owner is named.
    #[must_use]
    pub fn has_mapped_by(&self) -> bool {
        !self.mapped_by.is_empty()
    }

    /// Whether the target entity resolved.
    #[must_use]
    pub fn is_resolved(&self) -> bool {
        !self.target_entity.is_empty()
    }
}
