// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field classification.
//!
//! Decides, for one field of one candidate class, what the field
//! contributes to the model. Classification is exhaustive and mutually
//! exclusive: every field lands in exactly one [`Classification`].
//!
//! # Rules
//!
//! Evaluated in order, first match wins:
//!
//! | # | Condition | Result |
//! |---|-----------|--------|
//! | 1 | synthetic or static | [`Classification::Skip`] |
//! | 2 | `#[transient]` | [`Classification::Skip`] |
//! | 3 | relationship marker | [`Classification::Relationship`] |
//! | 4 | type names a registered enum | [`Classification::EnumField`] |
//! | 5 | anything else | [`Classification::Attribute`] |
//!
//! # Relationship Targets
//!
//! ```text
//! target_entity = ..   (not `()`)  ──►  resolve(target_entity)
//! otherwise                        ──►  extract_element_type(field type)
//!        │
//!        ▼
//! still an array or collection?    ──►  unwrap one more level
//!        │
//!        ▼
//! simple name, or "" when unresolved
//! ```
//!
//! With several relationship markers on one field the first one declared
//! decides; the model builder reports the conflict.

use super::{
    descriptor::{AttributeDescriptor, RelationshipDescriptor},
    resolve::{ConcreteType, element_type_ref, extract_element_type, resolve}
};
use crate::metadata::{ClassId, ClassMetadata, FieldMetadata, RelationMarker, TypeRef, TypeRegistry};

/// Why a field contributes nothing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Compiler-generated (`PhantomData`).
    Synthetic,

    /// Associated constant or enum variant.
    Static,

    /// Marked `#[transient]`.
    Transient
}

/// What one field contributes to the model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Classification {
    /// Nothing.
    Skip(SkipReason),

    /// Enum-valued field; the enum collector picks it up.
    EnumField(ClassId),

    /// One declared end of a relationship.
    Relationship(RelationshipDescriptor),

    /// Plain attribute.
    Attribute(AttributeDescriptor)
}

/// Classifies fields against the classes known to a run.
#[derive(Debug, Clone, Copy)]
pub struct FieldClassifier<'a> {
    registry: &'a TypeRegistry
}

impl<'a> FieldClassifier<'a> {
    /// Classifier looking enum types up in `registry`.
    #[must_use]
    pub const fn new(registry: &'a TypeRegistry) -> Self {
        Self {
            registry
        }
    }

    /// Classify `field`, declared by `entity`.
    #[must_use]
    pub fn classify(&self, entity: &ClassMetadata, field: &FieldMetadata) -> Classification {
        if field.modifiers.is_synthetic {
            return Classification::Skip(SkipReason::Synthetic);
        }
        if field.modifiers.is_static {
            return Classification::Skip(SkipReason::Static);
        }
        if field.transient {
            return Classification::Skip(SkipReason::Transient);
        }

        if let Some(marker) = field.relation() {
            return Classification::Relationship(relationship(entity, field, marker));
        }

        if let Some(id) = self.registry.enum_for(&field.ty) {
            return Classification::EnumField(id);
        }

        Classification::Attribute(AttributeDescriptor::new(&field.name, field.ty.simple_name()))
    }
}

/// Build the descriptor of a relationship-bearing field.
fn relationship(entity: &ClassMetadata, field: &FieldMetadata, marker: &RelationMarker) -> RelationshipDescriptor {
    let target_entity = resolve_target(marker, &field.ty)
        .map(|target| target.simple_name())
        .unwrap_or_default();

    RelationshipDescriptor {
        kind:          marker.kind,
        source_entity: entity.name.clone(),
        source_field:  field.name.clone(),
        target_entity,
        mapped_by:     marker.mapped_by.clone().unwrap_or_default()
    }
}

/// Target type of a relationship marker on a field of type `field_ty`.
///
/// Applies to every kind; a to-one field declared as a collection is
/// unwrapped the same way as a to-many one.
#[must_use]
pub fn resolve_target(marker: &RelationMarker, field_ty: &TypeRef) -> Option<ConcreteType> {
    let declared = marker.target_entity.as_ref().filter(|target| !target.is_void());

    let (cursor, target) = match declared {
        Some(target) => (target, resolve(target)),
        None => (
            element_type_ref(field_ty).unwrap_or(field_ty),
            extract_element_type(field_ty)
        )
    };

    match target {
        Some(found) if found.is_container() => {
            match element_type_ref(cursor).or_else(|| element_type_ref(field_ty)) {
                Some(inner) => resolve(inner),
                None => Some(found)
            }
        }
        other => other
    }
}
