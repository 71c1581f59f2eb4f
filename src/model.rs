// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Model building.
//!
//! Turns a [`CandidateSet`] into typed descriptors: the enums the
//! candidates use, one entity per candidate with its plain attributes, and
//! every declared relationship end. Rendering is left to
//! [`emit`](crate::emit).
//!
//! # Architecture
//!
//! ```text
//! model.rs (coordinator, Model::build)
//! ├── resolve.rs     - TypeRef -> ConcreteType, element types
//! ├── classify.rs    - one field -> Skip | EnumField | Relationship | Attribute
//! ├── collect.rs     - distinct enums, first-seen order
//! └── descriptor.rs  - Entity/Attribute/Enum/Relationship descriptors
//! ```
//!
//! # Pipeline
//!
//! ```text
//! CandidateSet ──► collect_enums ───────────────────────────► enums
//!      │
//!      └─► for class, for field ──► FieldClassifier::classify
//!                                        │
//!                       Attribute ───────┼──► entities[class].attributes
//!                       Relationship ────┼──► relationships (+ advisories)
//!                       EnumField, Skip ─┘    (nothing)
//! ```
//!
//! Building never fails: unresolvable targets become empty names and
//! questionable declarations become [`Advisory`] entries.

pub mod classify;
pub mod collect;
pub mod descriptor;
pub mod resolve;

use std::fmt;

use tracing::{debug, info, warn};

pub use self::{
    classify::{Classification, FieldClassifier, SkipReason},
    collect::collect_enums,
    descriptor::{AttributeDescriptor, EntityDescriptor, EnumDescriptor, RelationshipDescriptor}
};
use crate::{
    discovery::CandidateSet,
    metadata::{ClassMetadata, FieldMetadata, RelationKind}
};

/// Declaration worth a note that does not change the output.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Advisory {
    /// Many-to-many without `mapped_by`: both sides may claim ownership.
    AmbiguousOwnership {
        /// Declaring entity.
        entity: String,

        /// Declaring field.
        field: String
    },

    /// Several relationship markers on one field; `chosen` decided.
    ConflictingMarkers {
        /// Declaring entity.
        entity: String,

        /// Declaring field.
        field: String,

        /// Marker kinds in declaration order.
        kinds: Vec<RelationKind>,

        /// Kind that was used.
        chosen: RelationKind
    },

    /// Relationship whose target type could not be resolved.
    UnresolvedTarget {
        /// Declaring entity.
        entity: String,

        /// Declaring field.
        field: String
    }
}

impl Advisory {
    /// Advisories raised by one relationship-bearing field.
    fn inspect(field: &FieldMetadata, descriptor: &RelationshipDescriptor) -> Vec<Self> {
        let mut found = Vec::new();

        if field.relations.len() > 1 {
            found.push(Self::ConflictingMarkers {
                entity: descriptor.source_entity.clone(),
                field:  descriptor.source_field.clone(),
                kinds:  field.relations.iter().map(|marker| marker.kind).collect(),
                chosen: descriptor.kind
            });
        }
        if descriptor.kind.from_many() && descriptor.kind.to_many() && !descriptor.has_mapped_by() {
            found.push(Self::AmbiguousOwnership {
                entity: descriptor.source_entity.clone(),
                field:  descriptor.source_field.clone()
            });
        }
        if !descriptor.is_resolved() {
            found.push(Self::UnresolvedTarget {
                entity: descriptor.source_entity.clone(),
                field:  descriptor.source_field.clone()
            });
        }

        found
    }

    fn log(&self) {
        match self {
            Self::ConflictingMarkers { .. } => warn!("{self}"),
            Self::AmbiguousOwnership { .. } | Self::UnresolvedTarget { .. } => info!("{self}")
        }
    }
}

impl fmt::Display for Advisory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::AmbiguousOwnership {
                entity,
                field
            } => write!(
                f,
                "{entity}.{field}: many-to-many without mapped_by, ownership is ambiguous"
            ),
            Self::ConflictingMarkers {
                entity,
                field,
                kinds,
                chosen
            } => {
                let kinds: Vec<_> = kinds.iter().map(|kind| kind.as_str()).collect();
                write!(
                    f,
                    "{entity}.{field}: several relationship markers ({}), using {chosen}",
                    kinds.join(", ")
                )
            }
            Self::UnresolvedTarget {
                entity,
                field
            } => write!(f, "{entity}.{field}: relationship target could not be resolved")
        }
    }
}

/// Everything one run extracted, in emission order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Model {
    /// Referenced enums, first-seen order.
    pub enums: Vec<EnumDescriptor>,

    /// One entry per candidate, candidate order.
    pub entities: Vec<EntityDescriptor>,

    /// Relationship ends, entity order then field order.
    pub relationships: Vec<RelationshipDescriptor>,

    /// Notes raised while building.
    pub advisories: Vec<Advisory>
}

impl Model {
    /// Build the model of a candidate set.
    ///
    /// Every candidate and every field is visited exactly once.
    #[must_use]
    pub fn build(candidates: &CandidateSet) -> Self {
        let registry = candidates.registry();
        let classifier = FieldClassifier::new(registry);

        let mut model = Self {
            enums:    collect_enums(candidates.iter(), registry),
            entities: Vec::with_capacity(candidates.len()),
            ..Self::default()
        };

        for class in candidates.iter() {
            let entity = model.visit(&classifier, class);
            model.entities.push(entity);
        }

        debug!(
            enums = model.enums.len(),
            entities = model.entities.len(),
            relationships = model.relationships.len(),
            advisories = model.advisories.len(),
            "model built"
        );
        model
    }

    fn visit(&mut self, classifier: &FieldClassifier<'_>, class: &ClassMetadata) -> EntityDescriptor {
        let mut entity = EntityDescriptor::new(&class.name);

        for field in &class.fields {
            let classification = classifier.classify(class, field);
            debug!(entity = %class.name, field = %field.name, ?classification, "classified field");

            match classification {
                Classification::Attribute(attribute) => entity.attributes.push(attribute),
                Classification::Relationship(descriptor) => {
                    for advisory in Advisory::inspect(field, &descriptor) {
                        advisory.log();
                        self.advisories.push(advisory);
                    }
                    self.relationships.push(descriptor);
                }
                Classification::EnumField(_) | Classification::Skip(_) => {}
            }
        }

        entity
    }

    /// Relationship ends declared by `entity`, in field order.
    pub fn relationships_declared_by<'a>(
        &'a self,
        entity: &'a str
    ) -> impl Iterator<Item = &'a RelationshipDescriptor> {
        self.relationships
            .iter()
            .filter(move |descriptor| descriptor.source_entity == entity)
    }
}
