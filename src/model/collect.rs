// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Enum collection.
//!
//! Scans candidate fields for enum-typed fields and collects each distinct
//! enum once, at the position of its first use.
//!
//! Transient fields count: only synthetic and static fields are ignored,
//! which is broader than the attribute skip rule.

use indexmap::IndexSet;

use super::descriptor::EnumDescriptor;
use crate::metadata::{ClassMetadata, TypeRegistry};

/// Distinct enums referenced by `classes`, in first-seen order.
///
/// `registry` must know every enum the fields may name; a field whose type
/// is not a registered enum contributes nothing.
#[must_use]
pub fn collect_enums<'a>(
    classes: impl IntoIterator<Item = &'a ClassMetadata>,
    registry: &TypeRegistry
) -> Vec<EnumDescriptor> {
    let mut seen = IndexSet::new();
    for class in classes {
        for field in &class.fields {
            if field.modifiers.is_synthetic || field.modifiers.is_static {
                continue;
            }
            if let Some(id) = registry.enum_for(&field.ty) {
                seen.insert(id);
            }
        }
    }

    seen.into_iter()
        .map(|id| enum_descriptor(registry.get(id)))
        .collect()
}

/// Descriptor of one enum: its own static, final, non-synthetic fields.
#[must_use]
pub fn enum_descriptor(class: &ClassMetadata) -> EnumDescriptor {
    let constants = class
        .fields
        .iter()
        .filter(|field| {
            let modifiers = field.modifiers;
            modifiers.is_static && modifiers.is_final && !modifiers.is_synthetic
        })
        .map(|field| field.name.clone())
        .collect();

    EnumDescriptor {
        name: class.name.clone(),
        constants
    }
}
