// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Field-level lowering.
//!
//! Turns one named struct field into a [`FieldMetadata`], reading the
//! `#[transient]` marker and delegating relationship markers to
//! [`marker`](super::marker).
//!
//! # Markers
//!
//! ```rust,ignore
//! #[transient]                              // FieldMetadata::transient
//! pub cached_total: f64,
//!
//! #[many_to_one]                            // RelationMarker(ManyToOne)
//! pub customer: Option<Customer>,
//!
//! _marker: PhantomData<T>,                  // Modifiers::SYNTHETIC
//! ```

use syn::{Field, ext::IdentExt};

use super::{
    marker::{is_marker, marker_ident, parse_relation},
    ty::{self, TypeScope}
};
use crate::metadata::{FieldMetadata, Modifiers, RelationKind};

/// Lower a named struct field.
///
/// Every relationship marker is kept in declaration order; which one
/// decides is up to the classifier. Markers may be path-qualified
/// (`#[jdl::transient]`).
///
/// # Errors
///
/// Returns error if the field has no identifier (tuple struct field), if
/// `#[transient]` carries arguments, or if a relationship marker is
/// malformed. All marker errors of the field are reported together.
pub fn lower_field(field: &Field, scope: TypeScope<'_>) -> darling::Result<FieldMetadata> {
    let ident = field
        .ident
        .as_ref()
        .ok_or_else(|| darling::Error::custom("entity fields must be named").with_span(field))?;

    let mut errors = darling::Error::accumulator();
    let mut lowered = FieldMetadata::new(ident.unraw().to_string(), ty::lower_type(&field.ty, scope));

    if ty::is_phantom(&field.ty) {
        lowered.modifiers = Modifiers::SYNTHETIC;
    }

    for attr in &field.attrs {
        if is_marker(attr, "transient") {
            if errors
                .handle(attr.meta.require_path_only().map_err(darling::Error::from))
                .is_some()
            {
                lowered.transient = true;
            }
            continue;
        }

        let Some(name) = marker_ident(attr) else {
            continue;
        };
        if let Some(kind) = RelationKind::from_marker(&name.to_string())
            && let Some(marker) = errors.handle(parse_relation(attr, kind, scope))
        {
            lowered.relations.push(marker);
        }
    }

    errors.finish_with(lowered)
}
