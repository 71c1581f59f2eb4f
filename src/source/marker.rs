// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Relationship marker parsing.
//!
//! # Supported Markers
//!
//! | Marker | `target_entity` | `mapped_by` |
//! |--------|-----------------|-------------|
//! | `#[one_to_one(..)]` | optional | optional |
//! | `#[one_to_many(..)]` | optional | optional |
//! | `#[many_to_many(..)]` | optional | optional |
//! | `#[many_to_one(..)]` | optional | rejected |
//!
//! A bare marker (`#[many_to_one]`) is the same as an empty argument list.
//! Markers match on their last path segment, so `#[jdl::many_to_one]` is
//! the same marker.
//!
//! ```rust,ignore
//! #[one_to_many(mapped_by = "customer")]
//! pub orders: Vec<Order>,
//!
//! #[many_to_many(target_entity = "Tag")]
//! pub tags: Vec<Box<dyn Labelled>>,
//! ```

use darling::FromMeta;
use syn::{Attribute, Ident, Meta};

use super::ty::{TypeScope, lower_type};
use crate::metadata::{RelationKind, RelationMarker};

/// Arguments of markers that may name the owning field.
#[derive(Debug, Default, FromMeta)]
struct InverseSideArgs {
    #[darling(default)]
    target_entity: Option<syn::Type>,

    #[darling(default)]
    mapped_by: Option<String>
}

/// Arguments of `#[many_to_one]`, which is always the owning side.
#[derive(Debug, Default, FromMeta)]
struct OwningSideArgs {
    #[darling(default)]
    target_entity: Option<syn::Type>
}

/// Name a marker attribute is matched by: the last segment of its path.
#[must_use]
pub fn marker_ident(attr: &Attribute) -> Option<&Ident> {
    attr.path().segments.last().map(|segment| &segment.ident)
}

/// Check if `attr` is the marker `name`, written bare or path-qualified.
#[must_use]
pub fn is_marker(attr: &Attribute, name: &str) -> bool {
    marker_ident(attr).is_some_and(|ident| ident == name)
}

/// Parse a relationship marker of the given kind.
///
/// # Errors
///
/// Unknown keys, `mapped_by` on `#[many_to_one]`, or a `name = value`
/// marker form.
pub fn parse_relation(
    attr: &Attribute,
    kind: RelationKind,
    scope: TypeScope<'_>
) -> darling::Result<RelationMarker> {
    let marker = RelationMarker::new(kind);
    if matches!(attr.meta, Meta::Path(_)) {
        return Ok(marker);
    }

    let (target_entity, mapped_by) = match kind {
        RelationKind::ManyToOne => {
            let args = OwningSideArgs::from_meta(&attr.meta).map_err(|e| e.with_span(attr))?;
            (args.target_entity, None)
        }
        RelationKind::OneToOne | RelationKind::OneToMany | RelationKind::ManyToMany => {
            let args = InverseSideArgs::from_meta(&attr.meta).map_err(|e| e.with_span(attr))?;
            (args.target_entity, args.mapped_by)
        }
    };

    Ok(RelationMarker {
        kind,
        target_entity: target_entity.map(|ty| lower_type(&ty, scope)),
        mapped_by
    })
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;
    use crate::metadata::TypeRef;

    fn parse(attr: Attribute, kind: RelationKind) -> darling::Result<RelationMarker> {
        parse_relation(&attr, kind, TypeScope::new("Customer", &[]))
    }

    #[test]
    fn bare_marker() {
        let marker = parse(parse_quote!(#[many_to_one]), RelationKind::ManyToOne).unwrap();
        assert_eq!(marker, RelationMarker::new(RelationKind::ManyToOne));
    }

    #[test]
    fn empty_argument_list() {
        let marker = parse(parse_quote!(#[one_to_one()]), RelationKind::OneToOne).unwrap();
        assert_eq!(marker.mapped_by, None);
        assert_eq!(marker.target_entity, None);
    }

    #[test]
    fn mapped_by_and_target() {
        let marker = parse(
            parse_quote!(#[one_to_many(mapped_by = "customer", target_entity = "Order")]),
            RelationKind::OneToMany
        )
        .unwrap();
        assert_eq!(marker.mapped_by.as_deref(), Some("customer"));
        assert_eq!(marker.target_entity, Some(TypeRef::named("Order")));
    }

    #[test]
    fn target_is_lowered() {
        let marker = parse(
            parse_quote!(#[many_to_one(target_entity = "Option<crate::model::Customer>")]),
            RelationKind::ManyToOne
        )
        .unwrap();
        assert_eq!(
            marker.target_entity,
            Some(TypeRef::named("crate::model::Customer"))
        );
    }

    #[test]
    fn self_target_names_the_owner() {
        let marker = parse(
            parse_quote!(#[many_to_many(target_entity = "Self")]),
            RelationKind::ManyToMany
        )
        .unwrap();
        assert_eq!(marker.target_entity, Some(TypeRef::named("Customer")));
    }

    #[test]
    fn markers_match_on_last_segment() {
        let bare: Attribute = parse_quote!(#[entity]);
        let qualified: Attribute = parse_quote!(#[jdl::entity]);
        let other: Attribute = parse_quote!(#[entity::skip]);
        assert!(is_marker(&bare, "entity"));
        assert!(is_marker(&qualified, "entity"));
        assert!(!is_marker(&other, "entity"));
        assert_eq!(marker_ident(&qualified).map(ToString::to_string).as_deref(), Some("entity"));
    }

    #[test]
    fn many_to_one_rejects_mapped_by() {
        let result = parse(
            parse_quote!(#[many_to_one(mapped_by = "orders")]),
            RelationKind::ManyToOne
        );
        assert!(result.is_err());
    }

    #[test]
    fn unknown_key_is_rejected() {
        let result = parse(
            parse_quote!(#[many_to_many(cascade = "all")]),
            RelationKind::ManyToMany
        );
        assert!(result.is_err());
    }

    #[test]
    fn name_value_form_is_rejected() {
        let result = parse(
            parse_quote!(#[one_to_many = "customer"]),
            RelationKind::OneToMany
        );
        assert!(result.is_err());
    }
}
