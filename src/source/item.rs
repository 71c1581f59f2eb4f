// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Item-level lowering.
//!
//! Walks the items of one parsed file, including inline `mod` blocks, and
//! produces one [`ClassMetadata`] per struct and enum.
//!
//! # Item Mapping
//!
//! | Item | Result |
//! |------|--------|
//! | `#[entity] struct S { .. }` | entity class, named fields lowered |
//! | `struct S { .. }` | plain class, named fields lowered |
//! | `struct S(..);`, `struct S;` | plain class without fields |
//! | `enum E { A, B }` | enum class, variants as static final fields |
//! | `impl S { const X: T = ..; }` | static final field appended to `S` |
//! | `mod m { .. }` | items lowered under `module::m` |
//!
//! `#[entity]` on a tuple struct, unit struct, or enum is an error.
//! Markers may be path-qualified (`#[jdl::entity]`); `Self` in field and
//! constant types names the enclosing type.

use syn::{
    Attribute, Fields, Generics, ImplItem, Item, ItemEnum, ItemImpl, ItemStruct, Type,
    ext::IdentExt
};

use super::{
    field::lower_field,
    marker::is_marker,
    ty::{TypeScope, lower_type}
};
use crate::metadata::{ClassMetadata, FieldMetadata, TypeRef};

/// Lower every struct and enum declared in `items`.
///
/// Classes come out in declaration order. Associated constants of inherent
/// impls are attached to the class of the same module and name declared in
/// the same file; impls for types declared elsewhere are ignored.
///
/// # Errors
///
/// All malformed markers in the file, reported together.
pub fn lower_items(items: &[Item], module: &str) -> darling::Result<Vec<ClassMetadata>> {
    let mut errors = darling::Error::accumulator();
    let mut classes = Vec::new();
    let mut constants = Vec::new();

    collect(items, module, &mut classes, &mut constants, &mut errors);

    for (module, owner, field) in constants {
        if let Some(class) = classes
            .iter_mut()
            .find(|class| class.module == module && class.name == owner)
        {
            class.fields.push(field);
        }
    }

    errors.finish_with(classes)
}

/// Associated constant waiting for its class: `(module, type name, field)`.
type PendingConstant = (String, String, FieldMetadata);

fn collect(
    items: &[Item],
    module: &str,
    classes: &mut Vec<ClassMetadata>,
    constants: &mut Vec<PendingConstant>,
    errors: &mut darling::error::Accumulator
) {
    for item in items {
        match item {
            Item::Struct(item) => {
                if let Some(class) = errors.handle(lower_struct(item, module)) {
                    classes.push(class);
                }
            }
            Item::Enum(item) => {
                if let Some(class) = errors.handle(lower_enum(item, module)) {
                    classes.push(class);
                }
            }
            Item::Impl(item) => {
                if let Some(owner) = inherent_owner(item) {
                    let params = type_params(&item.generics);
                    let scope = TypeScope::new(&owner, &params);
                    for field in associated_constants(item, scope) {
                        constants.push((module.to_string(), owner.clone(), field));
                    }
                }
            }
            Item::Mod(item) => {
                if let Some((_, content)) = &item.content {
                    let nested = format!("{module}::{}", item.ident.unraw());
                    collect(content, &nested, classes, constants, errors);
                }
            }
            _ => {}
        }
    }
}

fn lower_struct(item: &ItemStruct, module: &str) -> darling::Result<ClassMetadata> {
    let mut errors = darling::Error::accumulator();
    let name = item.ident.unraw().to_string();
    let params = type_params(&item.generics);

    let mut class = ClassMetadata::new_struct(module, name.clone());
    class.is_entity = has_marker(&item.attrs, "entity");
    class.supertype = errors.handle(parse_extends(&item.attrs)).flatten();

    match &item.fields {
        Fields::Named(named) => {
            let scope = TypeScope::new(&name, &params);
            for field in &named.named {
                if let Some(lowered) = errors.handle(lower_field(field, scope)) {
                    class.fields.push(lowered);
                }
            }
        }
        Fields::Unnamed(_) | Fields::Unit if class.is_entity => {
            errors.push(
                darling::Error::custom("#[entity] requires a struct with named fields")
                    .with_span(&item.ident)
            );
        }
        Fields::Unnamed(_) | Fields::Unit => {}
    }

    errors.finish_with(class)
}

fn lower_enum(item: &ItemEnum, module: &str) -> darling::Result<ClassMetadata> {
    if let Some(attr) = find_marker(&item.attrs, "entity") {
        return Err(darling::Error::custom("#[entity] can only be applied to structs").with_span(attr));
    }

    let name = item.ident.unraw().to_string();
    let mut class = ClassMetadata::new_enum(module, name.clone());
    class.fields = item
        .variants
        .iter()
        .map(|variant| FieldMetadata::constant(variant.ident.unraw().to_string(), TypeRef::named(&name)))
        .collect();

    Ok(class)
}

/// Parse `#[extends(Base)]` into the base path.
fn parse_extends(attrs: &[Attribute]) -> darling::Result<Option<String>> {
    let mut found = attrs.iter().filter(|attr| is_marker(attr, "extends"));
    let Some(attr) = found.next() else {
        return Ok(None);
    };
    if let Some(extra) = found.next() {
        return Err(darling::Error::custom("a struct extends at most one type").with_span(extra));
    }

    let path: syn::Path = attr.parse_args()?;
    let joined = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");
    Ok(Some(joined))
}

fn has_marker(attrs: &[Attribute], name: &str) -> bool {
    find_marker(attrs, name).is_some()
}

fn find_marker<'a>(attrs: &'a [Attribute], name: &str) -> Option<&'a Attribute> {
    attrs.iter().find(|attr| is_marker(attr, name))
}

/// Names of the type parameters of an item.
fn type_params(generics: &Generics) -> Vec<String> {
    generics
        .type_params()
        .map(|param| param.ident.to_string())
        .collect()
}

/// Name of the type an inherent impl block is for.
fn inherent_owner(item: &ItemImpl) -> Option<String> {
    if item.trait_.is_some() {
        return None;
    }
    if let Type::Path(type_path) = item.self_ty.as_ref()
        && let Some(segment) = type_path.path.segments.last()
    {
        return Some(segment.ident.unraw().to_string());
    }
    None
}

fn associated_constants(item: &ItemImpl, scope: TypeScope<'_>) -> Vec<FieldMetadata> {
    item.items
        .iter()
        .filter_map(|impl_item| match impl_item {
            ImplItem::Const(constant) => Some(FieldMetadata::constant(
                constant.ident.unraw().to_string(),
                lower_type(&constant.ty, scope)
            )),
            _ => None
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use syn::parse_quote;

    use super::*;
    use crate::metadata::{ClassKind, Modifiers, RelationKind};

    fn lower(file: syn::File) -> darling::Result<Vec<ClassMetadata>> {
        lower_items(&file.items, "crate::model")
    }

    #[test]
    fn entity_struct_with_fields() {
        let classes = lower(parse_quote! {
            #[derive(Debug)]
            #[entity]
            pub struct Customer {
                pub name: String,
                #[one_to_many(mapped_by = "customer")]
                pub orders: Vec<Order>,
            }
        })
        .unwrap();

        assert_eq!(classes.len(), 1);
        let customer = &classes[0];
        assert!(customer.is_entity);
        assert_eq!(customer.kind, ClassKind::Struct);
        assert_eq!(customer.qualified_name(), "crate::model::Customer");
        assert_eq!(customer.fields.len(), 2);
        assert_eq!(
            customer.fields[1].relation().map(|marker| marker.kind),
            Some(RelationKind::OneToMany)
        );
    }

    #[test]
    fn enum_variants_are_constants() {
        let classes = lower(parse_quote! {
            pub enum CustomerStatus { ACTIVE, INACTIVE }
        })
        .unwrap();

        let status = &classes[0];
        assert!(status.is_enum());
        let names: Vec<_> = status.fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["ACTIVE", "INACTIVE"]);
        assert!(status.fields.iter().all(|f| f.modifiers == Modifiers::CONSTANT));
        assert_eq!(status.fields[0].ty, TypeRef::named("CustomerStatus"));
    }

    #[test]
    fn inherent_consts_are_appended() {
        let classes = lower(parse_quote! {
            impl Customer {
                pub const MAX_ORDERS: usize = 10;
                pub fn new() -> Self { todo!() }
            }

            impl Default for Customer {
                fn default() -> Self { todo!() }
            }

            #[entity]
            pub struct Customer {
                pub name: String,
            }
        })
        .unwrap();

        let names: Vec<_> = classes[0].fields.iter().map(|f| f.name.as_str()).collect();
        assert_eq!(names, ["name", "MAX_ORDERS"]);
        assert_eq!(classes[0].fields[1].modifiers, Modifiers::CONSTANT);
    }

    #[test]
    fn self_names_the_enclosing_type() {
        let classes = lower(parse_quote! {
            #[entity]
            pub struct Category {
                #[many_to_one]
                pub parent: Option<Box<Self>>,
            }

            impl Category {
                pub const ROOT: Option<&'static Self> = None;
            }
        })
        .unwrap();

        let types: Vec<_> = classes[0].fields.iter().map(|f| &f.ty).collect();
        assert_eq!(types, [&TypeRef::named("Category"), &TypeRef::named("Category")]);
    }

    #[test]
    fn path_qualified_item_markers() {
        let classes = lower(parse_quote! {
            #[model::entity]
            pub struct Customer { pub name: String }

            #[jdl::extends(Customer)]
            pub struct VipCustomer { pub discount: u8 }
        })
        .unwrap();

        assert!(classes[0].is_entity);
        assert_eq!(classes[1].supertype.as_deref(), Some("Customer"));
    }

    #[test]
    fn path_qualified_entity_enum_is_rejected() {
        let result = lower(parse_quote! {
            #[jdl::entity]
            pub enum Status { A }
        });
        assert!(result.is_err());
    }

    #[test]
    fn inline_modules_extend_the_path() {
        let classes = lower(parse_quote! {
            mod billing {
                #[entity]
                pub struct Invoice { pub total: i64 }
            }
        })
        .unwrap();

        assert_eq!(classes[0].module, "crate::model::billing");
    }

    #[test]
    fn generics_and_supertype() {
        let classes = lower(parse_quote! {
            #[extends(crate::model::Customer)]
            pub struct Page<T> {
                pub items: Vec<T>,
            }
        })
        .unwrap();

        let page = &classes[0];
        assert!(!page.is_entity);
        assert_eq!(page.supertype.as_deref(), Some("crate::model::Customer"));
        assert_eq!(
            page.fields[0].ty,
            TypeRef::generic("Vec", vec![TypeRef::variable("T")])
        );
    }

    #[test]
    fn tuple_struct_without_marker_has_no_fields() {
        let classes = lower(parse_quote! {
            pub struct Money(i64);
        })
        .unwrap();
        assert!(classes[0].fields.is_empty());
    }

    #[test]
    fn entity_tuple_struct_is_rejected() {
        let result = lower(parse_quote! {
            #[entity]
            pub struct Money(i64);
        });
        assert!(result.is_err());
    }

    #[test]
    fn entity_enum_is_rejected() {
        let result = lower(parse_quote! {
            #[entity]
            pub enum Status { A }
        });
        assert!(result.is_err());
    }

    #[test]
    fn double_extends_is_rejected() {
        let result = lower(parse_quote! {
            #[extends(A)]
            #[extends(B)]
            pub struct C { pub x: i32 }
        });
        assert!(result.is_err());
    }

    #[test]
    fn errors_from_several_items_are_reported_together() {
        let error = lower(parse_quote! {
            #[entity]
            pub enum Status { A }

            #[entity]
            pub struct Customer {
                #[many_to_one(mapped_by = "x")]
                pub owner: User,
            }
        })
        .unwrap_err();
        assert_eq!(error.len(), 2);
    }
}
