// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Lowering of `syn::Type` into [`TypeRef`].
//!
//! # Lowering Table
//!
//! | Rust Type | `TypeRef` | Notes |
//! |-----------|-----------|-------|
//! | `Order`, `crate::model::Order` | `Named` | Path as written |
//! | `Vec<Order>` | `Named` with args | Lifetimes and consts dropped |
//! | `Option<T>`, `Box<T>`, `Rc<T>`, `Arc<T>` | lowered `T` | Transparent |
//! | `&T`, `&mut T` | lowered `T` | Transparent |
//! | `T` (item type parameter) | `Variable` | |
//! | `Self` | `Named` enclosing type | |
//! | `[T; N]`, `[T]` | `Array` | |
//! | `()` | `Void` | |
//! | anything else | `Opaque` | Rendered tokens |

use quote::ToTokens;
use syn::{GenericArgument, Path, PathArguments, Type};

use crate::metadata::TypeRef;

/// Wrappers that carry no meaning in the metadata model.
const TRANSPARENT: &[&str] = &["Option", "Box", "Rc", "Arc"];

/// Names a type inside an item can refer to without a path.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypeScope<'a> {
    owner:  Option<&'a str>,
    params: &'a [String]
}

impl<'a> TypeScope<'a> {
    /// Scope of the item `owner` with type parameters `params`.
    #[must_use]
    pub const fn new(owner: &'a str, params: &'a [String]) -> Self {
        Self {
            owner: Some(owner),
            params
        }
    }

    /// Scope outside any item: `Self` stays a plain path.
    #[must_use]
    pub const fn free(params: &'a [String]) -> Self {
        Self {
            owner: None,
            params
        }
    }

    fn is_param(&self, ident: &syn::Ident) -> bool {
        self.params.iter().any(|param| ident == param)
    }
}

/// Lower a field type.
///
/// A bare path naming one of the scope's type parameters becomes a type
/// variable; `Self` becomes the scope's owner.
#[must_use]
pub fn lower_type(ty: &Type, scope: TypeScope<'_>) -> TypeRef {
    match ty {
        Type::Path(type_path) if type_path.qself.is_none() => lower_path(&type_path.path, scope)
            .unwrap_or_else(|| TypeRef::Opaque(render(ty))),
        Type::Reference(reference) => lower_type(&reference.elem, scope),
        Type::Paren(paren) => lower_type(&paren.elem, scope),
        Type::Group(group) => lower_type(&group.elem, scope),
        Type::Array(array) => TypeRef::array(lower_type(&array.elem, scope)),
        Type::Slice(slice) => TypeRef::array(lower_type(&slice.elem, scope)),
        Type::Tuple(tuple) if tuple.elems.is_empty() => TypeRef::Void,
        other => TypeRef::Opaque(render(other))
    }
}

/// Check if a type is `PhantomData<..>`.
#[must_use]
pub fn is_phantom(ty: &Type) -> bool {
    if let Type::Path(type_path) = ty
        && let Some(segment) = type_path.path.segments.last()
    {
        return segment.ident == "PhantomData";
    }
    false
}

fn lower_path(path: &Path, scope: TypeScope<'_>) -> Option<TypeRef> {
    let last = path.segments.last()?;

    if path.leading_colon.is_none() && path.segments.len() == 1 && last.arguments.is_none() {
        if scope.is_param(&last.ident) {
            return Some(TypeRef::variable(last.ident.to_string()));
        }
        if last.ident == "Self"
            && let Some(owner) = scope.owner
        {
            return Some(TypeRef::named(owner));
        }
    }

    let mut args: Vec<TypeRef> = match &last.arguments {
        PathArguments::AngleBracketed(bracketed) => bracketed
            .args
            .iter()
            .filter_map(|arg| match arg {
                GenericArgument::Type(inner) => Some(lower_type(inner, scope)),
                _ => None
            })
            .collect(),
        PathArguments::Parenthesized(_) => return None,
        PathArguments::None => Vec::new()
    };

    if args.len() == 1 && TRANSPARENT.iter().any(|wrapper| last.ident == wrapper) {
        return args.pop();
    }

    let joined = path
        .segments
        .iter()
        .map(|segment| segment.ident.to_string())
        .collect::<Vec<_>>()
        .join("::");

    Some(TypeRef::generic(joined, args))
}

/// Render tokens without the spacing `TokenStream::to_string` inserts.
fn render(ty: &Type) -> String {
    let raw = ty.to_token_stream().to_string();
    let mut out = String::with_capacity(raw.len());
    let mut chars = raw.chars().peekable();
    while let Some(c) = chars.next() {
        if c == ' ' {
            let prev = out.chars().last();
            let next = chars.peek().copied();
            let glued_left = matches!(prev, Some('(' | '[' | '<' | '&' | ':'));
            let glued_right = matches!(next, Some(')' | ']' | '>' | ',' | ';' | ':' | '<'));
            if glued_left || glued_right {
                continue;
            }
        }
        out.push(c);
    }
    out
}
