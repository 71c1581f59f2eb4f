// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rust source front end.
//!
//! Parses Rust files with [`syn`] and lowers their structs and enums into
//! the [`metadata`](crate::metadata) model. Relationship markers are parsed
//! with [`darling`]; the other markers are plain words checked by hand.
//!
//! # Architecture
//!
//! ```text
//! source.rs (coordinator)
//! ├── item.rs    - structs, enums, inherent impls, inline modules
//! ├── field.rs   - named fields, #[transient], PhantomData
//! ├── marker.rs  - #[one_to_one] #[one_to_many] #[many_to_one] #[many_to_many]
//! └── ty.rs      - syn::Type -> TypeRef
//! ```
//!
//! # Example
//!
//! ```rust,ignore
//! #[entity]
//! pub struct Customer {
//!     pub name: String,
//!     pub status: CustomerStatus,
//!
//!     #[one_to_many(mapped_by = "customer")]
//!     pub orders: Vec<Order>,
//!
//!     #[transient]
//!     pub cached_total: Option<f64>,
//! }
//!
//! #[extends(Customer)]
//! pub struct VipCustomer {
//!     pub discount: u8,
//! }
//!
//! pub enum CustomerStatus { ACTIVE, INACTIVE }
//! ```

mod field;
mod item;
mod marker;
mod ty;

use std::path::{Component, Path};

pub use item::lower_items;
pub use ty::{TypeScope, lower_type};

use crate::{
    error::{Error, Result},
    metadata::ClassMetadata
};

/// Parse Rust source text declared in `module`.
///
/// `origin` only labels errors.
///
/// # Errors
///
/// [`Error::Syntax`] for invalid Rust, [`Error::Declaration`] for
/// malformed markers.
pub fn parse_str(origin: &Path, source: &str, module: &str) -> Result<Vec<ClassMetadata>> {
    let file = syn::parse_file(source).map_err(|e| Error::syntax(origin, e))?;
    lower_items(&file.items, module).map_err(|source| Error::declaration(origin, source))
}

/// Read and parse one file under `root`.
///
/// # Errors
///
/// [`Error::Io`] when the file cannot be read, otherwise as [`parse_str`].
pub fn parse_file(root: &Path, path: &Path) -> Result<Vec<ClassMetadata>> {
    let source = std::fs::read_to_string(path).map_err(|source| Error::Io {
        path: path.to_path_buf(),
        source
    })?;
    parse_str(path, &source, &module_path(root, path))
}

/// Module path of a file relative to the source root.
///
/// `lib.rs` and `main.rs` at the root, and `mod.rs` anywhere, name their
/// directory's module.
///
/// ```
/// use std::path::Path;
///
/// use jdl_reverse::source::module_path;
///
/// let root = Path::new("src");
/// assert_eq!(module_path(root, Path::new("src/lib.rs")), "crate");
/// assert_eq!(module_path(root, Path::new("src/model/mod.rs")), "crate::model");
/// assert_eq!(module_path(root, Path::new("src/model/order.rs")), "crate::model::order");
/// ```
#[must_use]
pub fn module_path(root: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(root).unwrap_or(path);
    let mut segments: Vec<String> = relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None
        })
        .collect();

    if let Some(file) = segments.pop() {
        let stem = file.strip_suffix(".rs").unwrap_or(&file);
        let names_directory = stem == "mod" || (segments.is_empty() && (stem == "lib" || stem == "main"));
        if !names_directory {
            segments.push(stem.to_string());
        }
    }

    std::iter::once("crate".to_string())
        .chain(segments)
        .collect::<Vec<_>>()
        .join("::")
}
