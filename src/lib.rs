// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! # jdl-reverse
//!
//! Reverse-engineers annotated Rust entity declarations into a JDL domain
//! model: enums, entities with their plain attributes, relationships, and
//! per-entity pagination, DTO and service directives.
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! #[entity]
//! pub struct Customer {
//!     pub name: String,
//!     pub status: CustomerStatus,
//!
//!     #[one_to_many(mapped_by = "customer")]
//!     pub orders: Vec<Order>,
//! }
//!
//! #[entity]
//! pub struct Order {
//!     #[many_to_one]
//!     pub customer: Customer,
//! }
//!
//! pub enum CustomerStatus { ACTIVE, INACTIVE }
//! ```
//!
//! ```text
//! $ jdl-reverse --source-root src --package-name crate::model
//! enum CustomerStatus {
//!   ACTIVE,
//!   INACTIVE
//! }
//! ...
//! relationship OneToMany {
//!   Customer{orders(customer)} to Order
//! }
//! ```
//!
//! ## Pipeline
//!
//! | Stage | Module | Output |
//! |-------|--------|--------|
//! | Parse | [`source`] | [`ClassMetadata`](metadata::ClassMetadata) per struct and enum |
//! | Discover | [`discovery`] | [`CandidateSet`]: entities in scope plus subtypes |
//! | Build | [`model`] | [`Model`]: typed descriptors and advisories |
//! | Render | [`emit`] | the JDL document |
//!
//! ## Markers
//!
//! | Marker | On | Meaning |
//! |--------|----|---------|
//! | `#[entity]` | struct | candidate entity |
//! | `#[extends(Base)]` | struct | subtype of `Base`, selected with it |
//! | `#[transient]` | field | not persisted, skipped |
//! | `#[one_to_one(..)]` | field | `target_entity`, `mapped_by` |
//! | `#[one_to_many(..)]` | field | `target_entity`, `mapped_by` |
//! | `#[many_to_many(..)]` | field | `target_entity`, `mapped_by` |
//! | `#[many_to_one(..)]` | field | `target_entity` |
//!
//! The markers are read from source text only; they need no macro crate
//! to be in scope when the declarations are merely analysed.

pub mod discovery;
pub mod emit;
pub mod error;
pub mod metadata;
pub mod model;
pub mod source;

pub use discovery::{CandidateSet, PackageScope, SourceTree, TypeDiscovery};
pub use emit::{EmitOptions, render};
pub use error::{Error, Result};
pub use model::Model;

/// Discover, build and render in one call.
///
/// # Errors
///
/// Whatever `discovery` reports; building and rendering cannot fail.
pub fn reverse(
    discovery: &impl TypeDiscovery,
    scope: &PackageScope,
    options: &EmitOptions
) -> Result<String> {
    let candidates = discovery.discover(scope)?;
    let model = Model::build(&candidates);
    Ok(render(&model, options))
}
