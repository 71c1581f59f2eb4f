// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! JDL rendering.
//!
//! Renders a [`Model`] into one JDL document. Rendering is a pure pass:
//! the only branches are the empty `mappedBy` rule and the
//! [`EmitOptions`].
//!
//! # Document Layout
//!
//! ```text
//! enum CustomerStatus {          one block per enum
//!   ACTIVE,
//!   INACTIVE
//! }
//!
//! entity Customer {              one block per entity
//!   name String
//! }
//!
//! relationship OneToMany {       one block per relationship end
//!   Customer{orders(customer)} to Order
//! }
//!
//! paginate Customer with pagination
//!
//! dto Customer with mapstruct    one pair per entity
//! service Customer with serviceClass
//! ```
//!
//! Every block ends with a blank line; member lists never carry a
//! trailing comma.

mod options;

use std::fmt;

pub use options::{EmitOptions, FieldCase, PaginationStyle, ServiceStyle};

use crate::model::{Model, RelationshipDescriptor};

/// Render `model` into a JDL document.
#[must_use]
pub fn render(model: &Model, options: &EmitOptions) -> String {
    Document::new(model, options).to_string()
}

/// A model paired with its rendering options.
#[derive(Debug, Clone, Copy)]
pub struct Document<'a> {
    model:   &'a Model,
    options: &'a EmitOptions
}

impl<'a> Document<'a> {
    /// Document of `model` rendered with `options`.
    #[must_use]
    pub const fn new(model: &'a Model, options: &'a EmitOptions) -> Self {
        Self {
            model,
            options
        }
    }

    fn relationship(&self, f: &mut fmt::Formatter<'_>, descriptor: &RelationshipDescriptor) -> fmt::Result {
        let case = self.options.field_case;
        write!(
            f,
            "relationship {} {{\n  {}{{{}",
            descriptor.kind,
            descriptor.source_entity,
            case.apply(&descriptor.source_field)
        )?;
        if descriptor.has_mapped_by() {
            write!(f, "({})", case.apply(&descriptor.mapped_by))?;
        }
        write!(f, "}} to {}\n}}\n\n", descriptor.target_entity)
    }
}

impl fmt::Display for Document<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let model = self.model;
        let options = self.options;

        for descriptor in &model.enums {
            block(f, "enum", &descriptor.name, descriptor.constants.iter().map(String::as_str))?;
        }

        for entity in &model.entities {
            let members: Vec<String> = entity
                .attributes
                .iter()
                .map(|attribute| {
                    format!("{} {}", options.field_case.apply(&attribute.name), attribute.type_name)
                })
                .collect();
            block(f, "entity", &entity.name, members.iter().map(String::as_str))?;
        }

        for descriptor in &model.relationships {
            self.relationship(f, descriptor)?;
        }

        for entity in &model.entities {
            write!(f, "paginate {} with {}\n\n", entity.name, options.pagination.as_str())?;
        }

        for entity in &model.entities {
            write!(
                f,
                "dto {name} with mapstruct\nservice {name} with {}\n\n",
                options.service.as_str(),
                name = entity.name
            )?;
        }

        Ok(())
    }
}

/// `<keyword> <name> {` + indented members joined by `,\n` + `}`.
fn block<'m>(
    f: &mut fmt::Formatter<'_>,
    keyword: &str,
    name: &str,
    members: impl Iterator<Item = &'m str>
) -> fmt::Result {
    writeln!(f, "{keyword} {name} {{")?;
    for (index, member) in members.enumerate() {
        if index > 0 {
            f.write_str(",\n")?;
        }
        write!(f, "  {member}")?;
    }
    f.write_str("\n}\n\n")
}
