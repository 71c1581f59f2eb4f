// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Rendering options.
//!
//! Every option defaults to the plain layout; the CLI exposes each one as
//! a `clap` value enum.
//!
//! | Option | Values | Affects |
//! |--------|--------|---------|
//! | [`FieldCase`] | `preserve`, `camel` | attribute names, relationship fields, `mappedBy` |
//! | [`PaginationStyle`] | `pagination`, `infinite-scroll` | `paginate X with ..` |
//! | [`ServiceStyle`] | `service-class`, `service-impl` | `service X with ..` |

use clap::ValueEnum;
use convert_case::{Case, Casing};

/// Case applied to field names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum FieldCase {
    /// Names as declared.
    #[default]
    Preserve,

    /// `lowerCamelCase`.
    Camel
}

impl FieldCase {
    /// Apply the case to `name`.
    ///
    /// ```
    /// use jdl_reverse::emit::FieldCase;
    ///
    /// assert_eq!(FieldCase::Preserve.apply("cached_total"), "cached_total");
    /// assert_eq!(FieldCase::Camel.apply("cached_total"), "cachedTotal");
    /// ```
    #[must_use]
    pub fn apply(self, name: &str) -> String {
        match self {
            Self::Preserve => name.to_string(),
            Self::Camel => name.to_case(Case::Camel)
        }
    }
}

/// Pagination directive style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum PaginationStyle {
    /// `paginate X with pagination`.
    #[default]
    Pagination,

    /// `paginate X with infinite-scroll`.
    InfiniteScroll
}

impl PaginationStyle {
    /// Keyword in the directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Pagination => "pagination",
            Self::InfiniteScroll => "infinite-scroll"
        }
    }
}

/// Service directive style.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ServiceStyle {
    /// `service X with serviceClass`.
    #[default]
    ServiceClass,

    /// `service X with serviceImpl`.
    ServiceImpl
}

impl ServiceStyle {
    /// Keyword in the directive.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::ServiceClass => "serviceClass",
            Self::ServiceImpl => "serviceImpl"
        }
    }
}

/// How a model is rendered.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct EmitOptions {
    /// Case of field names.
    pub field_case: FieldCase,

    /// Pagination directive style.
    pub pagination: PaginationStyle,

    /// Service directive style.
    pub service: ServiceStyle
}

impl EmitOptions {
    /// Set the field case.
    #[must_use]
    pub const fn with_field_case(mut self, field_case: FieldCase) -> Self {
        self.field_case = field_case;
        self
    }

    /// Set the pagination style.
    #[must_use]
    pub const fn with_pagination(mut self, pagination: PaginationStyle) -> Self {
        self.pagination = pagination;
        self
    }

    /// Set the service style.
    #[must_use]
    pub const fn with_service(mut self, service: ServiceStyle) -> Self {
        self.service = service;
        self
    }
}
