// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! `jdl-reverse` command line.
//!
//! Prints the JDL document of a source tree to stdout; logs go to stderr
//! and are filtered by `RUST_LOG` (default `info`).

use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use jdl_reverse::{
    EmitOptions, PackageScope, SourceTree,
    emit::{FieldCase, PaginationStyle, ServiceStyle}
};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "jdl-reverse", version)]
#[command(about = "Reverse-engineer annotated Rust entities into a JDL document")]
struct Cli {
    /// Directory holding the crate sources to scan
    #[arg(long, env = "JDL_REVERSE_SOURCE_ROOT", default_value = "src")]
    source_root: PathBuf,

    /// Module scope to search, e.g. `crate::model`; empty scans everything
    #[arg(long, env = "JDL_REVERSE_PACKAGE", default_value = "")]
    package_name: String,

    /// Case of attribute and relationship field names
    #[arg(long, value_enum, default_value_t)]
    field_case: FieldCase,

    /// Pagination directive style
    #[arg(long, value_enum, default_value_t)]
    pagination: PaginationStyle,

    /// Service directive style
    #[arg(long, value_enum, default_value_t)]
    service: ServiceStyle
}

impl Cli {
    fn options(&self) -> EmitOptions {
        EmitOptions::default()
            .with_field_case(self.field_case)
            .with_pagination(self.pagination)
            .with_service(self.service)
    }
}

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    let scope = PackageScope::parse(&cli.package_name);
    let tree = SourceTree::new(&cli.source_root);

    tracing::debug!(root = %tree.root().display(), %scope, "scanning sources");

    let document = jdl_reverse::reverse(&tree, &scope, &cli.options())
        .with_context(|| format!("failed to reverse-engineer {}", tree.root().display()))?;

    println!("{document}");
    Ok(())
}
