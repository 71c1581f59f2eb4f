// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Error types.
//!
//! Only discovery can fail: reading, walking, and parsing the source tree.
//! Classification and emission degrade to empty names instead of failing.

use std::{fmt, path::PathBuf};

/// Result alias for this crate.
pub type Result<T> = std::result::Result<T, Error>;

/// Failures while discovering the candidate class set.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Source root does not exist or is not a directory.
    #[error("source root {0} is not a directory")]
    MissingRoot(PathBuf),

    /// Walking the source tree failed.
    #[error("failed to walk {root}: {source}")]
    Walk {
        /// Source root being walked.
        root:   PathBuf,
        /// Underlying walk error.
        #[source]
        source: walkdir::Error
    },

    /// Reading a source file failed.
    #[error("failed to read {path}: {source}")]
    Io {
        /// File being read.
        path:   PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error
    },

    /// A source file is not valid Rust.
    #[error("{path}:{line}:{column}: {source}")]
    Syntax {
        /// File being parsed.
        path:   PathBuf,
        /// 1-based line of the error.
        line:   usize,
        /// 0-based column of the error.
        column: usize,
        /// Underlying parse error.
        #[source]
        source: syn::Error
    },

    /// Markers in a source file are malformed.
    #[error("invalid declarations in {path}: {}", join(.diagnostics))]
    Declaration {
        /// File holding the declarations.
        path:        PathBuf,
        /// Every marker error of the file, in report order.
        diagnostics: Vec<Diagnostic>
    }
}

/// One located marker error.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    /// 1-based line.
    pub line:    usize,
    /// 0-based column.
    pub column:  usize,
    /// Error text.
    pub message: String
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}: {}", self.line, self.column, self.message)
    }
}

fn join(diagnostics: &[Diagnostic]) -> String {
    diagnostics
        .iter()
        .map(Diagnostic::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

impl Error {
    /// Wrap a syntax error, locating it in `path`.
    #[must_use]
    pub fn syntax(path: impl Into<PathBuf>, source: syn::Error) -> Self {
        let start = source.span().start();
        Self::Syntax {
            path:   path.into(),
            line:   start.line,
            column: start.column,
            source
        }
    }

    /// Flatten accumulated marker errors of `path`.
    ///
    /// Spans are resolved to line and column here, so the error stays
    /// `Send + Sync`.
    #[must_use]
    pub fn declaration(path: impl Into<PathBuf>, source: darling::Error) -> Self {
        let diagnostics = source
            .flatten()
            .into_iter()
            .map(|error| {
                let start = error.span().start();
                Diagnostic {
                    line:    start.line,
                    column:  start.column,
                    message: error.to_string()
                }
            })
            .collect();
        Self::Declaration {
            path: path.into(),
            diagnostics
        }
    }
}
