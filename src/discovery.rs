// SPDX-FileCopyrightText: 2025-2026 RAprogramm <andrey.rozanov.vl@gmail.com>
// SPDX-License-Identifier: MIT

//! Type discovery.
//!
//! Finds the candidate class set of a run: every entity class inside the
//! package scope plus the transitive closure of their declared subtypes.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────────────┐
//! │                        Type Discovery                            │
//! ├──────────────────────────────────────────────────────────────────┤
//! │                                                                  │
//! │  SourceTree::load        walkdir, sorted  ──►  *.rs files        │
//! │        │                 source::parse_file ──► ClassMetadata    │
//! │        ▼                                                         │
//! │  TypeRegistry            every struct and enum, file order       │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  select_candidates       #[entity] in scope                      │
//! │                          + #[extends(..)] closure, in scope      │
//! │        │                                                         │
//! │        ▼                                                         │
//! │  CandidateSet            registry + ordered ClassIds             │
//! │                                                                  │
//! └──────────────────────────────────────────────────────────────────┘
//! ```

use std::{
    fmt,
    path::{Path, PathBuf}
};

use indexmap::{IndexMap, IndexSet};
use tracing::{info, warn};
use walkdir::WalkDir;

use crate::{
    error::{Error, Result},
    metadata::{ClassId, ClassMetadata, TypeRegistry},
    source
};

/// Module path prefix limiting which classes become candidates.
///
/// Written as `crate::model`, `model`, or `model.billing`; the leading
/// `crate` is optional and the empty scope matches every module.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageScope {
    segments: Vec<String>
}

impl PackageScope {
    /// Scope matching every module.
    #[must_use]
    pub fn all() -> Self {
        Self::default()
    }

    /// Parse a scope string.
    #[must_use]
    pub fn parse(scope: &str) -> Self {
        let mut segments: Vec<String> = scope
            .split("::")
            .flat_map(|part| part.split('.'))
            .map(str::trim)
            .filter(|part| !part.is_empty())
            .map(str::to_string)
            .collect();
        if segments.first().is_some_and(|first| first == "crate") {
            segments.remove(0);
        }
        Self {
            segments
        }
    }

    /// Whether `module` (`crate::a::b`) lies inside the scope.
    #[must_use]
    pub fn contains(&self, module: &str) -> bool {
        let mut parts = module.split("::").filter(|part| !part.is_empty()).peekable();
        if parts.peek() == Some(&"crate") {
            parts.next();
        }
        self.segments
            .iter()
            .all(|segment| parts.next() == Some(segment.as_str()))
    }
}

impl fmt::Display for PackageScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("crate")?;
        for segment in &self.segments {
            write!(f, "::{segment}")?;
        }
        Ok(())
    }
}

/// The classes one run processes, in a stable order.
#[derive(Debug, Clone)]
pub struct CandidateSet {
    registry:   TypeRegistry,
    candidates: Vec<ClassId>
}

impl CandidateSet {
    /// Candidate set with an explicit selection.
    #[must_use]
    pub fn new(registry: TypeRegistry, candidates: Vec<ClassId>) -> Self {
        Self {
            registry,
            candidates
        }
    }

    /// Select the candidates of `scope` from `registry`.
    #[must_use]
    pub fn select(registry: TypeRegistry, scope: &PackageScope) -> Self {
        let candidates = select_candidates(&registry, scope);
        Self::new(registry, candidates)
    }

    /// Every known class, candidates or not.
    #[must_use]
    pub fn registry(&self) -> &TypeRegistry {
        &self.registry
    }

    /// Candidate handles in order.
    #[must_use]
    pub fn ids(&self) -> &[ClassId] {
        &self.candidates
    }

    /// Candidate classes in order.
    pub fn iter(&self) -> impl Iterator<Item = &ClassMetadata> {
        self.candidates.iter().map(|id| self.registry.get(*id))
    }

    /// Number of candidates.
    #[must_use]
    pub fn len(&self) -> usize {
        self.candidates.len()
    }

    /// Whether there is no candidate.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Simple names shared by several candidates, first-seen order.
    ///
    /// Each such name yields one entity block per candidate.
    #[must_use]
    pub fn duplicate_names(&self) -> Vec<&str> {
        duplicate_names(&self.registry, &self.candidates)
    }
}

/// Entity classes in scope, then their in-scope subtypes to a fixpoint.
///
/// Both groups keep registry order; a class is selected at most once.
#[must_use]
pub fn select_candidates(registry: &TypeRegistry, scope: &PackageScope) -> Vec<ClassId> {
    let mut selected: IndexSet<ClassId> = registry
        .iter()
        .filter(|(_, class)| class.is_entity && scope.contains(&class.module))
        .map(|(id, _)| id)
        .collect();

    let entities = selected.len();
    info!(
        count = entities,
        classes = ?names(registry, selected.iter()),
        "found entity classes"
    );

    loop {
        let before = selected.len();
        for (id, class) in registry.iter() {
            if selected.contains(&id) || !scope.contains(&class.module) {
                continue;
            }
            let extends_candidate = class
                .supertype
                .as_deref()
                .and_then(|base| registry.lookup(base))
                .is_some_and(|base| selected.contains(&base));
            if extends_candidate {
                selected.insert(id);
            }
        }
        if selected.len() == before {
            break;
        }
    }

    if selected.len() > entities {
        info!(
            count = selected.len(),
            classes = ?names(registry, selected.iter()),
            "found sub-classes of entity classes"
        );
    }

    let selected: Vec<ClassId> = selected.into_iter().collect();
    for name in duplicate_names(registry, &selected) {
        let modules: Vec<_> = selected
            .iter()
            .map(|id| registry.get(*id))
            .filter(|class| class.name == name)
            .map(|class| class.module.as_str())
            .collect();
        warn!(name, ?modules, "several candidates share a simple name");
    }
    selected
}

fn duplicate_names<'a>(registry: &'a TypeRegistry, ids: &[ClassId]) -> Vec<&'a str> {
    let mut counts: IndexMap<&str, usize> = IndexMap::new();
    for id in ids {
        *counts.entry(registry.get(*id).name.as_str()).or_default() += 1;
    }
    counts
        .into_iter()
        .filter(|(_, count)| *count > 1)
        .map(|(name, _)| name)
        .collect()
}

fn names<'a>(registry: &TypeRegistry, ids: impl Iterator<Item = &'a ClassId>) -> Vec<String> {
    ids.map(|id| registry.get(*id).qualified_name()).collect()
}

/// Source of the candidate class set.
pub trait TypeDiscovery {
    /// Discover the candidates inside `scope`.
    ///
    /// # Errors
    ///
    /// Implementation specific; a failure aborts the run.
    fn discover(&self, scope: &PackageScope) -> Result<CandidateSet>;
}

impl TypeDiscovery for TypeRegistry {
    fn discover(&self, scope: &PackageScope) -> Result<CandidateSet> {
        Ok(CandidateSet::select(self.clone(), scope))
    }
}

/// Discovery over a directory of Rust sources.
#[derive(Debug, Clone)]
pub struct SourceTree {
    root: PathBuf
}

impl SourceTree {
    /// Tree rooted at `root` (usually a crate's `src`).
    #[must_use]
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self {
            root: root.into()
        }
    }

    /// Source root.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Parse every `.rs` file under the root into one registry.
    ///
    /// Files are visited sorted by path, so registry order is stable.
    ///
    /// # Errors
    ///
    /// [`Error::MissingRoot`], walk and read failures, and any parse
    /// error from [`source::parse_file`].
    pub fn load(&self) -> Result<TypeRegistry> {
        if !self.root.is_dir() {
            return Err(Error::MissingRoot(self.root.clone()));
        }

        let mut registry = TypeRegistry::new();
        for path in self.rust_files()? {
            for class in source::parse_file(&self.root, &path)? {
                registry.register(class);
            }
        }
        Ok(registry)
    }

    fn rust_files(&self) -> Result<Vec<PathBuf>> {
        let mut paths = Vec::new();
        for entry in WalkDir::new(&self.root) {
            let entry = entry.map_err(|source| Error::Walk {
                root: self.root.clone(),
                source
            })?;
            if entry.file_type().is_file() && entry.path().extension().is_some_and(|ext| ext == "rs") {
                paths.push(entry.into_path());
            }
        }
        paths.sort();
        Ok(paths)
    }
}

impl TypeDiscovery for SourceTree {
    fn discover(&self, scope: &PackageScope) -> Result<CandidateSet> {
        let registry = self.load()?;
        Ok(CandidateSet::select(registry, scope))
    }
}
