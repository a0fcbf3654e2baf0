//! Package metadata provider boundary
//!
//! The dependency-reduction transform needs "resolve package at framework to
//! its direct dependency set". The concrete lookup (a NuGet V3 client in the
//! full tool) lives behind the `PackageMetadataProvider` trait; the core only
//! requires a synchronous single-attempt call. Retry and timeout policy belong
//! to the implementation, not this boundary.

use std::collections::HashMap;

use thiserror::Error;

/// One package lookup: id and version at a target framework
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct PackageQuery {
    pub id: String,
    pub version: String,
    pub target_framework: String,
}

/// Metadata for a resolved package.
///
/// `direct_dependencies` is one level deep, not the transitive closure.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedPackage {
    /// Whether the package is listed (delisted packages resolve but carry no
    /// reduction weight)
    pub listed: bool,
    pub direct_dependencies: Vec<String>,
}

/// Lookup failures, isolated per package by the reduction transform
#[derive(Debug, Error)]
pub enum MetadataError {
    #[error("package source '{source_name}' is unreachable: {message}")]
    SourceUnreachable {
        source_name: String,
        message: String,
    },

    #[error("malformed metadata for package '{id}': {message}")]
    MalformedResponse { id: String, message: String },
}

/// Abstract metadata lookup capability.
///
/// One call in, one result or failure out; implementations may block, await,
/// or poll internally but must present a synchronous face here.
pub trait PackageMetadataProvider: Send + Sync {
    /// Resolve a package against one source. `Ok(None)` means the source does
    /// not know the package; that is not an error.
    fn resolve(
        &self,
        source: &PackageSource,
        query: &PackageQuery,
    ) -> Result<Option<ResolvedPackage>, MetadataError>;
}

/// Memo of query results scoped to a single reduction invocation.
///
/// Repeated packages within one project reuse cached results; the whole cache
/// is dropped when the transform returns, success or failure.
#[derive(Debug, Default)]
pub struct QueryCache {
    entries: HashMap<PackageQuery, Option<ResolvedPackage>>,
}

impl QueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, query: &PackageQuery) -> Option<&Option<ResolvedPackage>> {
        self.entries.get(query)
    }

    pub fn insert(&mut self, query: PackageQuery, result: Option<ResolvedPackage>) {
        self.entries.insert(query, result);
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// A configured package source
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageSource {
    pub name: String,
    pub url: String,
    pub enabled: bool,
}

impl PackageSource {
    pub fn new(name: impl Into<String>, url: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            url: url.into(),
            enabled: true,
        }
    }
}

/// Package source configuration attached to a project
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PackageSourceSettings {
    pub sources: Vec<PackageSource>,
}

impl PackageSourceSettings {
    pub fn new(sources: Vec<PackageSource>) -> Self {
        Self { sources }
    }

    pub fn enabled_sources(&self) -> impl Iterator<Item = &PackageSource> {
        self.sources.iter().filter(|source| source.enabled)
    }
}

/// In-memory provider backed by a fixed map, keyed by package id and version.
///
/// Serves tests and offline runs; ignores the target framework and the source.
#[derive(Debug, Default)]
pub struct StaticMetadataProvider {
    packages: HashMap<(String, String), ResolvedPackage>,
}

impl StaticMetadataProvider {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(
        &mut self,
        id: impl Into<String>,
        version: impl Into<String>,
        package: ResolvedPackage,
    ) {
        self.packages.insert((id.into(), version.into()), package);
    }
}

impl PackageMetadataProvider for StaticMetadataProvider {
    fn resolve(
        &self,
        _source: &PackageSource,
        query: &PackageQuery,
    ) -> Result<Option<ResolvedPackage>, MetadataError> {
        Ok(self
            .packages
            .get(&(query.id.clone(), query.version.clone()))
            .cloned())
    }
}
