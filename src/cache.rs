//! Run-scoped project cache
//!
//! Insertion-only store guaranteeing at-most-one `Project` per normalized path
//! within a run. Always an explicit object handed to the reader, never a
//! hidden singleton, so tests can supply an isolated cache per case.

use std::path::{Path, PathBuf};

use dashmap::DashMap;

use crate::models::SharedProject;

/// Path-keyed project store with first-writer-wins insertion.
///
/// Safe for concurrent insertion checks: when two loads race on the same path
/// exactly one candidate ends up in the cache and the other caller observes
/// it. No eviction; entries live until the run ends.
#[derive(Debug, Default)]
pub struct ProjectCache {
    entries: DashMap<PathBuf, SharedProject>,
}

impl ProjectCache {
    pub fn new() -> Self {
        Self::default()
    }

    /// Normalize a path into the cache key form.
    ///
    /// Canonicalizes when the file exists; falls back to making the path
    /// absolute so lookups for not-yet-created files still agree.
    pub fn normalize(path: &Path) -> PathBuf {
        path.canonicalize().unwrap_or_else(|_| {
            if path.is_absolute() {
                path.to_path_buf()
            } else {
                std::env::current_dir()
                    .map(|dir| dir.join(path))
                    .unwrap_or_else(|_| path.to_path_buf())
            }
        })
    }

    /// Look up a previously registered project. Expects a normalized key.
    pub fn get(&self, path: &Path) -> Option<SharedProject> {
        self.entries.get(path).map(|entry| entry.value().clone())
    }

    /// Register a project under its normalized path.
    ///
    /// Returns the entry that won: the candidate itself on first insertion, or
    /// the already-registered project when another load got there first.
    /// Callers distinguish the two with `Arc::ptr_eq`.
    pub fn insert(&self, path: PathBuf, project: SharedProject) -> SharedProject {
        self.entries.entry(path).or_insert(project).clone()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
