//! Shared helpers for integration tests.

pub mod fixtures;

use std::fs;
use std::path::{Path, PathBuf};

/// Write a project file into `dir` and return its path
pub fn write_project(dir: &Path, name: &str, content: &str) -> PathBuf {
    let path = dir.join(name);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(&path, content).unwrap();
    path
}
