//! Legacy `packages.config` manifest parsing
//!
//! Legacy projects list NuGet dependencies in a flat side-car file next to the
//! project. Entries parsed here are logically prepended to any inline
//! `PackageReference` items during model building.

use std::fs;
use std::path::Path;

use crate::error::{MigrateError, MigrateResult};
use crate::models::PackageReference;
use crate::xml::XmlDocument;

/// Parse a `packages.config` file from disk
pub fn parse_file(path: &Path) -> MigrateResult<Vec<PackageReference>> {
    let content = fs::read_to_string(path)?;
    parse(&content, path)
}

/// Parse `packages.config` content.
///
/// Expected shape:
/// ```text
/// <packages>
///   <package id="Newtonsoft.Json" version="12.0.1" developmentDependency="false" />
/// </packages>
/// ```
pub fn parse(content: &str, file: &Path) -> MigrateResult<Vec<PackageReference>> {
    let document = XmlDocument::parse(content).map_err(|e| MigrateError::Xml {
        file: file.to_path_buf(),
        message: e.to_string(),
    })?;

    if document.root.name != "packages" {
        return Err(MigrateError::Xml {
            file: file.to_path_buf(),
            message: format!("expected <packages> root, found <{}>", document.root.name),
        });
    }

    let mut references = Vec::new();
    for package in document.root.elements("package") {
        let id = package
            .attribute("id")
            .ok_or_else(|| MigrateError::MissingAttribute {
                element: "package",
                attribute: "id",
                file: file.to_path_buf(),
            })?
            .to_string();

        let version = package
            .attribute("version")
            .ok_or_else(|| MigrateError::MissingPackageVersion {
                id: id.clone(),
                file: file.to_path_buf(),
            })?
            .to_string();

        references.push(PackageReference {
            id,
            version,
            is_development_dependency: package.attribute("developmentDependency") == Some("true"),
            source: None,
        });
    }

    Ok(references)
}
