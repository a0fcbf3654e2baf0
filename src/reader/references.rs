//! Reference extraction
//!
//! Pure functions over the document tree producing normalized reference
//! records. Nothing here mutates the document; each record carries a
//! `NodePath` back-link so the serializer can rewrite the original item.

use std::path::{Path, PathBuf};

use uuid::Uuid;

use crate::error::{MigrateError, MigrateResult};
use crate::models::{AssemblyReference, PackageReference, ProjectReference};
use crate::xml::{NodePath, XmlDocument, XmlElement, XmlNode};

/// Extract every `ItemGroup > Reference` item
pub fn assembly_references(document: &XmlDocument) -> Vec<AssemblyReference> {
    let mut references = Vec::new();
    for (group_index, group) in indexed_elements(&document.root, "ItemGroup") {
        for (item_index, item) in indexed_elements(group, "Reference") {
            // An item without Include carries no assembly name; nothing to migrate
            let Some(include) = item.attribute("Include") else {
                continue;
            };
            references.push(AssemblyReference {
                include: include.to_string(),
                hint_path: sub_element_value(item, "HintPath"),
                specific_version: sub_element_value(item, "SpecificVersion"),
                is_private: sub_element_value(item, "Private"),
                embed_interop_types: sub_element_value(item, "EmbedInteropTypes"),
                source: Some(NodePath(vec![group_index, item_index])),
            });
        }
    }
    references
}

/// Extract every `ItemGroup > ProjectReference` item.
///
/// The resolved path is a pure path join against the owning project's
/// directory; the referenced project is looked up through the cache later,
/// never owned here.
pub fn project_references(
    document: &XmlDocument,
    project_dir: &Path,
    file: &Path,
) -> MigrateResult<Vec<ProjectReference>> {
    let mut references = Vec::new();
    for (group_index, group) in indexed_elements(&document.root, "ItemGroup") {
        for (item_index, item) in indexed_elements(group, "ProjectReference") {
            let include = item
                .attribute("Include")
                .ok_or_else(|| MigrateError::MissingAttribute {
                    element: "ProjectReference",
                    attribute: "Include",
                    file: file.to_path_buf(),
                })?
                .to_string();

            let project_guid = match item.element("Project") {
                Some(element) => Some(parse_guid(&element.text(), file)?),
                None => None,
            };

            let embed_interop_types = item
                .element("EmbedInteropTypes")
                .map(|el| el.text().trim().eq_ignore_ascii_case("true"))
                .unwrap_or(false);

            let resolved_path = Some(project_dir.join(adjust_separators(&include)));

            references.push(ProjectReference {
                include,
                project_name: item.element("Name").map(|el| el.text()),
                aliases: item.element("Aliases").map(|el| el.text()),
                embed_interop_types,
                project_guid,
                resolved_path,
                source: Some(NodePath(vec![group_index, item_index])),
            });
        }
    }
    Ok(references)
}

/// Extract modern inline `PackageReference` items.
///
/// The version comes from the `Version` attribute or, failing that, a nested
/// `Version` element; a package with neither is malformed. Manifest-derived
/// entries are merged in front of these by the model builder, and duplicates
/// are left for the dedup transform.
pub fn package_references(
    document: &XmlDocument,
    file: &Path,
) -> MigrateResult<Vec<PackageReference>> {
    let mut references = Vec::new();
    for (group_index, group) in indexed_elements(&document.root, "ItemGroup") {
        for (item_index, item) in indexed_elements(group, "PackageReference") {
            let id = item
                .attribute("Include")
                .ok_or_else(|| MigrateError::MissingAttribute {
                    element: "PackageReference",
                    attribute: "Include",
                    file: file.to_path_buf(),
                })?
                .to_string();

            let version = match item.attribute("Version") {
                Some(version) => version.to_string(),
                None => item
                    .element("Version")
                    .map(|el| el.text())
                    .ok_or_else(|| MigrateError::MissingPackageVersion {
                        id: id.clone(),
                        file: file.to_path_buf(),
                    })?,
            };

            references.push(PackageReference {
                id,
                version,
                is_development_dependency: item.element("PrivateAssets").is_some(),
                source: Some(NodePath(vec![group_index, item_index])),
            });
        }
    }
    Ok(references)
}

/// Parse a GUID as written in project files, with or without braces
pub(crate) fn parse_guid(value: &str, file: &Path) -> MigrateResult<Uuid> {
    let trimmed = value.trim().trim_start_matches('{').trim_end_matches('}');
    Uuid::parse_str(trimmed).map_err(|_| MigrateError::InvalidProjectGuid {
        value: value.trim().to_string(),
        file: file.to_path_buf(),
    })
}

/// Project files use backslash separators regardless of host platform
fn adjust_separators(include: &str) -> PathBuf {
    if std::path::MAIN_SEPARATOR == '\\' {
        PathBuf::from(include)
    } else {
        PathBuf::from(include.replace('\\', "/"))
    }
}

/// Children of `parent` matching a local name, paired with their child index
/// (the index feeds `NodePath` back-links, so it counts every node)
fn indexed_elements<'a>(parent: &'a XmlElement, name: &str) -> Vec<(usize, &'a XmlElement)> {
    parent
        .children
        .iter()
        .enumerate()
        .filter_map(|(index, node)| match node {
            XmlNode::Element(element) if element.name == name => Some((index, element)),
            _ => None,
        })
        .collect()
}

/// Value of the first descendant with a matching local name, prefix agnostic
fn sub_element_value(item: &XmlElement, name: &str) -> Option<String> {
    item.descendants(name).first().map(|el| el.text())
}
