//! Core data model for projmigrate
//!
//! Defines the central `Project` entity plus the normalized reference records
//! extracted from the document tree:
//! - `AssemblyReference`: binary reference from an `ItemGroup`
//! - `ProjectReference`: reference to a sibling project by relative path
//! - `PackageReference`: NuGet dependency, inline or from `packages.config`

use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use serde::Serialize;
use uuid::Uuid;

use crate::metadata::PackageSourceSettings;
use crate::xml::{NodePath, XmlDocument, XmlElement};

/// Root namespace of legacy (VS2015-era) project files
pub const MSBUILD_2003_NAMESPACE: &str = "http://schemas.microsoft.com/developer/msbuild/2003";

/// SDK id that marks a modern web project
pub const WEB_SDK: &str = "Microsoft.NET.Sdk.Web";

/// Shared handle to a loaded project.
///
/// The cache hands out clones of the same `Arc`, so every consumer of a path
/// observes the one project instance for that path. Transforms lock it and
/// mutate in place.
pub type SharedProject = Arc<Mutex<Project>>;

/// An in-memory project model, built once per file path and mutated in place
/// by the transformation pipeline.
#[derive(Debug, Clone)]
pub struct Project {
    /// Absolute, normalized path of the project file
    pub file_path: PathBuf,
    /// Parsed document tree; item back-links index into this
    pub document: XmlDocument,
    /// Modern (SDK-style) vs legacy schema
    pub is_modern: bool,
    pub is_web: bool,
    pub is_windows_forms: bool,
    pub is_wpf: bool,
    /// Stable identifier from the `ProjectGuid` element, if present
    pub project_guid: Option<Uuid>,
    /// Target framework monikers; UAP/Xamarin type markers append entries here
    pub target_frameworks: Vec<String>,
    /// Build configuration names (Debug/Release by convention)
    pub configurations: Vec<String>,
    /// Explicit intermediate output paths unioned with `obj/<configuration>`
    pub intermediate_output_paths: Vec<PathBuf>,
    pub assembly_references: Vec<AssemblyReference>,
    pub project_references: Vec<ProjectReference>,
    pub package_references: Vec<PackageReference>,
    /// Raw `ItemGroup` elements, unparsed inclusion rules for the serializer
    pub item_groups: Vec<XmlElement>,
    /// Assembly-level attribute elements; filled in by the assembly-info
    /// collaborator after the core load completes
    pub assembly_attributes: Vec<XmlElement>,
    /// Files marked for removal by later transforms
    pub deletions: Vec<PathBuf>,
    /// Side-car `packages.config`, when one exists beside the project file
    pub packages_config_path: Option<PathBuf>,
    /// Package source configuration consumed by dependency reduction;
    /// `None` turns that transform into a pass-through
    pub package_source_settings: Option<PackageSourceSettings>,
}

impl Project {
    /// Directory containing the project file
    pub fn directory(&self) -> &Path {
        self.file_path.parent().unwrap_or_else(|| Path::new(""))
    }

    pub fn is_legacy(&self) -> bool {
        !self.is_modern
    }
}

/// A binary reference by assembly name
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AssemblyReference {
    pub include: String,
    pub hint_path: Option<String>,
    pub specific_version: Option<String>,
    pub is_private: Option<String>,
    pub embed_interop_types: Option<String>,
    /// Back-link to the source markup node for later rewriting
    #[serde(skip)]
    pub source: Option<NodePath>,
}

/// A reference to another project by relative path.
///
/// Holds only a path-derived lookup key to the referenced file, never the
/// referenced `Project` itself; that keeps mutually-referencing projects from
/// forming ownership cycles.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProjectReference {
    /// Relative path as written in the document
    pub include: String,
    pub project_name: Option<String>,
    pub aliases: Option<String>,
    pub embed_interop_types: bool,
    pub project_guid: Option<Uuid>,
    /// Include path joined onto the owning project's directory
    pub resolved_path: Option<PathBuf>,
    #[serde(skip)]
    pub source: Option<NodePath>,
}

/// A declared dependency on a versioned package
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PackageReference {
    pub id: String,
    pub version: String,
    pub is_development_dependency: bool,
    /// `None` when synthesized from a `packages.config` entry
    #[serde(skip)]
    pub source: Option<NodePath>,
}

impl PackageReference {
    pub fn new(id: impl Into<String>, version: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            version: version.into(),
            is_development_dependency: false,
            source: None,
        }
    }
}
