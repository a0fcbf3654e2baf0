//! Project loading: markup parsing, classification, and model building
//!
//! `ProjectReader` turns a file path into a cached `Project`. The shell is
//! registered in the cache before references are populated, so a cyclic
//! project-reference graph resolves through the cache instead of recursing.

pub mod packages_config;
pub mod properties;
pub mod references;
mod unsupported;

use std::collections::HashSet;
use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex};

use tracing::{debug, error, warn};

use crate::cache::ProjectCache;
use crate::config::ConversionOptions;
use crate::error::{MigrateError, MigrateResult};
use crate::models::{PackageReference, Project, SharedProject, MSBUILD_2003_NAMESPACE, WEB_SDK};
use crate::xml::XmlDocument;

/// Visual Studio project type GUIDs that refine classification
mod type_guids {
    pub const WEB: &[&str] = &[
        "{603C0E0B-DB56-11DC-BE95-000D561079B0}", // ASP.NET MVC 1
        "{F85E285D-A4E0-4152-9332-AB1D724D3325}", // ASP.NET MVC 2
        "{E53F8FEA-EAE0-44A6-8774-FFD645390401}", // ASP.NET MVC 3
        "{E3E379DF-F4C6-4180-9B81-6769533ABE47}", // ASP.NET MVC 4
        "{349C5851-65DF-11DA-9384-00065B846F21}", // Web Application (incl. MVC 5)
        "{8BB2217D-0F2D-49D1-97BC-3654ED321F3B}", // ASP.NET 5
        "{E24C65DC-7377-472B-9ABA-BC803B73C61A}", // Web Site
    ];
    pub const XAMARIN_ANDROID: &str = "{EFBA0AD7-5A72-4C68-AF49-83D382785DCF}";
    pub const XAMARIN_IOS: &str = "{6BC8ED88-2882-458C-8E55-DFD12B67127B}";
    pub const UAP: &str = "{A5A43C5B-DE2A-4C0C-9213-0A381AF9435A}";
    pub const WPF: &str = "{60DC8134-EBA5-43B8-BCC9-BB4BC16C2548}";
}

/// Loads project files into the shared cache
pub struct ProjectReader {
    cache: Arc<ProjectCache>,
    options: ConversionOptions,
}

impl ProjectReader {
    pub fn new(cache: Arc<ProjectCache>, options: ConversionOptions) -> Self {
        Self { cache, options }
    }

    /// Load a project, returning `Ok(None)` for expected skip conditions:
    /// files that are not project files and project types the converter does
    /// not support. Malformed content propagates as an error.
    pub fn read(&self, path: &Path) -> MigrateResult<Option<SharedProject>> {
        match self.read_inner(path) {
            Ok(project) => Ok(Some(project)),
            Err(MigrateError::NotAProjectFile { file }) => {
                warn!(file = %file.display(), "not an MSBuild project file, skipping");
                Ok(None)
            }
            Err(MigrateError::UnsupportedProjectType { file, reason }) => {
                error!(
                    file = %file.display(),
                    reason,
                    "project type is not supported for conversion, skipping"
                );
                Ok(None)
            }
            Err(other) => Err(other),
        }
    }

    fn read_inner(&self, path: &Path) -> MigrateResult<SharedProject> {
        let file_path = ProjectCache::normalize(path);
        if let Some(existing) = self.cache.get(&file_path) {
            debug!(file = %file_path.display(), "project cache hit");
            return Ok(existing);
        }

        // File handle is scoped to this read; the document tree outlives it
        let content = fs::read_to_string(&file_path)?;
        let document = XmlDocument::parse(&content).map_err(|e| MigrateError::Xml {
            file: file_path.clone(),
            message: e.to_string(),
        })?;

        let root = &document.root;
        let is_legacy =
            root.name == "Project" && root.namespace.as_deref() == Some(MSBUILD_2003_NAMESPACE);
        let is_modern = root.name == "Project" && root.namespace.is_none();
        if !is_legacy && !is_modern {
            return Err(MigrateError::NotAProjectFile { file: file_path });
        }

        // Checked before cache registration so a rejected project never
        // becomes visible through the cache
        if !self.options.force {
            if let Some(reason) = unsupported::unsupported_reason(&document) {
                return Err(MigrateError::UnsupportedProjectType {
                    file: file_path,
                    reason: reason.to_string(),
                });
            }
        }

        let is_web = is_modern
            && root
                .first_attribute()
                .map(|(_, value)| value == WEB_SDK)
                .unwrap_or(false);

        let packages_config_path = find_packages_config(&file_path);
        let manifest_packages = match &packages_config_path {
            Some(config) => packages_config::parse_file(config)?,
            None => Vec::new(),
        };

        let shell = Project {
            file_path: file_path.clone(),
            document,
            is_modern,
            is_web,
            is_windows_forms: false,
            is_wpf: false,
            project_guid: None,
            target_frameworks: Vec::new(),
            configurations: Vec::new(),
            intermediate_output_paths: Vec::new(),
            assembly_references: Vec::new(),
            project_references: Vec::new(),
            package_references: Vec::new(),
            item_groups: Vec::new(),
            assembly_attributes: Vec::new(),
            deletions: Vec::new(),
            packages_config_path,
            package_source_settings: None,
        };

        // Register before populating: a project-reference cycle re-entering
        // this path gets the (possibly partially populated) entry instead of
        // recursing
        let candidate = Arc::new(Mutex::new(shell));
        let shared = self.cache.insert(file_path, candidate.clone());
        if !Arc::ptr_eq(&shared, &candidate) {
            // Lost an insertion race; the winner's load populates the entry
            return Ok(shared);
        }

        {
            let mut project = shared.lock().expect("project cache entry poisoned");
            populate(&mut project, manifest_packages)?;
        }
        Ok(shared)
    }
}

fn populate(project: &mut Project, manifest_packages: Vec<PackageReference>) -> MigrateResult<()> {
    let file = project.file_path.clone();

    project.project_guid = read_project_guid(project)?;
    project.assembly_references = references::assembly_references(&project.document);
    project.project_references =
        references::project_references(&project.document, project.directory(), &file)?;

    // Manifest entries first, inline declarations after; the dedup transform
    // owns duplicate handling
    let mut packages = manifest_packages;
    packages.extend(references::package_references(&project.document, &file)?);
    for package in &packages {
        debug!(id = %package.id, version = %package.version, "found package reference");
    }
    project.package_references = packages;

    project.item_groups = project
        .document
        .root
        .elements("ItemGroup")
        .cloned()
        .collect();

    classify_special_types(project);
    properties::populate(project);
    project.intermediate_output_paths = intermediate_output_paths(project);

    Ok(())
}

fn read_project_guid(project: &Project) -> MigrateResult<Option<uuid::Uuid>> {
    let guids = project.document.root.descendants("ProjectGuid");
    match guids.first() {
        Some(element) => {
            references::parse_guid(&element.text(), &project.file_path).map(Some)
        }
        None => Ok(None),
    }
}

/// Type-specific classification from `MyType` and `ProjectTypeGuids` markers
fn classify_special_types(project: &mut Project) {
    let root = &project.document.root;

    if root
        .descendants("MyType")
        .first()
        .map(|el| el.text() == "WindowsForms")
        .unwrap_or(false)
    {
        warn!(
            file = %project.file_path.display(),
            "Windows Forms project, conversion support is limited"
        );
        project.is_windows_forms = true;
    }

    let type_guid_elements = root.descendants("ProjectTypeGuids");
    let Some(element) = type_guid_elements.first() else {
        return;
    };
    let guids: HashSet<String> = element
        .text()
        .split(';')
        .map(|guid| guid.trim().to_uppercase())
        .collect();

    if type_guids::WEB.iter().any(|guid| guids.contains(*guid)) {
        project.is_web = true;
        return;
    }
    if guids.contains(type_guids::XAMARIN_ANDROID) {
        project.target_frameworks.push("xamarin.android".to_string());
    }
    if guids.contains(type_guids::XAMARIN_IOS) {
        project.target_frameworks.push("xamarin.ios".to_string());
    }
    if guids.contains(type_guids::UAP) {
        project.target_frameworks.push("uap".to_string());
    }
    if guids.contains(type_guids::WPF) {
        project.is_wpf = true;
    }
}

/// Explicit `IntermediateOutputPath` values (resolved against the project
/// directory) unioned with one conventional `obj/<configuration>` per
/// discovered configuration, de-duplicated in order
fn intermediate_output_paths(project: &Project) -> Vec<PathBuf> {
    let dir = project.directory();
    let mut seen = HashSet::new();
    let mut paths = Vec::new();

    for element in project.document.root.descendants("IntermediateOutputPath") {
        let value = element.text();
        let declared = PathBuf::from(value.trim());
        let resolved = if declared.is_absolute() {
            declared
        } else {
            dir.join(declared)
        };
        if seen.insert(resolved.clone()) {
            paths.push(resolved);
        }
    }

    for configuration in &project.configurations {
        let conventional = dir.join("obj").join(configuration);
        if seen.insert(conventional.clone()) {
            paths.push(conventional);
        }
    }

    paths
}

fn find_packages_config(project_file: &Path) -> Option<PathBuf> {
    let candidate = project_file.parent()?.join("packages.config");
    if candidate.is_file() {
        Some(candidate)
    } else {
        debug!(file = %project_file.display(), "no packages.config beside project");
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::tempdir;

    const LEGACY_PROJECT: &str = r#"<?xml version="1.0" encoding="utf-8"?>
<Project ToolsVersion="14.0" xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <ProjectGuid>{9A19103F-16F7-4668-BE54-9A1E7A4F7556}</ProjectGuid>
    <TargetFrameworkVersion>v4.6.1</TargetFrameworkVersion>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Debug|AnyCPU' ">
    <DebugSymbols>true</DebugSymbols>
  </PropertyGroup>
  <PropertyGroup Condition=" '$(Configuration)|$(Platform)' == 'Release|AnyCPU' ">
    <Optimize>true</Optimize>
  </PropertyGroup>
  <ItemGroup>
    <Reference Include="System.Xml" />
    <PackageReference Include="Serilog" Version="2.8.0" />
  </ItemGroup>
</Project>"#;

    const MODERN_PROJECT: &str = r#"<Project Sdk="Microsoft.NET.Sdk">
  <PropertyGroup>
    <TargetFramework>netstandard2.0</TargetFramework>
  </PropertyGroup>
</Project>"#;

    fn reader() -> (Arc<ProjectCache>, ProjectReader) {
        let cache = Arc::new(ProjectCache::new());
        let reader = ProjectReader::new(cache.clone(), ConversionOptions::default());
        (cache, reader)
    }

    #[test]
    fn test_read_legacy_project_classifies_and_populates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        fs::write(&path, LEGACY_PROJECT).unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().expect("project expected");
        let project = shared.lock().unwrap();

        assert!(project.is_legacy());
        assert!(!project.is_web);
        assert_eq!(
            project.project_guid,
            Some(uuid::Uuid::parse_str("9A19103F-16F7-4668-BE54-9A1E7A4F7556").unwrap())
        );
        assert_eq!(project.target_frameworks, vec!["net461"]);
        assert_eq!(project.configurations, vec!["Debug", "Release"]);
        assert_eq!(project.assembly_references.len(), 1);
        assert_eq!(project.package_references.len(), 1);
        assert_eq!(project.item_groups.len(), 1);
    }

    #[test]
    fn test_read_modern_web_project() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Web.csproj");
        fs::write(
            &path,
            r#"<Project Sdk="Microsoft.NET.Sdk.Web">
  <PropertyGroup><TargetFramework>netcoreapp2.1</TargetFramework></PropertyGroup>
</Project>"#,
        )
        .unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().expect("project expected");
        let project = shared.lock().unwrap();
        assert!(project.is_modern);
        assert!(project.is_web);
        assert_eq!(project.target_frameworks, vec!["netcoreapp2.1"]);
    }

    #[test]
    fn test_read_same_path_twice_returns_identical_instance() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        fs::write(&path, MODERN_PROJECT).unwrap();

        let (cache, reader) = reader();
        let first = reader.read(&path).unwrap().unwrap();

        // Replace the on-disk file with junk: a cache hit must not re-read it
        fs::write(&path, "this is not xml at all").unwrap();
        let second = reader.read(&path).unwrap().unwrap();

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(cache.len(), 1);
    }

    #[test]
    fn test_read_non_project_root_yields_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("notes.xml");
        fs::write(&path, "<notes><note>hi</note></notes>").unwrap();

        let (cache, reader) = reader();
        let result = reader.read(&path).unwrap();
        assert!(result.is_none());
        assert!(cache.is_empty());
    }

    #[test]
    fn test_read_namespaced_non_msbuild_root_yields_none() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("other.csproj");
        fs::write(&path, r#"<Project xmlns="urn:other-schema"/>"#).unwrap();

        let (_, reader) = reader();
        assert!(reader.read(&path).unwrap().is_none());
    }

    #[test]
    fn test_unsupported_type_skipped_unless_forced() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("SharePoint.csproj");
        fs::write(
            &path,
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <ProjectTypeGuids>{593B0543-81F6-4436-BA1E-4747859CAAE2};{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}</ProjectTypeGuids>
  </PropertyGroup>
</Project>"#,
        )
        .unwrap();

        let cache = Arc::new(ProjectCache::new());
        let plain = ProjectReader::new(cache.clone(), ConversionOptions::default());
        assert!(plain.read(&path).unwrap().is_none());
        assert!(cache.is_empty());

        let forced = ProjectReader::new(Arc::new(ProjectCache::new()), ConversionOptions::forced());
        assert!(forced.read(&path).unwrap().is_some());
    }

    #[test]
    fn test_manifest_packages_precede_inline_packages() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        fs::write(
            &path,
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <ItemGroup>
    <PackageReference Include="B" Version="2.0" />
  </ItemGroup>
</Project>"#,
        )
        .unwrap();
        fs::write(
            dir.path().join("packages.config"),
            r#"<packages><package id="A" version="1.0" /></packages>"#,
        )
        .unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().unwrap();
        let project = shared.lock().unwrap();

        let ids: Vec<(&str, &str)> = project
            .package_references
            .iter()
            .map(|p| (p.id.as_str(), p.version.as_str()))
            .collect();
        assert_eq!(ids, vec![("A", "1.0"), ("B", "2.0")]);
        assert!(project.packages_config_path.is_some());
        // Manifest entries have no source node; inline entries do
        assert!(project.package_references[0].source.is_none());
        assert!(project.package_references[1].source.is_some());
    }

    #[test]
    fn test_malformed_package_version_propagates() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        fs::write(
            &path,
            r#"<Project Sdk="Microsoft.NET.Sdk">
  <ItemGroup><PackageReference Include="Serilog" /></ItemGroup>
</Project>"#,
        )
        .unwrap();

        let (_, reader) = reader();
        let err = reader.read(&path).unwrap_err();
        assert!(matches!(err, MigrateError::MissingPackageVersion { .. }));
    }

    #[test]
    fn test_intermediate_output_paths_union_and_dedup() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        fs::write(&path, LEGACY_PROJECT).unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().unwrap();
        let project = shared.lock().unwrap();

        let project_dir = project.directory().to_path_buf();
        assert_eq!(
            project.intermediate_output_paths,
            vec![project_dir.join("obj/Debug"), project_dir.join("obj/Release")]
        );
    }

    #[test]
    fn test_explicit_intermediate_output_path_resolved_relative() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("App.csproj");
        fs::write(
            &path,
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <IntermediateOutputPath>build/tmp</IntermediateOutputPath>
  </PropertyGroup>
</Project>"#,
        )
        .unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().unwrap();
        let project = shared.lock().unwrap();

        let project_dir = project.directory().to_path_buf();
        assert!(project
            .intermediate_output_paths
            .contains(&project_dir.join("build/tmp")));
        // Conventional obj paths for the default configurations follow
        assert!(project
            .intermediate_output_paths
            .contains(&project_dir.join("obj/Debug")));
    }

    #[test]
    fn test_xamarin_type_guids_append_frameworks() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Droid.csproj");
        fs::write(
            &path,
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <ProjectTypeGuids>{EFBA0AD7-5A72-4C68-AF49-83D382785DCF};{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}</ProjectTypeGuids>
    <TargetFrameworkVersion>v4.6.1</TargetFrameworkVersion>
  </PropertyGroup>
</Project>"#,
        )
        .unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().unwrap();
        let project = shared.lock().unwrap();
        assert_eq!(project.target_frameworks, vec!["xamarin.android", "net461"]);
    }

    #[test]
    fn test_web_type_guid_marks_legacy_web_project() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("Mvc.csproj");
        fs::write(
            &path,
            r#"<Project xmlns="http://schemas.microsoft.com/developer/msbuild/2003">
  <PropertyGroup>
    <ProjectTypeGuids>{349C5851-65DF-11DA-9384-00065B846F21};{FAE04EC0-301F-11D3-BF4B-00C04F79EFBC}</ProjectTypeGuids>
  </PropertyGroup>
</Project>"#,
        )
        .unwrap();

        let (_, reader) = reader();
        let shared = reader.read(&path).unwrap().unwrap();
        assert!(shared.lock().unwrap().is_web);
    }
}
