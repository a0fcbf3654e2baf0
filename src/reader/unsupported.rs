//! Known-unsupported project type table
//!
//! Some VS2015-era project kinds have no SDK-style equivalent; converting them
//! produces a project that no longer loads. They are identified by entries in
//! the `ProjectTypeGuids` list and rejected up front unless the caller forces
//! the conversion.

use crate::xml::XmlDocument;

/// Type GUID (uppercase, braced) paired with a human-readable reason
const UNSUPPORTED_PROJECT_TYPES: &[(&str, &str)] = &[
    (
        "{593B0543-81F6-4436-BA1E-4747859CAAE2}",
        "SharePoint projects require the legacy project system",
    ),
    (
        "{82B43B9B-A64C-4715-B499-D71E9CA2BD60}",
        "Visual Studio extension (VSIX) projects are not convertible",
    ),
    (
        "{CC5FD16D-436D-48AD-A40C-5A424C6E3E79}",
        "Azure Cloud Service projects are not convertible",
    ),
    (
        "{32F31D43-81CC-4C15-9DE6-3FC5453562B6}",
        "Windows Workflow projects require the legacy project system",
    ),
];

/// Reason the project cannot be converted, or `None` when no unsupported type
/// marker is present
pub(crate) fn unsupported_reason(document: &XmlDocument) -> Option<&'static str> {
    let type_guids = document.root.descendants("ProjectTypeGuids");
    let element = type_guids.first()?;

    for guid in element.text().split(';') {
        let guid = guid.trim().to_uppercase();
        for (unsupported, reason) in UNSUPPORTED_PROJECT_TYPES {
            if guid == *unsupported {
                return Some(reason);
            }
        }
    }
    None
}
