//! Property extraction: build configurations and target frameworks
//!
//! Legacy documents spell configurations through conditioned property groups
//! (`'$(Configuration)|$(Platform)' == 'Debug|AnyCPU'`) and the framework
//! through `TargetFrameworkVersion`; modern documents use the `Configurations`
//! and `TargetFramework(s)` elements directly. Both shapes land in the same
//! model fields.

use crate::models::Project;

/// Populate configurations and target frameworks on the project.
///
/// Appends to `target_frameworks` so markers discovered earlier (UAP, Xamarin)
/// stay in place.
pub(crate) fn populate(project: &mut Project) {
    let root = &project.document.root;

    let mut configurations: Vec<String> = Vec::new();
    for element in root.descendants("Configurations") {
        for name in element.text().split(';') {
            push_unique(&mut configurations, name.trim());
        }
    }
    for group in root.elements("PropertyGroup") {
        if let Some(condition) = group.attribute("Condition") {
            if let Some(name) = configuration_from_condition(condition) {
                push_unique(&mut configurations, &name);
            }
        }
    }
    // MSBuild defines Debug and Release even when the document names neither
    if configurations.is_empty() {
        configurations.push("Debug".to_string());
        configurations.push("Release".to_string());
    }
    project.configurations = configurations;

    let mut frameworks = std::mem::take(&mut project.target_frameworks);
    for element in root.descendants("TargetFrameworks") {
        for moniker in element.text().split(';') {
            push_unique(&mut frameworks, moniker.trim());
        }
    }
    for element in root.descendants("TargetFramework") {
        push_unique(&mut frameworks, element.text().trim());
    }
    for element in root.descendants("TargetFrameworkVersion") {
        push_unique(&mut frameworks, &moniker_from_version(element.text().trim()));
    }
    project.target_frameworks = frameworks;
}

/// Pull the configuration name out of a build condition like
/// `'$(Configuration)|$(Platform)' == 'Debug|AnyCPU'`
fn configuration_from_condition(condition: &str) -> Option<String> {
    if !condition.contains("$(Configuration)") {
        return None;
    }
    let (_, rhs) = condition.split_once("==")?;
    let value = rhs.trim().trim_matches('\'').split('|').next()?.trim();
    if value.is_empty() || value.contains("$(") {
        return None;
    }
    Some(value.to_string())
}

/// `v4.6.1` becomes `net461`
fn moniker_from_version(version: &str) -> String {
    let digits: String = version.chars().filter(char::is_ascii_digit).collect();
    format!("net{digits}")
}

fn push_unique(values: &mut Vec<String>, value: &str) {
    if !value.is_empty() && !values.iter().any(|existing| existing == value) {
        values.push(value.to_string());
    }
}
