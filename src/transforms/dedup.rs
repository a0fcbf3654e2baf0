//! Duplicate package reference removal

use std::collections::HashSet;

use crate::error::MigrateResult;
use crate::models::Project;
use crate::transforms::ProjectTransform;

/// Drops later package references that repeat an id already seen.
///
/// The model builder puts `packages.config` entries before inline items, so the
/// manifest version wins when both declare the same package.
pub struct DedupPackageReferences;

impl ProjectTransform for DedupPackageReferences {
    fn name(&self) -> &'static str {
        "dedup-package-references"
    }

    fn transform(&self, project: &mut Project) -> MigrateResult<()> {
        let mut seen = HashSet::new();
        project
            .package_references
            .retain(|package| seen.insert(package.id.clone()));
        Ok(())
    }
}
