//! Dependency reduction for legacy package lists
//!
//! Legacy `packages.config` manifests pin the whole dependency closure; the
//! modern restore only needs the top-level packages. This transform asks the
//! metadata provider for each declared package's direct dependencies and drops
//! declarations that another declared package already pulls in. The removal is
//! one level deep: ids removable only because their dependent was removed stay
//! put, which keeps the result independent of iteration order.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::error::MigrateResult;
use crate::metadata::{
    PackageMetadataProvider, PackageQuery, PackageSource, QueryCache, ResolvedPackage,
};
use crate::models::Project;
use crate::transforms::ProjectTransform;

/// Framework packages ship with the platform, so re-declaring them is noise
const SYSTEM_PACKAGE_PREFIX: &str = "System";
/// Exception: a real NuGet package that happens to share the prefix
const SYSTEM_PACKAGE_ALLOWED_PREFIX: &str = "System.Data.SQLite";

pub struct PackageReferenceReduction {
    provider: Arc<dyn PackageMetadataProvider>,
}

impl PackageReferenceReduction {
    pub fn new(provider: Arc<dyn PackageMetadataProvider>) -> Self {
        Self { provider }
    }

    fn lookup(
        &self,
        source: &PackageSource,
        cache: &mut QueryCache,
        query: PackageQuery,
    ) -> Option<ResolvedPackage> {
        if let Some(cached) = cache.get(&query) {
            return cached.clone();
        }
        let result = match self.provider.resolve(source, &query) {
            Ok(resolved) => resolved,
            Err(error) => {
                // An unreachable source or bad payload must not abort the
                // project; the package just contributes no removals
                warn!(
                    id = %query.id,
                    version = %query.version,
                    %error,
                    "package metadata lookup failed, treating as unknown"
                );
                None
            }
        };
        cache.insert(query, result.clone());
        result
    }
}

impl ProjectTransform for PackageReferenceReduction {
    fn name(&self) -> &'static str {
        "package-reference-reduction"
    }

    fn applies(&self, project: &Project) -> bool {
        project.is_legacy()
    }

    fn transform(&self, project: &mut Project) -> MigrateResult<()> {
        let Some(settings) = project.package_source_settings.clone() else {
            debug!("no package source settings, reduction is a pass-through");
            return Ok(());
        };
        let Some(source) = settings.enabled_sources().next() else {
            debug!("no enabled package source, reduction is a pass-through");
            return Ok(());
        };
        // Single-framework limitation: reduction consults the first moniker
        let Some(framework) = project.target_frameworks.first().cloned() else {
            debug!("no target framework, reduction is a pass-through");
            return Ok(());
        };

        let mut cache = QueryCache::new();
        let mut removal: HashSet<String> = HashSet::new();

        for package in &project.package_references {
            let query = PackageQuery {
                id: package.id.clone(),
                version: package.version.clone(),
                target_framework: framework.clone(),
            };
            if let Some(resolved) = self.lookup(source, &mut cache, query) {
                if resolved.listed {
                    removal.extend(resolved.direct_dependencies.iter().cloned());
                }
            }

            if package.id.starts_with(SYSTEM_PACKAGE_PREFIX)
                && !package.id.starts_with(SYSTEM_PACKAGE_ALLOWED_PREFIX)
            {
                removal.insert(package.id.clone());
            }
        }

        if removal.is_empty() {
            return Ok(());
        }

        let before = project.package_references.len();
        project
            .package_references
            .retain(|package| !removal.contains(&package.id));
        debug!(
            removed = before - project.package_references.len(),
            remaining = project.package_references.len(),
            "reduced package references"
        );
        Ok(())
    }
}
