//! Transformation pipeline
//!
//! Transforms run in a fixed order over one project at a time. Each unit
//! declares its own applicability; the pipeline honors per-name skip and force
//! sets from `ConversionOptions`. A failing unit aborts the rest of that
//! project's run with the unit name and project path attached, but never
//! affects sibling projects.

mod dedup;
mod reduction;
mod target_frameworks;

use std::sync::Arc;

use tracing::debug;

use crate::config::ConversionOptions;
use crate::error::{MigrateError, MigrateResult};
use crate::metadata::PackageMetadataProvider;
use crate::models::Project;

pub use dedup::DedupPackageReferences;
pub use reduction::PackageReferenceReduction;
pub use target_frameworks::TargetFrameworkOverride;

/// One unit of work over a loaded project
pub trait ProjectTransform {
    /// Stable name used for skip/force matching and error reporting
    fn name(&self) -> &'static str;

    /// Whether this unit applies to the given project shape
    fn applies(&self, _project: &Project) -> bool {
        true
    }

    fn transform(&self, project: &mut Project) -> MigrateResult<()>;
}

/// Ordered, strictly sequential list of transforms
pub struct TransformationPipeline {
    transforms: Vec<Box<dyn ProjectTransform>>,
    options: ConversionOptions,
}

impl TransformationPipeline {
    pub fn new(transforms: Vec<Box<dyn ProjectTransform>>, options: ConversionOptions) -> Self {
        Self { transforms, options }
    }

    /// The standard transform order
    pub fn standard(
        provider: Arc<dyn PackageMetadataProvider>,
        options: ConversionOptions,
    ) -> Self {
        let override_frameworks = options.target_frameworks.clone();
        Self::new(
            vec![
                Box::new(DedupPackageReferences),
                Box::new(TargetFrameworkOverride::new(override_frameworks)),
                Box::new(PackageReferenceReduction::new(provider)),
            ],
            options,
        )
    }

    /// Run every transform against one project.
    ///
    /// The first failure stops this project's run; the error carries the
    /// transform name and project path so batch drivers can report and move on.
    pub fn run(&self, project: &mut Project) -> MigrateResult<()> {
        for transform in &self.transforms {
            let name = transform.name();
            if self.options.skip_transforms.contains(name) {
                debug!(transform = name, "transform skipped by configuration");
                continue;
            }
            if !transform.applies(project) && !self.options.force_transforms.contains(name) {
                debug!(transform = name, "transform does not apply, skipping");
                continue;
            }
            debug!(transform = name, project = %project.file_path.display(), "running transform");
            transform
                .transform(project)
                .map_err(|source| MigrateError::Transform {
                    name: name.to_string(),
                    project: project.file_path.clone(),
                    source: Box::new(source),
                })?;
        }
        Ok(())
    }
}
