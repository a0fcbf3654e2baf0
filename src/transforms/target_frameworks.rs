//! Target framework override

use crate::error::MigrateResult;
use crate::models::Project;
use crate::transforms::ProjectTransform;

/// Replaces a project's target frameworks with a configured list.
///
/// Inert when no override is configured; `applies` reports false so the
/// pipeline logs the skip rather than running a no-op.
pub struct TargetFrameworkOverride {
    frameworks: Option<Vec<String>>,
}

impl TargetFrameworkOverride {
    pub fn new(frameworks: Option<Vec<String>>) -> Self {
        Self { frameworks }
    }
}

impl ProjectTransform for TargetFrameworkOverride {
    fn name(&self) -> &'static str {
        "target-framework-override"
    }

    fn applies(&self, _project: &Project) -> bool {
        self.frameworks.is_some()
    }

    fn transform(&self, project: &mut Project) -> MigrateResult<()> {
        if let Some(frameworks) = &self.frameworks {
            project.target_frameworks = frameworks.clone();
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::transforms::tests::project;

    #[test]
    fn test_override_replaces_frameworks() {
        let mut p = project("/work/app.csproj", false);
        p.target_frameworks = vec!["net461".to_string()];

        let transform =
            TargetFrameworkOverride::new(Some(vec!["netstandard2.0".to_string()]));
        assert!(transform.applies(&p));
        transform.transform(&mut p).unwrap();
        assert_eq!(p.target_frameworks, vec!["netstandard2.0"]);
    }

    #[test]
    fn test_without_override_does_not_apply() {
        let p = project("/work/app.csproj", false);
        assert!(!TargetFrameworkOverride::new(None).applies(&p));
    }
}
