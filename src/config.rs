//! Conversion options
//!
//! Plain configuration struct built by the caller (the CLI in practice) and
//! passed into the reader and pipeline explicitly.

use std::collections::HashSet;

/// Options controlling a conversion run
#[derive(Debug, Clone, Default)]
pub struct ConversionOptions {
    /// Convert even when the project type is in the unsupported table
    pub force: bool,

    /// Transform names to run even when their `applies` predicate says no
    pub force_transforms: HashSet<String>,

    /// Transform names to skip outright
    pub skip_transforms: HashSet<String>,

    /// Replace project target frameworks with these, when set
    pub target_frameworks: Option<Vec<String>>,
}

impl ConversionOptions {
    /// Options with the force flag set; common enough in tests and the CLI to
    /// warrant a shorthand
    pub fn forced() -> Self {
        Self {
            force: true,
            ..Self::default()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_options_are_inert() {
        let options = ConversionOptions::default();
        assert!(!options.force);
        assert!(options.force_transforms.is_empty());
        assert!(options.skip_transforms.is_empty());
        assert!(options.target_frameworks.is_none());
    }

    #[test]
    fn test_forced_sets_only_force() {
        let options = ConversionOptions::forced();
        assert!(options.force);
        assert!(options.target_frameworks.is_none());
    }
}
