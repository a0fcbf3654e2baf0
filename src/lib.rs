//! projmigrate - legacy MSBuild project converter core
//!
//! Loads VS2015-era and SDK-style project files into a shared in-memory model
//! and runs an ordered transformation pipeline over them, including the
//! dependency-reduction pass that drops package declarations already pulled in
//! transitively. Serialization back to disk and the concrete package-metadata
//! client are external collaborators behind the boundaries defined here.

pub mod cache;
pub mod config;
pub mod error;
pub mod metadata;
pub mod models;
pub mod reader;
pub mod transforms;
pub mod xml;

// Re-exports for convenience
pub use cache::ProjectCache;
pub use config::ConversionOptions;
pub use error::{MigrateError, MigrateResult};
pub use metadata::{
    PackageMetadataProvider, PackageQuery, PackageSource, PackageSourceSettings, QueryCache,
    ResolvedPackage, StaticMetadataProvider,
};
pub use models::{
    AssemblyReference, PackageReference, Project, ProjectReference, SharedProject,
};
pub use reader::ProjectReader;
pub use transforms::{
    DedupPackageReferences, PackageReferenceReduction, ProjectTransform,
    TargetFrameworkOverride, TransformationPipeline,
};
pub use xml::{NodePath, XmlDocument, XmlElement};
