//! Error types for projmigrate
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for projmigrate operations
pub type MigrateResult<T> = Result<T, MigrateError>;

/// Main error type for projmigrate operations
#[derive(Error, Debug)]
pub enum MigrateError {
    /// Document root matches neither the legacy nor the modern project schema.
    ///
    /// `ProjectReader::read` downgrades this to a logged skip; it only escapes
    /// through the lower-level load path.
    #[error("{file} is not an MSBuild project file")]
    NotAProjectFile { file: PathBuf },

    /// Project type markers match the known-unsupported table.
    ///
    /// Suppressible with the force flag; `ProjectReader::read` reports it as a
    /// skip rather than a failure.
    #[error("project type is not supported for conversion ({reason}): {file}")]
    UnsupportedProjectType { file: PathBuf, reason: String },

    /// Required attribute missing from a reference item
    #[error("missing required attribute '{attribute}' on <{element}> in {file}")]
    MissingAttribute {
        element: &'static str,
        attribute: &'static str,
        file: PathBuf,
    },

    /// Package entry with neither a Version attribute nor a Version element
    #[error("package '{id}' has neither a Version attribute nor a Version element in {file}")]
    MissingPackageVersion { id: String, file: PathBuf },

    /// Malformed project GUID string
    #[error("invalid project GUID '{value}' in {file}")]
    InvalidProjectGuid { value: String, file: PathBuf },

    /// Malformed XML document
    #[error("XML error in {file}: {message}")]
    Xml { file: PathBuf, message: String },

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// A transform unit failed; aborts the rest of the pipeline for that
    /// project only
    #[error("transform '{name}' failed for {project}: {source}")]
    Transform {
        name: String,
        project: PathBuf,
        source: Box<MigrateError>,
    },
}
