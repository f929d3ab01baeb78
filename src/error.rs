use std::num::ParseIntError;
use std::path::PathBuf;

use thiserror::Error;

/// Unified error type for version-bumper operations
#[derive(Error, Debug)]
pub enum VersionBumperError {
    #[error("Invalid version string: {0}")]
    InvalidVersion(String),

    #[error("Invalid part value: {0}")]
    InvalidPart(String),

    #[error("Invalid integer value for {part}: '{value}'")]
    NumericConversion {
        part: String,
        value: String,
        #[source]
        source: ParseIntError,
    },

    #[error(
        "Unable to extract neither project.version nor tool.poetry.version from {}",
        .0.display()
    )]
    MissingVersion(PathBuf),

    #[error("project.version {project} does not match tool.poetry.version {poetry}")]
    VersionMismatch { project: String, poetry: String },

    #[error("Document error: {0}")]
    Document(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Failed to parse TOML document: {0}")]
    Toml(#[from] toml_edit::TomlError),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience type alias for Results in version-bumper
pub type Result<T> = std::result::Result<T, VersionBumperError>;

impl VersionBumperError {
    /// Create a document error with context
    pub fn document(msg: impl Into<String>) -> Self {
        VersionBumperError::Document(msg.into())
    }

    /// Create a configuration error with context
    pub fn config(msg: impl Into<String>) -> Self {
        VersionBumperError::Config(msg.into())
    }

    /// Whether the error came from the version value itself rather than
    /// from the files around it.
    pub fn is_version_error(&self) -> bool {
        matches!(
            self,
            VersionBumperError::InvalidVersion(_)
                | VersionBumperError::InvalidPart(_)
                | VersionBumperError::NumericConversion { .. }
        )
    }

    /// Process exit code for this error.
    pub fn exit_code(&self) -> u8 {
        if self.is_version_error() {
            2
        } else {
            1
        }
    }
}
