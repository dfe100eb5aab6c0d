//! Error types for terrastack
//!
//! Uses `thiserror` for library errors; the binary wraps them with `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for terrastack operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for stack construction, packaging and synthesis
#[derive(Error, Debug)]
pub enum StackError {
    /// Asset source path does not exist
    #[error("path not found: {path}")]
    PathNotFound { path: PathBuf },

    /// Asset source could not be read or the artifact could not be staged
    #[error("failed to package {path}: {message}")]
    PackagingFailure { path: PathBuf, message: String },

    /// A resource field holds an invalid value (e.g. an empty identifier)
    #[error("invalid field '{field}' on {resource}: {message}")]
    InvalidField {
        resource: String,
        field: String,
        message: String,
    },

    /// A construct identifier does not follow naming rules
    #[error("invalid identifier '{id}': {reason}")]
    InvalidId { id: String, reason: String },

    /// Two constructs of the same kind share an identifier in one stack
    #[error("duplicate {kind} '{id}'")]
    DuplicateId { kind: String, id: String },

    /// A `${...}` placeholder names something that was never declared
    #[error("unresolved reference '{reference}'")]
    UnresolvedReference { reference: String },

    /// Invalid configuration or stack file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// Invalid `.assetignore` file
    #[error(transparent)]
    Ignore(#[from] crate::domain::value_objects::IgnoreError),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

impl StackError {
    pub(crate) fn packaging(path: impl Into<PathBuf>, message: impl ToString) -> Self {
        Self::PackagingFailure {
            path: path.into(),
            message: message.to_string(),
        }
    }

    pub(crate) fn empty_field(resource: impl Into<String>, field: &str) -> Self {
        Self::InvalidField {
            resource: resource.into(),
            field: field.to_string(),
            message: "must not be empty".to_string(),
        }
    }
}
