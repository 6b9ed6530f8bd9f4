//! Error types for the component engine
//!
//! Uses `thiserror` for library errors. Only environment problems surface
//! as `ComponentError`; per-component degradations (style compile failures,
//! settings extraction failures) have their own types in `style` and
//! `schema` and never leave the component they belong to.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias for engine operations
pub type ComponentResult<T> = Result<T, ComponentError>;

/// Main error type for the component engine
#[derive(Error, Debug)]
pub enum ComponentError {
    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The configured source root does not exist or is not a directory
    #[error("source directory not found: {path}")]
    SourceRootNotFound { path: PathBuf },

    /// A component part exists but could not be read
    #[error("failed to read {path}: {source}")]
    ReadPart {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// An output document, stylesheet or directory could not be written
    #[error("failed to write {path}: {source}")]
    WriteOutput {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Path escapes the source root boundary
    #[error("path '{path}' escapes source root '{root}'")]
    PathEscape { path: PathBuf, root: PathBuf },

    /// Invalid configuration file
    #[error("invalid configuration in {file}: {message}")]
    Config { file: PathBuf, message: String },

    /// The change-notification backend could not subscribe
    #[error("cannot watch {path}: {message}")]
    Watch { path: PathBuf, message: String },
}
