//! Error types for the nbclassify library.
//!
//! Every fallible operation returns [`Result`], whose error type is the
//! [`NbError`] enum. A classification run either yields a label and a score
//! or fails with exactly one of these errors.
//!
//! # Examples
//!
//! ```
//! use nbclassify::error::{NbError, Result};
//!
//! fn load() -> Result<()> {
//!     Err(NbError::artifact_load("dictionary.bin: bad magic number"))
//! }
//!
//! match load() {
//!     Ok(_) => println!("Success"),
//!     Err(e) => eprintln!("Error: {}", e),
//! }
//! ```

use std::fmt;
use std::io;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// The main error type for nbclassify operations.
#[derive(Error, Debug)]
pub enum NbError {
    /// I/O errors (file operations)
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// An artifact table is unreadable, absent or fails its encoding contract.
    #[error("Artifact load error: {0}")]
    ArtifactLoad(String),

    /// The input text could not be read, decoded or analyzed.
    #[error("Tokenization error: {0}")]
    Tokenization(String),

    /// The winning label id has no entry in the label index.
    #[error("Unknown label: no name for label id {0}")]
    UnknownLabel(u32),

    /// A score came out NaN or infinite.
    #[error("Invalid score: {0}")]
    InvalidScore(String),

    /// Analysis-related errors (analyzer construction, filters)
    #[error("Analysis error: {0}")]
    Analysis(String),

    /// Storage-related errors
    #[error("Storage error: {0}")]
    Storage(String),

    /// Invalid configuration
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// JSON serialization/deserialization errors
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error for other cases
    #[error("Error: {0}")]
    Other(String),
}

/// Result type alias for operations that may fail with NbError.
pub type Result<T> = std::result::Result<T, NbError>;

/// Coarse classification of an [`NbError`], recorded by the pipeline when it
/// enters its failed state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ErrorKind {
    ArtifactLoad,
    Tokenization,
    UnknownLabel,
    InvalidScore,
    Io,
    Storage,
    Analysis,
    Config,
    Other,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            ErrorKind::ArtifactLoad => "artifact_load",
            ErrorKind::Tokenization => "tokenization",
            ErrorKind::UnknownLabel => "unknown_label",
            ErrorKind::InvalidScore => "invalid_score",
            ErrorKind::Io => "io",
            ErrorKind::Storage => "storage",
            ErrorKind::Analysis => "analysis",
            ErrorKind::Config => "config",
            ErrorKind::Other => "other",
        };
        f.write_str(name)
    }
}

impl NbError {
    /// Create a new artifact load error.
    pub fn artifact_load<S: Into<String>>(msg: S) -> Self {
        NbError::ArtifactLoad(msg.into())
    }

    /// Create a new tokenization error.
    pub fn tokenization<S: Into<String>>(msg: S) -> Self {
        NbError::Tokenization(msg.into())
    }

    /// Create a new invalid score error.
    pub fn invalid_score<S: Into<String>>(msg: S) -> Self {
        NbError::InvalidScore(msg.into())
    }

    /// Create a new analysis error.
    pub fn analysis<S: Into<String>>(msg: S) -> Self {
        NbError::Analysis(msg.into())
    }

    /// Create a new storage error.
    pub fn storage<S: Into<String>>(msg: S) -> Self {
        NbError::Storage(msg.into())
    }

    /// Create a new invalid config error.
    pub fn invalid_config<S: Into<String>>(msg: S) -> Self {
        NbError::InvalidConfig(msg.into())
    }

    /// Create a new generic error.
    pub fn other<S: Into<String>>(msg: S) -> Self {
        NbError::Other(msg.into())
    }

    /// The coarse kind of this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            NbError::ArtifactLoad(_) => ErrorKind::ArtifactLoad,
            NbError::Tokenization(_) => ErrorKind::Tokenization,
            NbError::UnknownLabel(_) => ErrorKind::UnknownLabel,
            NbError::InvalidScore(_) => ErrorKind::InvalidScore,
            NbError::Io(_) => ErrorKind::Io,
            NbError::Storage(_) => ErrorKind::Storage,
            NbError::Analysis(_) => ErrorKind::Analysis,
            NbError::InvalidConfig(_) | NbError::Json(_) => ErrorKind::Config,
            NbError::Other(_) => ErrorKind::Other,
        }
    }

    /// Re-tag any error raised while reading an artifact as an artifact load
    /// error, prefixing the artifact location.
    pub(crate) fn into_artifact_load(self, location: &str) -> Self {
        match self {
            NbError::ArtifactLoad(msg) => NbError::ArtifactLoad(format!("{location}: {msg}")),
            other => NbError::ArtifactLoad(format!("{location}: {other}")),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_construction() {
        let error = NbError::artifact_load("missing sentinel");
        assert_eq!(error.to_string(), "Artifact load error: missing sentinel");

        let error = NbError::tokenization("invalid UTF-8");
        assert_eq!(error.to_string(), "Tokenization error: invalid UTF-8");

        let error = NbError::UnknownLabel(7);
        assert_eq!(error.to_string(), "Unknown label: no name for label id 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = io::Error::new(io::ErrorKind::NotFound, "File not found");
        let error = NbError::from(io_error);

        match error {
            NbError::Io(_) => {} // Expected
            _ => panic!("Expected IO error variant"),
        }
    }

    #[test]
    fn test_into_artifact_load() {
        let error = NbError::storage("File not found: dict.bin").into_artifact_load("dict.bin");
        assert_eq!(error.kind(), ErrorKind::ArtifactLoad);
        assert!(error.to_string().contains("dict.bin: Storage error"));
    }
}
