//! Error types for configuration operations.

use crate::validation::ValidationError;
use std::fmt;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Filesystem operation that failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileOp {
    /// Reading a config file.
    Read,
    /// Writing a config file.
    Write,
    /// Creating the directory that holds a config file.
    CreateDir,
}

impl fmt::Display for FileOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            FileOp::Read => "read",
            FileOp::Write => "write",
            FileOp::CreateDir => "create directory",
        })
    }
}

/// Errors that can occur while loading or saving a config file.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A filesystem operation on `path` failed.
    #[error("failed to {op} '{path}': {source}")]
    Io {
        /// What was being attempted.
        op: FileOp,
        /// Path involved.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The file is not valid TOML or does not match the config schema.
    #[error("failed to parse TOML: {0}")]
    Parse(#[from] toml::de::Error),

    /// The config could not be rendered as TOML.
    #[error("failed to serialize TOML: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// The file parsed but holds unusable values.
    #[error("invalid configuration: {0}")]
    Invalid(#[from] ValidationError),
}

impl ConfigError {
    /// Wrap an I/O failure with the operation and path.
    pub fn io(op: FileOp, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ConfigError::Io {
            op,
            path: path.into(),
            source,
        }
    }

    /// Path involved, for filesystem failures.
    pub fn path(&self) -> Option<&Path> {
        match self {
            ConfigError::Io { path, .. } => Some(path),
            _ => None,
        }
    }

    /// True when the underlying cause is a missing file or directory.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ConfigError::Io { source, .. } if source.kind() == std::io::ErrorKind::NotFound)
    }
}
