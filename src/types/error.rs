//! Error types for restructure

use super::RelativePath;
use std::fmt;
use std::path::PathBuf;
use thiserror::Error;

/// Which input directory an error refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DirRole {
    Source,
    Reference,
}

impl fmt::Display for DirRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DirRole::Source => f.write_str("Source"),
            DirRole::Reference => f.write_str("Reference"),
        }
    }
}

/// Error types for restructure operations
#[derive(Debug, Error)]
pub enum RestructureError {
    /// Standard IO error (automatically converted via #[from])
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Source or reference directory is missing. Nothing has been written.
    #[error("{role} directory does not exist: {}", path.display())]
    NotFound { role: DirRole, path: PathBuf },

    /// A planned copy failed. Earlier copies stay in place.
    #[error("Failed to copy {} to {}: {source}", from.display(), to.display())]
    Copy {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// A directory below an input root could not be listed. Nothing has been written.
    #[error("Cannot scan {}: {source}", root.display())]
    Scan {
        root: PathBuf,
        #[source]
        source: ignore::Error,
    },

    /// A file name is not valid UTF-8, so it cannot be matched by name
    #[error("Unsupported file name (not valid UTF-8): {}", path.display())]
    InvalidFileName { path: PathBuf },

    /// Permission denied for specific path
    #[error("Permission denied: {}", path.display())]
    PermissionDenied { path: PathBuf },

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Config(String),

    /// Validation error (logic checks)
    #[error("Validation error: {0}")]
    Validation(String),

    /// Two or more sources were planned onto the same destination under the fail policy
    #[error(
        "Destination collision: {} is claimed by {} source files",
        destination.display(),
        sources.len()
    )]
    Collision {
        destination: PathBuf,
        sources: Vec<RelativePath>,
    },
}

impl RestructureError {
    /// Check if this error means an input directory is missing
    pub fn is_not_found(&self) -> bool {
        matches!(self, RestructureError::NotFound { .. })
    }

    /// Check if this error is a validation error
    pub fn is_validation_error(&self) -> bool {
        matches!(
            self,
            RestructureError::Validation(_) | RestructureError::Config(_)
        )
    }

    /// Check if this error is related to permissions
    pub fn is_permission_error(&self) -> bool {
        match self {
            RestructureError::PermissionDenied { .. } => true,
            RestructureError::Io(e) | RestructureError::Copy { source: e, .. } => {
                e.kind() == std::io::ErrorKind::PermissionDenied
            }
            RestructureError::Scan { source, .. } => source
                .io_error()
                .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied),
            _ => false,
        }
    }

    /// Check if this error is a destination collision
    pub fn is_collision(&self) -> bool {
        matches!(self, RestructureError::Collision { .. })
    }
}
