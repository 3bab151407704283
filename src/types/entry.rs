//! Source and reference entries produced by the scanner

use super::RelativePath;
use serde::{Deserialize, Serialize};

/// A file found in the source tree. Every source file is a copy candidate.
pub type SourceEntry = RelativePath;

/// A file from the reference tree that survived the extension filter
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct ReferenceEntry {
    /// Path relative to the reference root
    pub path: RelativePath,
}

impl ReferenceEntry {
    /// Create a new ReferenceEntry
    pub fn new(path: RelativePath) -> Self {
        Self { path }
    }

    /// Directory relative to the reference root (empty for top-level files)
    pub fn relative_dir(&self) -> &str {
        self.path.parent()
    }

    /// Filename with extension
    pub fn file_name(&self) -> &str {
        self.path.file_name()
    }

    /// Filename without extension
    pub fn base_name(&self) -> &str {
        self.path.base_name()
    }
}

impl From<&str> for ReferenceEntry {
    fn from(value: &str) -> Self {
        Self::new(RelativePath::new(value))
    }
}
