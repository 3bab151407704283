//! RelativePath - Normalized path relative to a scan root

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::{Component, Path, PathBuf};

/// A file location relative to a scan root.
///
/// Always stored with `/` separators so that matching and ordering behave the
/// same on every host.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct RelativePath(String);

impl RelativePath {
    /// Build from a `/`-separated string. Backslashes are treated as separators too.
    pub fn new(path: impl AsRef<str>) -> Self {
        let normalized = path
            .as_ref()
            .split(['/', '\\'])
            .filter(|segment| !segment.is_empty() && *segment != ".")
            .collect::<Vec<_>>()
            .join("/");
        Self(normalized)
    }

    /// Build from a host path that is already relative to the scan root.
    ///
    /// Returns `None` for paths that escape the root (`..`), are absolute, or
    /// are not valid UTF-8.
    pub fn from_path(path: &Path) -> Option<Self> {
        let mut segments = Vec::new();
        for component in path.components() {
            match component {
                Component::Normal(segment) => segments.push(segment.to_str()?),
                Component::CurDir => {}
                Component::ParentDir | Component::RootDir | Component::Prefix(_) => return None,
            }
        }
        Some(Self(segments.join("/")))
    }

    /// The normalized string form.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Last segment, extension included.
    pub fn file_name(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[idx + 1..],
            None => &self.0,
        }
    }

    /// Directory part, empty for files at the root.
    pub fn parent(&self) -> &str {
        match self.0.rfind('/') {
            Some(idx) => &self.0[..idx],
            None => "",
        }
    }

    /// Final extension with its leading dot, e.g. `.ts`.
    ///
    /// A name whose only dot is the leading one (`.gitignore`) has no extension.
    pub fn extension(&self) -> Option<&str> {
        let name = self.file_name();
        match name.rfind('.') {
            Some(0) | None => None,
            Some(idx) => Some(&name[idx..]),
        }
    }

    /// File name without its final extension.
    pub fn base_name(&self) -> &str {
        let name = self.file_name();
        match self.extension() {
            Some(ext) => &name[..name.len() - ext.len()],
            None => name,
        }
    }

    /// Host path built from the segments.
    pub fn to_path(&self) -> PathBuf {
        self.0.split('/').filter(|s| !s.is_empty()).collect()
    }
}

impl fmt::Display for RelativePath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for RelativePath {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}
