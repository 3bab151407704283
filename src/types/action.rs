//! CopyAction - Actions determined by the placement planner

use super::RelativePath;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;

/// How a source file got its destination
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Placement {
    /// Filename matched a reference entry
    Primary,

    /// Shares a base name with a primary match and follows it
    Companion,

    /// No structural information, dropped at the output root
    Fallback,
}

impl Placement {
    /// Short label used in listings and progress output
    pub fn label(&self) -> &'static str {
        match self {
            Placement::Primary => "primary",
            Placement::Companion => "companion",
            Placement::Fallback => "fallback",
        }
    }
}

/// A single planned copy
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CopyAction {
    /// Path relative to the source root
    pub source: RelativePath,

    /// Full destination path (output root joined with the placement)
    pub destination: PathBuf,

    pub placement: Placement,
}

impl CopyAction {
    pub fn new(source: RelativePath, destination: PathBuf, placement: Placement) -> Self {
        Self {
            source,
            destination,
            placement,
        }
    }
}

/// What to do when two planned copies share a destination
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum,
)]
#[serde(rename_all = "lowercase")]
pub enum CollisionPolicy {
    /// Later copy wins silently (counted in the plan stats)
    #[default]
    Overwrite,

    /// Refuse to copy anything
    Fail,

    /// Give later copies a free `name (N).ext` destination
    Rename,
}
