//! Optional TOML configuration file
//!
//! ```toml
//! extensions = [".ts", ".meta"]
//! on_collision = "rename"   # overwrite | fail | rename
//! language = "zh"           # en | zh
//! dry_run = false
//! show_tree = true
//! tree_depth = 3
//! ```
//!
//! Every key is optional. Command-line flags override the file.

use crate::types::{CollisionPolicy, RestructureError};
use crate::ui::Language;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct FileConfig {
    pub extensions: Option<Vec<String>>,
    pub on_collision: Option<CollisionPolicy>,
    pub language: Option<Language>,
    pub dry_run: Option<bool>,
    pub show_tree: Option<bool>,
    pub tree_depth: Option<usize>,
}

impl FileConfig {
    /// Read and parse a config file
    pub fn load(path: &Path) -> Result<Self, RestructureError> {
        let text = fs::read_to_string(path).map_err(|e| {
            RestructureError::Config(format!(
                "Cannot read config file {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::parse(&text).map_err(|e| {
            RestructureError::Config(format!("Invalid config file {}: {}", path.display(), e))
        })
    }

    pub fn parse(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}
