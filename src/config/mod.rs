//! Configuration management

mod cli;
mod file;

pub use cli::Cli;
pub use file::FileConfig;

use crate::types::{CollisionPolicy, DirRole, RestructureError};
use crate::ui::Language;
use std::path::PathBuf;

/// Default depth of the output tree printed after a run
pub const DEFAULT_TREE_DEPTH: usize = 3;

/// Extension filter the command line uses when none is given
pub const DEFAULT_CLI_EXTENSIONS: &str = ".ts";

/// Global configuration for restructure
#[derive(Debug, Clone)]
pub struct Config {
    /// Directory holding the loose files
    pub source: PathBuf,

    /// Directory whose layout is reproduced
    pub reference: PathBuf,

    /// Where the restructured tree is written
    pub output: PathBuf,

    /// Reference extension allow-list, leading dot included (empty = all files)
    pub extensions: Vec<String>,

    /// What to do when two sources land on the same destination
    pub collision_policy: CollisionPolicy,

    /// Dry run (show plan, don't copy)
    pub dry_run: bool,

    /// Print the plan as JSON
    pub json: bool,

    /// Language of console messages
    pub language: Language,

    /// Print the output tree after a run
    pub show_tree: bool,

    /// Depth of the printed output tree
    pub tree_depth: usize,

    /// Verbosity (0 = warnings, 1 = info, 2+ = debug)
    pub verbose: u8,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            source: PathBuf::new(),
            reference: PathBuf::new(),
            output: PathBuf::new(),
            extensions: Vec::new(),
            collision_policy: CollisionPolicy::Overwrite,
            dry_run: false,
            json: false,
            language: Language::En,
            show_tree: true,
            tree_depth: DEFAULT_TREE_DEPTH,
            verbose: 0,
        }
    }
}

impl Config {
    /// Create a configuration for the three directories, everything else default
    pub fn new(
        source: impl Into<PathBuf>,
        reference: impl Into<PathBuf>,
        output: impl Into<PathBuf>,
    ) -> Self {
        Self {
            source: source.into(),
            reference: reference.into(),
            output: output.into(),
            ..Self::default()
        }
    }

    /// Validate configuration
    ///
    /// Runs before anything touches the filesystem, so a missing input
    /// directory never leaves a half-created output directory behind.
    pub fn validate(&self) -> Result<(), RestructureError> {
        for (name, path) in [
            ("Source", &self.source),
            ("Reference", &self.reference),
            ("Output", &self.output),
        ] {
            if path.as_os_str().is_empty() {
                return Err(RestructureError::Config(format!("{} path is empty", name)));
            }
        }

        if !self.source.is_dir() {
            return Err(RestructureError::NotFound {
                role: DirRole::Source,
                path: self.source.clone(),
            });
        }

        if !self.reference.is_dir() {
            return Err(RestructureError::NotFound {
                role: DirRole::Reference,
                path: self.reference.clone(),
            });
        }

        if self.output == self.source {
            return Err(RestructureError::Config(
                "Source and output cannot be the same".to_string(),
            ));
        }

        if self.output == self.reference {
            return Err(RestructureError::Config(
                "Reference and output cannot be the same".to_string(),
            ));
        }

        if let Some(bad) = self.extensions.iter().find(|ext| !is_valid_extension(ext)) {
            return Err(RestructureError::Config(format!(
                "Invalid extension '{}': expected a leading '.' followed by a name",
                bad
            )));
        }

        Ok(())
    }
}

/// Split a comma-separated extension list
///
/// Items are trimmed, empty items dropped, and a missing leading `.` added,
/// so `"ts, .meta,"` gives `[".ts", ".meta"]`.
pub fn parse_extensions(list: &str) -> Vec<String> {
    list.split(',')
        .map(str::trim)
        .filter(|ext| !ext.is_empty())
        .map(normalize_extension)
        .collect()
}

/// Add the leading `.` to an extension if it is missing
pub fn normalize_extension(ext: &str) -> String {
    if ext.starts_with('.') {
        ext.to_string()
    } else {
        format!(".{}", ext)
    }
}

fn is_valid_extension(ext: &str) -> bool {
    ext.len() > 1 && ext.starts_with('.') && !ext[1..].contains(['.', '/', '\\'])
}
