//! Command-line arguments

use super::{parse_extensions, Config, FileConfig, DEFAULT_CLI_EXTENSIONS, DEFAULT_TREE_DEPTH};
use crate::types::{CollisionPolicy, RestructureError};
use crate::ui::Language;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Rebuild a reference directory layout for loose files, matching by filename
#[derive(Debug, Parser)]
#[command(name = "restructure", version, about, long_about = None)]
pub struct Cli {
    /// Directory holding the files to reorganize
    #[arg(value_name = "SOURCE")]
    pub source: PathBuf,

    /// Directory whose layout is reproduced
    #[arg(value_name = "REFERENCE")]
    pub reference: PathBuf,

    /// Directory the restructured tree is written to
    #[arg(value_name = "OUTPUT")]
    pub output: PathBuf,

    /// Reference extensions to match, comma-separated (e.g. ".ts,.meta"); "" matches every file [default: .ts]
    #[arg(short, long, value_name = "EXTS")]
    pub extensions: Option<String>,

    /// What to do when several files land on the same destination
    #[arg(long = "on-collision", value_enum, value_name = "POLICY")]
    pub on_collision: Option<CollisionPolicy>,

    /// Show the plan without copying anything
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Print the plan as JSON
    #[arg(long)]
    pub json: bool,

    /// Language for console messages
    #[arg(short, long, value_enum)]
    pub language: Option<Language>,

    /// Depth of the output tree printed after the run [default: 3]
    #[arg(long, value_name = "N")]
    pub tree_depth: Option<usize>,

    /// Don't print the output tree
    #[arg(long)]
    pub no_tree: bool,

    /// TOML file with default options
    #[arg(short, long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// More logging (-v info, -vv debug)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl TryFrom<Cli> for Config {
    type Error = RestructureError;

    /// Merge defaults, the optional config file and CLI flags (CLI wins)
    ///
    /// Directory checks are left to [`Config::validate`], which the run
    /// performs before touching the filesystem.
    fn try_from(cli: Cli) -> Result<Self, Self::Error> {
        let file = match &cli.config {
            Some(path) => FileConfig::load(path)?,
            None => FileConfig::default(),
        };

        let extensions = match (&cli.extensions, &file.extensions) {
            (Some(list), _) => parse_extensions(list),
            (None, Some(list)) => list.iter().flat_map(|ext| parse_extensions(ext)).collect(),
            (None, None) => parse_extensions(DEFAULT_CLI_EXTENSIONS),
        };

        let config = Config {
            source: cli.source,
            reference: cli.reference,
            output: cli.output,
            extensions,
            collision_policy: cli
                .on_collision
                .or(file.on_collision)
                .unwrap_or(CollisionPolicy::Overwrite),
            dry_run: cli.dry_run || file.dry_run.unwrap_or(false),
            json: cli.json,
            language: cli.language.or(file.language).unwrap_or(Language::En),
            show_tree: !cli.no_tree && file.show_tree.unwrap_or(true),
            tree_depth: cli
                .tree_depth
                .or(file.tree_depth)
                .unwrap_or(DEFAULT_TREE_DEPTH),
            verbose: cli.verbose,
        };

        Ok(config)
    }
}
