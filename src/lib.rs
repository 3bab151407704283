//! # restructure - Rebuild a reference layout for loose files
//!
//! Scans a reference tree and a source tree, matches files by exact filename,
//! and copies every source file into an output tree that mirrors the
//! reference. Files sharing a base name with a placed file follow it; the
//! rest land at the output root.

// Module declarations
pub mod config;
pub mod scanner;
pub mod planner;
pub mod executor;
pub mod ui;
pub mod commands;
pub mod types;

// Re-export commonly used types
pub use commands::{RestructureReport, RunEvent};
pub use config::Config;
pub use planner::{CopyPlan, PlanStats};
pub use types::{CollisionPolicy, CopyAction, Placement, RelativePath, RestructureError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
