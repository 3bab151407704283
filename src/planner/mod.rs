//! Placement planner - Filename matching and copy plan generation

mod collision;
mod engine;
mod matcher;
mod plan;

pub use collision::resolve_collisions;
pub use engine::generate_copy_plan;
pub use matcher::{find_matches, FilenameIndex};
pub use plan::{Ambiguity, AmbiguityKind, CopyPlan, PlanStats};
