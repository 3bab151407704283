//! Copy plan types

use crate::types::{CopyAction, Placement};
use serde::Serialize;

/// Ordered copy plan with statistics
///
/// Actions follow reference-entry order for primary placements, then source
/// order for companions and fallbacks. The plan holds no filesystem state;
/// directories are created when the plan is executed.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CopyPlan {
    /// List of copy actions to execute
    pub actions: Vec<CopyAction>,

    /// Aggregate statistics about the plan
    pub stats: PlanStats,

    /// Names claimed by more than one reference directory
    pub ambiguities: Vec<Ambiguity>,
}

impl CopyPlan {
    /// Create a new empty copy plan
    pub fn new() -> Self {
        Self {
            actions: Vec::new(),
            stats: PlanStats::default(),
            ambiguities: Vec::new(),
        }
    }

    /// Add an action to the plan and update statistics
    pub fn add_action(&mut self, action: CopyAction) {
        match action.placement {
            Placement::Primary => self.stats.primary_count += 1,
            Placement::Companion => self.stats.companion_count += 1,
            Placement::Fallback => self.stats.fallback_count += 1,
        }
        self.stats.total_files += 1;

        self.actions.push(action);
    }

    /// Record that `directory` also claims `name`
    ///
    /// Repeated reports for the same name merge into one record.
    pub fn record_ambiguity(&mut self, kind: AmbiguityKind, name: &str, directory: &str) {
        let existing = self
            .ambiguities
            .iter_mut()
            .find(|a| a.kind == kind && a.name == name);

        match existing {
            Some(ambiguity) => {
                if !ambiguity.directories.iter().any(|d| d == directory) {
                    ambiguity.directories.push(directory.to_string());
                }
            }
            None => self.ambiguities.push(Ambiguity {
                kind,
                name: name.to_string(),
                directories: vec![directory.to_string()],
            }),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.actions.is_empty()
    }

    pub fn len(&self) -> usize {
        self.actions.len()
    }
}

impl Default for CopyPlan {
    fn default() -> Self {
        Self::new()
    }
}

/// Statistics about a copy plan
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize)]
pub struct PlanStats {
    /// Total number of planned copies
    pub total_files: usize,

    /// Number of Primary placements
    pub primary_count: usize,

    /// Number of Companion placements
    pub companion_count: usize,

    /// Number of Fallback placements
    pub fallback_count: usize,

    /// Planned copies whose destination was already claimed by an earlier copy
    pub collision_count: usize,

    /// Collisions moved to a free name under the rename policy
    pub renamed_count: usize,
}

/// What kind of name several reference directories compete for
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum AmbiguityKind {
    /// Same filename in several reference directories. The first directory
    /// (in sorted order) receives the matching sources.
    FileName,

    /// Same base name placed in several directories. Companions follow the
    /// last one.
    BaseName,
}

/// A name that more than one reference directory claims
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Ambiguity {
    pub kind: AmbiguityKind,
    pub name: String,
    /// Reference-relative directories, in the order they claimed the name
    pub directories: Vec<String>,
}
