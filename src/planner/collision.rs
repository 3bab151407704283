//! Destination collision detection and resolution

use crate::planner::CopyPlan;
use crate::types::{CollisionPolicy, RelativePath, RestructureError};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{info, warn};

/// Count destinations claimed more than once and apply `policy`
///
/// `stats.collision_count` gets one per extra claim on a destination,
/// whatever the policy.
///
/// - `Overwrite`: the plan is left as is, the later copy wins.
/// - `Fail`: returns `RestructureError::Collision` for the first contested
///   destination in plan order.
/// - `Rename`: every later claim moves to `name (N).ext`, with the lowest N
///   not already used by the plan.
pub fn resolve_collisions(
    plan: &mut CopyPlan,
    policy: CollisionPolicy,
) -> Result<(), RestructureError> {
    let groups = group_by_destination(plan);
    let collisions: usize = groups.iter().map(|indices| indices.len() - 1).sum();
    plan.stats.collision_count = collisions;

    if collisions == 0 {
        return Ok(());
    }

    match policy {
        CollisionPolicy::Overwrite => {
            warn!(
                collisions,
                "several sources share a destination; later copies will overwrite earlier ones"
            );
            Ok(())
        }
        CollisionPolicy::Fail => {
            let contested = groups
                .iter()
                .find(|indices| indices.len() > 1)
                .map(|indices| indices.as_slice())
                .unwrap_or_default();
            let destination = contested
                .first()
                .map(|&i| plan.actions[i].destination.clone())
                .unwrap_or_default();
            let sources: Vec<RelativePath> = contested
                .iter()
                .map(|&i| plan.actions[i].source.clone())
                .collect();
            Err(RestructureError::Collision {
                destination,
                sources,
            })
        }
        CollisionPolicy::Rename => {
            let mut claimed: HashSet<PathBuf> =
                plan.actions.iter().map(|a| a.destination.clone()).collect();

            for indices in groups.iter().filter(|indices| indices.len() > 1) {
                for &i in &indices[1..] {
                    let renamed = free_name(&plan.actions[i].destination, &claimed);
                    info!(
                        source = %plan.actions[i].source,
                        destination = %renamed.display(),
                        "renamed to avoid collision"
                    );
                    claimed.insert(renamed.clone());
                    plan.actions[i].destination = renamed;
                    plan.stats.renamed_count += 1;
                }
            }
            Ok(())
        }
    }
}

/// Action indices grouped by destination, groups in order of first appearance
fn group_by_destination(plan: &CopyPlan) -> Vec<Vec<usize>> {
    let mut position: HashMap<&PathBuf, usize> = HashMap::new();
    let mut groups: Vec<Vec<usize>> = Vec::new();

    for (i, action) in plan.actions.iter().enumerate() {
        match position.get(&action.destination) {
            Some(&group) => groups[group].push(i),
            None => {
                position.insert(&action.destination, groups.len());
                groups.push(vec![i]);
            }
        }
    }

    groups
}

fn free_name(destination: &Path, claimed: &HashSet<PathBuf>) -> PathBuf {
    let stem = destination
        .file_stem()
        .map(|s| s.to_string_lossy().into_owned())
        .unwrap_or_default();
    let ext = destination
        .extension()
        .map(|e| format!(".{}", e.to_string_lossy()))
        .unwrap_or_default();

    let mut n = 1usize;
    loop {
        let candidate = destination.with_file_name(format!("{stem} ({n}){ext}"));
        if !claimed.contains(&candidate) {
            return candidate;
        }
        n += 1;
    }
}
