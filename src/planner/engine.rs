//! Two-pass placement: primary matches, then companions and fallbacks

use crate::planner::collision::resolve_collisions;
use crate::planner::{AmbiguityKind, CopyPlan, FilenameIndex};
use crate::types::{
    CollisionPolicy, CopyAction, Placement, ReferenceEntry, RestructureError, SourceEntry,
};
use std::collections::{HashMap, HashSet};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// Where a base name was placed during the primary pass
#[derive(Debug, Clone)]
struct MatchSlot {
    target_dir: PathBuf,
    reference_dir: String,
}

/// Base name → directory of the last primary placement with that base name
type MatchIndex<'a> = HashMap<&'a str, MatchSlot>;

/// Sources already routed by the primary pass
type CopiedSet<'a> = HashSet<&'a SourceEntry>;

/// Generate a copy plan that mirrors the reference layout
///
/// Primary pass: each reference entry, in order, pulls every source with the
/// same filename into `output_root/<reference dir>/`. A source goes to the
/// first reference entry that matches it; later entries with the same
/// filename are reported as ambiguities and place nothing.
///
/// A filename that appears under several reference directories (`a/foo.ts`
/// and `b/foo.ts`) is therefore placed once, under `a/`. Copying it into
/// both directories would give one source two destinations and break the
/// one-action-per-source count in [`PlanStats`](crate::planner::PlanStats).
/// The skipped directories stay visible in `plan.ambiguities`.
///
/// Leftover pass: remaining sources whose base name was placed in the
/// primary pass follow that placement as companions. Everything else lands
/// directly in `output_root`.
///
/// Every source appears in exactly one action. Destination collisions are
/// then handled according to `policy`.
///
/// # Example
/// ```
/// use restructure::planner::generate_copy_plan;
/// use restructure::types::{CollisionPolicy, ReferenceEntry, RelativePath};
/// use std::path::Path;
///
/// let sources = vec![RelativePath::new("ui/panel.ts"), RelativePath::new("ui/panel.meta")];
/// let references = vec![ReferenceEntry::from("layout/panel.ts")];
///
/// let plan = generate_copy_plan(&sources, &references, Path::new("out"), CollisionPolicy::Overwrite)?;
/// assert_eq!(plan.stats.primary_count, 1);
/// assert_eq!(plan.stats.companion_count, 1);
/// # Ok::<(), restructure::RestructureError>(())
/// ```
pub fn generate_copy_plan(
    sources: &[SourceEntry],
    references: &[ReferenceEntry],
    output_root: &Path,
    policy: CollisionPolicy,
) -> Result<CopyPlan, RestructureError> {
    let mut plan = CopyPlan::new();
    let mut match_index = MatchIndex::new();
    let mut copied = CopiedSet::new();

    place_primaries(
        sources,
        references,
        output_root,
        &mut plan,
        &mut match_index,
        &mut copied,
    );
    place_leftovers(sources, output_root, &match_index, &copied, &mut plan);

    for ambiguity in &plan.ambiguities {
        warn!(
            kind = ?ambiguity.kind,
            name = %ambiguity.name,
            directories = ?ambiguity.directories,
            "reference tree places the same name in several directories"
        );
    }

    resolve_collisions(&mut plan, policy)?;

    Ok(plan)
}

fn place_primaries<'a>(
    sources: &'a [SourceEntry],
    references: &[ReferenceEntry],
    output_root: &Path,
    plan: &mut CopyPlan,
    match_index: &mut MatchIndex<'a>,
    copied: &mut CopiedSet<'a>,
) {
    let index = FilenameIndex::new(sources);
    // filename → reference dir that first received matches for it
    let mut claimed: HashMap<String, String> = HashMap::new();

    for reference in references {
        let matches = index.find_matches(reference);
        if matches.is_empty() {
            continue;
        }

        let reference_dir = reference.relative_dir();
        match claimed.get(reference.file_name()) {
            Some(first_dir) if first_dir != reference_dir => {
                plan.record_ambiguity(AmbiguityKind::FileName, reference.file_name(), first_dir);
                plan.record_ambiguity(
                    AmbiguityKind::FileName,
                    reference.file_name(),
                    reference_dir,
                );
            }
            Some(_) => {}
            None => {
                claimed.insert(reference.file_name().to_string(), reference_dir.to_string());
            }
        }

        let target_dir = join_relative(output_root, reference_dir);

        for &source in matches {
            if !copied.insert(source) {
                continue;
            }

            let destination = target_dir.join(source.file_name());
            debug!(source = %source, destination = %destination.display(), "primary");
            plan.add_action(CopyAction::new(
                source.clone(),
                destination,
                Placement::Primary,
            ));

            let slot = MatchSlot {
                target_dir: target_dir.clone(),
                reference_dir: reference_dir.to_string(),
            };
            if let Some(previous) = match_index.insert(source.base_name(), slot) {
                if previous.reference_dir != reference_dir {
                    plan.record_ambiguity(
                        AmbiguityKind::BaseName,
                        source.base_name(),
                        &previous.reference_dir,
                    );
                    plan.record_ambiguity(AmbiguityKind::BaseName, source.base_name(), reference_dir);
                }
            }
        }
    }
}

fn place_leftovers(
    sources: &[SourceEntry],
    output_root: &Path,
    match_index: &MatchIndex<'_>,
    copied: &CopiedSet<'_>,
    plan: &mut CopyPlan,
) {
    for source in sources.iter().filter(|s| !copied.contains(s)) {
        let action = match match_index.get(source.base_name()) {
            Some(slot) => CopyAction::new(
                source.clone(),
                slot.target_dir.join(source.file_name()),
                Placement::Companion,
            ),
            None => CopyAction::new(
                source.clone(),
                output_root.join(source.file_name()),
                Placement::Fallback,
            ),
        };
        debug!(
            source = %source,
            destination = %action.destination.display(),
            "{}",
            action.placement.label()
        );
        plan.add_action(action);
    }
}

fn join_relative(root: &Path, relative_dir: &str) -> PathBuf {
    if relative_dir.is_empty() {
        root.to_path_buf()
    } else {
        let mut path = root.to_path_buf();
        path.extend(relative_dir.split('/').filter(|segment| !segment.is_empty()));
        path
    }
}
