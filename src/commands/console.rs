//! Console front-end for a restructure run

use super::restructure::{self, RestructureReport, RunEvent};
use crate::executor::ExecutionEvent;
use crate::planner::{AmbiguityKind, CopyPlan};
use crate::types::{DirRole, Placement, RestructureError};
use crate::ui::{render_tree, Messages, ProgressReporter};
use crate::Config;
use console::style;
use indicatif::HumanBytes;
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};
use tracing::warn;

/// Run a restructure, drawing progress and printing localized messages
///
/// With `config.json` set the only thing written to stdout is the report as
/// JSON.
pub fn run(config: &Config) -> Result<RestructureReport, RestructureError> {
    let messages = Messages::for_language(config.language);
    let quiet = config.json;
    let reporter = Arc::new(Mutex::new(if quiet {
        ProgressReporter::hidden()
    } else {
        ProgressReporter::new()
    }));

    if !quiet {
        println!("{}", style(messages.start_restructuring).bold());
    }

    let remaining_announced = AtomicBool::new(false);
    let callback = {
        let reporter = Arc::clone(&reporter);
        move |event: &RunEvent<'_>| match event {
            RunEvent::ScanStart { role } => {
                if let Ok(progress) = reporter.lock() {
                    progress.start_scan(scan_label(*role, messages));
                }
            }
            RunEvent::ScanProgress { role, files } => {
                if let Ok(progress) = reporter.lock() {
                    progress.update_scan(scan_label(*role, messages), *files);
                }
            }
            RunEvent::ScanFinished { role, files } => {
                let label = found_label(*role, messages);
                if let Ok(progress) = reporter.lock() {
                    progress.finish_scan(label, *files);
                }
                if !quiet {
                    println!("{} {}", label, files);
                }
            }
            RunEvent::Planned { plan } => {
                if let Ok(mut progress) = reporter.lock() {
                    progress.end_scans();
                    if !config.dry_run && !plan.is_empty() {
                        progress.start_copy(plan.len() as u64);
                    }
                }
                if !quiet {
                    print_plan(plan, config, messages);
                }
            }
            RunEvent::Copy(ExecutionEvent::ActionStart { action, .. }) => {
                if let Ok(progress) = reporter.lock() {
                    if !quiet
                        && action.placement != Placement::Primary
                        && !remaining_announced.swap(true, Ordering::Relaxed)
                    {
                        progress.println(messages.processing_remaining_files);
                    }
                    progress.set_current_file(action.source.as_str());
                    if !quiet && config.verbose > 0 {
                        progress.println(format!(
                            "{} {} {} {}",
                            messages.copying_file,
                            action.source,
                            messages.to,
                            action.destination.display()
                        ));
                    }
                }
            }
            RunEvent::Copy(ExecutionEvent::ActionSuccess { bytes_copied, .. }) => {
                if let Ok(mut progress) = reporter.lock() {
                    progress.complete_copy_file(*bytes_copied);
                }
            }
            RunEvent::Copy(ExecutionEvent::ActionError { action, error, .. }) => {
                if let Ok(progress) = reporter.lock() {
                    progress.copy_error(action.source.as_str(), &error.to_string());
                    progress.abandon_copy();
                }
            }
            RunEvent::Copy(ExecutionEvent::Complete { stats }) => {
                if let Ok(progress) = reporter.lock() {
                    progress.finish_copy(stats.copied, stats.bytes_copied);
                }
            }
        }
    };

    let report = restructure::run(config, Some(&callback))?;

    if quiet {
        let json = serde_json::to_string_pretty(&report).map_err(std::io::Error::from)?;
        println!("{}", json);
        return Ok(report);
    }

    if report.dry_run {
        println!("{}", style(messages.dry_run_notice).yellow());
        return Ok(report);
    }

    println!(
        "{} {}",
        style(messages.restructuring_complete).green().bold(),
        report.output_dir.display()
    );
    println!(
        "{} {} ({})",
        messages.copied_files,
        report.copied,
        HumanBytes(report.bytes_copied)
    );

    if config.show_tree {
        match render_tree(&report.output_dir, config.tree_depth) {
            Ok(tree) => {
                println!("\n{}", messages.generated_structure);
                println!("{}", report.output_dir.display());
                if !tree.is_empty() {
                    println!("{}", tree);
                }
            }
            Err(e) => warn!(
                "Cannot list output directory {}: {}",
                report.output_dir.display(),
                e
            ),
        }
    }

    Ok(report)
}

/// One-line, localized description of a failed run
pub fn describe_error(error: &RestructureError, messages: &Messages) -> String {
    match error {
        RestructureError::NotFound { role, path } => {
            let prefix = match role {
                DirRole::Source => messages.source_dir_not_exist,
                DirRole::Reference => messages.reference_dir_not_exist,
            };
            format!("{} {}", prefix, path.display())
        }
        RestructureError::Collision {
            destination,
            sources,
        } => {
            let names: Vec<&str> = sources.iter().map(|s| s.as_str()).collect();
            format!(
                "Error: {} is claimed by: {} (use --on-collision rename or overwrite)",
                destination.display(),
                names.join(", ")
            )
        }
        other => format!("Error: {}", other),
    }
}

fn scan_label(role: DirRole, messages: &Messages) -> &'static str {
    match role {
        DirRole::Source => messages.getting_source_files,
        DirRole::Reference => messages.getting_reference_files,
    }
}

fn found_label(role: DirRole, messages: &Messages) -> &'static str {
    match role {
        DirRole::Source => messages.found_source_files,
        DirRole::Reference => messages.found_reference_files,
    }
}

fn print_plan(plan: &CopyPlan, config: &Config, messages: &Messages) {
    if plan.is_empty() {
        println!("{}", messages.nothing_to_copy);
        return;
    }

    println!("{}", format_plan_preview(plan, messages));
    if let Some(ambiguities) = format_ambiguities(plan, messages) {
        println!("{}", style(ambiguities).yellow());
    }
    if let Some(collisions) = format_collisions(plan, messages) {
        println!("{}", style(collisions).yellow());
    }
    if config.dry_run {
        println!("{}", format_plan_actions(plan, &config.output));
    }
}

fn format_plan_preview(plan: &CopyPlan, messages: &Messages) -> String {
    let stats = &plan.stats;
    let mut preview = format!(
        "{}\n  Primary: {}  Companion: {}  Fallback: {}  Total: {}",
        messages.plan_header,
        stats.primary_count,
        stats.companion_count,
        stats.fallback_count,
        stats.total_files
    );
    if stats.collision_count > 0 || stats.renamed_count > 0 {
        preview.push_str(&format!(
            "\n  Collisions: {}  Renamed: {}",
            stats.collision_count, stats.renamed_count
        ));
    }
    preview
}

fn format_plan_actions(plan: &CopyPlan, output_root: &Path) -> String {
    let mut lines = Vec::with_capacity(plan.len());
    for action in &plan.actions {
        let destination = action
            .destination
            .strip_prefix(output_root)
            .unwrap_or(action.destination.as_path());
        lines.push(format!(
            "  {:<10} {} -> {}",
            action.placement.label().to_uppercase(),
            action.source,
            destination.display()
        ));
    }
    lines.join("\n")
}

fn format_ambiguities(plan: &CopyPlan, messages: &Messages) -> Option<String> {
    if plan.ambiguities.is_empty() {
        return None;
    }

    let mut lines = vec![messages.ambiguous_name.to_string()];
    for ambiguity in &plan.ambiguities {
        let kind = match ambiguity.kind {
            AmbiguityKind::FileName => "file",
            AmbiguityKind::BaseName => "base name",
        };
        let dirs: Vec<&str> = ambiguity
            .directories
            .iter()
            .map(|d| if d.is_empty() { "." } else { d.as_str() })
            .collect();
        lines.push(format!(
            "  {} ({}): {}",
            ambiguity.name,
            kind,
            dirs.join(", ")
        ));
    }
    Some(lines.join("\n"))
}

fn format_collisions(plan: &CopyPlan, messages: &Messages) -> Option<String> {
    let mut by_destination: BTreeMap<&PathBuf, Vec<&str>> = BTreeMap::new();
    for action in &plan.actions {
        by_destination
            .entry(&action.destination)
            .or_default()
            .push(action.source.as_str());
    }
    by_destination.retain(|_, sources| sources.len() > 1);
    if by_destination.is_empty() {
        return None;
    }

    let mut lines = vec![messages.collisions.to_string()];
    for (destination, sources) in by_destination {
        lines.push(format!(
            "  {} <- {}",
            destination.display(),
            sources.join(", ")
        ));
    }
    Some(lines.join("\n"))
}
