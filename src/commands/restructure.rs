//! Restructure command: scan, plan and copy

use crate::executor::{execute_plan, ExecutionEvent};
use crate::planner::{generate_copy_plan, CopyPlan};
use crate::scanner::{index_reference, scan_tree};
use crate::types::{DirRole, RestructureError};
use crate::Config;
use serde::Serialize;
use std::fs;
use std::path::PathBuf;
use tracing::{info, warn};

/// Progress of a run, in the order the phases happen
#[derive(Debug)]
pub enum RunEvent<'a> {
    /// A directory scan started
    ScanStart { role: DirRole },
    /// Running count of files seen by the current scan
    ScanProgress { role: DirRole, files: u64 },
    /// A directory scan finished; `files` counts kept entries
    ScanFinished { role: DirRole, files: usize },
    /// The copy plan is ready
    Planned { plan: &'a CopyPlan },
    /// Forwarded from the executor
    Copy(&'a ExecutionEvent<'a>),
}

/// Observer for run events
pub type RunCallback<'a> = dyn Fn(&RunEvent<'_>) + Send + Sync + 'a;

/// Outcome of a successful run
#[derive(Debug, Clone, Serialize)]
pub struct RestructureReport {
    pub output_dir: PathBuf,
    pub reference_files: usize,
    pub source_files: usize,
    pub plan: CopyPlan,
    /// Files written; always 0 for a dry run
    pub copied: usize,
    pub bytes_copied: u64,
    pub dry_run: bool,
}

impl RestructureReport {
    /// Whether every planned file reached the output
    ///
    /// A run that had nothing to copy counts as a success.
    pub fn is_success(&self) -> bool {
        self.dry_run || self.copied == self.plan.len()
    }
}

/// Run a restructure with a resolved configuration
///
/// Both input directories are checked before anything is written, so a
/// missing one fails with [`RestructureError::NotFound`] and leaves the
/// output untouched. A dry run stops after planning.
pub fn run(
    config: &Config,
    on_event: Option<&RunCallback<'_>>,
) -> Result<RestructureReport, RestructureError> {
    config.validate()?;

    info!(
        source = %config.source.display(),
        reference = %config.reference.display(),
        output = %config.output.display(),
        "starting restructure"
    );

    emit(on_event, &RunEvent::ScanStart { role: DirRole::Reference });
    let reference_progress = |files: u64| {
        emit(
            on_event,
            &RunEvent::ScanProgress {
                role: DirRole::Reference,
                files,
            },
        )
    };
    let references = index_reference(
        &config.reference,
        &config.extensions,
        Some(&reference_progress),
    )?;
    emit(
        on_event,
        &RunEvent::ScanFinished {
            role: DirRole::Reference,
            files: references.len(),
        },
    );
    info!(files = references.len(), "reference indexed");

    emit(on_event, &RunEvent::ScanStart { role: DirRole::Source });
    let source_progress = |files: u64| {
        emit(
            on_event,
            &RunEvent::ScanProgress {
                role: DirRole::Source,
                files,
            },
        )
    };
    let sources = scan_tree(&config.source, DirRole::Source, Some(&source_progress))?;
    emit(
        on_event,
        &RunEvent::ScanFinished {
            role: DirRole::Source,
            files: sources.len(),
        },
    );
    info!(files = sources.len(), "source scanned");

    let plan = generate_copy_plan(
        &sources,
        &references,
        &config.output,
        config.collision_policy,
    )?;
    emit(on_event, &RunEvent::Planned { plan: &plan });
    info!(
        primary = plan.stats.primary_count,
        companion = plan.stats.companion_count,
        fallback = plan.stats.fallback_count,
        collisions = plan.stats.collision_count,
        "plan ready"
    );

    let mut report = RestructureReport {
        output_dir: config.output.clone(),
        reference_files: references.len(),
        source_files: sources.len(),
        plan,
        copied: 0,
        bytes_copied: 0,
        dry_run: config.dry_run,
    };

    if config.dry_run {
        info!("dry run, nothing copied");
        return Ok(report);
    }

    fs::create_dir_all(&config.output).map_err(|e| {
        warn!("Cannot create output directory {}: {}", config.output.display(), e);
        match e.kind() {
            std::io::ErrorKind::PermissionDenied => RestructureError::PermissionDenied {
                path: config.output.clone(),
            },
            _ => RestructureError::Io(e),
        }
    })?;

    let forward = |event: &ExecutionEvent<'_>| emit(on_event, &RunEvent::Copy(event));
    let stats = execute_plan(&report.plan, &config.source, Some(&forward))?;

    report.copied = stats.copied;
    report.bytes_copied = stats.bytes_copied;
    info!(copied = report.copied, bytes = report.bytes_copied, "restructure finished");

    Ok(report)
}

fn emit(on_event: Option<&RunCallback<'_>>, event: &RunEvent<'_>) {
    if let Some(callback) = on_event {
        callback(event);
    }
}
