//! Executor module for file operations

pub mod copy;

use crate::planner::CopyPlan;
use crate::types::{CopyAction, RestructureError};
use std::path::Path;
use tracing::{debug, error};

pub use copy::copy_file;

/// Execution statistics for a restructure run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExecutionStats {
    /// Number of actions in the input plan.
    pub total_actions: usize,
    /// Number of files copied.
    pub copied: usize,
    /// Aggregate copied bytes.
    pub bytes_copied: u64,
}

/// Events emitted while executing a plan.
#[derive(Debug)]
pub enum ExecutionEvent<'a> {
    /// Copy started.
    ActionStart {
        index: usize,
        total: usize,
        action: &'a CopyAction,
    },
    /// Copy succeeded.
    ActionSuccess {
        index: usize,
        total: usize,
        action: &'a CopyAction,
        bytes_copied: u64,
    },
    /// Copy failed. Execution stops after this event.
    ActionError {
        index: usize,
        total: usize,
        action: &'a CopyAction,
        error: &'a RestructureError,
    },
    /// Every action was copied.
    Complete { stats: &'a ExecutionStats },
}

/// Optional callback used to receive execution events.
pub type ExecutionCallback<'a> = dyn Fn(&ExecutionEvent<'_>) + Send + Sync + 'a;

/// Execute a copy plan
///
/// Copies actions in plan order. The first failure aborts the remaining
/// plan; files copied before it stay where they are.
pub fn execute_plan(
    plan: &CopyPlan,
    source_root: &Path,
    on_event: Option<&ExecutionCallback<'_>>,
) -> Result<ExecutionStats, RestructureError> {
    let mut stats = ExecutionStats {
        total_actions: plan.actions.len(),
        ..Default::default()
    };

    for (idx, action) in plan.actions.iter().enumerate() {
        let index = idx + 1;
        emit_event(
            on_event,
            &ExecutionEvent::ActionStart {
                index,
                total: stats.total_actions,
                action,
            },
        );

        let src_path = source_root.join(action.source.to_path());
        match copy_file(&src_path, &action.destination) {
            Ok(bytes) => {
                stats.copied += 1;
                stats.bytes_copied += bytes;
                debug!(
                    source = %action.source,
                    destination = %action.destination.display(),
                    bytes,
                    "copied"
                );

                emit_event(
                    on_event,
                    &ExecutionEvent::ActionSuccess {
                        index,
                        total: stats.total_actions,
                        action,
                        bytes_copied: bytes,
                    },
                );
            }
            Err(err) => {
                error!(
                    source = %action.source,
                    copied = stats.copied,
                    remaining = stats.total_actions - idx,
                    "copy failed, aborting: {}",
                    err
                );
                emit_event(
                    on_event,
                    &ExecutionEvent::ActionError {
                        index,
                        total: stats.total_actions,
                        action,
                        error: &err,
                    },
                );
                return Err(err);
            }
        }
    }

    emit_event(on_event, &ExecutionEvent::Complete { stats: &stats });

    Ok(stats)
}

fn emit_event(on_event: Option<&ExecutionCallback<'_>>, event: &ExecutionEvent<'_>) {
    if let Some(callback) = on_event {
        callback(event);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{Placement, RelativePath};
    use std::fs;
    use std::path::PathBuf;
    use std::sync::{Arc, Mutex};

    fn action(source: &str, destination: PathBuf) -> CopyAction {
        CopyAction::new(RelativePath::new(source), destination, Placement::Fallback)
    }

    #[test]
    fn test_execute_plan_copies_in_order() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let out = tempfile::tempdir().expect("create out tempdir");

        fs::create_dir_all(src.path().join("ui")).expect("create ui");
        fs::write(src.path().join("ui/panel.ts"), b"panel").expect("write panel");
        fs::write(src.path().join("notes.txt"), b"notes").expect("write notes");

        let mut plan = CopyPlan::new();
        plan.add_action(action("ui/panel.ts", out.path().join("layout/panel.ts")));
        plan.add_action(action("notes.txt", out.path().join("notes.txt")));

        let stats = execute_plan(&plan, src.path(), None).expect("execute plan");

        assert_eq!(stats.total_actions, 2);
        assert_eq!(stats.copied, 2);
        assert_eq!(stats.bytes_copied, 10);
        assert_eq!(
            fs::read(out.path().join("layout/panel.ts")).expect("read panel"),
            b"panel"
        );
    }

    #[test]
    fn test_execute_plan_later_copy_wins_on_same_destination() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let out = tempfile::tempdir().expect("create out tempdir");

        fs::create_dir_all(src.path().join("a")).expect("create a");
        fs::create_dir_all(src.path().join("b")).expect("create b");
        fs::write(src.path().join("a/foo.ts"), b"first").expect("write a");
        fs::write(src.path().join("b/foo.ts"), b"second").expect("write b");

        let mut plan = CopyPlan::new();
        plan.add_action(action("a/foo.ts", out.path().join("foo.ts")));
        plan.add_action(action("b/foo.ts", out.path().join("foo.ts")));

        let stats = execute_plan(&plan, src.path(), None).expect("execute plan");
        assert_eq!(stats.copied, 2);
        assert_eq!(fs::read(out.path().join("foo.ts")).expect("read"), b"second");
    }

    #[test]
    fn test_execute_plan_aborts_on_first_error() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let out = tempfile::tempdir().expect("create out tempdir");

        fs::write(src.path().join("good.txt"), b"good").expect("write good");
        fs::write(src.path().join("after.txt"), b"after").expect("write after");

        let mut plan = CopyPlan::new();
        plan.add_action(action("good.txt", out.path().join("good.txt")));
        plan.add_action(action("missing.txt", out.path().join("missing.txt")));
        plan.add_action(action("after.txt", out.path().join("after.txt")));

        let result = execute_plan(&plan, src.path(), None);
        assert!(result.is_err());
        assert!(out.path().join("good.txt").exists(), "earlier copies stay");
        assert!(
            !out.path().join("after.txt").exists(),
            "actions after the failure must not run"
        );
    }

    #[test]
    fn test_execute_plan_emits_events() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let out = tempfile::tempdir().expect("create out tempdir");

        fs::write(src.path().join("new.txt"), b"new-content").expect("write src new");
        let mut plan = CopyPlan::new();
        plan.add_action(action("new.txt", out.path().join("new.txt")));

        let events: Arc<Mutex<Vec<String>>> = Arc::new(Mutex::new(Vec::new()));
        let events_ref = Arc::clone(&events);
        let callback = move |event: &ExecutionEvent<'_>| {
            let label = match event {
                ExecutionEvent::ActionStart { .. } => "start",
                ExecutionEvent::ActionSuccess { .. } => "success",
                ExecutionEvent::ActionError { .. } => "error",
                ExecutionEvent::Complete { .. } => "complete",
            };
            events_ref
                .lock()
                .expect("lock events")
                .push(label.to_string());
        };

        execute_plan(&plan, src.path(), Some(&callback)).expect("execute plan");

        let snapshot = events.lock().expect("lock events snapshot").clone();
        assert_eq!(snapshot, vec!["start", "success", "complete"]);
    }

    #[test]
    fn test_execute_plan_callback_borrows_caller_state() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let out = tempfile::tempdir().expect("create out tempdir");

        fs::write(src.path().join("a.txt"), b"aaa").expect("write a");
        fs::write(src.path().join("b.txt"), b"bb").expect("write b");
        let mut plan = CopyPlan::new();
        plan.add_action(action("a.txt", out.path().join("a.txt")));
        plan.add_action(action("b.txt", out.path().join("b.txt")));

        let seen_bytes = Mutex::new(0u64);
        let callback = |event: &ExecutionEvent<'_>| {
            if let ExecutionEvent::ActionSuccess { bytes_copied, .. } = event {
                *seen_bytes.lock().expect("lock bytes") += bytes_copied;
            }
        };

        execute_plan(&plan, src.path(), Some(&callback)).expect("execute plan");
        assert_eq!(seen_bytes.into_inner().expect("lock"), 5);
    }

    #[test]
    fn test_execute_plan_error_event_has_no_complete() {
        let src = tempfile::tempdir().expect("create src tempdir");
        let out = tempfile::tempdir().expect("create out tempdir");

        let mut plan = CopyPlan::new();
        plan.add_action(action("missing.txt", out.path().join("missing.txt")));

        let events: Arc<Mutex<Vec<&'static str>>> = Arc::new(Mutex::new(Vec::new()));
        let events_ref = Arc::clone(&events);
        let callback = move |event: &ExecutionEvent<'_>| {
            let label = match event {
                ExecutionEvent::ActionStart { .. } => "start",
                ExecutionEvent::ActionSuccess { .. } => "success",
                ExecutionEvent::ActionError { .. } => "error",
                ExecutionEvent::Complete { .. } => "complete",
            };
            events_ref.lock().expect("lock events").push(label);
        };

        assert!(execute_plan(&plan, src.path(), Some(&callback)).is_err());
        assert_eq!(*events.lock().expect("lock"), vec!["start", "error"]);
    }
}
