//! Sequential directory walker

use crate::types::{DirRole, RelativePath, RestructureError};
use std::path::Path;
use std::time::Instant;
use tracing::{debug, warn};

/// Callback for reporting scan progress
///
/// Arguments:
/// - `files_scanned`: Total number of files scanned so far
pub type ProgressCallback<'a> = dyn Fn(u64) + Send + Sync + 'a;

/// Scan a directory and list every regular file below it
///
/// Walks the directory tree recursively with the `ignore` crate, all ignore
/// filters disabled, so hidden and `.gitignore`d files are listed too.
/// Symlinks are followed and reported when they resolve to regular files.
/// No file is ever skipped: anything the walk cannot list fails the scan.
///
/// # Arguments
/// * `root_path` - The root directory to scan
/// * `role` - Which input this is, used for the not-found error
/// * `on_progress` - Optional callback for progress updates (files_scanned)
///
/// # Returns
/// * `Ok(Vec<RelativePath>)` - Relative paths sorted lexicographically
/// * `Err(RestructureError::NotFound)` - `root_path` is missing or not a directory
/// * `Err(RestructureError::Scan)` - an entry could not be read (unreadable
///   directory, broken or looping symlink)
/// * `Err(RestructureError::InvalidFileName)` - a path below the root is not valid UTF-8
pub fn scan_tree(
    root_path: &Path,
    role: DirRole,
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<Vec<RelativePath>, RestructureError> {
    if !root_path.is_dir() {
        return Err(RestructureError::NotFound {
            role,
            path: root_path.to_path_buf(),
        });
    }

    let start_time = Instant::now();
    let mut files = Vec::new();
    let mut scanned_count: u64 = 0;

    let walker = ignore::WalkBuilder::new(root_path)
        .standard_filters(false)
        .follow_links(true)
        .build();

    for result in walker {
        let entry = result.map_err(|source| {
            warn!("Cannot read entry under {}: {}", root_path.display(), source);
            RestructureError::Scan {
                root: root_path.to_path_buf(),
                source,
            }
        })?;

        let file_type = match entry.file_type() {
            Some(ft) => ft,
            None => continue,
        };

        // Only regular files (symlinks are already resolved by follow_links)
        if !file_type.is_file() {
            continue;
        }

        let relative_path = entry
            .path()
            .strip_prefix(root_path)
            .ok()
            .and_then(RelativePath::from_path)
            .ok_or_else(|| RestructureError::InvalidFileName {
                path: entry.path().to_path_buf(),
            })?;

        files.push(relative_path);
        scanned_count += 1;

        if let Some(callback) = on_progress {
            callback(scanned_count);
        }
    }

    files.sort();

    debug!(
        root = %root_path.display(),
        files = files.len(),
        elapsed_ms = start_time.elapsed().as_millis() as u64,
        "scan finished"
    );

    Ok(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn as_strings(paths: &[RelativePath]) -> Vec<&str> {
        paths.iter().map(RelativePath::as_str).collect()
    }

    #[test]
    fn test_scan_empty_directory() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");

        let files = scan_tree(temp_dir.path(), DirRole::Source, None).expect("scan should succeed");
        assert!(files.is_empty());
    }

    #[test]
    fn test_scan_missing_directory_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let missing = temp_dir.path().join("nope");

        let err = scan_tree(&missing, DirRole::Reference, None).unwrap_err();
        assert!(matches!(
            err,
            RestructureError::NotFound {
                role: DirRole::Reference,
                ..
            }
        ));
    }

    #[test]
    fn test_scan_file_root_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let file = temp_dir.path().join("file.txt");
        fs::write(&file, b"x").expect("write file");

        let err = scan_tree(&file, DirRole::Source, None).unwrap_err();
        assert!(err.is_not_found());
    }

    #[test]
    fn test_scan_nested_directories_sorted() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        fs::create_dir_all(root.join("b/deep/deeper")).expect("create dirs");
        fs::create_dir_all(root.join("a")).expect("create dirs");
        fs::write(root.join("b/deep/deeper/z.ts"), b"z").expect("write");
        fs::write(root.join("a/y.ts"), b"y").expect("write");
        fs::write(root.join("top.txt"), b"t").expect("write");

        let files = scan_tree(root, DirRole::Source, None).expect("scan should succeed");
        assert_eq!(
            as_strings(&files),
            vec!["a/y.ts", "b/deep/deeper/z.ts", "top.txt"]
        );
    }

    #[test]
    fn test_scan_lists_hidden_and_gitignored_files() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        fs::create_dir(root.join(".git")).expect("create .git");
        fs::write(root.join(".gitignore"), "*.log\n").expect("write .gitignore");
        fs::write(root.join("debug.log"), b"log").expect("write log");
        fs::write(root.join(".hidden"), b"h").expect("write hidden");

        let files = scan_tree(root, DirRole::Source, None).expect("scan should succeed");
        let names = as_strings(&files);
        assert!(names.contains(&"debug.log"));
        assert!(names.contains(&".hidden"));
        assert!(names.contains(&".gitignore"));
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_follows_symlink_to_file() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        fs::write(root.join("target.txt"), b"payload").expect("write target");
        std::os::unix::fs::symlink(root.join("target.txt"), root.join("link.txt"))
            .expect("create symlink");

        let files = scan_tree(root, DirRole::Source, None).expect("scan should succeed");
        assert_eq!(as_strings(&files), vec!["link.txt", "target.txt"]);
    }

    #[test]
    #[cfg(unix)]
    fn test_scan_fails_on_broken_symlink() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();

        std::os::unix::fs::symlink(root.join("missing.txt"), root.join("broken.txt"))
            .expect("create symlink");
        fs::write(root.join("real.txt"), b"r").expect("write");

        let err = scan_tree(root, DirRole::Source, None).unwrap_err();
        assert!(matches!(err, RestructureError::Scan { .. }));
    }

    #[test]
    #[cfg(target_os = "linux")]
    fn test_scan_fails_on_non_utf8_name() {
        use std::ffi::OsStr;
        use std::os::unix::ffi::OsStrExt;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::write(root.join("panel.ts"), b"p").expect("write");
        fs::write(root.join(OsStr::from_bytes(b"caf\xe9.txt")), b"c").expect("write latin-1 name");

        let err = scan_tree(root, DirRole::Source, None).unwrap_err();
        match err {
            RestructureError::InvalidFileName { path } => {
                assert_eq!(path.file_name().map(|n| n.as_bytes()), Some(&b"caf\xe9.txt"[..]));
            }
            other => panic!("expected InvalidFileName, got {other:?}"),
        }
    }

    #[test]
    fn test_scan_progress_callback() {
        use std::sync::atomic::{AtomicU64, Ordering};
        use std::sync::Arc;

        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        for i in 1..=5 {
            fs::write(root.join(format!("file{}.txt", i)), b"c").expect("write");
        }

        let call_count = Arc::new(AtomicU64::new(0));
        let call_count_clone = Arc::clone(&call_count);
        let callback = move |files: u64| {
            assert!(files > 0, "File count should be positive");
            call_count_clone.fetch_add(1, Ordering::SeqCst);
        };

        let files = scan_tree(root, DirRole::Source, Some(&callback)).expect("scan");
        assert_eq!(call_count.load(Ordering::SeqCst), 5);
        assert_eq!(files.len(), 5);
    }
}
