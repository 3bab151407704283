//! Reference tree indexing

use super::walker::{scan_tree, ProgressCallback};
use crate::types::{DirRole, ReferenceEntry, RestructureError};
use std::path::Path;
use tracing::debug;

/// Scan the reference tree and keep entries allowed by the extension list
///
/// An empty `extensions` list keeps every file. Otherwise an entry is kept
/// when its extension (case-sensitive, leading dot included, e.g. `.ts`) is
/// in the list. Files without an extension are only kept by an empty list.
pub fn index_reference(
    root_path: &Path,
    extensions: &[String],
    on_progress: Option<&ProgressCallback<'_>>,
) -> Result<Vec<ReferenceEntry>, RestructureError> {
    let files = scan_tree(root_path, DirRole::Reference, on_progress)?;
    let scanned = files.len();

    let entries: Vec<ReferenceEntry> = files
        .into_iter()
        .filter(|path| {
            extensions.is_empty()
                || path
                    .extension()
                    .is_some_and(|ext| extensions.iter().any(|allowed| allowed == ext))
        })
        .map(ReferenceEntry::new)
        .collect();

    debug!(
        scanned,
        kept = entries.len(),
        ?extensions,
        "reference index built"
    );

    Ok(entries)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn reference_tree() -> TempDir {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let root = temp_dir.path();
        fs::create_dir_all(root.join("layout")).expect("create dirs");
        fs::create_dir_all(root.join("x")).expect("create dirs");
        fs::write(root.join("layout/panel.ts"), b"p").expect("write");
        fs::write(root.join("layout/panel.meta"), b"m").expect("write");
        fs::write(root.join("x/readme.md"), b"r").expect("write");
        fs::write(root.join("x/UPPER.TS"), b"u").expect("write");
        fs::write(root.join("Makefile"), b"all:").expect("write");
        temp_dir
    }

    fn paths(entries: &[ReferenceEntry]) -> Vec<&str> {
        entries.iter().map(|e| e.path.as_str()).collect()
    }

    #[test]
    fn test_empty_extension_list_keeps_everything() {
        let tree = reference_tree();
        let entries = index_reference(tree.path(), &[], None).expect("index");
        assert_eq!(entries.len(), 5);
    }

    #[test]
    fn test_extension_filter_is_exact_and_case_sensitive() {
        let tree = reference_tree();
        let entries = index_reference(tree.path(), &[".ts".to_string()], None).expect("index");
        assert_eq!(paths(&entries), vec!["layout/panel.ts"]);
    }

    #[test]
    fn test_multiple_extensions() {
        let tree = reference_tree();
        let extensions = vec![".ts".to_string(), ".meta".to_string()];
        let entries = index_reference(tree.path(), &extensions, None).expect("index");
        assert_eq!(paths(&entries), vec!["layout/panel.meta", "layout/panel.ts"]);
    }

    #[test]
    fn test_excluded_markdown_is_not_indexed() {
        let tree = reference_tree();
        let entries = index_reference(tree.path(), &[".ts".to_string()], None).expect("index");
        assert!(entries.iter().all(|e| e.file_name() != "readme.md"));
    }

    #[test]
    fn test_missing_reference_is_not_found() {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let err = index_reference(&temp_dir.path().join("missing"), &[], None).unwrap_err();
        assert!(matches!(
            err,
            RestructureError::NotFound {
                role: DirRole::Reference,
                ..
            }
        ));
    }
}
