//! Directory tree rendering

use std::fs;
use std::io;
use std::path::Path;

/// Render the directory under `root` as a box-drawing tree
///
/// Entries are sorted by name. Top-level entries are depth 0; directories are
/// expanded while their depth is below `max_depth`, so `max_depth = 0` lists
/// only the top level.
///
/// ```text
/// ├── layout
/// │   ├── panel.meta
/// │   └── panel.ts
/// └── unrelated.txt
/// ```
pub fn render_tree(root: &Path, max_depth: usize) -> io::Result<String> {
    let mut lines = Vec::new();
    render_level(root, 0, max_depth, "", &mut lines)?;
    Ok(lines.join("\n"))
}

fn render_level(
    dir: &Path,
    depth: usize,
    max_depth: usize,
    prefix: &str,
    lines: &mut Vec<String>,
) -> io::Result<()> {
    let mut entries = fs::read_dir(dir)?.collect::<Result<Vec<_>, _>>()?;
    entries.sort_by_key(|entry| entry.file_name());

    let count = entries.len();
    for (i, entry) in entries.iter().enumerate() {
        let is_last = i + 1 == count;
        let connector = if is_last { "└── " } else { "├── " };
        lines.push(format!(
            "{}{}{}",
            prefix,
            connector,
            entry.file_name().to_string_lossy()
        ));

        if depth < max_depth && entry.path().is_dir() {
            let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
            render_level(&entry.path(), depth + 1, max_depth, &child_prefix, lines)?;
        }
    }

    Ok(())
}
