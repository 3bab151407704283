//! File copy implementation

use crate::types::RestructureError;
use std::ffi::OsString;
use std::fs::{self, File};
use std::io::{self, ErrorKind, Write};
use std::path::{Path, PathBuf};

const PART_SUFFIX: &str = ".restructure-part";

/// Copy a file byte for byte, creating the destination's parent directories
///
/// 1. Create missing parent directories (no-op when they exist). If this
///    fails nothing is written.
/// 2. Stream the source into a hidden sibling `.<name>.<pid>.restructure-part`
/// 3. Flush to disk
/// 4. Rename over the destination, replacing any existing file
///
/// Permissions and timestamps are not carried over.
///
/// # Returns
/// * `Ok(u64)` - Number of bytes copied
/// * `Err(RestructureError)` - Source unreadable or destination not writable
///
/// # Example
/// ```no_run
/// use restructure::executor::copy_file;
/// use std::path::Path;
///
/// let bytes = copy_file(Path::new("loose/panel.ts"), Path::new("out/layout/panel.ts"))?;
/// # Ok::<(), restructure::RestructureError>(())
/// ```
pub fn copy_file(src: &Path, dest: &Path) -> Result<u64, RestructureError> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent).map_err(|e| map_copy_error(src, dest, e))?;
    }

    let part_path = part_path_for(dest);
    match stream_to(src, &part_path) {
        Ok(bytes) => {
            fs::rename(&part_path, dest).map_err(|e| {
                let _ = fs::remove_file(&part_path);
                map_copy_error(src, dest, e)
            })?;
            Ok(bytes)
        }
        Err(e) => {
            let _ = fs::remove_file(&part_path);
            Err(map_copy_error(src, dest, e))
        }
    }
}

fn stream_to(src: &Path, part_path: &Path) -> io::Result<u64> {
    let mut src_file = File::open(src)?;
    let mut part_file = File::create(part_path)?;

    let bytes = io::copy(&mut src_file, &mut part_file)?;
    part_file.flush()?;
    part_file.sync_all()?;

    // Handle must be closed before rename on Windows
    drop(part_file);
    Ok(bytes)
}

fn part_path_for(dest: &Path) -> PathBuf {
    let mut name = OsString::from(".");
    if let Some(file_name) = dest.file_name() {
        name.push(file_name);
    }
    name.push(format!(".{}{}", std::process::id(), PART_SUFFIX));
    dest.with_file_name(name)
}

fn map_copy_error(src: &Path, dest: &Path, error: io::Error) -> RestructureError {
    if error.kind() == ErrorKind::PermissionDenied {
        RestructureError::PermissionDenied {
            path: dest.to_path_buf(),
        }
    } else {
        RestructureError::Copy {
            from: src.to_path_buf(),
            to: dest.to_path_buf(),
            source: error,
        }
    }
}
