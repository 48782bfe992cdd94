//! Build artifact cleaning.

use std::fs;
use std::path::{Path, PathBuf};
use tracing::warn;

use crate::error::{BuildError, Result};

/// What `clean_path` found.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CleanOutcome {
    /// The path existed and was removed.
    Removed,
    /// Nothing to remove.
    Absent,
}

/// Remove a previously generated file or directory tree.
///
/// A missing path only logs a warning. Failing to remove an existing path is
/// an error: building on top of a half-cleaned tree is never attempted.
pub fn clean_path(path: &Path) -> Result<CleanOutcome> {
    let meta = match fs::symlink_metadata(path) {
        Ok(meta) => meta,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} doesn't exist, no action taken", path.display());
            return Ok(CleanOutcome::Absent);
        }
        Err(e) => return Err(BuildError::path_op(path, e)),
    };

    warn!("{} already exists, remove it!", path.display());
    let removed = if meta.is_dir() {
        fs::remove_dir_all(path)
    } else {
        fs::remove_file(path)
    };
    removed.map_err(|e| BuildError::path_op(path, e))?;

    Ok(CleanOutcome::Removed)
}

/// Clean every path in order, stopping at the first failure.
pub fn clean_all(paths: &[PathBuf]) -> Result<usize> {
    let mut removed = 0;
    for path in paths {
        if clean_path(path)? == CleanOutcome::Removed {
            removed += 1;
        }
    }
    Ok(removed)
}
