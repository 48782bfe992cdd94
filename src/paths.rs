//! Path resolution relative to a project root.

use std::fs;
use std::path::{Component, Path, PathBuf};

use crate::error::{BuildError, Result};

/// Join path segments, skipping empty ones, and normalize the result.
///
/// Mirrors how dependency sources are addressed: the optional sub-folder of a
/// package is simply left out when it is `None`.
pub fn concat<I, P>(parts: I) -> PathBuf
where
    I: IntoIterator<Item = Option<P>>,
    P: AsRef<Path>,
{
    let mut joined = PathBuf::new();
    for part in parts.into_iter().flatten() {
        let part = part.as_ref();
        if !part.as_os_str().is_empty() {
            joined.push(part);
        }
    }
    normalize(&joined)
}

/// Lexically normalize a path: drop `.` components and fold `..` into the
/// preceding component. Does not touch the filesystem.
pub fn normalize(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::CurDir => {}
            Component::ParentDir => {
                if !out.pop() {
                    out.push("..");
                }
            }
            other => out.push(other.as_os_str()),
        }
    }
    out
}

/// Expand a bare `~` or a leading `~/` to the current user's home directory.
///
/// `~user` forms are left untouched.
pub fn expand_home(path: &str) -> PathBuf {
    let rest = match path.strip_prefix('~') {
        Some("") => "",
        Some(rest) if rest.starts_with(['/', '\\']) => rest.trim_start_matches(['/', '\\']),
        _ => return PathBuf::from(path),
    };
    match dirs::home_dir() {
        Some(home) if rest.is_empty() => home,
        Some(home) => home.join(rest),
        None => PathBuf::from(path),
    }
}

/// Resolve a user-supplied path against `cwd`, expanding `~`.
pub fn resolve_root(path: &str, cwd: &Path) -> PathBuf {
    let expanded = expand_home(path);
    if expanded.is_absolute() {
        normalize(&expanded)
    } else {
        normalize(&cwd.join(expanded))
    }
}

/// Final path component as a string, if any.
pub fn dir_name(path: &Path) -> Option<&str> {
    path.file_name().and_then(|n| n.to_str())
}

/// Ensure a directory exists, creating it if necessary.
pub fn ensure_dir_exists(path: &Path) -> Result<()> {
    fs::create_dir_all(path).map_err(|e| BuildError::path_op(path, e))
}
