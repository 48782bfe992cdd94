//! Configuration for dash-build.
//!
//! Reads a `.env` file (via dotenvy) and environment variables.
//! Environment variables take precedence over `.env`.

use std::path::{Path, PathBuf};

/// npm executable used when `DASH_BUILD_NPM` is not set.
pub const DEFAULT_NPM: &str = "npm";

/// Dash repository root used when `DASH_ROOT` is not set.
///
/// The tool is checked out inside the dash repository, so the root is the
/// parent of this crate's manifest directory, fixed at build time.
pub fn default_dash_root() -> PathBuf {
    let manifest_dir = Path::new(env!("CARGO_MANIFEST_DIR"));
    manifest_dir
        .parent()
        .unwrap_or(manifest_dir)
        .to_path_buf()
}

/// Runtime configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// npm executable, name on PATH or a path (`DASH_BUILD_NPM`)
    pub npm: String,
    /// Root of the dash repository for the renderer profile (`DASH_ROOT`)
    pub dash_root: PathBuf,
}

impl Config {
    /// Load `.env` if present, then read the environment.
    pub fn load(cwd: &Path) -> Self {
        dotenvy::dotenv().ok();
        Self::from_env(cwd)
    }

    /// Read configuration from the environment only.
    pub fn from_env(cwd: &Path) -> Self {
        let npm = std::env::var("DASH_BUILD_NPM")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_NPM.to_string());

        let dash_root = std::env::var("DASH_ROOT")
            .ok()
            .filter(|s| !s.trim().is_empty())
            .map(|s| {
                let path = PathBuf::from(s);
                if path.is_absolute() {
                    path
                } else {
                    cwd.join(path)
                }
            })
            .unwrap_or_else(default_dash_root);

        Self { npm, dash_root }
    }
}
