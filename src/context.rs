//! Build context shared across all pipeline stages.

use std::path::{Path, PathBuf};

use crate::error::Result;
use crate::manifest::Manifest;
use crate::profile::BuildProfile;

/// Lock file name in the project root.
pub const PACKAGE_LOCK: &str = "package-lock.json";

/// Paths and manifest for one invocation.
#[derive(Debug, Clone)]
pub struct BuildContext {
    /// Project root (where `package.json` lives).
    pub root: PathBuf,
    /// Build output folder, named after the package.
    pub output: PathBuf,
    /// Installed npm packages.
    pub npm_modules: PathBuf,
    /// Lock file the manifest was read from.
    pub package_lock: PathBuf,
    pub manifest: Manifest,
    /// Everything `clean` removes, in order.
    pub asset_paths: Vec<PathBuf>,
}

impl BuildContext {
    /// Read the lock file in `root` and derive all paths from it.
    pub fn new(root: &Path, profile: &BuildProfile) -> Result<Self> {
        let package_lock = root.join(PACKAGE_LOCK);
        let manifest = Manifest::load(&package_lock)?;
        Ok(Self::with_manifest(root, profile, manifest))
    }

    /// Build a context from an already parsed manifest.
    pub fn with_manifest(root: &Path, profile: &BuildProfile, manifest: Manifest) -> Self {
        let output = root.join(manifest.output_folder_name());
        let npm_modules = root.join("node_modules");

        let mut asset_paths = vec![output.clone(), npm_modules.clone()];
        asset_paths.extend(profile.extra_assets.iter().map(|dir| root.join(dir)));

        Self {
            root: root.to_path_buf(),
            output,
            npm_modules,
            package_lock: root.join(PACKAGE_LOCK),
            manifest,
            asset_paths,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profile::{COMPONENTS, RENDERER};

    fn manifest(name: &str) -> Manifest {
        Manifest::parse(&format!(
            r#"{{"name": "{}", "version": "1.0.0", "dependencies": {{}}}}"#,
            name
        ))
        .unwrap()
    }

    #[test]
    fn test_output_folder_from_package_name() {
        let ctx =
            BuildContext::with_manifest(Path::new("/p"), &RENDERER, manifest("dash-renderer"));
        assert_eq!(ctx.output, PathBuf::from("/p/dash_renderer"));
        assert_eq!(
            ctx.asset_paths,
            vec![PathBuf::from("/p/dash_renderer"), PathBuf::from("/p/node_modules")]
        );
    }

    #[test]
    fn test_components_extra_assets() {
        let ctx = BuildContext::with_manifest(
            Path::new("/p"),
            &COMPONENTS,
            manifest("dash-core-components"),
        );
        assert_eq!(ctx.asset_paths.len(), 4);
        assert_eq!(ctx.asset_paths[2], PathBuf::from("/p/R"));
        assert_eq!(ctx.asset_paths[3], PathBuf::from("/p/inst"));
    }
}
