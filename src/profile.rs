//! Build profiles: which project is built and what gets copied into it.

use std::path::{Path, PathBuf};

use crate::deps::DependencyFile;
use crate::paths;

/// How a profile finds its project root.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RootPolicy {
    /// A fixed folder below the dash repository root.
    Framework { subdir: &'static str },
    /// The current directory (or `--main`), checked against `expected`.
    WorkingDir { expected: &'static str },
}

/// A named build configuration.
#[derive(Debug, Clone, Copy)]
pub struct BuildProfile {
    pub name: &'static str,
    pub root: RootPolicy,
    pub dependencies: &'static [DependencyFile],
    /// Asset folders cleaned in addition to the output folder and `node_modules`.
    pub extra_assets: &'static [&'static str],
    /// Copy `assets/highlight.pack.js` into the output folder before bundling.
    pub include_custom_highlight_asset: bool,
}

const RENDERER_DEPS: &[DependencyFile] = &[
    DependencyFile::new("react", Some("umd"), "react.production.min.js", None),
    DependencyFile::new("react", Some("umd"), "react.development.js", None),
    DependencyFile::new("react-dom", Some("umd"), "react-dom.production.min.js", None),
    DependencyFile::new("react-dom", Some("umd"), "react-dom.development.js", None),
    DependencyFile::new("prop-types", None, "prop-types.min.js", None),
    DependencyFile::new("prop-types", None, "prop-types.js", None),
];

const COMPONENTS_DEPS: &[DependencyFile] = &[DependencyFile::new(
    "plotly.js-dist",
    None,
    "plotly.js",
    Some("plotly-{}.min.js"),
)];

/// dash-renderer, located inside the dash repository.
pub const RENDERER: BuildProfile = BuildProfile {
    name: "renderer",
    root: RootPolicy::Framework {
        subdir: "dash-renderer",
    },
    dependencies: RENDERER_DEPS,
    extra_assets: &[],
    include_custom_highlight_asset: false,
};

/// dash-core-components, built from its own checkout.
pub const COMPONENTS: BuildProfile = BuildProfile {
    name: "dcc",
    root: RootPolicy::WorkingDir {
        expected: "dash-core-components",
    },
    dependencies: COMPONENTS_DEPS,
    extra_assets: &["R", "inst"],
    include_custom_highlight_asset: true,
};

impl BuildProfile {
    /// Resolve the project root.
    ///
    /// `main` only applies to working-dir profiles; framework profiles always
    /// live at `dash_root/<subdir>`.
    pub fn resolve_root(&self, main: Option<&str>, dash_root: &Path, cwd: &Path) -> PathBuf {
        match self.root {
            RootPolicy::Framework { subdir } => paths::normalize(&dash_root.join(subdir)),
            RootPolicy::WorkingDir { .. } => match main {
                Some(main) => paths::resolve_root(main, cwd),
                None => paths::normalize(cwd),
            },
        }
    }

    /// Folder name the root is expected to have, if the profile checks it.
    pub fn expected_dir_name(&self) -> Option<&'static str> {
        match self.root {
            RootPolicy::Framework { .. } => None,
            RootPolicy::WorkingDir { expected } => Some(expected),
        }
    }
}
