//! Shared test utilities for dash-build tests.

#![allow(dead_code)]

use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Lock file of the renderer fixture.
pub const RENDERER_LOCK: &str = r#"{
    "name": "dash-renderer",
    "version": "0.17.0",
    "lockfileVersion": 1,
    "requires": true,
    "dependencies": {
        "react": { "version": "16.8.6" },
        "react-dom": { "version": "16.8.6" },
        "prop-types": { "version": "15.7.2" },
        "webpack": { "version": "4.29.0", "dev": true }
    }
}"#;

/// `init.template` of the renderer fixture.
pub const RENDERER_TEMPLATE: &str = r#"__version__ = "$version"
_js_dist = [
    {"relative_package_path": "react@${react}.min.js", "namespace": "$package"},
    {"relative_package_path": "react-dom@$reactdom.min.js", "namespace": "$package"},
    {"relative_package_path": "prop-types@$proptypes.js", "namespace": "$package"},
]
"#;

/// Lock file of the components fixture.
pub const COMPONENTS_LOCK: &str = r#"{
    "name": "dash-core-components",
    "version": "0.44.0",
    "dependencies": {
        "plotly.js-dist": { "version": "1.45.3" }
    }
}"#;

/// A project checkout in a temporary directory, plus a stub `npm`.
///
/// The stub records its arguments in `npm-calls.log`, recreates
/// `node_modules` and the lock file on install, and writes a bundle and its
/// source map on `run build:webpack`.
pub struct TestEnv {
    /// Temporary directory (kept alive for lifetime of TestEnv)
    pub _temp_dir: TempDir,
    /// Project root
    pub root: PathBuf,
    /// Packages the stub installs into `node_modules`
    pub registry: PathBuf,
    /// Stub npm executable
    pub npm: PathBuf,
    /// Stub invocation log
    pub npm_log: PathBuf,
}

impl TestEnv {
    /// Create an empty project named `project_dir` with the given lock file.
    pub fn new(project_dir: &str, lock: &str) -> Self {
        let temp_dir = TempDir::new().expect("Failed to create temp dir");
        let base = temp_dir.path();

        let root = base.join(project_dir);
        let registry = base.join("registry");
        let npm = base.join("bin/npm");
        let npm_log = base.join("npm-calls.log");

        fs::create_dir_all(&root).expect("Failed to create project root");
        fs::create_dir_all(&registry).expect("Failed to create registry");
        fs::write(root.join("package-lock.json"), lock).expect("Failed to write lock file");
        fs::write(base.join("lock.json"), lock).expect("Failed to save lock file");

        Self {
            _temp_dir: temp_dir,
            root,
            registry,
            npm,
            npm_log,
        }
    }

    /// Renderer fixture: lock file, template and react/prop-types packages.
    pub fn renderer() -> Self {
        let env = Self::new("dash-renderer", RENDERER_LOCK);
        fs::write(env.root.join("init.template"), RENDERER_TEMPLATE)
            .expect("Failed to write template");
        for file in [
            "react/umd/react.production.min.js",
            "react/umd/react.development.js",
            "react-dom/umd/react-dom.production.min.js",
            "react-dom/umd/react-dom.development.js",
            "prop-types/prop-types.min.js",
            "prop-types/prop-types.js",
        ] {
            env.add_package_file(file);
        }
        env
    }

    /// Components fixture: plotly, the highlight asset and R/inst folders.
    pub fn components() -> Self {
        let env = Self::new("dash-core-components", COMPONENTS_LOCK);
        fs::write(
            env.root.join("init.template"),
            "__version__ = '$version'\nplotly = '$plotlyjsdist'\n",
        )
        .expect("Failed to write template");
        env.add_package_file("plotly.js-dist/plotly.js");
        fs::create_dir_all(env.root.join("assets")).expect("Failed to create assets");
        fs::write(env.root.join("assets/highlight.pack.js"), "hljs")
            .expect("Failed to write highlight");
        fs::create_dir_all(env.root.join("R")).expect("Failed to create R");
        fs::create_dir_all(env.root.join("inst/deps")).expect("Failed to create inst");
        env
    }

    /// Add a file to the registry (and so to `node_modules` after install).
    pub fn add_package_file(&self, relative: &str) {
        let path = self.registry.join(relative);
        fs::create_dir_all(path.parent().expect("package file has a parent"))
            .expect("Failed to create package dir");
        fs::write(&path, format!("/* {} */", relative)).expect("Failed to write package file");
    }

    /// Write the stub npm. `install_exit` makes `npm i` fail with that code.
    pub fn write_npm_stub(&self, output_folder: &str, install_exit: Option<i32>) {
        let base = self._temp_dir.path();
        let fail = install_exit
            .map(|code| format!("exit {}", code))
            .unwrap_or_default();
        let script = format!(
            r#"#!/bin/sh
echo "$*" >> "{log}"
case "$*" in
  "i --ignore-scripts")
    {fail}
    cp -R "{registry}" node_modules
    cp "{lock}" package-lock.json
    ;;
  "run build:webpack")
    printf 'bundle' > "{output}/bundle.js"
    printf 'map' > "{output}/bundle.js.map"
    ;;
esac
"#,
            log = self.npm_log.display(),
            fail = fail,
            registry = self.registry.display(),
            lock = base.join("lock.json").display(),
            output = output_folder,
        );
        create_executable(&self.npm, &script);
    }

    /// Lines recorded by the stub npm.
    pub fn npm_calls(&self) -> Vec<String> {
        fs::read_to_string(&self.npm_log)
            .unwrap_or_default()
            .lines()
            .map(str::to_string)
            .collect()
    }

    /// Stub npm as a program string for `Npm::with_program`.
    pub fn npm_program(&self) -> String {
        self.npm.to_string_lossy().into_owned()
    }
}

/// Create an executable script file.
pub fn create_executable(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create parent dir for script");
    }
    fs::write(path, content).expect("Failed to write script");

    let mut perms = fs::metadata(path).expect("Failed to get metadata").permissions();
    perms.set_mode(0o755);
    fs::set_permissions(path, perms).expect("Failed to set permissions");
}

/// Assert that a file contains expected content.
pub fn assert_file_contains(path: &Path, expected: &str) {
    let content = fs::read_to_string(path)
        .unwrap_or_else(|e| panic!("Failed to read file {}: {}", path.display(), e));
    assert!(
        content.contains(expected),
        "File {} does not contain expected content.\nExpected to find: {}\nActual content: {}",
        path.display(),
        expected,
        content
    );
}

/// Assert that a file exists.
pub fn assert_file_exists(path: &Path) {
    assert!(path.is_file(), "Expected file to exist: {}", path.display());
}
