//! Copying versioned files out of installed npm packages.
//!
//! Each [`DependencyFile`] names one file inside `node_modules` and how it is
//! renamed in the build output folder. The rename embeds the version pinned in
//! the lock file, so the Python side can reference exact bundle names.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::info;

use crate::error::{BuildError, Result};
use crate::manifest::Manifest;
use crate::paths;

/// One file to copy from an installed package.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DependencyFile {
    /// npm package name, e.g. `react-dom`.
    pub package: &'static str,
    /// Folder inside the package, e.g. `umd`.
    pub subfolder: Option<&'static str>,
    /// File name inside that folder.
    pub filename: &'static str,
    /// Destination name with a `{}` or `{0}` placeholder for the version.
    /// `{{` and `}}` stand for literal braces; no other field syntax is
    /// understood.
    pub target: Option<&'static str>,
}

impl DependencyFile {
    pub const fn new(
        package: &'static str,
        subfolder: Option<&'static str>,
        filename: &'static str,
        target: Option<&'static str>,
    ) -> Self {
        Self {
            package,
            subfolder,
            filename,
            target,
        }
    }

    /// Location of the file below `node_modules`.
    pub fn source_path(&self, npm_modules: &Path) -> PathBuf {
        paths::concat([
            Some(npm_modules),
            Some(Path::new(self.package)),
            self.subfolder.map(Path::new),
            Some(Path::new(self.filename)),
        ])
    }

    /// Name of the copy inside the output folder.
    pub fn destination_name(&self, version: &str) -> String {
        destination_name(self.package, version, self.filename, self.target)
    }
}

/// Compute the renamed file name for a copied dependency.
///
/// With a target template every `{}`/`{0}` is replaced by the version. Without
/// one the name is `<package>@<version>.<ext>` where `ext` is `min.js` when the
/// source file is a minified build.
pub fn destination_name(
    package: &str,
    version: &str,
    filename: &str,
    target: Option<&str>,
) -> String {
    match target {
        Some(template) => format_target(template, version),
        None => {
            let ext = if filename.split('.').any(|part| part == "min") {
                "min.js"
            } else {
                "js"
            };
            format!("{}@{}.{}", package, version, ext)
        }
    }
}

/// Substitute `version` into a target template.
///
/// Brace sequences other than `{}`, `{0}`, `{{` and `}}` are kept verbatim.
fn format_target(template: &str, version: &str) -> String {
    let mut out = String::with_capacity(template.len() + version.len());
    let mut rest = template;
    while let Some(index) = rest.find(['{', '}']) {
        out.push_str(&rest[..index]);
        rest = &rest[index..];
        let (replacement, consumed) = if rest.starts_with("{{") {
            ("{", 2)
        } else if rest.starts_with("}}") {
            ("}", 2)
        } else if rest.starts_with("{}") {
            (version, 2)
        } else if rest.starts_with("{0}") {
            (version, 3)
        } else {
            (&rest[..1], 1)
        };
        out.push_str(replacement);
        rest = &rest[consumed..];
    }
    out.push_str(rest);
    out
}

/// Template variable name for a package: `-` and `.` are dropped.
pub fn variable_name(package: &str) -> String {
    package.replace(['-', '.'], "")
}

/// Outcome of copying a dependency list.
#[derive(Debug, Default)]
pub struct CopiedDependencies {
    /// Destination paths in copy order.
    pub files: Vec<PathBuf>,
    /// Template variables: package variable name -> version.
    pub versions: BTreeMap<String, String>,
}

/// Copy every listed file from `npm_modules` into `output_dir`.
pub fn copy_dependencies(
    files: &[DependencyFile],
    manifest: &Manifest,
    npm_modules: &Path,
    output_dir: &Path,
) -> Result<CopiedDependencies> {
    let mut copied = CopiedDependencies::default();

    for dep in files {
        let version = manifest.dependency_version(dep.package)?;
        copied
            .versions
            .insert(variable_name(dep.package), version.to_string());

        let source = dep.source_path(npm_modules);
        if !source.is_file() {
            return Err(BuildError::DependencyMissing(format!(
                "{} not found (is `{}` installed?)",
                source.display(),
                dep.package
            )));
        }

        let destination = output_dir.join(dep.destination_name(version));
        info!("copy npm dependency => {}", dep.filename);
        fs::copy(&source, &destination).map_err(|e| BuildError::io(&destination, e))?;
        copied.files.push(destination);
    }

    Ok(copied)
}
