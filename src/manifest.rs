//! Lock file parsing.
//!
//! Only the keys the pipeline needs are modelled; everything else npm writes
//! into `package-lock.json` is ignored.

use serde::Deserialize;
use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use crate::error::{BuildError, Result};

/// Resolved information for a single dependency.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct LockedDependency {
    pub version: String,
}

/// The subset of `package-lock.json` the build reads.
#[derive(Debug, Clone, Deserialize)]
pub struct Manifest {
    pub name: String,
    pub version: String,
    pub dependencies: BTreeMap<String, LockedDependency>,
}

impl Manifest {
    /// Load and parse a lock file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| BuildError::ManifestParse {
            path: path.to_path_buf(),
            reason: e.to_string(),
        })?;
        Self::parse(&content).map_err(|reason| BuildError::ManifestParse {
            path: path.to_path_buf(),
            reason,
        })
    }

    /// Parse lock file content.
    pub fn parse(content: &str) -> std::result::Result<Self, String> {
        serde_json::from_str(content).map_err(|e| e.to_string())
    }

    /// Name of the build output folder: the package name with `-` turned into `_`.
    pub fn output_folder_name(&self) -> String {
        self.name.replace('-', "_")
    }

    /// Resolved version of a declared dependency.
    pub fn dependency_version(&self, package: &str) -> Result<&str> {
        self.dependencies
            .get(package)
            .map(|dep| dep.version.as_str())
            .ok_or_else(|| {
                BuildError::DependencyMissing(format!(
                    "'{}' is not declared in the lock file of {}",
                    package, self.name
                ))
            })
    }
}
