//! Error types for the build pipeline.

use std::path::PathBuf;
use thiserror::Error;

/// Result type alias using [`BuildError`].
pub type Result<T> = std::result::Result<T, BuildError>;

/// Every failure the pipeline can hit. All of them are fatal.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Failed to read lock file {}: {reason}", path.display())]
    ManifestParse { path: PathBuf, reason: String },

    #[error("Failed to manipulate {}: {source}", path.display())]
    PathOperation {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Dependency missing: {0}")]
    DependencyMissing(String),

    #[error("'{command}' failed (exit code {code})")]
    ExternalProcess { command: String, code: i32 },

    #[error("Refusing to build in {}: confirmation declined", root.display())]
    ConfirmationDeclined { root: PathBuf },

    #[error("I/O error on {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl BuildError {
    pub(crate) fn path_op(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::PathOperation {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
