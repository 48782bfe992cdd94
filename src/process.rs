//! Centralized command execution with consistent error handling.
//!
//! Every subprocess gets its working directory passed explicitly; the
//! process-wide current directory is never changed.

use std::path::{Path, PathBuf};
use std::process::{Command, ExitStatus, Stdio};
use tracing::{debug, info};

use crate::error::{BuildError, Result};

/// Builder for configuring command execution.
pub struct Cmd {
    program: String,
    args: Vec<String>,
    current_dir: Option<PathBuf>,
}

impl Cmd {
    /// Create a new command builder.
    pub fn new(program: impl AsRef<str>) -> Self {
        Self {
            program: program.as_ref().to_string(),
            args: Vec::new(),
            current_dir: None,
        }
    }

    /// Add multiple arguments.
    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        for arg in args {
            self.args.push(arg.as_ref().to_string());
        }
        self
    }

    /// Set the working directory.
    pub fn dir(mut self, dir: &Path) -> Self {
        self.current_dir = Some(dir.to_path_buf());
        self
    }

    /// The command line as a single string, for logs and errors.
    pub fn display(&self) -> String {
        std::iter::once(self.program.as_str())
            .chain(self.args.iter().map(String::as_str))
            .collect::<Vec<_>>()
            .join(" ")
    }

    fn command(&self) -> Command {
        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args);
        if let Some(ref dir) = self.current_dir {
            cmd.current_dir(dir);
        }
        cmd
    }

    fn spawn_error(&self, e: std::io::Error) -> BuildError {
        debug!("spawning '{}' failed: {}", self.program, e);
        BuildError::ExternalProcess {
            command: format!("{} (is it installed?)", self.display()),
            code: -1,
        }
    }

    /// Run the command with inherited stdio so npm/webpack output streams
    /// straight to the terminal.
    pub fn run(self) -> Result<ExitStatus> {
        let mut cmd = self.command();
        cmd.stdin(Stdio::inherit());
        cmd.stdout(Stdio::inherit());
        cmd.stderr(Stdio::inherit());

        let status = cmd.status().map_err(|e| self.spawn_error(e))?;

        if !status.success() {
            return Err(BuildError::ExternalProcess {
                command: self.display(),
                code: status.code().unwrap_or(-1),
            });
        }

        Ok(status)
    }
}

/// The npm invocations the pipeline relies on.
#[derive(Debug, Clone)]
pub struct Npm {
    program: String,
}

impl Npm {
    /// Use a specific npm executable (name on `PATH` or a path).
    pub fn with_program(program: impl Into<String>) -> Self {
        Self {
            program: program.into(),
        }
    }

    /// Locate the executable, so a missing toolchain fails before anything runs.
    pub fn resolve(&self) -> Result<PathBuf> {
        which::which(&self.program).map_err(|_| BuildError::ExternalProcess {
            command: format!("{} (not found in PATH)", self.program),
            code: -1,
        })
    }

    fn cmd(&self, dir: &Path) -> Result<Cmd> {
        let program = self.resolve()?;
        Ok(Cmd::new(program.to_string_lossy()).dir(dir))
    }

    fn run(&self, dir: &Path, args: &[&str]) -> Result<()> {
        let cmd = self.cmd(dir)?.args(args);
        info!("run `{} {}` in {}", self.program, args.join(" "), dir.display());
        cmd.run()?;
        Ok(())
    }

    /// `npm i --ignore-scripts`
    pub fn install(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["i", "--ignore-scripts"])
    }

    /// `npm run build:webpack`
    pub fn build_bundles(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["run", "build:webpack"])
    }

    /// `npm run build:dev`
    pub fn watch(&self, dir: &Path) -> Result<()> {
        self.run(dir, &["run", "build:dev"])
    }
}

impl Default for Npm {
    fn default() -> Self {
        Self::with_program(crate::config::DEFAULT_NPM)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_success() {
        let status = Cmd::new("true").run().unwrap();
        assert!(status.success());
    }

    #[test]
    fn test_non_zero_exit_is_external_process_error() {
        let err = Cmd::new("false").run().unwrap_err();
        match err {
            BuildError::ExternalProcess { command, code } => {
                assert_eq!(command, "false");
                assert_eq!(code, 1);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_failure_propagates_code() {
        let err = Cmd::new("sh").args(["-c", "exit 3"]).run().unwrap_err();
        assert!(matches!(err, BuildError::ExternalProcess { code: 3, .. }));
    }

    #[test]
    fn test_missing_program() {
        let err = Cmd::new("nonexistent_program_12345").run().unwrap_err();
        assert!(err.to_string().contains("is it installed"));
    }

    #[test]
    fn test_run_in_directory_does_not_change_cwd() {
        let before = std::env::current_dir().unwrap();
        Cmd::new("sh")
            .args(["-c", "test \"$(pwd -P)\" = \"$(cd /tmp && pwd -P)\""])
            .dir(Path::new("/tmp"))
            .run()
            .unwrap();
        assert_eq!(std::env::current_dir().unwrap(), before);
    }

    #[test]
    fn test_display() {
        let cmd = Cmd::new("npm").args(["run", "build:webpack"]);
        assert_eq!(cmd.display(), "npm run build:webpack");
    }

    #[test]
    fn test_npm_not_found() {
        let npm = Npm::with_program("nonexistent_npm_12345");
        assert!(npm.resolve().is_err());
    }
}
