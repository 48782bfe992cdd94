//! Guard against running destructive cleanup in the wrong folder.

use std::io::{self, BufRead, Write};
use std::path::Path;
use tracing::warn;

use crate::error::{BuildError, Result};
use crate::paths;

/// Something that can answer a yes/no question.
pub trait Confirm {
    fn confirm(&mut self, prompt: &str) -> bool;
}

/// Answers yes without asking (`--yes`).
pub struct AssumeYes;

impl Confirm for AssumeYes {
    fn confirm(&mut self, _prompt: &str) -> bool {
        true
    }
}

/// Prompts on stderr and reads the answer from `input`.
/// Only `yes` (any case) counts as agreement.
pub struct StdinConfirm<R> {
    input: R,
}

impl<R: BufRead> StdinConfirm<R> {
    pub fn new(input: R) -> Self {
        Self { input }
    }
}

impl StdinConfirm<io::StdinLock<'static>> {
    pub fn stdin() -> Self {
        Self::new(io::stdin().lock())
    }
}

impl<R: BufRead> Confirm for StdinConfirm<R> {
    fn confirm(&mut self, prompt: &str) -> bool {
        eprintln!("{}", prompt);
        let _ = io::stderr().flush();

        let mut answer = String::new();
        if self.input.read_line(&mut answer).is_err() {
            return false;
        }
        answer.trim().eq_ignore_ascii_case("yes")
    }
}

/// Ask for confirmation when `root` isn't named `expected`.
pub fn guard_root(root: &Path, expected: &str, confirmer: &mut dyn Confirm) -> Result<()> {
    if paths::dir_name(root) == Some(expected) {
        return Ok(());
    }

    warn!(
        "the working folder is not `{}`. Unexpected file operation might happen if we are \
         running the process in a wrong place. Try `--main={{path}}` or run from the {} root.",
        expected, expected
    );
    if confirmer.confirm("do you want to continue? yes/no") {
        Ok(())
    } else {
        Err(BuildError::ConfirmationDeclined {
            root: root.to_path_buf(),
        })
    }
}
