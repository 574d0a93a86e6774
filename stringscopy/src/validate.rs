//! Advisory structural linting of a working copy.

use std::{ffi::OsStr, path::Path};

use crate::tool::{ToolOutcome, Toolchain};

/// Result of linting one file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LintVerdict {
    Passed,
    Failed(ToolOutcome),
    /// The linter could not be started.
    Unavailable,
}

/// Lints `path`, logging a warning for anything but a clean pass.
///
/// Never fails: a broken file is still copied and the run's exit status is
/// decided by the conversion alone.
pub fn lint(toolchain: &Toolchain, path: &Path) -> LintVerdict {
    let linter = &toolchain.linter;
    match linter.run([OsStr::new("-lint"), path.as_os_str()]) {
        Ok(ToolOutcome::Success) => LintVerdict::Passed,
        Ok(outcome) => {
            log::warn!(
                "Validation of {} failed ({} returned {})",
                path.display(),
                linter.name,
                outcome
            );
            LintVerdict::Failed(outcome)
        }
        Err(e) => {
            log::warn!("Skipping validation of {}: {}", path.display(), e);
            LintVerdict::Unavailable
        }
    }
}
