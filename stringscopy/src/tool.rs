//! Synchronous invocation of the external tools the pipeline delegates to.

use std::{
    ffi::OsStr,
    fs::File,
    path::{Path, PathBuf},
    process::{Command, ExitStatus, Stdio},
};

use crate::error::Error;

/// Default location of the property-list linter and binary encoder.
pub const DEFAULT_PLUTIL: &str = "/usr/bin/plutil";

/// Default location of the charset converter.
pub const DEFAULT_ICONV: &str = "/usr/bin/iconv";

/// How an external tool finished.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolOutcome {
    Success,
    Exited(i32),
    Signaled(i32),
}

impl ToolOutcome {
    pub fn is_success(self) -> bool {
        self == ToolOutcome::Success
    }

    /// Turns a failed outcome into the error that stops the run.
    pub fn into_result(self, tool: &str) -> Result<(), Error> {
        match self {
            ToolOutcome::Success => Ok(()),
            ToolOutcome::Exited(code) => Err(Error::ToolExited {
                tool: tool.to_string(),
                code,
            }),
            ToolOutcome::Signaled(signal) => Err(Error::ToolSignaled {
                tool: tool.to_string(),
                signal,
            }),
        }
    }
}

impl From<ExitStatus> for ToolOutcome {
    fn from(status: ExitStatus) -> Self {
        if status.success() {
            return ToolOutcome::Success;
        }
        if let Some(code) = status.code() {
            return ToolOutcome::Exited(code);
        }
        #[cfg(unix)]
        {
            use std::os::unix::process::ExitStatusExt;
            if let Some(signal) = status.signal() {
                return ToolOutcome::Signaled(signal);
            }
        }
        ToolOutcome::Exited(1)
    }
}

impl std::fmt::Display for ToolOutcome {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ToolOutcome::Success => write!(f, "success"),
            ToolOutcome::Exited(code) => write!(f, "exit status {}", code),
            ToolOutcome::Signaled(signal) => write!(f, "signal {}", signal),
        }
    }
}

/// An external program identified by its path and a name for diagnostics.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tool {
    pub name: String,
    pub program: PathBuf,
}

impl Tool {
    pub fn new(name: impl Into<String>, program: impl Into<PathBuf>) -> Self {
        Tool {
            name: name.into(),
            program: program.into(),
        }
    }

    /// Runs the tool with inherited stdio and waits for it.
    pub fn run<I, S>(&self, args: I) -> Result<ToolOutcome, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let mut command = Command::new(&self.program);
        command.args(args);
        self.wait(command)
    }

    /// Runs the tool with its standard output redirected into `stdout_path`.
    pub fn run_to_file<I, S>(&self, args: I, stdout_path: &Path) -> Result<ToolOutcome, Error>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<OsStr>,
    {
        let output = File::create(stdout_path)?;
        let mut command = Command::new(&self.program);
        command.args(args).stdout(Stdio::from(output));
        self.wait(command)
    }

    fn wait(&self, mut command: Command) -> Result<ToolOutcome, Error> {
        log::debug!("Running {:?}", command);
        let status = command.status().map_err(|source| Error::Launch {
            tool: self.name.clone(),
            program: self.program.clone(),
            source,
        })?;
        Ok(ToolOutcome::from(status))
    }
}

/// The set of external tools one pipeline uses.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Toolchain {
    /// Structural linter, invoked as `<linter> -lint <path>`.
    pub linter: Tool,
    /// Binary encoder, invoked as `<encoder> -convert binary1 -o <out> <in>`.
    pub binary_encoder: Tool,
    /// Charset converter, invoked as `<converter> -f <from> -t <to> <in>`.
    pub text_converter: Tool,
}

impl Default for Toolchain {
    fn default() -> Self {
        Self::new(DEFAULT_PLUTIL, DEFAULT_ICONV)
    }
}

impl Toolchain {
    /// Uses `plutil` for linting and binary encoding, `iconv` for text.
    pub fn new(plutil: impl Into<PathBuf>, iconv: impl Into<PathBuf>) -> Self {
        let plutil = plutil.into();
        Toolchain {
            linter: Tool::new("plutil -lint", plutil.clone()),
            binary_encoder: Tool::new("plutil -convert", plutil),
            text_converter: Tool::new("iconv", iconv),
        }
    }
}
