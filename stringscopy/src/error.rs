//! All error types for the stringscopy crate.
//!
//! Every fatal condition of a run is one of these variants. Validation
//! problems are never errors; they are logged as warnings instead.

use std::path::PathBuf;

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    #[error("configuration error: {0}")]
    Config(String),

    #[error("unable to read `{}`: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("unable to launch {tool} (`{}`): {source}", .program.display())]
    Launch {
        tool: String,
        program: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("{tool} exited with status {code}")]
    ToolExited { tool: String, code: i32 },

    #[error("{tool} terminated by signal {signal}")]
    ToolSignaled { tool: String, signal: i32 },
}

impl Error {
    /// Creates a new configuration error.
    pub fn config_error(message: impl Into<String>) -> Self {
        Error::Config(message.into())
    }

    /// The process exit status a run failing with this error should report.
    ///
    /// A tool's own non-zero status is passed through so the calling build
    /// system sees the same code; everything else is `1`.
    pub fn exit_code(&self) -> i32 {
        match self {
            Error::ToolExited { code, .. } if (1..=255).contains(code) => *code,
            _ => 1,
        }
    }
}
