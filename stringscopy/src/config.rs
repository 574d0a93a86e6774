//! Run-wide configuration, fixed before the first file is touched.

use std::{
    path::{Path, PathBuf},
    str::FromStr,
};

use crate::error::Error;

/// Literal selecting binary property-list output.
pub const BINARY: &str = "binary";

/// Output encoding used when none is configured.
pub const DEFAULT_OUTPUT_ENCODING: &str = "UTF-16";

/// What the converter should produce.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OutputEncoding {
    /// Binary-encoded structured resource.
    Binary,
    /// Text re-encoded into the named charset.
    Charset(String),
}

impl Default for OutputEncoding {
    fn default() -> Self {
        OutputEncoding::Charset(DEFAULT_OUTPUT_ENCODING.to_string())
    }
}

impl FromStr for OutputEncoding {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(Error::config_error("output encoding cannot be empty"));
        }
        if trimmed.eq_ignore_ascii_case(BINARY) {
            Ok(OutputEncoding::Binary)
        } else {
            Ok(OutputEncoding::Charset(trimmed.to_string()))
        }
    }
}

impl std::fmt::Display for OutputEncoding {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OutputEncoding::Binary => f.write_str(BINARY),
            OutputEncoding::Charset(name) => f.write_str(name),
        }
    }
}

/// Immutable settings shared by every job of a run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Run the structural linter before converting.
    pub validate: bool,
    /// Directory converted files are written into.
    pub output_dir: PathBuf,
    /// Charset the sources are declared to be in.
    pub input_encoding: Option<String>,
    pub output_encoding: OutputEncoding,
}

impl PipelineConfig {
    /// Creates a config writing into `output_dir` with default settings.
    pub fn new(output_dir: impl Into<PathBuf>) -> Self {
        PipelineConfig {
            validate: false,
            output_dir: output_dir.into(),
            input_encoding: None,
            output_encoding: OutputEncoding::default(),
        }
    }

    /// Enables/disables the validation step.
    pub fn with_validate(mut self, validate: bool) -> Self {
        self.validate = validate;
        self
    }

    /// Sets the declared input encoding.
    pub fn with_input_encoding(mut self, input_encoding: Option<String>) -> Self {
        self.input_encoding = input_encoding;
        self
    }

    /// Sets the output encoding.
    pub fn with_output_encoding(mut self, output_encoding: OutputEncoding) -> Self {
        self.output_encoding = output_encoding;
        self
    }

    /// Checks the invariants a run relies on.
    ///
    /// The output directory must already exist; it is never created here.
    pub fn check(&self) -> Result<(), Error> {
        if self.output_dir.as_os_str().is_empty() {
            return Err(Error::config_error("output directory cannot be empty"));
        }
        if let Some(encoding) = &self.input_encoding {
            if encoding.trim().is_empty() {
                return Err(Error::config_error("input encoding cannot be empty"));
            }
        }
        if let OutputEncoding::Charset(name) = &self.output_encoding {
            if name.trim().is_empty() {
                return Err(Error::config_error("output encoding cannot be empty"));
            }
        }
        if !self.output_dir.is_dir() {
            return Err(Error::config_error(format!(
                "output directory does not exist: {}",
                self.output_dir.display()
            )));
        }
        Ok(())
    }

    /// Where the converted form of `source` is written.
    pub fn destination_for(&self, source: &Path) -> Result<PathBuf, Error> {
        let name = source.file_name().ok_or_else(|| {
            Error::config_error(format!("not a file path: {}", source.display()))
        })?;
        Ok(self.output_dir.join(name))
    }
}
