//! Producing the destination file from a working copy.

use std::{ffi::OsStr, path::Path};

use crate::{config::OutputEncoding, error::Error, tool::Toolchain};

/// The one way a job's output gets written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Strategy {
    /// Encode the structured resource as a binary property list.
    Binary,
    /// Re-encode the text from one charset to another.
    Reencode { from: String, to: String },
    /// Copy the bytes unchanged.
    Copy,
}

impl Strategy {
    /// Picks the strategy for a file whose effective encoding is `effective`.
    pub fn select(output_encoding: &OutputEncoding, effective: Option<&str>) -> Self {
        match (output_encoding, effective) {
            (OutputEncoding::Binary, _) => Strategy::Binary,
            (OutputEncoding::Charset(to), Some(from)) => Strategy::Reencode {
                from: from.to_string(),
                to: to.clone(),
            },
            (OutputEncoding::Charset(_), None) => Strategy::Copy,
        }
    }
}

impl std::fmt::Display for Strategy {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Strategy::Binary => write!(f, "binary"),
            Strategy::Reencode { from, to } => write!(f, "{} -> {}", from, to),
            Strategy::Copy => write!(f, "copy"),
        }
    }
}

/// Writes `destination` from `input` using `strategy`.
///
/// A tool that exits non-zero or dies by signal fails the call; no retry is
/// attempted and a partially written destination is left in place.
pub fn convert(
    toolchain: &Toolchain,
    strategy: &Strategy,
    input: &Path,
    destination: &Path,
) -> Result<(), Error> {
    match strategy {
        Strategy::Binary => {
            let encoder = &toolchain.binary_encoder;
            encoder
                .run([
                    OsStr::new("-convert"),
                    OsStr::new("binary1"),
                    OsStr::new("-o"),
                    destination.as_os_str(),
                    input.as_os_str(),
                ])?
                .into_result(&encoder.name)
        }
        Strategy::Reencode { from, to } => {
            let converter = &toolchain.text_converter;
            converter
                .run_to_file(
                    [
                        OsStr::new("-f"),
                        OsStr::new(from),
                        OsStr::new("-t"),
                        OsStr::new(to),
                        input.as_os_str(),
                    ],
                    destination,
                )?
                .into_result(&converter.name)
        }
        Strategy::Copy => {
            std::fs::copy(input, destination)?;
            Ok(())
        }
    }
}
