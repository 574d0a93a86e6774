//! UTF-8 byte-order-mark stripping and the per-job working copy.
//!
//! The downstream charset converter rejects a UTF-8 BOM and only accepts file
//! paths, so a marked UTF-8 source is rewritten to a private temp file first.

use std::{
    io::Write,
    path::{Path, PathBuf},
};

use tempfile::TempPath;

use crate::{encoding::is_utf8, error::Error};

/// The UTF-8 encoding of U+FEFF.
pub const UTF8_BOM: [u8; 3] = [0xEF, 0xBB, 0xBF];

/// Returns `bytes` without its leading UTF-8 BOM(s), or `None` if unmarked.
///
/// Every leading BOM is removed, not only the first three bytes, so the
/// result never starts with a UTF-8 marker.
pub fn strip_utf8_bom(bytes: &[u8]) -> Option<&[u8]> {
    let mut rest = bytes.strip_prefix(&UTF8_BOM)?;
    while let Some(next) = rest.strip_prefix(&UTF8_BOM) {
        rest = next;
    }
    Some(rest)
}

/// The file downstream tools are pointed at for one job.
///
/// Either the untouched source file or a temp copy owned by this value. The
/// temp copy is deleted when the value drops, so every early return out of a
/// job releases it.
#[derive(Debug)]
pub struct WorkingCopy {
    source: PathBuf,
    temp: Option<TempPath>,
}

impl WorkingCopy {
    /// A working copy that is the source file itself.
    pub fn original(source: impl Into<PathBuf>) -> Self {
        WorkingCopy {
            source: source.into(),
            temp: None,
        }
    }

    /// Prepares the working copy for `source`, whose full content is `bytes`.
    ///
    /// Only UTF-8 content with a BOM is rewritten; everything else is used in
    /// place and no temp file is created.
    pub fn prepare(
        source: &Path,
        bytes: &[u8],
        effective_encoding: Option<&str>,
    ) -> Result<Self, Error> {
        let stripped = match effective_encoding {
            Some(encoding) if is_utf8(encoding) => strip_utf8_bom(bytes),
            _ => None,
        };

        let Some(content) = stripped else {
            return Ok(WorkingCopy::original(source));
        };

        let base_name = source
            .file_name()
            .and_then(|s| s.to_str())
            .unwrap_or("stringscopy");

        let mut file = tempfile::Builder::new()
            .prefix(&format!("{}.", base_name))
            .tempfile()?;
        file.write_all(content)?;
        file.flush()?;

        let temp = file.into_temp_path();
        log::debug!(
            "Stripped UTF-8 BOM from {} into {}",
            source.display(),
            temp.display()
        );

        Ok(WorkingCopy {
            source: source.to_path_buf(),
            temp: Some(temp),
        })
    }

    /// The path downstream tools should read.
    pub fn path(&self) -> &Path {
        self.temp.as_deref().unwrap_or(&self.source)
    }

    /// The temp file backing this copy, if one was created.
    pub fn temp_path(&self) -> Option<&Path> {
        self.temp.as_deref()
    }

    /// Deletes the temp file now, reporting failures that drop would swallow.
    pub fn cleanup(&mut self) -> Result<(), Error> {
        if let Some(temp) = self.temp.take() {
            temp.close()?;
        }
        Ok(())
    }
}
