//! The per-file pipeline and the sequential run over an input list.
//!
//! Each file goes through load, sniff, reconcile, BOM normalization, optional
//! validation, conversion and cleanup, in that order. The first error stops
//! the whole run; files after it are not touched.

use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::{
    bom::WorkingCopy,
    config::PipelineConfig,
    convert::{Strategy, convert},
    encoding::{EncodingMismatch, reconcile, sniff},
    error::Error,
    tool::Toolchain,
    validate::{LintVerdict, lint},
};

/// State of one file while it moves through the pipeline.
#[derive(Debug)]
pub struct FileJob {
    pub source_path: PathBuf,
    /// Starts as the declared encoding and may be overruled by the bytes.
    pub effective_encoding: Option<String>,
    pub working: WorkingCopy,
}

impl FileJob {
    pub fn new(source_path: &Path, declared_encoding: Option<&str>) -> Self {
        FileJob {
            source_path: source_path.to_path_buf(),
            effective_encoding: declared_encoding.map(str::to_string),
            working: WorkingCopy::original(source_path),
        }
    }
}

/// What happened to one successfully processed file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobReport {
    pub destination: PathBuf,
    pub strategy: Strategy,
    pub mismatch: Option<EncodingMismatch>,
    /// `None` when validation is disabled.
    pub lint: Option<LintVerdict>,
}

/// Totals for a completed run.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Summary {
    pub files: usize,
    pub encoding_warnings: usize,
    pub validation_warnings: usize,
}

impl Summary {
    fn record(&mut self, report: &JobReport) {
        self.files += 1;
        if report.mismatch.is_some() {
            self.encoding_warnings += 1;
        }
        if matches!(report.lint, Some(verdict) if verdict != LintVerdict::Passed) {
            self.validation_warnings += 1;
        }
    }
}

/// Copies and converts localization files according to a [`PipelineConfig`].
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: PipelineConfig,
    toolchain: Toolchain,
}

impl Pipeline {
    /// Creates a pipeline, rejecting an invalid configuration up front.
    pub fn new(config: PipelineConfig, toolchain: Toolchain) -> Result<Self, Error> {
        config.check()?;
        Ok(Pipeline { config, toolchain })
    }

    pub fn config(&self) -> &PipelineConfig {
        &self.config
    }

    /// Processes `paths` one after another, stopping at the first error.
    pub fn run<I, P>(&self, paths: I) -> Result<Summary, Error>
    where
        I: IntoIterator<Item = P>,
        P: AsRef<Path>,
    {
        let mut summary = Summary::default();
        for path in paths {
            let report = self.process_file(path.as_ref())?;
            summary.record(&report);
        }
        Ok(summary)
    }

    /// Runs the full pipeline for a single file.
    ///
    /// Any temp copy made for the file is gone when this returns, whether it
    /// returns `Ok` or `Err`.
    pub fn process_file(&self, source: &Path) -> Result<JobReport, Error> {
        let destination = self.config.destination_for(source)?;
        ensure_distinct(source, &destination)?;
        let mut job = FileJob::new(source, self.config.input_encoding.as_deref());

        let bytes = fs::read(source).map_err(|e| Error::Read {
            path: source.to_path_buf(),
            source: e,
        })?;

        let reconciliation = reconcile(sniff(&bytes), job.effective_encoding.as_deref());
        if let Some(mismatch) = &reconciliation.mismatch {
            log::warn!("{}: {}", source.display(), mismatch);
        }
        job.effective_encoding = reconciliation.effective;

        job.working = WorkingCopy::prepare(source, &bytes, job.effective_encoding.as_deref())?;
        drop(bytes);

        let verdict = self
            .config
            .validate
            .then(|| lint(&self.toolchain, job.working.path()));

        let strategy = Strategy::select(
            &self.config.output_encoding,
            job.effective_encoding.as_deref(),
        );
        log::info!(
            "{} -> {} ({})",
            source.display(),
            destination.display(),
            strategy
        );
        convert(&self.toolchain, &strategy, job.working.path(), &destination)?;

        job.working.cleanup()?;

        Ok(JobReport {
            destination,
            strategy,
            mismatch: reconciliation.mismatch,
            lint: verdict,
        })
    }
}

/// Fails if writing `destination` would overwrite `source` itself.
fn ensure_distinct(source: &Path, destination: &Path) -> Result<(), Error> {
    // An unresolvable source is left for the loader to report.
    let Ok(source) = fs::canonicalize(source) else {
        return Ok(());
    };
    let resolved = match (destination.parent(), destination.file_name()) {
        (Some(parent), Some(name)) => fs::canonicalize(parent)?.join(name),
        _ => return Ok(()),
    };
    if resolved == source {
        return Err(Error::config_error(format!(
            "destination {} is the source file itself",
            destination.display()
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputEncoding;
    use tempfile::TempDir;

    fn copy_pipeline(out: &Path) -> Pipeline {
        Pipeline::new(PipelineConfig::new(out), Toolchain::default()).unwrap()
    }

    #[test]
    fn test_file_job_starts_from_declared_values() {
        let job = FileJob::new(Path::new("a/Localizable.strings"), Some("UTF-8"));
        assert_eq!(job.effective_encoding.as_deref(), Some("UTF-8"));
        assert_eq!(job.working.path(), Path::new("a/Localizable.strings"));
        assert!(job.working.temp_path().is_none());
    }

    #[test]
    fn test_new_rejects_invalid_config() {
        let temp_dir = TempDir::new().unwrap();
        let config = PipelineConfig::new(temp_dir.path().join("missing"));
        assert!(Pipeline::new(config, Toolchain::default()).is_err());
    }

    #[test]
    fn test_verbatim_copy_without_declared_encoding() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let source = src.path().join("Localizable.strings");
        let content = b"\xFE\xFF\x00\"\x00a\x00\"";
        fs::write(&source, content).unwrap();

        let report = copy_pipeline(out.path()).process_file(&source).unwrap();
        assert_eq!(report.strategy, Strategy::Copy);
        assert_eq!(report.mismatch, None);
        assert_eq!(report.lint, None);
        assert_eq!(report.destination, out.path().join("Localizable.strings"));
        assert_eq!(fs::read(&report.destination).unwrap(), content);
    }

    #[test]
    fn test_output_dir_equal_to_source_dir_is_rejected() {
        let dir = TempDir::new().unwrap();
        let source = dir.path().join("Localizable.strings");
        let content = b"\"a\" = \"A\";";
        fs::write(&source, content).unwrap();

        let err = copy_pipeline(dir.path()).process_file(&source).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(err.exit_code(), 1);
        assert_eq!(fs::read(&source).unwrap(), content);

        // Same directory reached through a different spelling.
        let indirect = dir.path().join(".").join("Localizable.strings");
        let err = copy_pipeline(dir.path()).process_file(&indirect).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert_eq!(fs::read(&source).unwrap(), content);
    }

    #[test]
    fn test_read_error_stops_run() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let missing = src.path().join("Missing.strings");
        let later = src.path().join("Later.strings");
        fs::write(&later, "\"a\" = \"b\";").unwrap();

        let err = copy_pipeline(out.path())
            .run([&missing, &later])
            .unwrap_err();
        assert!(matches!(err, Error::Read { .. }));
        assert_eq!(err.exit_code(), 1);
        assert!(!out.path().join("Later.strings").exists());
    }

    #[test]
    fn test_run_counts_files() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let first = src.path().join("InfoPlist.strings");
        let second = src.path().join("Localizable.strings");
        fs::write(&first, "\"CFBundleName\" = \"App\";").unwrap();
        fs::write(&second, "\"ok\" = \"OK\";").unwrap();

        let summary = copy_pipeline(out.path()).run([&first, &second]).unwrap();
        assert_eq!(
            summary,
            Summary {
                files: 2,
                encoding_warnings: 0,
                validation_warnings: 0,
            }
        );
    }

    #[test]
    fn test_config_is_not_mutated_by_reconciliation() {
        let src = TempDir::new().unwrap();
        let out = TempDir::new().unwrap();
        let source = src.path().join("Localizable.strings");
        fs::write(&source, b"\xFF\xFEa\x00").unwrap();

        let config = PipelineConfig::new(out.path())
            .with_input_encoding(Some("UTF-8".to_string()))
            .with_output_encoding(OutputEncoding::Binary);
        let mut toolchain = Toolchain::default();
        toolchain.binary_encoder.program = PathBuf::from("/nonexistent/stringscopy/plutil");
        let pipeline = Pipeline::new(config, toolchain).unwrap();

        let err = pipeline.process_file(&source).unwrap_err();
        assert!(matches!(err, Error::Launch { .. }));
        assert_eq!(pipeline.config().input_encoding.as_deref(), Some("UTF-8"));
    }
}
