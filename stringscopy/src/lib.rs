#![forbid(unsafe_code)]
//! Copies localization resource files into a build directory while
//! normalizing their text encoding.
//!
//! Every source file is read, its byte-order mark sniffed and reconciled with
//! the declared encoding, stripped of a UTF-8 BOM when needed, optionally
//! linted, and finally written to the output directory by one of three
//! strategies: binary property-list encoding, charset re-encoding, or a plain
//! copy.
//!
//! # Quick Start
//!
//! ```rust,no_run
//! use stringscopy::{OutputEncoding, Pipeline, PipelineConfig, Toolchain};
//!
//! let config = PipelineConfig::new("build/en.lproj")
//!     .with_input_encoding(Some("UTF-8".to_string()))
//!     .with_output_encoding(OutputEncoding::Charset("UTF-16".to_string()));
//! let pipeline = Pipeline::new(config, Toolchain::default())?;
//! pipeline.run(["en.lproj/Localizable.strings", "en.lproj/InfoPlist.strings"])?;
//! # Ok::<(), Box<dyn std::error::Error>>(())
//! ```
//!
//! Runs are strictly sequential and stop at the first failing file. Use
//! [`Error::exit_code`] to turn a failure into the process exit status.

pub mod bom;
pub mod config;
pub mod convert;
pub mod encoding;
pub mod error;
pub mod pipeline;
pub mod tool;
pub mod validate;

pub use crate::{
    bom::WorkingCopy,
    config::{OutputEncoding, PipelineConfig},
    convert::Strategy,
    encoding::{EncodingMismatch, Reconciliation, SniffResult, reconcile, sniff},
    error::Error,
    pipeline::{FileJob, JobReport, Pipeline, Summary},
    tool::{Tool, ToolOutcome, Toolchain},
    validate::LintVerdict,
};
