use std::path::PathBuf;

use clap::{ArgAction, Parser};
use stringscopy::{
    Error, OutputEncoding, PipelineConfig, Toolchain,
    config::DEFAULT_OUTPUT_ENCODING,
    tool::{DEFAULT_ICONV, DEFAULT_PLUTIL},
};

/// Copy localization resources into a bundle, normalizing their encoding.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Args {
    /// Source files to copy, processed in order
    #[arg(value_name = "FILE", required = true)]
    pub files: Vec<PathBuf>,

    /// Destination directory
    #[arg(long = "outdir", value_name = "DIR")]
    pub outdir: PathBuf,

    /// Lint each file before converting it (failures are only warnings)
    #[arg(long, overrides_with = "no_validate")]
    pub validate: bool,

    /// Skip linting (default)
    #[arg(long = "no-validate", overrides_with = "validate")]
    pub no_validate: bool,

    /// Charset the source files are declared to be in
    #[arg(long = "inputencoding", value_name = "ENC")]
    pub input_encoding: Option<String>,

    /// Target charset, or `binary` for a binary property list
    #[arg(long = "outputencoding", value_name = "ENC", default_value = DEFAULT_OUTPUT_ENCODING)]
    pub output_encoding: String,

    /// Charset converter to run for text re-encoding
    #[arg(long, value_name = "PATH", env = "STRINGSCOPY_ICONV", default_value = DEFAULT_ICONV)]
    pub iconv: PathBuf,

    /// Property-list tool used for linting and binary encoding
    #[arg(long, value_name = "PATH", env = "STRINGSCOPY_PLUTIL", default_value = DEFAULT_PLUTIL)]
    pub plutil: PathBuf,

    /// Log more (-v for each file, -vv for tool command lines)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl Args {
    /// Whether the validation step is on, the last of the two flags winning.
    pub fn validate(&self) -> bool {
        self.validate && !self.no_validate
    }

    /// Default log filter for the chosen verbosity.
    pub fn log_filter(&self) -> &'static str {
        match self.verbose {
            0 => "warn",
            1 => "info",
            _ => "debug",
        }
    }

    /// Builds the run configuration and toolchain.
    ///
    /// The configuration is checked later by [`stringscopy::Pipeline::new`].
    pub fn to_pipeline_parts(&self) -> Result<(PipelineConfig, Toolchain), Error> {
        let output_encoding = self.output_encoding.parse::<OutputEncoding>()?;
        let config = PipelineConfig::new(&self.outdir)
            .with_validate(self.validate())
            .with_input_encoding(self.input_encoding.clone())
            .with_output_encoding(output_encoding);
        Ok((config, Toolchain::new(&self.plutil, &self.iconv)))
    }
}
