use clap::{Parser, error::ErrorKind};
use stringscopy::{Error, Pipeline};
use stringscopy_cli::Args;

fn main() {
    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(e) => match e.kind() {
            ErrorKind::DisplayHelp | ErrorKind::DisplayVersion => e.exit(),
            _ => {
                // Malformed arguments are configuration errors: status 1.
                let _ = e.print();
                std::process::exit(1);
            }
        },
    };

    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(args.log_filter()))
        .format_timestamp(None)
        .init();

    if let Err(e) = run(&args) {
        log::error!("{}", e);
        std::process::exit(e.exit_code());
    }
}

fn run(args: &Args) -> Result<(), Error> {
    let (config, toolchain) = args.to_pipeline_parts()?;
    let summary = Pipeline::new(config, toolchain)?.run(&args.files)?;

    log::info!(
        "Copied {} file(s) ({} encoding warning(s), {} validation warning(s))",
        summary.files,
        summary.encoding_warnings,
        summary.validation_warnings
    );
    Ok(())
}
