#![allow(unexpected_cfgs)]
#![cfg(not(tarpaulin_include))]

mod error;

use argh::FromArgs;
use ctpk_transcode_api::{
    export_file, import_file, is_ctpk_file, CtpkTranscoder, StandardPixelCodec,
};
use error::CliError;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(FromArgs, Debug)]
/// Export the textures of a CTPK archive as PNG images, or import edited images back
struct TopLevel {
    /// export textures to the image directory
    #[argh(switch, short = 'e')]
    export: bool,

    /// import images from the image directory into the archive
    #[argh(switch, short = 'i')]
    import: bool,

    /// path of the CTPK archive
    #[argh(option, short = 'f')]
    file: Option<PathBuf>,

    /// directory holding the images
    #[argh(option, short = 'd')]
    dir: Option<PathBuf>,

    /// show per-file progress and size mismatch notices
    #[argh(switch, short = 'v')]
    verbose: bool,
}

#[derive(Debug, Clone, Copy)]
enum Action {
    Export,
    Import,
}

fn main() -> ExitCode {
    let cli: TopLevel = argh::from_env();
    init_tracing(cli.verbose);

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("ERROR: {e}");
            ExitCode::FAILURE
        }
    }
}

fn run(cli: TopLevel) -> Result<(), CliError> {
    let action = match (cli.export, cli.import) {
        (true, true) => return Err(CliError::OptionConflict),
        (true, false) => Action::Export,
        (false, true) => Action::Import,
        (false, false) => return Err(CliError::MissingAction),
    };
    let file = cli.file.ok_or(CliError::MissingFile)?;
    let dir = cli.dir.ok_or(CliError::MissingDir)?;

    if !is_ctpk_file(&file) {
        return Err(CliError::NotCtpk(file));
    }

    let transcoder = CtpkTranscoder::new(StandardPixelCodec).with_verbose(cli.verbose);
    match action {
        Action::Export => {
            let report = export_file(&transcoder, &file, &dir)?;
            info!("exported {} textures to {}", report.exported, dir.display());
        }
        Action::Import => {
            let report = import_file(&transcoder, &file, &dir)?;
            info!(
                "imported {}: {} re-encoded, {} unchanged",
                file.display(),
                report.reencoded,
                report.unchanged
            );
        }
    }

    Ok(())
}

fn init_tracing(verbose: bool) {
    let default_level = if verbose { "info" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level)),
        )
        .with_target(false)
        .init();
}
