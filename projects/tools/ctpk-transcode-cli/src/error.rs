use ctpk_transcode_api::CtpkError;
use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("option conflict: --export and --import cannot be used together")]
    OptionConflict,
    #[error("no action given, pass --export or --import")]
    MissingAction,
    #[error("no archive given, pass --file <path>")]
    MissingFile,
    #[error("no image directory given, pass --dir <path>")]
    MissingDir,
    #[error("{} is not a ctpk file", .0.display())]
    NotCtpk(PathBuf),
    #[error(transparent)]
    Ctpk(#[from] CtpkError),
}
