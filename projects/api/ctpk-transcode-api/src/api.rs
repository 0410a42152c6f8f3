//! File level entry points.

use crate::archive::CtpkArchive;
use crate::codec::PixelCodec;
use crate::error::{CtpkError, CtpkResult};
use crate::file_io::{read_archive, write_archive};
use crate::transcode::{CtpkTranscoder, ExportReport, ImportReport};
use std::path::Path;
use tracing::debug;

/// Reads and validates the archive at `path`.
pub fn load_archive(path: &Path) -> CtpkResult<CtpkArchive> {
    let data = read_archive(path).map_err(|e| CtpkError::file_io(path, e))?;
    Ok(CtpkArchive::from_bytes(data)?)
}

/// Exports every texture of the archive at `archive_path` as a PNG below `dir`.
///
/// # Example
///
/// ```no_run
/// use ctpk_transcode_api::{export_file, CtpkTranscoder, StandardPixelCodec};
/// use std::path::Path;
///
/// let transcoder = CtpkTranscoder::new(StandardPixelCodec);
/// let report = export_file(&transcoder, Path::new("ui.ctpk"), Path::new("ui")).unwrap();
/// println!("exported {} textures", report.exported);
/// ```
pub fn export_file<C: PixelCodec>(
    transcoder: &CtpkTranscoder<C>,
    archive_path: &Path,
    dir: &Path,
) -> CtpkResult<ExportReport> {
    let archive = load_archive(archive_path)?;
    transcoder.export_archive(&archive, dir)
}

/// Imports the PNGs below `dir` into the archive at `archive_path`.
///
/// The file is rewritten only if every entry succeeded and at least one entry changed;
/// on any error it is left exactly as it was.
pub fn import_file<C: PixelCodec>(
    transcoder: &CtpkTranscoder<C>,
    archive_path: &Path,
    dir: &Path,
) -> CtpkResult<ImportReport> {
    let mut archive = load_archive(archive_path)?;
    let report = transcoder.import_archive(&mut archive, dir)?;

    if report.modified() {
        write_archive(archive_path, archive.as_bytes())
            .map_err(|e| CtpkError::file_io(archive_path, e))?;
    } else {
        debug!("{}: no textures changed, not rewriting", archive_path.display());
    }

    Ok(report)
}
