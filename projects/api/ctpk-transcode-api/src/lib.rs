//! Export and re-import of the textures stored in CTPK archives.
//!
//! A CTPK archive bundles textures in the tiled layouts used by the 3DS GPU. This crate
//! unpacks them into PNG images that can be edited with ordinary tools, and writes edited
//! images back into the archive in place.
//!
//! # Features
//!
//! - Structural validation of archives before anything is touched
//! - All 14 texture formats, including ETC1 and ETC1 with a 4-bit alpha plane
//! - Re-encoding of the full mip chain from the edited level 0 image
//! - Images that did not change are never re-encoded
//! - Pluggable pixel codec through [`PixelCodec`]
//!
//! # Example
//!
//! ```no_run
//! use ctpk_transcode_api::{export_file, import_file, CtpkTranscoder, StandardPixelCodec};
//! use std::path::Path;
//!
//! let transcoder = CtpkTranscoder::new(StandardPixelCodec).with_verbose(true);
//! export_file(&transcoder, Path::new("ui.ctpk"), Path::new("ui")).unwrap();
//!
//! // ... edit the images below ui/ ...
//!
//! let report = import_file(&transcoder, Path::new("ui.ctpk"), Path::new("ui")).unwrap();
//! println!("{} textures re-encoded", report.reencoded);
//! ```

// Core modules
pub mod api;
pub mod archive;
pub mod codec;
pub mod error;
pub mod file_io;
pub mod transcode;

#[cfg(test)]
pub mod test_prelude;

// Re-export key types
pub use archive::{is_ctpk, CtpkArchive, CtpkHeader, TextureEntry};
pub use codec::{EncodeQuality, PixelCodec, StandardPixelCodec};
pub use ctpk_transcode_common::TextureFormat;
pub use error::{CtpkError, CtpkResult, SizeMismatchWarning};
pub use transcode::{CtpkTranscoder, ExportReport, ImportReport};

// Re-export convenience functions
pub use api::{export_file, import_file, load_archive};
pub use file_io::is_ctpk_file;
