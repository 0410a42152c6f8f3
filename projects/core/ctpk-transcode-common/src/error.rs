//! Errors raised while converting between native and linear pixel layouts.

use thiserror::Error;

/// Errors that can occur in the pack/unpack routines.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TilingError {
    /// Width or height is zero or not a multiple of the tile size.
    #[error("Dimensions {width}x{height} are not a multiple of {alignment}")]
    UnalignedDimensions {
        /// Width of the offending image or mip level.
        width: usize,
        /// Height of the offending image or mip level.
        height: usize,
        /// Required alignment of both dimensions.
        alignment: usize,
    },

    /// The source buffer holds fewer bytes than the layout requires.
    #[error("Input buffer too short: required {required} bytes, got {actual} bytes")]
    InputTooShort {
        /// Bytes needed for the operation.
        required: usize,
        /// Bytes available.
        actual: usize,
    },

    /// The destination buffer cannot hold the packed or unpacked data.
    #[error("Output buffer too short: required {required} bytes, got {actual} bytes")]
    OutputTooShort {
        /// Bytes needed for the operation.
        required: usize,
        /// Bytes available.
        actual: usize,
    },

    /// An ETC1A4 level was packed without its separate alpha plane.
    #[error("ETC1A4 data requires a separate alpha plane")]
    MissingAlphaPlane,

    /// An alpha plane was supplied for a format which has no separate alpha plane.
    #[error("Alpha plane supplied for a format without a separate alpha plane")]
    UnexpectedAlphaPlane,
}
