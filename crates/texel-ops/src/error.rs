//! Error and status types for image operations.

use texel_core::PixelFormat;
use thiserror::Error;

/// Error type for image operations.
///
/// Only conditions a caller must not ignore are errors: a request the engine
/// refuses (compressed data, bad parameters) or a region that leaves nothing
/// to work on. The image is untouched whenever an error is returned.
#[derive(Error, Debug)]
pub enum OpsError {
    /// Error from the data model or pixel codec.
    #[error(transparent)]
    Core(#[from] texel_core::Error),

    /// Operation refused for this pixel format.
    #[error("{op} not supported for {format} images")]
    UnsupportedFormat {
        /// Format of the rejected image
        format: PixelFormat,
        /// Operation name
        op: &'static str,
    },

    /// Requested region lies entirely outside the image.
    #[error("out of bounds: {0}")]
    OutOfBounds(String),

    /// Images have incompatible sizes.
    #[error("size mismatch: {0}")]
    SizeMismatch(String),

    /// Invalid parameter value.
    #[error("invalid parameter: {0}")]
    InvalidParameter(String),
}

/// Result type for image operations.
pub type OpsResult<T> = Result<T, OpsError>;

/// Outcome of an in-place operation that did not fail.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[must_use]
pub enum Status {
    /// The image was modified.
    Applied,
    /// Nothing to do (empty image, size unchanged, no matching pixels).
    Skipped,
}

impl Status {
    /// Returns `true` if the image was modified.
    #[inline]
    pub fn is_applied(self) -> bool {
        matches!(self, Self::Applied)
    }

    /// `Applied` if `changed`, else `Skipped`.
    #[inline]
    pub fn from_changed(changed: bool) -> Self {
        if changed { Self::Applied } else { Self::Skipped }
    }
}
