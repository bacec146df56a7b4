//! Error types for texel-core operations.
//!
//! # Overview
//!
//! The [`Error`] enum covers the failure modes of the data model and the
//! pixel codec:
//! - Image buffer construction (size invariant, dimensions)
//! - Pixel reads and writes (bounds, unsupported formats)
//! - Region selection (rectangles fully outside an image)
//!
//! Most image operations recover locally (clamp, skip) rather than fail.
//! The variants here are the conditions a caller is expected to inspect.
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{Error, PixelFormat, Result};
//!
//! fn require_uncompressed(format: PixelFormat) -> Result<()> {
//!     if format.is_compressed() {
//!         return Err(Error::unsupported_format(format, "read"));
//!     }
//!     Ok(())
//! }
//!
//! assert!(require_uncompressed(PixelFormat::Dxt1Rgb).is_err());
//! ```

use crate::format::PixelFormat;
use thiserror::Error;

/// Result type alias using [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in the texel data model and pixel codec.
///
/// # Categories
///
/// - **Guard errors**: [`InvalidImage`](Error::InvalidImage)
/// - **Format errors**: [`UnsupportedFormat`](Error::UnsupportedFormat)
/// - **Bounds errors**: [`OutOfBounds`](Error::OutOfBounds), [`InvalidRegion`](Error::InvalidRegion)
/// - **Buffer errors**: [`InvalidDimensions`](Error::InvalidDimensions),
///   [`BufferSize`](Error::BufferSize)
#[derive(Debug, Error)]
pub enum Error {
    /// Image has no pixel data or a zero dimension.
    ///
    /// This is the universal precondition of every operation. Mutators
    /// treat it as a no-op; codec functions that must produce data report it.
    #[error("invalid image: empty buffer or zero dimension")]
    InvalidImage,

    /// Pixel format cannot be handled by the requested operation.
    ///
    /// Raised for block-compressed formats, which the engine never decodes
    /// for editing.
    #[error("unsupported pixel format {format} for {op}")]
    UnsupportedFormat {
        /// Offending format
        format: PixelFormat,
        /// Operation that rejected it
        op: String,
    },

    /// Pixel coordinates are outside image bounds.
    #[error("pixel ({x}, {y}) out of bounds for image {width}x{height}")]
    OutOfBounds {
        /// X coordinate that was out of bounds
        x: i32,
        /// Y coordinate that was out of bounds
        y: i32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Rectangle lies entirely outside the image.
    #[error("region ({rx}, {ry}, {rw}x{rh}) is outside image bounds {width}x{height}")]
    InvalidRegion {
        /// Region X origin
        rx: i32,
        /// Region Y origin
        ry: i32,
        /// Region width
        rw: i32,
        /// Region height
        rh: i32,
        /// Image width
        width: u32,
        /// Image height
        height: u32,
    },

    /// Invalid image dimensions.
    #[error("invalid dimensions: {width}x{height} ({reason})")]
    InvalidDimensions {
        /// Requested width
        width: u32,
        /// Requested height
        height: u32,
        /// Reason why dimensions are invalid
        reason: String,
    },

    /// Byte buffer length does not match the format and dimensions.
    #[error("buffer size mismatch: expected {expected} bytes, got {got}")]
    BufferSize {
        /// Bytes required by the size invariant
        expected: usize,
        /// Bytes supplied
        got: usize,
    },

    /// Generic error with custom message.
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Creates an [`Error::UnsupportedFormat`] error.
    #[inline]
    pub fn unsupported_format(format: PixelFormat, op: impl Into<String>) -> Self {
        Self::UnsupportedFormat {
            format,
            op: op.into(),
        }
    }

    /// Creates an [`Error::OutOfBounds`] error.
    #[inline]
    pub fn out_of_bounds(x: i32, y: i32, width: u32, height: u32) -> Self {
        Self::OutOfBounds {
            x,
            y,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidRegion`] error.
    #[inline]
    pub fn invalid_region(rect: crate::Rect, width: u32, height: u32) -> Self {
        Self::InvalidRegion {
            rx: rect.x,
            ry: rect.y,
            rw: rect.width,
            rh: rect.height,
            width,
            height,
        }
    }

    /// Creates an [`Error::InvalidDimensions`] error.
    #[inline]
    pub fn invalid_dimensions(width: u32, height: u32, reason: impl Into<String>) -> Self {
        Self::InvalidDimensions {
            width,
            height,
            reason: reason.into(),
        }
    }

    /// Creates an [`Error::Other`] error.
    #[inline]
    pub fn other(msg: impl Into<String>) -> Self {
        Self::Other(msg.into())
    }

    /// Returns `true` if this is a bounds-related error.
    #[inline]
    pub fn is_bounds_error(&self) -> bool {
        matches!(self, Self::OutOfBounds { .. } | Self::InvalidRegion { .. })
    }

    /// Returns `true` if this is a format error.
    #[inline]
    pub fn is_format_error(&self) -> bool {
        matches!(self, Self::UnsupportedFormat { .. })
    }
}
