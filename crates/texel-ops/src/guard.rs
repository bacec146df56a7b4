//! Precondition guards shared by every operation.
//!
//! Each mutator starts with one of these checks:
//!
//! - an empty image (no data or a zero dimension) is skipped silently
//! - a block-compressed image is refused with a warning and
//!   [`OpsError::UnsupportedFormat`]
//! - a mip chain is reported, since operations touch only the base level
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Image, PixelFormat};
//! use texel_ops::guard;
//!
//! let empty = Image::default();
//! assert!(guard::editable(&empty, "invert").unwrap().is_none());
//!
//! let dxt = Image::new(4, 4, PixelFormat::Dxt1Rgb);
//! assert!(guard::editable(&dxt, "invert").is_err());
//! ```

use texel_core::{Image, PixelCodec, PixelFormat};
use tracing::warn;

use crate::{OpsError, OpsResult};

fn refuse(format: PixelFormat, op: &'static str) -> OpsError {
    warn!(%format, op, "Image manipulation not supported for this format");
    OpsError::UnsupportedFormat { format, op }
}

/// Checks that `image` can be decoded pixel by pixel.
///
/// Returns `Ok(None)` for an empty image (the caller should skip) and the
/// resolved codec otherwise.
///
/// # Errors
///
/// [`OpsError::UnsupportedFormat`] for block-compressed and unknown layouts.
pub fn editable(image: &Image, op: &'static str) -> OpsResult<Option<PixelCodec>> {
    if !image.is_valid() {
        return Ok(None);
    }
    PixelCodec::new(image.format())
        .map(Some)
        .map_err(|_| refuse(image.format(), op))
}

/// Checks that `image` stores whole bytes per pixel, for byte-moving
/// operations (flip, rotate, crop) that never decode pixels.
///
/// Returns `Ok(None)` for an empty image and the pixel size otherwise.
///
/// # Errors
///
/// [`OpsError::UnsupportedFormat`] for block-compressed formats.
pub fn byte_layout(image: &Image, op: &'static str) -> OpsResult<Option<usize>> {
    if !image.is_valid() {
        return Ok(None);
    }
    image
        .format()
        .bytes_per_pixel()
        .map(Some)
        .ok_or_else(|| refuse(image.format(), op))
}

/// Warns when `image` carries mip levels that `op` will not update.
pub fn warn_base_level_only(image: &Image, op: &'static str) {
    if image.mipmaps() > 1 {
        warn!(op, mipmaps = image.mipmaps(), "Image manipulation only applied to base mipmap level");
    }
}
