//! # texel-core
//!
//! Data model and pixel codec of the texel raster engine.
//!
//! - [`PixelFormat`] - closed set of uncompressed and block-compressed encodings
//! - [`Image`] - owned byte buffer with dimensions, format and mip levels
//! - [`Color`], [`NormalizedPixel`] - 8-bit and float pixel representations
//! - [`PixelCodec`] - per-format read/write strategy table
//! - [`Rect`] - signed pixel rectangle with image clamping
//! - [`CodecConfig`] - explicit encoding parameters
//!
//! ## Crate Structure
//!
//! ```text
//! texel-core (this crate)
//!    ^
//!    |
//!    +-- texel-ops (geometry, color, compositing, mipmaps)
//!    +-- texel-cli (raw buffer command line)
//!    +-- texel-bench
//! ```
//!
//! ## Example
//!
//! ```rust
//! use texel_core::prelude::*;
//!
//! let img = Image::filled(2, 2, Color::GREEN);
//! let floats = texel_core::codec::to_normalized(&img)?;
//! let gray = texel_core::codec::from_normalized(&floats, PixelFormat::Grayscale, &CodecConfig::default())?;
//! assert_eq!(gray.len(), 4);
//! # Ok::<(), texel_core::Error>(())
//! ```

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod format;
pub mod image;
pub mod rect;

pub use codec::PixelCodec;
pub use color::{luma, Color, NormalizedPixel};
pub use config::{CodecConfig, DEFAULT_ALPHA_THRESHOLD};
pub use error::{Error, Result};
pub use format::{
    mip_chain_size, mip_level_count, mip_level_dims, pixel_data_size, PixelFormat, ALL_FORMATS,
    UNCOMPRESSED_FORMATS,
};
pub use image::Image;
pub use rect::Rect;

/// Prelude module for convenient imports.
///
/// ```
/// use texel_core::prelude::*;
/// ```
pub mod prelude {
    pub use crate::codec::PixelCodec;
    pub use crate::color::{Color, NormalizedPixel};
    pub use crate::config::CodecConfig;
    pub use crate::error::{Error, Result};
    pub use crate::format::PixelFormat;
    pub use crate::image::Image;
    pub use crate::rect::Rect;
}
