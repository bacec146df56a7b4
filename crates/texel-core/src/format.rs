//! Pixel encodings and their storage metadata.
//!
//! # Overview
//!
//! [`PixelFormat`] is the closed set of encodings an [`Image`](crate::Image)
//! can hold. Formats fall into two disjoint classes:
//!
//! | Class | Formats | Editable |
//! |-------|---------|----------|
//! | Uncompressed | `Grayscale` .. `R32G32B32A32` | yes |
//! | Block-compressed | `Dxt1Rgb` .. `Astc8x8Rgba` | no (copy/export only) |
//!
//! A third tag, [`PixelFormat::Unknown`], marks a 16-bit container whose bit
//! layout is not one of the packed formats (produced by dithering to an
//! unusual channel split). Its size is known, its channels are not.
//!
//! # Sizes
//!
//! [`pixel_data_size`] is `bits_per_pixel * width * height / 8`, except that
//! block-compressed images smaller than 4x4 occupy one whole block:
//!
//! ```rust
//! use texel_core::{pixel_data_size, PixelFormat};
//!
//! assert_eq!(pixel_data_size(2, 2, PixelFormat::R5G6B5), 8);
//! assert_eq!(pixel_data_size(2, 2, PixelFormat::Dxt1Rgb), 8);
//! assert_eq!(pixel_data_size(2, 2, PixelFormat::Dxt5Rgba), 16);
//! ```
//!
//! # Numeric ids
//!
//! GPU upload collaborators identify formats by number. [`PixelFormat::as_raw`]
//! and [`PixelFormat::from_raw`] use ids 1..=21 in declaration order; `Unknown`
//! is 0.

use std::fmt;
use std::str::FromStr;

use crate::error::{Error, Result};

/// Pixel encoding of an image buffer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum PixelFormat {
    /// 16-bit container with an unrecognized channel layout.
    Unknown,
    /// 8 bit gray.
    Grayscale,
    /// 8 bit gray + 8 bit alpha.
    GrayAlpha,
    /// 16 bit packed, no alpha.
    R5G6B5,
    /// 24 bit RGB.
    R8G8B8,
    /// 16 bit packed, 1 bit alpha.
    R5G5B5A1,
    /// 16 bit packed, 4 bit alpha.
    R4G4B4A4,
    /// 32 bit RGBA, the canonical working format.
    #[default]
    R8G8B8A8,
    /// One 32 bit float channel.
    R32,
    /// Three 32 bit float channels.
    R32G32B32,
    /// Four 32 bit float channels.
    R32G32B32A32,
    /// DXT1 without alpha (4 bpp).
    Dxt1Rgb,
    /// DXT1 with 1 bit alpha (4 bpp).
    Dxt1Rgba,
    /// DXT3 (8 bpp).
    Dxt3Rgba,
    /// DXT5 (8 bpp).
    Dxt5Rgba,
    /// ETC1 (4 bpp).
    Etc1Rgb,
    /// ETC2 (4 bpp).
    Etc2Rgb,
    /// ETC2 with EAC alpha (8 bpp).
    Etc2EacRgba,
    /// PVRTC without alpha (4 bpp).
    PvrtRgb,
    /// PVRTC with alpha (4 bpp).
    PvrtRgba,
    /// ASTC 4x4 blocks (8 bpp).
    Astc4x4Rgba,
    /// ASTC 8x8 blocks (2 bpp).
    Astc8x8Rgba,
}

/// All formats with a numeric id, in id order.
pub const ALL_FORMATS: [PixelFormat; 21] = [
    PixelFormat::Grayscale,
    PixelFormat::GrayAlpha,
    PixelFormat::R5G6B5,
    PixelFormat::R8G8B8,
    PixelFormat::R5G5B5A1,
    PixelFormat::R4G4B4A4,
    PixelFormat::R8G8B8A8,
    PixelFormat::R32,
    PixelFormat::R32G32B32,
    PixelFormat::R32G32B32A32,
    PixelFormat::Dxt1Rgb,
    PixelFormat::Dxt1Rgba,
    PixelFormat::Dxt3Rgba,
    PixelFormat::Dxt5Rgba,
    PixelFormat::Etc1Rgb,
    PixelFormat::Etc2Rgb,
    PixelFormat::Etc2EacRgba,
    PixelFormat::PvrtRgb,
    PixelFormat::PvrtRgba,
    PixelFormat::Astc4x4Rgba,
    PixelFormat::Astc8x8Rgba,
];

/// The uncompressed formats, in id order.
pub const UNCOMPRESSED_FORMATS: [PixelFormat; 10] = [
    PixelFormat::Grayscale,
    PixelFormat::GrayAlpha,
    PixelFormat::R5G6B5,
    PixelFormat::R8G8B8,
    PixelFormat::R5G5B5A1,
    PixelFormat::R4G4B4A4,
    PixelFormat::R8G8B8A8,
    PixelFormat::R32,
    PixelFormat::R32G32B32,
    PixelFormat::R32G32B32A32,
];

impl PixelFormat {
    /// Storage bits per pixel.
    pub const fn bits_per_pixel(self) -> u32 {
        match self {
            Self::Grayscale => 8,
            Self::Unknown
            | Self::GrayAlpha
            | Self::R5G6B5
            | Self::R5G5B5A1
            | Self::R4G4B4A4 => 16,
            Self::R8G8B8 => 24,
            Self::R8G8B8A8 | Self::R32 => 32,
            Self::R32G32B32 => 96,
            Self::R32G32B32A32 => 128,
            Self::Dxt1Rgb
            | Self::Dxt1Rgba
            | Self::Etc1Rgb
            | Self::Etc2Rgb
            | Self::PvrtRgb
            | Self::PvrtRgba => 4,
            Self::Dxt3Rgba | Self::Dxt5Rgba | Self::Etc2EacRgba | Self::Astc4x4Rgba => 8,
            Self::Astc8x8Rgba => 2,
        }
    }

    /// Whole bytes per pixel for uncompressed formats, `None` for block formats.
    #[inline]
    pub const fn bytes_per_pixel(self) -> Option<usize> {
        if self.is_compressed() {
            None
        } else {
            Some(self.bits_per_pixel() as usize / 8)
        }
    }

    /// Returns `true` for block-compressed encodings.
    #[inline]
    pub const fn is_compressed(self) -> bool {
        self.as_raw() >= Self::Dxt1Rgb.as_raw()
    }

    /// Returns `true` if pixels can be decoded and re-encoded one at a time.
    ///
    /// Every manipulation operation requires this.
    #[inline]
    pub const fn is_decodable(self) -> bool {
        !self.is_compressed() && !matches!(self, Self::Unknown)
    }

    /// Returns `true` for 32-bit float formats.
    #[inline]
    pub const fn is_float(self) -> bool {
        matches!(self, Self::R32 | Self::R32G32B32 | Self::R32G32B32A32)
    }

    /// Returns `true` if the encoding stores an alpha channel.
    pub const fn has_alpha(self) -> bool {
        matches!(
            self,
            Self::GrayAlpha
                | Self::R5G5B5A1
                | Self::R4G4B4A4
                | Self::R8G8B8A8
                | Self::R32G32B32A32
                | Self::Dxt1Rgba
                | Self::Dxt3Rgba
                | Self::Dxt5Rgba
                | Self::Etc2EacRgba
                | Self::PvrtRgba
                | Self::Astc4x4Rgba
                | Self::Astc8x8Rgba
        )
    }

    /// Number of stored channels (0 for `Unknown`).
    pub const fn channels(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Grayscale | Self::R32 => 1,
            Self::GrayAlpha => 2,
            Self::R5G6B5 | Self::R8G8B8 | Self::R32G32B32 | Self::Dxt1Rgb | Self::Etc1Rgb => 3,
            Self::Etc2Rgb | Self::PvrtRgb => 3,
            _ => 4,
        }
    }

    /// Size of one block, the minimum allocation for tiny compressed images.
    ///
    /// Returns `None` for uncompressed formats.
    pub const fn block_min_size(self) -> Option<usize> {
        match self {
            Self::Dxt1Rgb
            | Self::Dxt1Rgba
            | Self::Etc1Rgb
            | Self::Etc2Rgb
            | Self::PvrtRgb
            | Self::PvrtRgba => Some(8),
            Self::Dxt3Rgba
            | Self::Dxt5Rgba
            | Self::Etc2EacRgba
            | Self::Astc4x4Rgba
            | Self::Astc8x8Rgba => Some(16),
            _ => None,
        }
    }

    /// Bytes needed for a `width` x `height` image in this format.
    #[inline]
    pub fn data_size(self, width: u32, height: u32) -> usize {
        pixel_data_size(width, height, self)
    }

    /// Numeric id (0 for `Unknown`, then 1..=21 in declaration order).
    pub const fn as_raw(self) -> u32 {
        match self {
            Self::Unknown => 0,
            Self::Grayscale => 1,
            Self::GrayAlpha => 2,
            Self::R5G6B5 => 3,
            Self::R8G8B8 => 4,
            Self::R5G5B5A1 => 5,
            Self::R4G4B4A4 => 6,
            Self::R8G8B8A8 => 7,
            Self::R32 => 8,
            Self::R32G32B32 => 9,
            Self::R32G32B32A32 => 10,
            Self::Dxt1Rgb => 11,
            Self::Dxt1Rgba => 12,
            Self::Dxt3Rgba => 13,
            Self::Dxt5Rgba => 14,
            Self::Etc1Rgb => 15,
            Self::Etc2Rgb => 16,
            Self::Etc2EacRgba => 17,
            Self::PvrtRgb => 18,
            Self::PvrtRgba => 19,
            Self::Astc4x4Rgba => 20,
            Self::Astc8x8Rgba => 21,
        }
    }

    /// Looks up a format by numeric id.
    pub fn from_raw(raw: u32) -> Option<Self> {
        match raw {
            0 => Some(Self::Unknown),
            1..=21 => Some(ALL_FORMATS[raw as usize - 1]),
            _ => None,
        }
    }

    /// Canonical upper-case name.
    pub const fn name(self) -> &'static str {
        match self {
            Self::Unknown => "UNKNOWN",
            Self::Grayscale => "GRAYSCALE",
            Self::GrayAlpha => "GRAY_ALPHA",
            Self::R5G6B5 => "R5G6B5",
            Self::R8G8B8 => "R8G8B8",
            Self::R5G5B5A1 => "R5G5B5A1",
            Self::R4G4B4A4 => "R4G4B4A4",
            Self::R8G8B8A8 => "R8G8B8A8",
            Self::R32 => "R32",
            Self::R32G32B32 => "R32G32B32",
            Self::R32G32B32A32 => "R32G32B32A32",
            Self::Dxt1Rgb => "DXT1_RGB",
            Self::Dxt1Rgba => "DXT1_RGBA",
            Self::Dxt3Rgba => "DXT3_RGBA",
            Self::Dxt5Rgba => "DXT5_RGBA",
            Self::Etc1Rgb => "ETC1_RGB",
            Self::Etc2Rgb => "ETC2_RGB",
            Self::Etc2EacRgba => "ETC2_EAC_RGBA",
            Self::PvrtRgb => "PVRT_RGB",
            Self::PvrtRgba => "PVRT_RGBA",
            Self::Astc4x4Rgba => "ASTC_4x4_RGBA",
            Self::Astc8x8Rgba => "ASTC_8x8_RGBA",
        }
    }
}

impl fmt::Display for PixelFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for PixelFormat {
    type Err = Error;

    /// Parses canonical names case-insensitively, plus a few short aliases
    /// (`gray`, `ga`, `rgb`, `rgba`, `rgb565`, `rgba5551`, `rgba4444`, `r32f`,
    /// `rgb32f`, `rgba32f`).
    fn from_str(s: &str) -> Result<Self> {
        let key = s.trim().to_ascii_uppercase();
        let alias = match key.as_str() {
            "GRAY" | "L8" => Some(Self::Grayscale),
            "GA" | "LA8" => Some(Self::GrayAlpha),
            "RGB" | "RGB8" => Some(Self::R8G8B8),
            "RGBA" | "RGBA8" => Some(Self::R8G8B8A8),
            "RGB565" => Some(Self::R5G6B5),
            "RGBA5551" => Some(Self::R5G5B5A1),
            "RGBA4444" => Some(Self::R4G4B4A4),
            "R32F" => Some(Self::R32),
            "RGB32F" => Some(Self::R32G32B32),
            "RGBA32F" => Some(Self::R32G32B32A32),
            _ => None,
        };
        if let Some(format) = alias {
            return Ok(format);
        }
        ALL_FORMATS
            .iter()
            .copied()
            .find(|f| f.name().eq_ignore_ascii_case(&key))
            .ok_or_else(|| Error::other(format!("unknown pixel format '{s}'")))
    }
}

/// Bytes needed for a `width` x `height` image in `format`.
///
/// Block-compressed images whose width and height are both below 4 take one
/// full block (8 or 16 bytes).
pub fn pixel_data_size(width: u32, height: u32, format: PixelFormat) -> usize {
    let bits = width as usize * height as usize * format.bits_per_pixel() as usize;
    let size = bits / 8;
    match format.block_min_size() {
        Some(block) if width < 4 && height < 4 => block.max(size),
        _ => size,
    }
}

/// Number of mip levels needed to reach 1x1 by repeated halving.
///
/// Each dimension is halved (floor) until it reaches 1 and then stays there.
pub fn mip_level_count(width: u32, height: u32) -> u32 {
    if width == 0 || height == 0 {
        return 0;
    }
    let mut count = 1;
    let (mut w, mut h) = (width, height);
    while w != 1 || h != 1 {
        w = (w / 2).max(1);
        h = (h / 2).max(1);
        count += 1;
    }
    count
}

/// Dimensions of mip `level` for a base image of `width` x `height`.
#[inline]
pub fn mip_level_dims(width: u32, height: u32, level: u32) -> (u32, u32) {
    let w = width.checked_shr(level).unwrap_or(0).max(1);
    let h = height.checked_shr(level).unwrap_or(0).max(1);
    (w, h)
}

/// Total bytes of a chain of `levels` mip levels.
pub fn mip_chain_size(width: u32, height: u32, format: PixelFormat, levels: u32) -> usize {
    (0..levels)
        .map(|level| {
            let (w, h) = mip_level_dims(width, height, level);
            pixel_data_size(w, h, format)
        })
        .sum()
}
