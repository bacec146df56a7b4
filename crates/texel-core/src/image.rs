//! Owned raster image buffer.
//!
//! # Overview
//!
//! [`Image`] owns a flat byte buffer plus the metadata needed to interpret
//! it: width, height, [`PixelFormat`] and the number of mip levels stored
//! back to back. Every constructor upholds the size invariant:
//!
//! ```text
//! data.len() == sum over level in 0..mipmaps of pixel_data_size(w >> level, h >> level, format)
//! ```
//!
//! (each level dimension floored at 1).
//!
//! Images are exclusively owned. `Clone` is a deep copy of every mip level
//! and dropping releases the buffer. Operations that change geometry or
//! format build a fresh image and swap it in, so a failed operation never
//! leaves a half-written buffer behind.
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{Color, Image, PixelFormat, Rect};
//!
//! let img = Image::filled(4, 4, Color::RED);
//! assert_eq!(img.format(), PixelFormat::R8G8B8A8);
//! assert_eq!(img.data().len(), 64);
//! assert_eq!(img.pixel(3, 3)?, Color::RED);
//!
//! let part = img.sub_image(Rect::new(-1, 2, 3, 8))?;
//! assert_eq!((part.width(), part.height()), (2, 2));
//! # Ok::<(), texel_core::Error>(())
//! ```
//!
//! # Used By
//!
//! - `texel-ops` - every geometric, color, compositing and mipmap operation
//! - `texel-cli` - raw buffer loading and saving

use std::fmt;

use crate::codec::{self, PixelCodec};
use crate::color::Color;
use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::format::{mip_chain_size, mip_level_dims, pixel_data_size, PixelFormat};
use crate::rect::Rect;

/// Raster image with an optional mip chain.
#[derive(Clone, PartialEq, Eq)]
pub struct Image {
    data: Vec<u8>,
    width: u32,
    height: u32,
    mipmaps: u32,
    format: PixelFormat,
}

impl Default for Image {
    /// Empty (invalid) RGBA image.
    fn default() -> Self {
        Self {
            data: Vec::new(),
            width: 0,
            height: 0,
            mipmaps: 1,
            format: PixelFormat::R8G8B8A8,
        }
    }
}

impl Image {
    /// Allocates a zero-filled single-level image.
    pub fn new(width: u32, height: u32, format: PixelFormat) -> Self {
        Self {
            data: vec![0; pixel_data_size(width, height, format)],
            width,
            height,
            mipmaps: 1,
            format,
        }
    }

    /// Wraps an existing single-level buffer.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSize`] if `data` does not hold exactly one level.
    pub fn from_data(data: Vec<u8>, width: u32, height: u32, format: PixelFormat) -> Result<Self> {
        Self::from_data_with_mipmaps(data, width, height, format, 1)
    }

    /// Wraps an existing buffer holding `mipmaps` levels.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidDimensions`] if `mipmaps` is 0 or exceeds the chain
    ///   length for the base size
    /// - [`Error::BufferSize`] if `data` does not match the chain size
    pub fn from_data_with_mipmaps(
        data: Vec<u8>,
        width: u32,
        height: u32,
        format: PixelFormat,
        mipmaps: u32,
    ) -> Result<Self> {
        let max_levels = crate::format::mip_level_count(width, height).max(1);
        if mipmaps == 0 || mipmaps > max_levels {
            return Err(Error::invalid_dimensions(
                width,
                height,
                format!("{mipmaps} mip levels (max {max_levels})"),
            ));
        }
        let expected = mip_chain_size(width, height, format, mipmaps);
        if data.len() != expected {
            return Err(Error::BufferSize {
                expected,
                got: data.len(),
            });
        }
        Ok(Self {
            data,
            width,
            height,
            mipmaps,
            format,
        })
    }

    /// Loads a single-level image from raw bytes after skipping `header_size`.
    ///
    /// Trailing bytes beyond one level are ignored.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSize`] if fewer than `header_size + pixel_data_size`
    /// bytes are available.
    pub fn from_raw_bytes(
        bytes: &[u8],
        width: u32,
        height: u32,
        format: PixelFormat,
        header_size: usize,
    ) -> Result<Self> {
        let size = pixel_data_size(width, height, format);
        let payload = bytes
            .get(header_size..header_size.saturating_add(size))
            .ok_or(Error::BufferSize {
                expected: header_size.saturating_add(size),
                got: bytes.len(),
            })?;
        Self::from_data(payload.to_vec(), width, height, format)
    }

    /// Solid-color RGBA image.
    pub fn filled(width: u32, height: u32, color: Color) -> Self {
        let count = width as usize * height as usize;
        let rgba: [u8; 4] = color.into();
        Self {
            data: rgba.repeat(count),
            width,
            height,
            mipmaps: 1,
            format: PixelFormat::R8G8B8A8,
        }
    }

    /// RGBA image from a row-major color array.
    ///
    /// # Errors
    ///
    /// [`Error::BufferSize`] if `colors.len() != width * height`.
    pub fn from_colors(colors: &[Color], width: u32, height: u32) -> Result<Self> {
        Self::from_colors_as(colors, width, height, PixelFormat::R8G8B8A8, &CodecConfig::default())
    }

    /// Encodes a row-major color array as `format`.
    ///
    /// # Errors
    ///
    /// - [`Error::BufferSize`] on a color count mismatch
    /// - [`Error::UnsupportedFormat`] if `format` has no pixel codec
    pub fn from_colors_as(
        colors: &[Color],
        width: u32,
        height: u32,
        format: PixelFormat,
        config: &CodecConfig,
    ) -> Result<Self> {
        let expected = width as usize * height as usize;
        if colors.len() != expected {
            return Err(Error::BufferSize {
                expected,
                got: colors.len(),
            });
        }
        let data = codec::colors_to_format(colors, format, config)?;
        Self::from_data(data, width, height, format)
    }

    /// Width in pixels.
    #[inline]
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    #[inline]
    pub fn height(&self) -> u32 {
        self.height
    }

    /// `(width, height)`.
    #[inline]
    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    /// Pixel encoding.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Number of stored mip levels (at least 1).
    #[inline]
    pub fn mipmaps(&self) -> u32 {
        self.mipmaps
    }

    /// Full rectangle of the base level.
    #[inline]
    pub fn bounds(&self) -> Rect {
        Rect::from_size(self.width, self.height)
    }

    /// Number of pixels in the base level.
    #[inline]
    pub fn pixel_count(&self) -> usize {
        self.width as usize * self.height as usize
    }

    /// `false` for an empty buffer or a zero dimension.
    ///
    /// Every operation checks this first and does nothing when it fails.
    #[inline]
    pub fn is_valid(&self) -> bool {
        !self.data.is_empty() && self.width > 0 && self.height > 0
    }

    /// Whole buffer, all mip levels.
    #[inline]
    pub fn data(&self) -> &[u8] {
        &self.data
    }

    /// Mutable access to the whole buffer.
    #[inline]
    pub fn data_mut(&mut self) -> &mut [u8] {
        &mut self.data
    }

    /// Consumes the image, returning its buffer.
    #[inline]
    pub fn into_data(self) -> Vec<u8> {
        self.data
    }

    /// Byte size of the base level.
    #[inline]
    pub fn base_level_size(&self) -> usize {
        pixel_data_size(self.width, self.height, self.format)
    }

    /// Base level bytes.
    #[inline]
    pub fn base_level(&self) -> &[u8] {
        let end = self.base_level_size().min(self.data.len());
        &self.data[..end]
    }

    /// Mutable base level bytes.
    #[inline]
    pub fn base_level_mut(&mut self) -> &mut [u8] {
        let end = self.base_level_size().min(self.data.len());
        &mut self.data[..end]
    }

    /// Dimensions of mip `level`.
    #[inline]
    pub fn mip_level_dims(&self, level: u32) -> (u32, u32) {
        mip_level_dims(self.width, self.height, level)
    }

    /// Bytes of mip `level`, `None` if the level is not stored.
    pub fn level_data(&self, level: u32) -> Option<&[u8]> {
        if level >= self.mipmaps {
            return None;
        }
        let offset = mip_chain_size(self.width, self.height, self.format, level);
        let (w, h) = self.mip_level_dims(level);
        self.data.get(offset..offset + pixel_data_size(w, h, self.format))
    }

    /// Bytes per base-level row, `None` for block-compressed formats.
    #[inline]
    pub fn stride(&self) -> Option<usize> {
        self.format
            .bytes_per_pixel()
            .map(|bpp| bpp * self.width as usize)
    }

    /// Reads one base-level pixel.
    ///
    /// # Errors
    ///
    /// [`Error::OutOfBounds`] outside the image, [`Error::UnsupportedFormat`]
    /// for formats without a pixel codec.
    pub fn pixel(&self, x: u32, y: u32) -> Result<Color> {
        let codec = PixelCodec::new(self.format)?;
        let offset = self.pixel_offset(x, y, codec.bytes_per_pixel())?;
        Ok(codec.read(&self.data[offset..]))
    }

    /// Writes one base-level pixel.
    ///
    /// # Errors
    ///
    /// Same as [`pixel`](Self::pixel).
    pub fn set_pixel(&mut self, x: u32, y: u32, color: Color, config: &CodecConfig) -> Result<()> {
        let codec = PixelCodec::new(self.format)?;
        let offset = self.pixel_offset(x, y, codec.bytes_per_pixel())?;
        codec.write(&mut self.data[offset..], color, config);
        Ok(())
    }

    fn pixel_offset(&self, x: u32, y: u32, bpp: usize) -> Result<usize> {
        if x >= self.width || y >= self.height {
            return Err(Error::out_of_bounds(x as i32, y as i32, self.width, self.height));
        }
        Ok((y as usize * self.width as usize + x as usize) * bpp)
    }

    /// Copies a region of the base level into a new single-level image.
    ///
    /// The rectangle is clamped to the image first.
    ///
    /// # Errors
    ///
    /// - [`Error::InvalidImage`] for an empty image
    /// - [`Error::UnsupportedFormat`] for block-compressed formats
    /// - [`Error::InvalidRegion`] when nothing of `rect` is inside the image
    pub fn sub_image(&self, rect: Rect) -> Result<Image> {
        if !self.is_valid() {
            return Err(Error::InvalidImage);
        }
        let bpp = self
            .format
            .bytes_per_pixel()
            .ok_or_else(|| Error::unsupported_format(self.format, "sub_image"))?;
        let r = rect
            .clamp_to(self.width, self.height)
            .ok_or_else(|| Error::invalid_region(rect, self.width, self.height))?;

        let src_stride = self.width as usize * bpp;
        let row_len = r.width as usize * bpp;
        let mut data = Vec::with_capacity(row_len * r.height as usize);
        for y in r.y..r.bottom() {
            let start = y as usize * src_stride + r.x as usize * bpp;
            data.extend_from_slice(&self.data[start..start + row_len]);
        }
        let (w, h) = r.size();
        Image::from_data(data, w, h, self.format)
    }
}

impl fmt::Debug for Image {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Image")
            .field("width", &self.width)
            .field("height", &self.height)
            .field("format", &self.format)
            .field("mipmaps", &self.mipmaps)
            .field("bytes", &self.data.len())
            .finish()
    }
}
