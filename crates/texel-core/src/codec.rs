//! Per-format pixel encoding and decoding.
//!
//! # Overview
//!
//! [`PixelCodec`] is a strategy table resolved once per operation: it holds
//! the read/write functions for one [`PixelFormat`] so hot loops call through
//! a function pointer instead of re-matching the format for every pixel.
//!
//! Two decoded representations are supported:
//!
//! - [`Color`] (8-bit RGBA) for pixel algorithms and compositing.
//!   Float channels are scaled by 255 and truncated.
//! - [`NormalizedPixel`] (`[f32; 4]`) for format-to-format conversion.
//!
//! Packed channels are encoded with `round(c * max)`. Grayscale is derived
//! with luma weights `0.299, 0.587, 0.114` and truncated. The R5G5B5A1
//! alpha bit is set when the source alpha exceeds
//! [`CodecConfig::alpha_threshold`].
//!
//! Missing channels decode as 0 and missing alpha as opaque, so R32 holds a
//! single red channel.
//!
//! # Usage
//!
//! ```rust
//! use texel_core::{codec, CodecConfig, Color, PixelFormat};
//!
//! let mut px = [0u8; 2];
//! codec::write_pixel(&mut px, Color::RED, PixelFormat::R5G6B5, &CodecConfig::default())?;
//! assert_eq!(u16::from_ne_bytes(px), 0xF800);
//! assert_eq!(codec::read_pixel(&px, PixelFormat::R5G6B5)?, Color::RED);
//! # Ok::<(), texel_core::Error>(())
//! ```
//!
//! Block-compressed formats and [`PixelFormat::Unknown`] have no codec;
//! every entry point reports [`Error::UnsupportedFormat`] for them.

use crate::color::{luma, Color, NormalizedPixel};
use crate::config::CodecConfig;
use crate::error::{Error, Result};
use crate::format::PixelFormat;
use crate::image::Image;

type ReadColorFn = fn(&[u8]) -> Color;
type WriteColorFn = fn(&mut [u8], Color, &CodecConfig);
type ReadNormFn = fn(&[u8]) -> NormalizedPixel;
type WriteNormFn = fn(&mut [u8], NormalizedPixel, &CodecConfig);

/// Read/write strategy for one uncompressed pixel format.
#[derive(Debug, Clone, Copy)]
pub struct PixelCodec {
    format: PixelFormat,
    bytes_per_pixel: usize,
    read_color: ReadColorFn,
    write_color: WriteColorFn,
    read_norm: ReadNormFn,
    write_norm: WriteNormFn,
}

impl PixelCodec {
    /// Resolves the codec for `format`.
    ///
    /// # Errors
    ///
    /// [`Error::UnsupportedFormat`] for block-compressed formats and `Unknown`.
    pub fn new(format: PixelFormat) -> Result<Self> {
        use PixelFormat::*;
        let (read_color, write_color, read_norm, write_norm): (
            ReadColorFn,
            WriteColorFn,
            ReadNormFn,
            WriteNormFn,
        ) = match format {
            Grayscale => (gray_read, gray_write, gray_read_n, gray_write_n),
            GrayAlpha => (ga_read, ga_write, ga_read_n, ga_write_n),
            R5G6B5 => (r565_read, r565_write, r565_read_n, r565_write_n),
            R8G8B8 => (rgb8_read, rgb8_write, rgb8_read_n, rgb8_write_n),
            R5G5B5A1 => (r5551_read, r5551_write, r5551_read_n, r5551_write_n),
            R4G4B4A4 => (r4444_read, r4444_write, r4444_read_n, r4444_write_n),
            R8G8B8A8 => (rgba8_read, rgba8_write, rgba8_read_n, rgba8_write_n),
            R32 => (r32_read, r32_write, r32_read_n, r32_write_n),
            R32G32B32 => (rgb32_read, rgb32_write, rgb32_read_n, rgb32_write_n),
            R32G32B32A32 => (rgba32_read, rgba32_write, rgba32_read_n, rgba32_write_n),
            _ => return Err(Error::unsupported_format(format, "pixel codec")),
        };
        let bytes_per_pixel = format
            .bytes_per_pixel()
            .ok_or_else(|| Error::unsupported_format(format, "pixel codec"))?;

        Ok(Self {
            format,
            bytes_per_pixel,
            read_color,
            write_color,
            read_norm,
            write_norm,
        })
    }

    /// Format this codec encodes.
    #[inline]
    pub fn format(&self) -> PixelFormat {
        self.format
    }

    /// Bytes occupied by one pixel.
    #[inline]
    pub fn bytes_per_pixel(&self) -> usize {
        self.bytes_per_pixel
    }

    /// Decodes the pixel at the start of `px`.
    #[inline]
    pub fn read(&self, px: &[u8]) -> Color {
        (self.read_color)(px)
    }

    /// Encodes `color` into the start of `px`.
    #[inline]
    pub fn write(&self, px: &mut [u8], color: Color, config: &CodecConfig) {
        (self.write_color)(px, color, config)
    }

    /// Decodes the pixel at the start of `px` as floats.
    #[inline]
    pub fn read_normalized(&self, px: &[u8]) -> NormalizedPixel {
        (self.read_norm)(px)
    }

    /// Encodes a float pixel into the start of `px`.
    #[inline]
    pub fn write_normalized(&self, px: &mut [u8], value: NormalizedPixel, config: &CodecConfig) {
        let clamped = value.map(|c| c.clamp(0.0, 1.0));
        (self.write_norm)(px, clamped, config)
    }

    /// Decodes every whole pixel in `data`.
    pub fn decode_colors(&self, data: &[u8]) -> Vec<Color> {
        data.chunks_exact(self.bytes_per_pixel)
            .map(|px| self.read(px))
            .collect()
    }

    /// Encodes `colors` into a fresh buffer.
    pub fn encode_colors(&self, colors: &[Color], config: &CodecConfig) -> Vec<u8> {
        let mut out = vec![0u8; colors.len() * self.bytes_per_pixel];
        for (px, &c) in out.chunks_exact_mut(self.bytes_per_pixel).zip(colors) {
            self.write(px, c, config);
        }
        out
    }

    /// Decodes every whole pixel in `data` as floats.
    pub fn decode_normalized(&self, data: &[u8]) -> Vec<NormalizedPixel> {
        data.chunks_exact(self.bytes_per_pixel)
            .map(|px| self.read_normalized(px))
            .collect()
    }

    /// Encodes float pixels into a fresh buffer.
    pub fn encode_normalized(&self, pixels: &[NormalizedPixel], config: &CodecConfig) -> Vec<u8> {
        let mut out = vec![0u8; pixels.len() * self.bytes_per_pixel];
        for (px, &v) in out.chunks_exact_mut(self.bytes_per_pixel).zip(pixels) {
            self.write_normalized(px, v, config);
        }
        out
    }
}

/// Decodes one pixel of `format` from the start of `px`.
pub fn read_pixel(px: &[u8], format: PixelFormat) -> Result<Color> {
    let codec = PixelCodec::new(format)?;
    check_len(px.len(), codec.bytes_per_pixel)?;
    Ok(codec.read(px))
}

/// Encodes one pixel of `format` into the start of `px`.
pub fn write_pixel(px: &mut [u8], color: Color, format: PixelFormat, config: &CodecConfig) -> Result<()> {
    let codec = PixelCodec::new(format)?;
    check_len(px.len(), codec.bytes_per_pixel)?;
    codec.write(px, color, config);
    Ok(())
}

/// Decodes the base level of `image` into normalized pixels.
pub fn to_normalized(image: &Image) -> Result<Vec<NormalizedPixel>> {
    if !image.is_valid() {
        return Err(Error::InvalidImage);
    }
    let codec = PixelCodec::new(image.format())?;
    Ok(codec.decode_normalized(image.base_level()))
}

/// Encodes normalized pixels as `format`.
pub fn from_normalized(pixels: &[NormalizedPixel], format: PixelFormat, config: &CodecConfig) -> Result<Vec<u8>> {
    let codec = PixelCodec::new(format)?;
    Ok(codec.encode_normalized(pixels, config))
}

/// Decodes the base level of `image` into 8-bit colors.
pub fn load_colors(image: &Image) -> Result<Vec<Color>> {
    if !image.is_valid() {
        return Err(Error::InvalidImage);
    }
    let codec = PixelCodec::new(image.format())?;
    Ok(codec.decode_colors(image.base_level()))
}

/// Encodes 8-bit colors as `format`.
pub fn colors_to_format(colors: &[Color], format: PixelFormat, config: &CodecConfig) -> Result<Vec<u8>> {
    let codec = PixelCodec::new(format)?;
    Ok(codec.encode_colors(colors, config))
}

fn check_len(got: usize, expected: usize) -> Result<()> {
    if got < expected {
        Err(Error::BufferSize { expected, got })
    } else {
        Ok(())
    }
}

#[inline]
fn u16_at(px: &[u8]) -> u32 {
    u16::from_ne_bytes([px[0], px[1]]) as u32
}

#[inline]
fn put_u16(px: &mut [u8], v: u32) {
    px[..2].copy_from_slice(&(v as u16).to_ne_bytes());
}

#[inline]
fn f32_at(px: &[u8], i: usize) -> f32 {
    let o = i * 4;
    f32::from_ne_bytes([px[o], px[o + 1], px[o + 2], px[o + 3]])
}

#[inline]
fn put_f32(px: &mut [u8], i: usize, v: f32) {
    px[i * 4..i * 4 + 4].copy_from_slice(&v.to_ne_bytes());
}

/// Float channel to 8 bit: scale and truncate (saturating).
#[inline]
fn unit_to_u8(v: f32) -> u8 {
    (v * 255.0) as u8
}

/// Float channel to an 8-bit storage byte: scale and round (saturating).
#[inline]
fn unit_to_byte(v: f32) -> u8 {
    (v * 255.0).round() as u8
}

/// Quantize a normalized channel to `max` levels.
#[inline]
fn quantize(v: f32, max: f32) -> u32 {
    (v * max).round() as u32
}

#[inline]
fn gray_of(c: Color) -> u8 {
    unit_to_byte(c.luma())
}

// --- Grayscale ---

fn gray_read(px: &[u8]) -> Color {
    Color::new(px[0], px[0], px[0], 255)
}
fn gray_write(px: &mut [u8], c: Color, _: &CodecConfig) {
    px[0] = gray_of(c);
}
fn gray_read_n(px: &[u8]) -> NormalizedPixel {
    let v = px[0] as f32 / 255.0;
    [v, v, v, 1.0]
}
fn gray_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    px[0] = unit_to_byte(luma(v[0], v[1], v[2]));
}

// --- Gray + alpha ---

fn ga_read(px: &[u8]) -> Color {
    Color::new(px[0], px[0], px[0], px[1])
}
fn ga_write(px: &mut [u8], c: Color, _: &CodecConfig) {
    px[0] = gray_of(c);
    px[1] = c.a;
}
fn ga_read_n(px: &[u8]) -> NormalizedPixel {
    let v = px[0] as f32 / 255.0;
    [v, v, v, px[1] as f32 / 255.0]
}
fn ga_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    px[0] = unit_to_byte(luma(v[0], v[1], v[2]));
    px[1] = unit_to_byte(v[3]);
}

// --- R5G6B5 ---

fn r565_read(px: &[u8]) -> Color {
    let v = u16_at(px);
    Color::new(
        ((v >> 11) * 255 / 31) as u8,
        (((v >> 5) & 0x3F) * 255 / 63) as u8,
        ((v & 0x1F) * 255 / 31) as u8,
        255,
    )
}
fn r565_write(px: &mut [u8], c: Color, cfg: &CodecConfig) {
    r565_write_n(px, c.normalize(), cfg);
}
fn r565_read_n(px: &[u8]) -> NormalizedPixel {
    let v = u16_at(px);
    [
        (v >> 11) as f32 / 31.0,
        ((v >> 5) & 0x3F) as f32 / 63.0,
        (v & 0x1F) as f32 / 31.0,
        1.0,
    ]
}
fn r565_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    let r = quantize(v[0], 31.0);
    let g = quantize(v[1], 63.0);
    let b = quantize(v[2], 31.0);
    put_u16(px, r << 11 | g << 5 | b);
}

// --- R5G5B5A1 ---

fn r5551_read(px: &[u8]) -> Color {
    let v = u16_at(px);
    Color::new(
        ((v >> 11) * 255 / 31) as u8,
        (((v >> 6) & 0x1F) * 255 / 31) as u8,
        (((v >> 1) & 0x1F) * 255 / 31) as u8,
        if v & 1 == 1 { 255 } else { 0 },
    )
}
fn r5551_write(px: &mut [u8], c: Color, cfg: &CodecConfig) {
    r5551_write_n(px, c.normalize(), cfg);
}
fn r5551_read_n(px: &[u8]) -> NormalizedPixel {
    let v = u16_at(px);
    [
        (v >> 11) as f32 / 31.0,
        ((v >> 6) & 0x1F) as f32 / 31.0,
        ((v >> 1) & 0x1F) as f32 / 31.0,
        if v & 1 == 1 { 1.0 } else { 0.0 },
    ]
}
fn r5551_write_n(px: &mut [u8], v: NormalizedPixel, cfg: &CodecConfig) {
    let r = quantize(v[0], 31.0);
    let g = quantize(v[1], 31.0);
    let b = quantize(v[2], 31.0);
    let a = u32::from(v[3] > cfg.alpha_threshold_normalized());
    put_u16(px, r << 11 | g << 6 | b << 1 | a);
}

// --- R4G4B4A4 ---

fn r4444_read(px: &[u8]) -> Color {
    let v = u16_at(px);
    Color::new(
        ((v >> 12) * 255 / 15) as u8,
        (((v >> 8) & 0xF) * 255 / 15) as u8,
        (((v >> 4) & 0xF) * 255 / 15) as u8,
        ((v & 0xF) * 255 / 15) as u8,
    )
}
fn r4444_write(px: &mut [u8], c: Color, cfg: &CodecConfig) {
    r4444_write_n(px, c.normalize(), cfg);
}
fn r4444_read_n(px: &[u8]) -> NormalizedPixel {
    let v = u16_at(px);
    [
        (v >> 12) as f32 / 15.0,
        ((v >> 8) & 0xF) as f32 / 15.0,
        ((v >> 4) & 0xF) as f32 / 15.0,
        (v & 0xF) as f32 / 15.0,
    ]
}
fn r4444_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    let [r, g, b, a] = v.map(|c| quantize(c, 15.0));
    put_u16(px, r << 12 | g << 8 | b << 4 | a);
}

// --- R8G8B8 ---

fn rgb8_read(px: &[u8]) -> Color {
    Color::new(px[0], px[1], px[2], 255)
}
fn rgb8_write(px: &mut [u8], c: Color, _: &CodecConfig) {
    px[..3].copy_from_slice(&[c.r, c.g, c.b]);
}
fn rgb8_read_n(px: &[u8]) -> NormalizedPixel {
    [px[0] as f32 / 255.0, px[1] as f32 / 255.0, px[2] as f32 / 255.0, 1.0]
}
fn rgb8_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    px[..3].copy_from_slice(&[unit_to_byte(v[0]), unit_to_byte(v[1]), unit_to_byte(v[2])]);
}

// --- R8G8B8A8 ---

fn rgba8_read(px: &[u8]) -> Color {
    Color::new(px[0], px[1], px[2], px[3])
}
fn rgba8_write(px: &mut [u8], c: Color, _: &CodecConfig) {
    px[..4].copy_from_slice(&[c.r, c.g, c.b, c.a]);
}
fn rgba8_read_n(px: &[u8]) -> NormalizedPixel {
    rgba8_read(px).normalize()
}
fn rgba8_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    px[..4].copy_from_slice(&v.map(unit_to_byte));
}

// --- R32 ---

fn r32_read(px: &[u8]) -> Color {
    Color::new(unit_to_u8(f32_at(px, 0)), 0, 0, 255)
}
fn r32_write(px: &mut [u8], c: Color, _: &CodecConfig) {
    put_f32(px, 0, c.r as f32 / 255.0);
}
fn r32_read_n(px: &[u8]) -> NormalizedPixel {
    [f32_at(px, 0), 0.0, 0.0, 1.0]
}
fn r32_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    put_f32(px, 0, v[0]);
}

// --- R32G32B32 ---

fn rgb32_read(px: &[u8]) -> Color {
    let [r, g, b, a] = rgb32_read_n(px);
    Color::new(unit_to_u8(r), unit_to_u8(g), unit_to_u8(b), unit_to_u8(a))
}
fn rgb32_write(px: &mut [u8], c: Color, cfg: &CodecConfig) {
    rgb32_write_n(px, c.normalize(), cfg);
}
fn rgb32_read_n(px: &[u8]) -> NormalizedPixel {
    [f32_at(px, 0), f32_at(px, 1), f32_at(px, 2), 1.0]
}
fn rgb32_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    for (i, &c) in v[..3].iter().enumerate() {
        put_f32(px, i, c);
    }
}

// --- R32G32B32A32 ---

fn rgba32_read(px: &[u8]) -> Color {
    Color::from_normalized(rgba32_read_n(px))
}
fn rgba32_write(px: &mut [u8], c: Color, cfg: &CodecConfig) {
    rgba32_write_n(px, c.normalize(), cfg);
}
fn rgba32_read_n(px: &[u8]) -> NormalizedPixel {
    [f32_at(px, 0), f32_at(px, 1), f32_at(px, 2), f32_at(px, 3)]
}
fn rgba32_write_n(px: &mut [u8], v: NormalizedPixel, _: &CodecConfig) {
    for (i, &c) in v.iter().enumerate() {
        put_f32(px, i, c);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::format::UNCOMPRESSED_FORMATS;
    use approx::assert_abs_diff_eq;

    fn cfg() -> CodecConfig {
        CodecConfig::default()
    }

    #[test]
    fn test_565_layout() {
        let mut px = [0u8; 2];
        write_pixel(&mut px, Color::new(0, 255, 0, 255), PixelFormat::R5G6B5, &cfg()).unwrap();
        assert_eq!(u16::from_ne_bytes(px), 0x07E0);
        let c = read_pixel(&px, PixelFormat::R5G6B5).unwrap();
        assert_eq!(c, Color::GREEN);
    }

    #[test]
    fn test_5551_threshold() {
        let mut px = [0u8; 2];
        let codec = PixelCodec::new(PixelFormat::R5G5B5A1).unwrap();

        codec.write(&mut px, Color::new(255, 255, 255, 50), &cfg());
        assert_eq!(codec.read(&px).a, 0);
        codec.write(&mut px, Color::new(255, 255, 255, 51), &cfg());
        assert_eq!(codec.read(&px).a, 255);

        let strict = cfg().with_alpha_threshold(200);
        codec.write(&mut px, Color::new(255, 255, 255, 128), &strict);
        assert_eq!(codec.read(&px).a, 0);
    }

    #[test]
    fn test_5551_blue_channel() {
        let mut px = [0u8; 2];
        let codec = PixelCodec::new(PixelFormat::R5G5B5A1).unwrap();
        codec.write(&mut px, Color::BLUE, &cfg());
        assert_eq!(u16::from_ne_bytes(px), 0b0000_0000_0011_1111);
        assert_eq!(codec.read(&px), Color::BLUE);
    }

    #[test]
    fn test_4444_round_trip() {
        let mut px = [0u8; 2];
        let codec = PixelCodec::new(PixelFormat::R4G4B4A4).unwrap();
        codec.write(&mut px, Color::new(255, 136, 0, 17), &cfg());
        assert_eq!(u16::from_ne_bytes(px), 0xF801);
        assert_eq!(codec.read(&px), Color::new(255, 136, 0, 17));
    }

    #[test]
    fn test_grayscale_luma() {
        let mut px = [0u8; 1];
        write_pixel(&mut px, Color::RED, PixelFormat::Grayscale, &cfg()).unwrap();
        assert_eq!(px[0], 76);
    }

    #[test]
    fn test_float_reads() {
        let codec = PixelCodec::new(PixelFormat::R32G32B32A32).unwrap();
        let mut px = [0u8; 16];
        codec.write_normalized(&mut px, [0.5, 1.0, 0.0, 0.25], &cfg());
        assert_eq!(codec.read(&px), Color::new(127, 255, 0, 63));

        let r32 = PixelCodec::new(PixelFormat::R32).unwrap();
        let mut px = [0u8; 4];
        r32.write(&mut px, Color::new(255, 10, 20, 30), &cfg());
        assert_eq!(r32.read(&px), Color::new(255, 0, 0, 255));
    }

    #[test]
    fn test_normalized_round_trip_all_formats() {
        // Colors exactly representable in every packed layout
        let samples = [Color::BLANK, Color::WHITE, Color::RED, Color::new(0, 0, 0, 255)];
        for format in UNCOMPRESSED_FORMATS {
            let codec = PixelCodec::new(format).unwrap();
            let encoded = codec.encode_colors(&samples, &cfg());
            let normalized = codec.decode_normalized(&encoded);
            let again = codec.encode_normalized(&normalized, &cfg());
            let a = codec.decode_normalized(&encoded);
            let b = codec.decode_normalized(&again);
            for (x, y) in a.iter().zip(&b) {
                for c in 0..4 {
                    assert_abs_diff_eq!(x[c], y[c], epsilon = 1.0 / 255.0 + 1e-6);
                }
            }
        }
    }

    #[test]
    fn test_8bit_normalized_identity() {
        let ramp: Vec<u8> = (0..=255).collect();
        for format in [PixelFormat::Grayscale, PixelFormat::GrayAlpha, PixelFormat::R8G8B8, PixelFormat::R8G8B8A8] {
            let codec = PixelCodec::new(format).unwrap();
            let bytes: Vec<u8> = ramp.iter().flat_map(|&v| vec![v; codec.bytes_per_pixel()]).collect();
            let again = codec.encode_normalized(&codec.decode_normalized(&bytes), &cfg());
            assert_eq!(again, bytes, "{format}");
        }
        let gray = PixelCodec::new(PixelFormat::Grayscale).unwrap();
        for v in ramp {
            let mut px = [0u8; 1];
            gray.write(&mut px, Color::new(v, v, v, 255), &cfg());
            assert_eq!(px[0], v);
        }
    }

    #[test]
    fn test_compressed_rejected() {
        let mut px = [0u8; 16];
        let err = write_pixel(&mut px, Color::RED, PixelFormat::Dxt1Rgb, &cfg()).unwrap_err();
        assert!(err.is_format_error());
        assert!(PixelCodec::new(PixelFormat::Unknown).is_err());
        assert!(read_pixel(&px, PixelFormat::Astc8x8Rgba).is_err());
    }

    #[test]
    fn test_short_buffer() {
        let px = [0u8; 2];
        assert!(matches!(
            read_pixel(&px, PixelFormat::R8G8B8A8),
            Err(Error::BufferSize { expected: 4, got: 2 })
        ));
    }
}
