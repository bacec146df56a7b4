//! Per-pixel color and alpha operations.
//!
//! Every operation decodes the base level through the image's
//! [`PixelCodec`], edits 8-bit [`Color`] values and encodes them back in the
//! original format. Narrow formats therefore lose precision on each edit.
//!
//! # Operations
//!
//! | Operation | Effect |
//! |-----------|--------|
//! | [`convert`] | Re-encode in another uncompressed format |
//! | [`tint`] | Multiply every channel by a color |
//! | [`invert`] | `255 - c` on RGB |
//! | [`grayscale`] | Convert to [`PixelFormat::Grayscale`] |
//! | [`contrast`] | Squared contrast factor around mid gray |
//! | [`brightness`] | Add an offset to RGB |
//! | [`replace_color`] | Exact-match color swap |
//! | [`alpha_premultiply`] | Scale RGB by alpha |
//! | [`alpha_clear`] | Replace pixels at or below an alpha threshold |
//! | [`alpha_crop`] | Crop to the visible bounding box |
//! | [`alpha_mask`] | Take alpha from a second image |
//! | [`dither`] | Floyd-Steinberg reduction to 16-bit layouts |
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image};
//! use texel_ops::color::{brightness, invert};
//!
//! let mut img = Image::filled(2, 2, Color::new(10, 20, 30, 255));
//! invert(&mut img)?;
//! brightness(&mut img, -250)?;
//! assert_eq!(img.pixel(0, 0)?, Color::new(0, 0, 0, 255));
//! # Ok::<(), texel_ops::OpsError>(())
//! ```

use std::collections::HashSet;

use texel_core::{codec, CodecConfig, Color, Image, PixelCodec, PixelFormat, Rect};
use tracing::{debug, warn};

use crate::{guard, mipmap, transform, OpsError, OpsResult, Status};

/// Converts the image to `format` with the default [`CodecConfig`].
///
/// See [`convert_with`].
pub fn convert(image: &mut Image, format: PixelFormat) -> OpsResult<Status> {
    convert_with(image, format, &CodecConfig::default())
}

/// Converts the image to `format` through normalized pixels.
///
/// A stored mip chain is regenerated in the new format.
///
/// # Errors
///
/// [`OpsError::UnsupportedFormat`] if either format has no pixel codec.
pub fn convert_with(image: &mut Image, format: PixelFormat, config: &CodecConfig) -> OpsResult<Status> {
    let Some(codec) = guard::editable(image, "convert")? else {
        return Ok(Status::Skipped);
    };
    if format == image.format() {
        return Ok(Status::Skipped);
    }
    let target = PixelCodec::new(format).map_err(|_| {
        warn!(%format, "Image format conversion target not supported");
        OpsError::UnsupportedFormat { format, op: "convert" }
    })?;
    debug!(from = %image.format(), to = %format, width = image.width(), height = image.height(), "Converting");

    let pixels = codec.decode_normalized(image.base_level());
    let data = target.encode_normalized(&pixels, config);
    let levels = image.mipmaps();
    *image = Image::from_data(data, image.width(), image.height(), format)?;

    if levels > 1 {
        let status = mipmap::generate_mipmaps(image)?;
        debug!(levels, regenerated = status.is_applied(), "Rebuilt mip chain after conversion");
    }
    Ok(Status::Applied)
}

/// Applies `f` to every base-level pixel in place.
fn map_colors(image: &mut Image, op: &'static str, mut f: impl FnMut(Color) -> Color) -> OpsResult<Status> {
    let Some(codec) = guard::editable(image, op)? else {
        return Ok(Status::Skipped);
    };
    guard::warn_base_level_only(image, op);

    let config = CodecConfig::default();
    let mut changed = false;
    for px in image.base_level_mut().chunks_exact_mut(codec.bytes_per_pixel()) {
        let old = codec.read(px);
        let new = f(old);
        if new != old {
            codec.write(px, new, &config);
            changed = true;
        }
    }
    Ok(Status::from_changed(changed))
}

/// Multiplies every channel, alpha included, by `color`.
pub fn tint(image: &mut Image, color: Color) -> OpsResult<Status> {
    let [tr, tg, tb, ta] = color.normalize();
    let mul = |c: u8, t: f32| ((c as f32 / 255.0 * t) * 255.0) as u8;
    map_colors(image, "tint", |p| Color {
        r: mul(p.r, tr),
        g: mul(p.g, tg),
        b: mul(p.b, tb),
        a: mul(p.a, ta),
    })
}

/// Inverts RGB, leaving alpha untouched.
pub fn invert(image: &mut Image) -> OpsResult<Status> {
    map_colors(image, "invert", |p| Color {
        r: 255 - p.r,
        g: 255 - p.g,
        b: 255 - p.b,
        a: p.a,
    })
}

/// Converts the image to 8-bit grayscale.
pub fn grayscale(image: &mut Image) -> OpsResult<Status> {
    convert(image, PixelFormat::Grayscale)
}

/// Adjusts contrast by `value` in `-100..=100` (clamped).
///
/// The factor is `((100 + value) / 100)^2`, applied around mid gray.
pub fn contrast(image: &mut Image, value: f32) -> OpsResult<Status> {
    let value = value.clamp(-100.0, 100.0);
    let factor = ((100.0 + value) / 100.0).powi(2);
    let adjust = |c: u8| {
        let v = ((c as f32 / 255.0 - 0.5) * factor + 0.5) * 255.0;
        v.clamp(0.0, 255.0) as u8
    };
    map_colors(image, "contrast", |p| Color {
        r: adjust(p.r),
        g: adjust(p.g),
        b: adjust(p.b),
        a: p.a,
    })
}

/// Adds `value` in `-255..=255` (clamped) to RGB, saturating at 0 and 255.
pub fn brightness(image: &mut Image, value: i32) -> OpsResult<Status> {
    let value = value.clamp(-255, 255);
    let adjust = |c: u8| (c as i32 + value).clamp(0, 255) as u8;
    map_colors(image, "brightness", |p| Color {
        r: adjust(p.r),
        g: adjust(p.g),
        b: adjust(p.b),
        a: p.a,
    })
}

/// Replaces every pixel equal to `target` on all four channels.
pub fn replace_color(image: &mut Image, target: Color, replacement: Color) -> OpsResult<Status> {
    map_colors(image, "replace_color", |p| if p == target { replacement } else { p })
}

/// Premultiplies RGB by alpha.
///
/// Transparent pixels become `(0, 0, 0, 0)` and opaque pixels are unchanged.
pub fn alpha_premultiply(image: &mut Image) -> OpsResult<Status> {
    map_colors(image, "alpha_premultiply", |p| match p.a {
        0 => Color::BLANK,
        255 => p,
        a => {
            let k = a as f32 / 255.0;
            let mul = |c: u8| (c as f32 * k) as u8;
            Color::new(mul(p.r), mul(p.g), mul(p.b), a)
        }
    })
}

/// Replaces pixels whose alpha is at or below `threshold` (0.0-1.0) with
/// `color`.
///
/// The comparison runs on the stored alpha: 8-bit alpha against
/// `threshold * 255`, 4-bit alpha against `threshold * 15`, the R5G5B5A1
/// bit against `threshold >= 0.5`, float alpha directly. Formats without
/// alpha are skipped.
pub fn alpha_clear(image: &mut Image, color: Color, threshold: f32) -> OpsResult<Status> {
    let Some(codec) = guard::editable(image, "alpha_clear")? else {
        return Ok(Status::Skipped);
    };
    guard::warn_base_level_only(image, "alpha_clear");

    let bpp = codec.bytes_per_pixel();
    let quant = |c: u8, max: f32| (c as f32 / 255.0 * max).round() as u16;
    let mut changed = false;
    let pixels = image.base_level_mut().chunks_exact_mut(bpp);

    match codec.format() {
        PixelFormat::GrayAlpha => {
            let limit = (threshold * 255.0) as u8;
            for px in pixels.filter(|px| px[1] <= limit) {
                px.copy_from_slice(&[color.r, color.a]);
                changed = true;
            }
        }
        PixelFormat::R8G8B8A8 => {
            let limit = (threshold * 255.0) as u8;
            for px in pixels.filter(|px| px[3] <= limit) {
                px.copy_from_slice(&<[u8; 4]>::from(color));
                changed = true;
            }
        }
        PixelFormat::R5G5B5A1 => {
            let limit = u16::from(threshold >= 0.5);
            let packed = quant(color.r, 31.0) << 11
                | quant(color.g, 31.0) << 6
                | quant(color.b, 31.0) << 1
                | u16::from(color.a >= 128);
            for px in pixels.filter(|px| u16::from_ne_bytes([px[0], px[1]]) & 1 <= limit) {
                px.copy_from_slice(&packed.to_ne_bytes());
                changed = true;
            }
        }
        PixelFormat::R4G4B4A4 => {
            let limit = (threshold * 15.0) as u16;
            let packed = quant(color.r, 15.0) << 12
                | quant(color.g, 15.0) << 8
                | quant(color.b, 15.0) << 4
                | quant(color.a, 15.0);
            for px in pixels.filter(|px| u16::from_ne_bytes([px[0], px[1]]) & 0xF <= limit) {
                px.copy_from_slice(&packed.to_ne_bytes());
                changed = true;
            }
        }
        PixelFormat::R32G32B32A32 => {
            let fill = color.normalize();
            for px in pixels.filter(|px| f32::from_ne_bytes([px[12], px[13], px[14], px[15]]) <= threshold) {
                for (dst, v) in px.chunks_exact_mut(4).zip(fill) {
                    dst.copy_from_slice(&v.to_ne_bytes());
                }
                changed = true;
            }
        }
        format => {
            debug!(%format, "alpha_clear skipped, format has no alpha");
        }
    }
    Ok(Status::from_changed(changed))
}

/// Bounding box of pixels whose alpha exceeds `threshold * 255`.
///
/// `None` when no pixel qualifies or the image is empty.
pub fn alpha_border(image: &Image, threshold: f32) -> OpsResult<Option<Rect>> {
    let Some(codec) = guard::editable(image, "alpha_border")? else {
        return Ok(None);
    };
    let limit = (threshold * 255.0) as u8;
    let width = image.width() as usize;

    let mut bounds: Option<(usize, usize, usize, usize)> = None;
    for (i, px) in image.base_level().chunks_exact(codec.bytes_per_pixel()).enumerate() {
        if codec.read(px).a <= limit {
            continue;
        }
        let (x, y) = (i % width, i / width);
        bounds = Some(match bounds {
            None => (x, y, x, y),
            Some((x0, y0, x1, y1)) => (x0.min(x), y0.min(y), x1.max(x), y1.max(y)),
        });
    }

    Ok(bounds.map(|(x0, y0, x1, y1)| {
        Rect::new(x0 as i32, y0 as i32, (x1 - x0 + 1) as i32, (y1 - y0 + 1) as i32)
    }))
}

/// Crops to [`alpha_border`]; skipped when no pixel is visible.
pub fn alpha_crop(image: &mut Image, threshold: f32) -> OpsResult<Status> {
    match alpha_border(image, threshold)? {
        Some(rect) => transform::crop(image, rect),
        None => Ok(Status::Skipped),
    }
}

/// Replaces the alpha channel with the grayscale of `mask`.
///
/// A grayscale image becomes [`PixelFormat::GrayAlpha`]; any other format
/// becomes [`PixelFormat::R8G8B8A8`].
///
/// # Errors
///
/// - [`OpsError::SizeMismatch`] if the dimensions differ
/// - [`OpsError::UnsupportedFormat`] if either image has no pixel codec
pub fn alpha_mask(image: &mut Image, mask: &Image) -> OpsResult<Status> {
    let Some(codec) = guard::editable(image, "alpha_mask")? else {
        return Ok(Status::Skipped);
    };
    let Some(mask_codec) = guard::editable(mask, "alpha_mask")? else {
        return Ok(Status::Skipped);
    };
    if image.dimensions() != mask.dimensions() {
        warn!(image = ?image.dimensions(), mask = ?mask.dimensions(), "Alpha mask must be same size as image");
        return Err(OpsError::SizeMismatch(format!(
            "image {}x{}, mask {}x{}",
            image.width(),
            image.height(),
            mask.width(),
            mask.height()
        )));
    }
    guard::warn_base_level_only(image, "alpha_mask");

    let config = CodecConfig::default();
    let alpha = codec::colors_to_format(
        &mask_codec.decode_colors(mask.base_level()),
        PixelFormat::Grayscale,
        &config,
    )?;

    let (w, h) = image.dimensions();
    let masked = if codec.format() == PixelFormat::Grayscale {
        let data = image
            .base_level()
            .iter()
            .zip(&alpha)
            .flat_map(|(&g, &a)| [g, a])
            .collect();
        Image::from_data(data, w, h, PixelFormat::GrayAlpha)?
    } else {
        let colors: Vec<Color> = codec
            .decode_colors(image.base_level())
            .into_iter()
            .zip(&alpha)
            .map(|(c, &a)| Color { a, ..c })
            .collect();
        Image::from_colors(&colors, w, h)?
    };
    *image = masked;
    Ok(Status::Applied)
}

/// Floyd-Steinberg dithers the image down to the given channel bit depths.
///
/// The result is 16 bits per pixel with channels packed red-high. The
/// combinations 5-6-5-0, 5-5-5-1 and 4-4-4-4 map to their packed formats;
/// any other split is tagged [`PixelFormat::Unknown`]. A mip chain is
/// dropped.
///
/// # Errors
///
/// [`OpsError::InvalidParameter`] if a channel exceeds 8 bits or the total
/// exceeds 16.
pub fn dither(image: &mut Image, r_bpp: u32, g_bpp: u32, b_bpp: u32, a_bpp: u32) -> OpsResult<Status> {
    let Some(codec) = guard::editable(image, "dither")? else {
        return Ok(Status::Skipped);
    };
    let bits = [r_bpp, g_bpp, b_bpp, a_bpp];
    if bits.iter().any(|&b| b > 8) {
        return Err(OpsError::InvalidParameter(format!("channel depth {bits:?} above 8 bits")));
    }
    let total: u32 = bits.iter().sum();
    if total > 16 {
        warn!(bpp = total, "Unsupported dithering bpps, only 16bpp or lower modes supported");
        return Err(OpsError::InvalidParameter(format!("{total} bits per pixel, at most 16")));
    }
    if !matches!(codec.format(), PixelFormat::R8G8B8 | PixelFormat::R8G8B8A8) {
        warn!(format = %codec.format(), "Image format is already 16bpp or lower, dithering could have no effect");
    }
    guard::warn_base_level_only(image, "dither");

    let format = match bits {
        [5, 6, 5, 0] => PixelFormat::R5G6B5,
        [5, 5, 5, 1] => PixelFormat::R5G5B5A1,
        [4, 4, 4, 4] => PixelFormat::R4G4B4A4,
        _ => {
            warn!(?bits, "Unsupported dithered format, pixel data tagged unknown");
            PixelFormat::Unknown
        }
    };
    debug!(?bits, %format, "Dithering");

    let (w, h) = (image.width() as usize, image.height() as usize);
    let mut work: Vec<[i32; 4]> = codec
        .decode_colors(image.base_level())
        .into_iter()
        .map(|c| [c.r as i32, c.g as i32, c.b as i32, c.a as i32])
        .collect();

    let drop_bits = bits.map(|b| 8 - b);
    let shifts = [g_bpp + b_bpp + a_bpp, b_bpp + a_bpp, a_bpp, 0];
    let mut data = Vec::with_capacity(w * h * 2);

    for y in 0..h {
        for x in 0..w {
            let old = work[y * w + x];
            let mut packed = 0u32;
            let mut error = [0i32; 4];
            for c in 0..4 {
                let reduced = (old[c] as u32) >> drop_bits[c];
                error[c] = old[c] - (reduced << drop_bits[c]) as i32;
                packed |= reduced << shifts[c];
            }
            data.extend_from_slice(&(packed as u16).to_ne_bytes());

            let mut spread = |nx: usize, ny: usize, num: i32| {
                let px = &mut work[ny * w + nx];
                for c in 0..4 {
                    px[c] = (px[c] + error[c] * num / 16).clamp(0, 255);
                }
            };
            if x + 1 < w {
                spread(x + 1, y, 7);
            }
            if y + 1 < h {
                if x > 0 {
                    spread(x - 1, y + 1, 3);
                }
                spread(x, y + 1, 5);
                if x + 1 < w {
                    spread(x + 1, y + 1, 1);
                }
            }
        }
    }

    *image = Image::from_data(data, w as u32, h as u32, format)?;
    Ok(Status::Applied)
}

/// Unique visible colors in pixel order, at most `max_size`.
///
/// Fully transparent pixels are ignored. A warning is logged when more
/// colors exist than fit.
pub fn palette(image: &Image, max_size: usize) -> OpsResult<Vec<Color>> {
    let Some(codec) = guard::editable(image, "palette")? else {
        return Ok(Vec::new());
    };
    let mut seen = HashSet::new();
    let mut colors = Vec::new();
    for px in image.base_level().chunks_exact(codec.bytes_per_pixel()) {
        let c = codec.read(px);
        if c.a == 0 || seen.contains(&c) {
            continue;
        }
        if colors.len() == max_size {
            warn!(max_size, "Palette is greater than the requested size");
            break;
        }
        seen.insert(c);
        colors.push(c);
    }
    Ok(colors)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn rgba(colors: &[Color], w: u32, h: u32) -> Image {
        Image::from_colors(colors, w, h).unwrap()
    }

    #[test]
    fn test_convert_rgba_to_gray() {
        let mut img = Image::filled(2, 1, Color::RED);
        assert!(convert(&mut img, PixelFormat::Grayscale).unwrap().is_applied());
        assert_eq!(img.format(), PixelFormat::Grayscale);
        assert_eq!(img.data(), &[76, 76]);
        assert_eq!(convert(&mut img, PixelFormat::Grayscale).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_convert_regenerates_mipmaps() {
        let data = vec![255u8; 4 * 4 * 3 + 2 * 2 * 3 + 3];
        let mut img = Image::from_data_with_mipmaps(data, 4, 4, PixelFormat::R8G8B8, 3).unwrap();
        convert(&mut img, PixelFormat::R8G8B8A8).unwrap();
        assert_eq!(img.mipmaps(), 3);
        assert_eq!(img.data().len(), (16 + 4 + 1) * 4);
    }

    #[test]
    fn test_convert_to_compressed_rejected() {
        let mut img = Image::filled(4, 4, Color::RED);
        let before = img.clone();
        assert!(matches!(
            convert(&mut img, PixelFormat::Dxt1Rgb),
            Err(OpsError::UnsupportedFormat { .. })
        ));
        assert_eq!(img, before);
    }

    #[test]
    fn test_tint() {
        let mut img = Image::filled(1, 1, Color::WHITE);
        tint(&mut img, Color::new(255, 128, 0, 255)).unwrap();
        let p = img.pixel(0, 0).unwrap();
        assert_eq!((p.r, p.b, p.a), (255, 0, 255));
        assert!(matches!(p.g, 127 | 128));
    }

    #[test]
    fn test_invert_keeps_alpha() {
        let mut img = Image::filled(1, 1, Color::new(0, 100, 255, 7));
        invert(&mut img).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), Color::new(255, 155, 0, 7));
    }

    #[test]
    fn test_contrast() {
        let mut img = rgba(&[Color::new(64, 128, 192, 10)], 1, 1);
        contrast(&mut img, 100.0).unwrap();
        // factor 4
        let p = img.pixel(0, 0).unwrap();
        assert_eq!((p.r, p.a), (0, 10));
        assert_eq!(p.b, 255);

        let mut flat = rgba(&[Color::new(64, 128, 192, 255)], 1, 1);
        contrast(&mut flat, -100.0).unwrap();
        assert_eq!(flat.pixel(0, 0).unwrap(), Color::new(127, 127, 127, 255));
    }

    #[test]
    fn test_brightness_floor_is_zero() {
        let mut img = Image::filled(1, 1, Color::new(10, 200, 255, 255));
        brightness(&mut img, -20).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), Color::new(0, 180, 235, 255));
        brightness(&mut img, 1000).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), Color::new(255, 255, 255, 255));
    }

    #[test]
    fn test_replace_color() {
        let mut img = rgba(&[Color::RED, Color::new(255, 0, 0, 254)], 2, 1);
        assert!(replace_color(&mut img, Color::RED, Color::BLUE).unwrap().is_applied());
        assert_eq!(img.pixel(0, 0).unwrap(), Color::BLUE);
        assert_eq!(img.pixel(1, 0).unwrap(), Color::new(255, 0, 0, 254));
        assert_eq!(replace_color(&mut img, Color::RED, Color::BLUE).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_premultiply() {
        let mut img = rgba(
            &[Color::new(255, 0, 0, 128), Color::new(10, 20, 30, 255), Color::new(90, 80, 70, 0)],
            3,
            1,
        );
        alpha_premultiply(&mut img).unwrap();
        let p = img.pixel(0, 0).unwrap();
        assert!(matches!(p.r, 127 | 128));
        assert_eq!((p.g, p.b, p.a), (0, 0, 128));
        assert_eq!(img.pixel(1, 0).unwrap(), Color::new(10, 20, 30, 255));
        assert_eq!(img.pixel(2, 0).unwrap(), Color::BLANK);
    }

    #[test]
    fn test_alpha_clear_rgba() {
        let mut img = rgba(&[Color::new(1, 2, 3, 10), Color::new(4, 5, 6, 200)], 2, 1);
        alpha_clear(&mut img, Color::MAGENTA, 0.5).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), Color::MAGENTA);
        assert_eq!(img.pixel(1, 0).unwrap(), Color::new(4, 5, 6, 200));
    }

    #[test]
    fn test_alpha_clear_packed() {
        let config = CodecConfig::default();
        let mut img = Image::from_colors_as(
            &[Color::BLANK, Color::WHITE],
            2,
            1,
            PixelFormat::R5G5B5A1,
            &config,
        )
        .unwrap();
        alpha_clear(&mut img, Color::RED, 0.0).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), Color::RED);
        assert_eq!(img.pixel(1, 0).unwrap(), Color::WHITE);

        let mut img = Image::from_colors_as(
            &[Color::new(0, 0, 0, 17), Color::WHITE],
            2,
            1,
            PixelFormat::R4G4B4A4,
            &config,
        )
        .unwrap();
        alpha_clear(&mut img, Color::GREEN, 0.1).unwrap();
        assert_eq!(img.pixel(0, 0).unwrap(), Color::GREEN);
        assert_eq!(img.pixel(1, 0).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_alpha_clear_no_alpha_skipped() {
        let mut img = Image::new(2, 2, PixelFormat::R8G8B8);
        assert_eq!(alpha_clear(&mut img, Color::RED, 1.0).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_alpha_border_and_crop() {
        let mut colors = vec![Color::BLANK; 16];
        colors[5] = Color::RED;
        colors[10] = Color::new(0, 0, 0, 100);
        let mut img = rgba(&colors, 4, 4);
        assert_eq!(alpha_border(&img, 0.0).unwrap(), Some(Rect::new(1, 1, 2, 2)));
        assert_eq!(alpha_border(&img, 0.5).unwrap(), Some(Rect::new(1, 1, 1, 1)));

        alpha_crop(&mut img, 0.0).unwrap();
        assert_eq!(img.dimensions(), (2, 2));

        let mut empty = Image::filled(3, 3, Color::BLANK);
        assert_eq!(alpha_border(&empty, 0.0).unwrap(), None);
        assert_eq!(alpha_crop(&mut empty, 0.0).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_alpha_mask_gray() {
        let mut img = Image::from_data(vec![10, 20], 2, 1, PixelFormat::Grayscale).unwrap();
        let mask = Image::from_data(vec![255, 0], 2, 1, PixelFormat::Grayscale).unwrap();
        alpha_mask(&mut img, &mask).unwrap();
        assert_eq!(img.format(), PixelFormat::GrayAlpha);
        assert_eq!(img.data(), &[10, 255, 20, 0]);
    }

    #[test]
    fn test_alpha_mask_rgb() {
        let mut img = Image::new(2, 1, PixelFormat::R8G8B8);
        let mask = rgba(&[Color::WHITE, Color::BLACK], 2, 1);
        alpha_mask(&mut img, &mask).unwrap();
        assert_eq!(img.format(), PixelFormat::R8G8B8A8);
        assert_eq!(img.pixel(0, 0).unwrap().a, 255);
        assert_eq!(img.pixel(1, 0).unwrap().a, 0);
    }

    #[test]
    fn test_alpha_mask_size_mismatch() {
        let mut img = Image::filled(2, 2, Color::RED);
        let mask = Image::filled(3, 2, Color::WHITE);
        assert!(matches!(alpha_mask(&mut img, &mask), Err(OpsError::SizeMismatch(_))));
    }

    #[test]
    fn test_dither_565() {
        let mut img = Image::filled(4, 4, Color::new(255, 255, 255, 255));
        dither(&mut img, 5, 6, 5, 0).unwrap();
        assert_eq!(img.format(), PixelFormat::R5G6B5);
        assert_eq!(img.data().len(), 32);
        assert_eq!(img.pixel(3, 3).unwrap(), Color::WHITE);
    }

    #[test]
    fn test_dither_unknown_split() {
        let mut img = Image::filled(2, 2, Color::WHITE);
        dither(&mut img, 3, 3, 2, 0).unwrap();
        assert_eq!(img.format(), PixelFormat::Unknown);
        assert_eq!(u16::from_ne_bytes([img.data()[0], img.data()[1]]), 0xFF);
    }

    #[test]
    fn test_dither_bad_depths() {
        let mut img = Image::filled(2, 2, Color::WHITE);
        assert!(matches!(dither(&mut img, 8, 8, 8, 0), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(dither(&mut img, 9, 0, 0, 0), Err(OpsError::InvalidParameter(_))));
        assert_eq!(img.format(), PixelFormat::R8G8B8A8);
    }

    #[test]
    fn test_dither_spreads_error() {
        // 1-bit red: 100 truncates to 0 and leaves an error of 100
        let mut img = rgba(&[Color::new(100, 0, 0, 255), Color::new(100, 0, 0, 255)], 2, 1);
        dither(&mut img, 1, 0, 0, 0).unwrap();
        let data = img.data();
        // 7/16 of it reaches the right neighbor: 143 -> 1
        assert_eq!(u16::from_ne_bytes([data[0], data[1]]), 0);
        assert_eq!(u16::from_ne_bytes([data[2], data[3]]), 1);
    }

    #[test]
    fn test_palette() {
        let img = rgba(&[Color::RED, Color::BLANK, Color::RED, Color::GREEN, Color::BLUE, Color::GREEN], 3, 2);
        assert_eq!(palette(&img, 8).unwrap(), vec![Color::RED, Color::GREEN, Color::BLUE]);
        assert_eq!(palette(&img, 2).unwrap(), vec![Color::RED, Color::GREEN]);
    }
}
