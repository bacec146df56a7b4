//! Image resize and resampling operations.
//!
//! Provides filtered and nearest-neighbor scaling of [`Image`] in place,
//! plus the raw separable resampler they share.
//!
//! # Filters
//!
//! - [`Filter::Nearest`] - Fastest, no interpolation (blocky)
//! - [`Filter::Bilinear`] - Linear interpolation (smooth but blurry)
//! - [`Filter::CatmullRom`] - Interpolating cubic, used when enlarging
//! - [`Filter::Mitchell`] - Mitchell-Netravali cubic, used when shrinking
//!
//! [`resize`] picks the cubic per axis: Catmull-Rom where that axis grows,
//! Mitchell where it shrinks.
//!
//! # Example
//!
//! ```rust
//! use texel_ops::resize::{resize_f32, Filter};
//!
//! let src: Vec<f32> = vec![0.0; 64 * 64 * 4]; // 64x64 RGBA
//! let dst = resize_f32(&src, 64, 64, 4, 128, 128, Filter::CatmullRom).unwrap();
//! assert_eq!(dst.len(), 128 * 128 * 4);
//! ```

use texel_core::{codec, CodecConfig, Color, Image, PixelFormat};
use tracing::{debug, warn};

use crate::{guard, OpsError, OpsResult, Status};

/// Resampling filter for resize operations.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Filter {
    /// Nearest-neighbor (fastest, no interpolation).
    Nearest,
    /// Bilinear interpolation (smooth, fast).
    Bilinear,
    /// Catmull-Rom spline (B=0, C=1/2), sharp upsampling.
    #[default]
    CatmullRom,
    /// Mitchell-Netravali (B=1/3, C=1/3), soft downsampling.
    Mitchell,
}

impl Filter {
    /// Returns the support radius for this filter.
    #[inline]
    pub fn support(&self) -> f32 {
        match self {
            Filter::Nearest => 0.5,
            Filter::Bilinear => 1.0,
            Filter::CatmullRom | Filter::Mitchell => 2.0,
        }
    }

    /// Evaluates the filter kernel at position x.
    #[inline]
    pub fn weight(&self, x: f32) -> f32 {
        match self {
            Filter::Nearest => nearest_weight(x),
            Filter::Bilinear => bilinear_weight(x),
            Filter::CatmullRom => cubic_weight(x, 0.0, 0.5),
            Filter::Mitchell => cubic_weight(x, 1.0 / 3.0, 1.0 / 3.0),
        }
    }

    /// Cubic filter for scaling one axis from `src` to `dst` samples.
    #[inline]
    pub fn for_axis(src: usize, dst: usize) -> Self {
        if dst >= src { Filter::CatmullRom } else { Filter::Mitchell }
    }
}

#[inline]
fn nearest_weight(x: f32) -> f32 {
    if x.abs() < 0.5 { 1.0 } else { 0.0 }
}

#[inline]
fn bilinear_weight(x: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 { 1.0 - ax } else { 0.0 }
}

/// Mitchell-Netravali family cubic with parameters `b` and `c`.
#[inline]
fn cubic_weight(x: f32, b: f32, c: f32) -> f32 {
    let ax = x.abs();
    if ax < 1.0 {
        ((12.0 - 9.0 * b - 6.0 * c) * ax * ax * ax
            + (-18.0 + 12.0 * b + 6.0 * c) * ax * ax
            + (6.0 - 2.0 * b))
            / 6.0
    } else if ax < 2.0 {
        ((-b - 6.0 * c) * ax * ax * ax
            + (6.0 * b + 30.0 * c) * ax * ax
            + (-12.0 * b - 48.0 * c) * ax
            + (8.0 * b + 24.0 * c))
            / 6.0
    } else {
        0.0
    }
}

/// Resizes interleaved f32 data with one filter on both axes.
///
/// # Arguments
///
/// * `src` - Source samples, `src_w * src_h * channels` values
/// * `channels` - Interleaved channels per pixel
/// * `filter` - Resampling filter
///
/// # Example
///
/// ```rust
/// use texel_ops::resize::{resize_f32, Filter};
///
/// let src = vec![0.5f32; 16 * 16 * 4];
/// let dst = resize_f32(&src, 16, 16, 4, 32, 32, Filter::Bilinear).unwrap();
/// assert_eq!(dst.len(), 32 * 32 * 4);
/// ```
pub fn resize_f32(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    filter: Filter,
) -> OpsResult<Vec<f32>> {
    resize_separable(src, src_w, src_h, channels, dst_w, dst_h, filter, filter)
}

/// Resizes interleaved 8-bit data, choosing the cubic per axis.
///
/// Results are rounded and clamped back to `0..=255`.
pub fn resize_u8(
    src: &[u8],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
) -> OpsResult<Vec<u8>> {
    let samples: Vec<f32> = src.iter().map(|&v| v as f32).collect();
    let out = resize_separable(
        &samples,
        src_w,
        src_h,
        channels,
        dst_w,
        dst_h,
        Filter::for_axis(src_w, dst_w),
        Filter::for_axis(src_h, dst_h),
    )?;
    Ok(out.into_iter().map(|v| v.round().clamp(0.0, 255.0) as u8).collect())
}

#[allow(clippy::too_many_arguments)]
fn resize_separable(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    dst_h: usize,
    h_filter: Filter,
    v_filter: Filter,
) -> OpsResult<Vec<f32>> {
    let expected = src_w * src_h * channels;
    if src.len() != expected {
        return Err(OpsError::SizeMismatch(format!(
            "expected {} samples, got {}",
            expected,
            src.len()
        )));
    }
    if dst_w == 0 || dst_h == 0 || src_w == 0 || src_h == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "resize {src_w}x{src_h} -> {dst_w}x{dst_h}"
        )));
    }

    // Two-pass separable resize: horizontal then vertical
    let temp = resize_horizontal(src, src_w, src_h, channels, dst_w, h_filter);
    Ok(resize_vertical(&temp, dst_w, src_h, channels, dst_h, v_filter))
}

/// Source span and normalized weights for one output sample.
fn contributions(center: f32, scale: f32, filter: Filter, len: usize) -> (usize, Vec<f32>) {
    let stretch = scale.max(1.0);
    let support = filter.support() * stretch;
    let first = ((center - support).floor() as isize).max(0) as usize;
    let last = ((center + support).ceil().max(0.0) as usize).min(len - 1);

    let mut weights: Vec<f32> = (first..=last)
        .map(|s| filter.weight((s as f32 - center) / stretch))
        .collect();
    let total: f32 = weights.iter().sum();
    if total.abs() > f32::EPSILON {
        weights.iter_mut().for_each(|w| *w /= total);
    } else {
        // Nearest with a center exactly between samples
        weights.iter_mut().for_each(|w| *w = 0.0);
        let nearest = (center.round().max(0.0) as usize).clamp(first, last);
        weights[nearest - first] = 1.0;
    }
    (first, weights)
}

fn resize_horizontal(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_w: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; dst_w * src_h * channels];
    let scale = src_w as f32 / dst_w as f32;

    for x in 0..dst_w {
        let center = (x as f32 + 0.5) * scale - 0.5;
        let (left, weights) = contributions(center, scale, filter, src_w);

        for y in 0..src_h {
            let dst_idx = (y * dst_w + x) * channels;
            for (i, &w) in weights.iter().enumerate() {
                let src_idx = (y * src_w + left + i) * channels;
                for c in 0..channels {
                    dst[dst_idx + c] += src[src_idx + c] * w;
                }
            }
        }
    }

    dst
}

fn resize_vertical(
    src: &[f32],
    src_w: usize,
    src_h: usize,
    channels: usize,
    dst_h: usize,
    filter: Filter,
) -> Vec<f32> {
    let mut dst = vec![0.0f32; src_w * dst_h * channels];
    let scale = src_h as f32 / dst_h as f32;
    let row = src_w * channels;

    for y in 0..dst_h {
        let center = (y as f32 + 0.5) * scale - 0.5;
        let (top, weights) = contributions(center, scale, filter, src_h);

        let out = &mut dst[y * row..(y + 1) * row];
        for (i, &w) in weights.iter().enumerate() {
            let src_row = &src[(top + i) * row..(top + i + 1) * row];
            for (o, &s) in out.iter_mut().zip(src_row) {
                *o += s * w;
            }
        }
    }

    dst
}

/// Formats resampled directly on their stored bytes.
fn native_channels(format: PixelFormat) -> Option<usize> {
    match format {
        PixelFormat::Grayscale => Some(1),
        PixelFormat::GrayAlpha => Some(2),
        PixelFormat::R8G8B8 => Some(3),
        PixelFormat::R8G8B8A8 => Some(4),
        _ => None,
    }
}

/// Filtered copy of the base level at `width` x `height`, same format,
/// single level. Callers have already checked the format is editable.
pub(crate) fn resampled(image: &Image, width: u32, height: u32) -> OpsResult<Image> {
    let (sw, sh) = (image.width() as usize, image.height() as usize);
    let (dw, dh) = (width as usize, height as usize);
    let format = image.format();

    if let Some(channels) = native_channels(format) {
        let data = resize_u8(image.base_level(), sw, sh, channels, dw, dh)?;
        return Ok(Image::from_data(data, width, height, format)?);
    }

    if format.is_float() {
        warn!(%format, "Resize goes through 8-bit RGBA, float precision is lost");
    }
    let colors = codec::load_colors(image)?;
    let flat: Vec<u8> = colors.iter().flat_map(|&c| <[u8; 4]>::from(c)).collect();
    let scaled = resize_u8(&flat, sw, sh, 4, dw, dh)?;
    let colors: Vec<Color> = scaled
        .chunks_exact(4)
        .map(|p| Color::new(p[0], p[1], p[2], p[3]))
        .collect();
    Ok(Image::from_colors_as(&colors, width, height, format, &CodecConfig::default())?)
}

/// Resizes the image with a cubic filter.
///
/// 8-bit gray, gray-alpha, RGB and RGBA are filtered on their stored bytes.
/// Every other uncompressed format is decoded to RGBA, filtered, and
/// encoded back. A mip chain is dropped.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] for a zero target dimension
/// - [`OpsError::UnsupportedFormat`] for formats without a pixel codec
pub fn resize(image: &mut Image, new_width: u32, new_height: u32) -> OpsResult<Status> {
    if guard::editable(image, "resize")?.is_none() {
        return Ok(Status::Skipped);
    }
    check_target(new_width, new_height)?;
    if (new_width, new_height) == image.dimensions() {
        return Ok(Status::Skipped);
    }
    guard::warn_base_level_only(image, "resize");
    debug!(
        width = image.width(),
        height = image.height(),
        new_width,
        new_height,
        format = %image.format(),
        "Resizing"
    );

    *image = resampled(image, new_width, new_height)?;
    Ok(Status::Applied)
}

/// Resizes the image with nearest-neighbor sampling.
///
/// Whole pixels are copied as bytes, so no value is ever altered and any
/// uncompressed layout is accepted. Sampling uses a 16.16 fixed-point step
/// of `(src << 16) / dst + 1`. A mip chain is dropped.
///
/// # Errors
///
/// Same as [`resize`].
pub fn resize_nn(image: &mut Image, new_width: u32, new_height: u32) -> OpsResult<Status> {
    let Some(bpp) = guard::byte_layout(image, "resize_nn")? else {
        return Ok(Status::Skipped);
    };
    check_target(new_width, new_height)?;
    if (new_width, new_height) == image.dimensions() {
        return Ok(Status::Skipped);
    }
    guard::warn_base_level_only(image, "resize_nn");
    debug!(
        width = image.width(),
        height = image.height(),
        new_width,
        new_height,
        "Resizing (nearest neighbor)"
    );

    let (sw, sh) = (image.width() as u64, image.height() as u64);
    let x_ratio = ((sw << 16) / new_width as u64) + 1;
    let y_ratio = ((sh << 16) / new_height as u64) + 1;

    let src = image.base_level();
    let mut data = Vec::with_capacity(new_width as usize * new_height as usize * bpp);
    for y in 0..new_height as u64 {
        let sy = ((y * y_ratio) >> 16).min(sh - 1);
        for x in 0..new_width as u64 {
            let sx = ((x * x_ratio) >> 16).min(sw - 1);
            let s = ((sy * sw + sx) as usize) * bpp;
            data.extend_from_slice(&src[s..s + bpp]);
        }
    }

    *image = Image::from_data(data, new_width, new_height, image.format())?;
    Ok(Status::Applied)
}

fn check_target(width: u32, height: u32) -> OpsResult<()> {
    if width == 0 || height == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "target size {width}x{height}"
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_filter_weights() {
        assert_abs_diff_eq!(Filter::Nearest.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::Nearest.weight(0.6), 0.0);
        assert_abs_diff_eq!(Filter::Bilinear.weight(0.5), 0.5);

        // Catmull-Rom interpolates: 1 at the sample, 0 at neighbors
        assert_abs_diff_eq!(Filter::CatmullRom.weight(0.0), 1.0);
        assert_abs_diff_eq!(Filter::CatmullRom.weight(1.0), 0.0, epsilon = 1e-6);
        // Mitchell does not
        assert_abs_diff_eq!(Filter::Mitchell.weight(0.0), 8.0 / 9.0, epsilon = 1e-6);
        assert_abs_diff_eq!(Filter::Mitchell.weight(2.5), 0.0);
    }

    #[test]
    fn test_filter_for_axis() {
        assert_eq!(Filter::for_axis(4, 8), Filter::CatmullRom);
        assert_eq!(Filter::for_axis(8, 4), Filter::Mitchell);
    }

    #[test]
    fn test_resize_constant_stays_constant() {
        let src = vec![0.5f32; 4 * 4 * 4];
        let up = resize_f32(&src, 4, 4, 4, 8, 8, Filter::CatmullRom).unwrap();
        assert_eq!(up.len(), 8 * 8 * 4);
        for v in up {
            assert_abs_diff_eq!(v, 0.5, epsilon = 1e-4);
        }

        let bytes = vec![200u8; 16 * 16 * 3];
        let down = resize_u8(&bytes, 16, 16, 3, 5, 7).unwrap();
        assert_eq!(down.len(), 5 * 7 * 3);
        assert!(down.iter().all(|&v| v == 200));
    }

    #[test]
    fn test_resize_f32_bad_input() {
        assert!(resize_f32(&[0.0; 3], 2, 2, 1, 4, 4, Filter::Bilinear).is_err());
        assert!(resize_f32(&[0.0; 4], 2, 2, 1, 0, 4, Filter::Bilinear).is_err());
    }

    #[test]
    fn test_resize_rgba() {
        let mut img = Image::filled(4, 4, Color::RED);
        assert!(resize(&mut img, 8, 2).unwrap().is_applied());
        assert_eq!(img.dimensions(), (8, 2));
        assert_eq!(img.pixel(3, 1).unwrap(), Color::RED);
    }

    #[test]
    fn test_resize_packed_keeps_format() {
        let mut img = Image::from_colors_as(
            &[Color::BLUE; 9],
            3,
            3,
            PixelFormat::R5G6B5,
            &CodecConfig::default(),
        )
        .unwrap();
        resize(&mut img, 6, 6).unwrap();
        assert_eq!(img.format(), PixelFormat::R5G6B5);
        assert_eq!(img.data().len(), 6 * 6 * 2);
        assert_eq!(img.pixel(5, 5).unwrap(), Color::BLUE);
    }

    #[test]
    fn test_resize_same_size_skipped() {
        let mut img = Image::filled(4, 4, Color::RED);
        assert_eq!(resize(&mut img, 4, 4).unwrap(), Status::Skipped);
        assert_eq!(resize_nn(&mut img, 4, 4).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_resize_zero_target() {
        let mut img = Image::filled(4, 4, Color::RED);
        assert!(matches!(resize(&mut img, 0, 4), Err(OpsError::InvalidParameter(_))));
        assert!(matches!(resize_nn(&mut img, 4, 0), Err(OpsError::InvalidParameter(_))));
    }

    #[test]
    fn test_resize_nn_upscale() {
        let data = vec![1, 2, 3, 4];
        let mut img = Image::from_data(data, 2, 2, PixelFormat::Grayscale).unwrap();
        resize_nn(&mut img, 4, 4).unwrap();
        assert_eq!(
            img.data(),
            &[1, 1, 2, 2, 1, 1, 2, 2, 3, 3, 4, 4, 3, 3, 4, 4]
        );
    }

    #[test]
    fn test_resize_nn_downscale() {
        let data: Vec<u8> = (0..16).collect();
        let mut img = Image::from_data(data, 4, 4, PixelFormat::Grayscale).unwrap();
        resize_nn(&mut img, 2, 2).unwrap();
        assert_eq!(img.data(), &[0, 2, 8, 10]);
    }

    #[test]
    fn test_resize_compressed_rejected() {
        let mut img = Image::new(8, 8, PixelFormat::Etc1Rgb);
        assert!(resize(&mut img, 4, 4).is_err());
        assert!(resize_nn(&mut img, 4, 4).is_err());
    }
}
