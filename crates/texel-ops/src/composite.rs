//! Rectangle compositing between images.
//!
//! [`blit`] copies a source rectangle into a destination rectangle of another
//! image, resampling when the two sizes differ and alpha blending with a
//! tint. Both images may use any uncompressed format; pixels are converted
//! on the fly.
//!
//! # Transfer paths
//!
//! - **Row copy** when the tint is opaque, the source has no alpha channel
//!   and the formats match: every row is a single `copy_from_slice`.
//! - **Convert** when the tint is opaque and the source has no alpha channel
//!   but the formats differ: each pixel is decoded and re-encoded as is.
//! - **Blend** otherwise: each pixel is decoded, combined with
//!   [`Color::alpha_blend`] and encoded in the destination format.
//!
//! The tint color is ignored on the first two paths.
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image, Rect};
//! use texel_ops::composite::blit;
//!
//! let mut canvas = Image::filled(4, 4, Color::BLANK);
//! let stamp = Image::filled(2, 2, Color::GREEN);
//! blit(&mut canvas, &stamp, Rect::new(0, 0, 2, 2), Rect::new(1, 1, 2, 2), Color::WHITE)?;
//! assert_eq!(canvas.pixel(1, 1)?, Color::GREEN);
//! assert_eq!(canvas.pixel(0, 0)?, Color::BLANK);
//! # Ok::<(), texel_ops::OpsError>(())
//! ```

use texel_core::{CodecConfig, Color, Image, Rect};
use tracing::{debug, trace, warn};

use crate::{guard, resize, OpsError, OpsResult, Status};

/// Composites `src_rect` of `src` into `dst_rect` of `dst`.
///
/// The source rectangle is clamped to `src` first. If its size then differs
/// from `dst_rect`, the region is resized to fit. Parts falling outside
/// `dst` are clipped along with the matching source pixels. Only the base
/// level of `dst` is written.
///
/// # Errors
///
/// - [`OpsError::UnsupportedFormat`] if either image has no pixel codec
/// - [`OpsError::OutOfBounds`] if `src_rect` lies entirely outside `src`
pub fn blit(dst: &mut Image, src: &Image, src_rect: Rect, dst_rect: Rect, tint: Color) -> OpsResult<Status> {
    let Some(dst_codec) = guard::editable(dst, "blit")? else {
        return Ok(Status::Skipped);
    };
    let Some(src_codec) = guard::editable(src, "blit")? else {
        return Ok(Status::Skipped);
    };
    if dst_rect.clamp_to(dst.width(), dst.height()).is_none() {
        trace!(?dst_rect, "Blit destination outside image");
        return Ok(Status::Skipped);
    }
    let Some(mut sr) = src_rect.clamp_to(src.width(), src.height()) else {
        warn!(?src_rect, width = src.width(), height = src.height(), "Blit source rectangle out of bounds");
        return Err(OpsError::OutOfBounds(format!(
            "source rectangle {src_rect:?} outside {}x{} image",
            src.width(),
            src.height()
        )));
    };
    guard::warn_base_level_only(dst, "blit");

    // Resample so the source grid matches the destination 1:1
    let scaled;
    let src = if (sr.width, sr.height) != (dst_rect.width, dst_rect.height) {
        trace!(from = ?sr.size(), to = ?dst_rect.size(), "Blit resizing source region");
        let region = src.sub_image(sr)?;
        scaled = resize::resampled(&region, dst_rect.width as u32, dst_rect.height as u32)?;
        sr = scaled.bounds();
        &scaled
    } else {
        src
    };

    let Some((sr, dr)) = clip(sr, dst_rect, dst.width(), dst.height()) else {
        return Ok(Status::Skipped);
    };
    debug!(src = ?sr, dst = ?dr, src_format = %src.format(), dst_format = %dst.format(), "Blit");

    let (sbpp, dbpp) = (src_codec.bytes_per_pixel(), dst_codec.bytes_per_pixel());
    let (s_stride, d_stride) = (src.width() as usize * sbpp, dst.width() as usize * dbpp);
    let opaque = tint.a == 255 && !src.format().has_alpha();
    let row_copy = opaque && src.format() == dst.format();
    let config = CodecConfig::default();

    let src_data = src.base_level();
    let dst_data = dst.base_level_mut();

    for row in 0..sr.height as usize {
        let s_off = (sr.y as usize + row) * s_stride + sr.x as usize * sbpp;
        let d_off = (dr.y as usize + row) * d_stride + dr.x as usize * dbpp;
        let s_row = &src_data[s_off..s_off + sr.width as usize * sbpp];
        let d_row = &mut dst_data[d_off..d_off + sr.width as usize * dbpp];

        if row_copy {
            d_row.copy_from_slice(s_row);
            continue;
        }
        for (s_px, d_px) in s_row.chunks_exact(sbpp).zip(d_row.chunks_exact_mut(dbpp)) {
            let color = if opaque {
                src_codec.read(s_px)
            } else {
                Color::alpha_blend(dst_codec.read(d_px), src_codec.read(s_px), tint)
            };
            dst_codec.write(d_px, color, &config);
        }
    }
    Ok(Status::Applied)
}

/// Clips a 1:1 transfer against the destination bounds.
///
/// Returns the surviving source and destination rectangles, both of the
/// same size, or `None` when nothing is left. Edges are computed in `i64`
/// so rectangles near the `i32` limits cannot overflow.
fn clip(src: Rect, dst: Rect, dst_w: u32, dst_h: u32) -> Option<(Rect, Rect)> {
    let (sx, sy) = (src.x as i64, src.y as i64);
    let (dx, dy) = (dst.x as i64, dst.y as i64);
    let (mut w, mut h) = (src.width as i64, src.height as i64);

    // Skip the part left of / above the destination
    let (skip_x, skip_y) = ((-dx).max(0), (-dy).max(0));
    let (dx, dy) = (dx + skip_x, dy + skip_y);
    w = (w - skip_x).min(dst_w as i64 - dx);
    h = (h - skip_y).min(dst_h as i64 - dy);

    if w <= 0 || h <= 0 {
        return None;
    }
    // All values now fit: w, h <= dst size and the offsets lie inside it
    let (w, h) = (w as i32, h as i32);
    Some((
        Rect::new((sx + skip_x) as i32, (sy + skip_y) as i32, w, h),
        Rect::new(dx as i32, dy as i32, w, h),
    ))
}

/// Draws `src_rect` of `src` into `dst_rect` of `dst`.
///
/// Same as [`blit`].
#[inline]
pub fn draw_image(dst: &mut Image, src: &Image, src_rect: Rect, dst_rect: Rect, tint: Color) -> OpsResult<Status> {
    blit(dst, src, src_rect, dst_rect, tint)
}
