//! Geometric transformation operations.
//!
//! Provides crop, flip, rotate and canvas resizing on [`Image`] in place.
//!
//! # Operations
//!
//! - [`crop`] - keep a clamped sub-rectangle
//! - [`flip_h`], [`flip_v`] - mirror columns / rows
//! - [`rotate_cw`], [`rotate_ccw`], [`rotate_180`] - quarter and half turns
//! - [`resize_canvas`] - pad or cut the canvas around the pixels
//! - [`to_pot`] - pad to power-of-two dimensions
//!
//! All of them move whole pixels as bytes and never decode, so they work on
//! every uncompressed layout. Only the base level is transformed: flips and
//! rotations keep the stored mip levels as they are, while operations that
//! change the size drop the chain to a single level.
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image, Rect};
//! use texel_ops::transform::{crop, flip_h, rotate_cw};
//!
//! let mut img = Image::filled(8, 4, Color::RED);
//! crop(&mut img, Rect::new(-2, 0, 6, 10))?;
//! assert_eq!(img.dimensions(), (4, 4));
//!
//! rotate_cw(&mut img)?;
//! flip_h(&mut img)?;
//! # Ok::<(), texel_ops::OpsError>(())
//! ```

use texel_core::{Color, CodecConfig, Image, Rect};
use tracing::{debug, warn};

use crate::{guard, OpsError, OpsResult, Status};

/// Crops the image to `rect` after clamping it to the image bounds.
///
/// A negative origin shrinks the rectangle by the same amount and a far edge
/// past the image is truncated.
///
/// # Errors
///
/// - [`OpsError::OutOfBounds`] if nothing of `rect` lies inside the image
/// - [`OpsError::UnsupportedFormat`] for block-compressed images
pub fn crop(image: &mut Image, rect: Rect) -> OpsResult<Status> {
    if guard::byte_layout(image, "crop")?.is_none() {
        return Ok(Status::Skipped);
    }
    let Some(clamped) = rect.clamp_to(image.width(), image.height()) else {
        warn!(?rect, width = image.width(), height = image.height(), "Failed to crop, rectangle out of bounds");
        return Err(OpsError::OutOfBounds(format!(
            "crop rectangle {rect:?} outside {}x{} image",
            image.width(),
            image.height()
        )));
    };
    if clamped == image.bounds() && image.mipmaps() == 1 {
        return Ok(Status::Skipped);
    }
    guard::warn_base_level_only(image, "crop");
    debug!(x = clamped.x, y = clamped.y, width = clamped.width, height = clamped.height, "Cropping");

    *image = image.sub_image(clamped)?;
    Ok(Status::Applied)
}

/// Flips the image vertically (row order reversed).
pub fn flip_v(image: &mut Image) -> OpsResult<Status> {
    let Some(bpp) = guard::byte_layout(image, "flip_v")? else {
        return Ok(Status::Skipped);
    };
    guard::warn_base_level_only(image, "flip_v");

    let stride = image.width() as usize * bpp;
    let src = image.base_level();
    let mut out = Vec::with_capacity(src.len());
    for row in src.chunks_exact(stride).rev() {
        out.extend_from_slice(row);
    }
    image.base_level_mut().copy_from_slice(&out);
    Ok(Status::Applied)
}

/// Flips the image horizontally (column order reversed).
pub fn flip_h(image: &mut Image) -> OpsResult<Status> {
    let Some(bpp) = guard::byte_layout(image, "flip_h")? else {
        return Ok(Status::Skipped);
    };
    guard::warn_base_level_only(image, "flip_h");

    let stride = image.width() as usize * bpp;
    let src = image.base_level();
    let mut out = Vec::with_capacity(src.len());
    for row in src.chunks_exact(stride) {
        for px in row.chunks_exact(bpp).rev() {
            out.extend_from_slice(px);
        }
    }
    image.base_level_mut().copy_from_slice(&out);
    Ok(Status::Applied)
}

/// Rotates 90 degrees clockwise; width and height swap.
///
/// Source pixel `(x, y)` lands at `(h - 1 - y, x)`.
pub fn rotate_cw(image: &mut Image) -> OpsResult<Status> {
    rotate_quarter(image, "rotate_cw", |x, y, _w, h| (h - 1 - y, x))
}

/// Rotates 90 degrees counter-clockwise; width and height swap.
///
/// Source pixel `(x, y)` lands at `(y, w - 1 - x)`.
pub fn rotate_ccw(image: &mut Image) -> OpsResult<Status> {
    rotate_quarter(image, "rotate_ccw", |x, y, w, _h| (y, w - 1 - x))
}

/// Rotates 180 degrees.
pub fn rotate_180(image: &mut Image) -> OpsResult<Status> {
    let Some(bpp) = guard::byte_layout(image, "rotate_180")? else {
        return Ok(Status::Skipped);
    };
    guard::warn_base_level_only(image, "rotate_180");

    let src = image.base_level();
    let mut out = Vec::with_capacity(src.len());
    for px in src.chunks_exact(bpp).rev() {
        out.extend_from_slice(px);
    }
    image.base_level_mut().copy_from_slice(&out);
    Ok(Status::Applied)
}

/// Shared quarter-turn: `map(x, y, w, h)` gives the destination column and
/// row of a source pixel in an `h` x `w` output.
fn rotate_quarter(
    image: &mut Image,
    op: &'static str,
    map: impl Fn(usize, usize, usize, usize) -> (usize, usize),
) -> OpsResult<Status> {
    let Some(bpp) = guard::byte_layout(image, op)? else {
        return Ok(Status::Skipped);
    };
    guard::warn_base_level_only(image, op);

    let (w, h) = (image.width() as usize, image.height() as usize);
    let src = image.base_level();
    let mut rotated = vec![0u8; src.len()];
    for y in 0..h {
        for x in 0..w {
            let (dx, dy) = map(x, y, w, h);
            let d = (dy * h + dx) * bpp;
            let s = (y * w + x) * bpp;
            rotated[d..d + bpp].copy_from_slice(&src[s..s + bpp]);
        }
    }

    // Level sizes are symmetric in width/height, so the chain tail still fits.
    let mut data = rotated;
    data.extend_from_slice(&image.data()[image.base_level_size()..]);
    *image = Image::from_data_with_mipmaps(data, image.height(), image.width(), image.format(), image.mipmaps())?;
    Ok(Status::Applied)
}

/// Resizes the canvas to `new_width` x `new_height`, placing the current
/// pixels at `(offset_x, offset_y)` and painting the uncovered area with
/// `fill`.
///
/// Negative offsets cut pixels on the left/top; pixels past the new right
/// or bottom edge are cut. Nothing happens when the size is unchanged.
///
/// # Errors
///
/// - [`OpsError::InvalidParameter`] for a zero target dimension
/// - [`OpsError::UnsupportedFormat`] for formats without a pixel codec
pub fn resize_canvas(
    image: &mut Image,
    new_width: u32,
    new_height: u32,
    offset_x: i32,
    offset_y: i32,
    fill: Color,
) -> OpsResult<Status> {
    let Some(codec) = guard::editable(image, "resize_canvas")? else {
        return Ok(Status::Skipped);
    };
    if new_width == 0 || new_height == 0 {
        return Err(OpsError::InvalidParameter(format!(
            "canvas size {new_width}x{new_height}"
        )));
    }
    if (new_width, new_height) == image.dimensions() {
        return Ok(Status::Skipped);
    }
    guard::warn_base_level_only(image, "resize_canvas");
    debug!(new_width, new_height, offset_x, offset_y, "Resizing canvas");

    let (w, h) = (image.width() as i64, image.height() as i64);
    let (nw, nh) = (new_width as i64, new_height as i64);
    let (src_x, src_w, dst_x) = canvas_span(offset_x as i64, w, nw);
    let (src_y, src_h, dst_y) = canvas_span(offset_y as i64, h, nh);

    let bpp = codec.bytes_per_pixel();
    let mut fill_px = vec![0u8; bpp];
    codec.write(&mut fill_px, fill, &CodecConfig::default());
    let mut data = fill_px.repeat(new_width as usize * new_height as usize);

    if src_w > 0 && src_h > 0 {
        let src = image.base_level();
        let row_len = src_w as usize * bpp;
        for row in 0..src_h as usize {
            let s = ((src_y as usize + row) * w as usize + src_x as usize) * bpp;
            let d = ((dst_y as usize + row) * nw as usize + dst_x as usize) * bpp;
            data[d..d + row_len].copy_from_slice(&src[s..s + row_len]);
        }
    }

    *image = Image::from_data(data, new_width, new_height, image.format())?;
    Ok(Status::Applied)
}

/// Source start, copied length and destination start along one axis.
fn canvas_span(offset: i64, size: i64, new_size: i64) -> (i64, i64, i64) {
    let (mut src, mut len, mut dst) = (0, size, offset);
    if offset < 0 {
        src = -offset;
        len += offset;
        dst = 0;
    } else if offset + size > new_size {
        len = new_size - offset;
    }
    len = len.min(new_size).max(0);
    (src, len, dst)
}

/// Pads the image on the right and bottom up to the next power of two in
/// each dimension.
pub fn to_pot(image: &mut Image, fill: Color) -> OpsResult<Status> {
    if !image.is_valid() {
        return Ok(Status::Skipped);
    }
    let pot_w = image.width().next_power_of_two();
    let pot_h = image.height().next_power_of_two();
    if (pot_w, pot_h) == image.dimensions() {
        return Ok(Status::Skipped);
    }
    resize_canvas(image, pot_w, pot_h, 0, 0, fill)
}

#[cfg(test)]
mod tests {
    use super::*;
    use texel_core::PixelFormat;

    fn numbered(w: u32, h: u32) -> Image {
        let colors: Vec<Color> = (0..w * h).map(|i| Color::new(i as u8, 0, 0, 255)).collect();
        Image::from_colors(&colors, w, h).unwrap()
    }

    fn reds(img: &Image) -> Vec<u8> {
        img.data().chunks_exact(4).map(|p| p[0]).collect()
    }

    #[test]
    fn test_flip_h() {
        let mut img = numbered(3, 2);
        assert!(flip_h(&mut img).unwrap().is_applied());
        assert_eq!(reds(&img), vec![2, 1, 0, 5, 4, 3]);
    }

    #[test]
    fn test_flip_v() {
        let mut img = numbered(2, 3);
        flip_v(&mut img).unwrap();
        assert_eq!(reds(&img), vec![4, 5, 2, 3, 0, 1]);
    }

    #[test]
    fn test_rotate_cw() {
        // 0 1 2      3 0
        // 3 4 5  ->  4 1
        //            5 2
        let mut img = numbered(3, 2);
        rotate_cw(&mut img).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(reds(&img), vec![3, 0, 4, 1, 5, 2]);
    }

    #[test]
    fn test_rotate_ccw() {
        // 0 1 2      2 5
        // 3 4 5  ->  1 4
        //            0 3
        let mut img = numbered(3, 2);
        rotate_ccw(&mut img).unwrap();
        assert_eq!(img.dimensions(), (2, 3));
        assert_eq!(reds(&img), vec![2, 5, 1, 4, 0, 3]);
    }

    #[test]
    fn test_rotate_180() {
        let mut img = numbered(3, 2);
        rotate_180(&mut img).unwrap();
        assert_eq!(reds(&img), vec![5, 4, 3, 2, 1, 0]);
    }

    #[test]
    fn test_crop_clamps() {
        let mut img = numbered(4, 4);
        crop(&mut img, Rect::new(-1, 2, 3, 10)).unwrap();
        assert_eq!(img.dimensions(), (2, 2));
        assert_eq!(reds(&img), vec![8, 9, 12, 13]);
    }

    #[test]
    fn test_crop_out_of_bounds() {
        let mut img = numbered(4, 4);
        let before = img.clone();
        assert!(matches!(crop(&mut img, Rect::new(4, 0, 2, 2)), Err(OpsError::OutOfBounds(_))));
        assert_eq!(img, before);
    }

    #[test]
    fn test_crop_full_is_skipped() {
        let mut img = numbered(4, 4);
        assert_eq!(crop(&mut img, Rect::new(0, 0, 4, 4)).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_canvas_grow_with_fill() {
        let mut img = numbered(2, 2);
        resize_canvas(&mut img, 4, 3, 1, 1, Color::BLUE).unwrap();
        assert_eq!(img.dimensions(), (4, 3));
        assert_eq!(img.pixel(0, 0).unwrap(), Color::BLUE);
        assert_eq!(img.pixel(1, 1).unwrap().r, 0);
        assert_eq!(img.pixel(2, 2).unwrap().r, 3);
        assert_eq!(img.pixel(3, 2).unwrap(), Color::BLUE);
    }

    #[test]
    fn test_canvas_negative_offset() {
        let mut img = numbered(4, 4);
        resize_canvas(&mut img, 2, 2, -1, -2, Color::BLANK).unwrap();
        assert_eq!(reds(&img), vec![9, 10, 13, 14]);
    }

    #[test]
    fn test_canvas_offset_past_edge() {
        let mut img = numbered(2, 2);
        resize_canvas(&mut img, 3, 3, 5, 0, Color::BLANK).unwrap();
        assert!(img.data().iter().all(|&b| b == 0));
    }

    #[test]
    fn test_to_pot() {
        let mut img = Image::new(5, 3, PixelFormat::R5G6B5);
        to_pot(&mut img, Color::WHITE).unwrap();
        assert_eq!(img.dimensions(), (8, 4));
        assert_eq!(img.pixel(7, 3).unwrap(), Color::WHITE);
        assert_eq!(to_pot(&mut img, Color::WHITE).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_compressed_rejected() {
        let mut img = Image::new(8, 8, PixelFormat::Dxt5Rgba);
        let before = img.clone();
        assert!(flip_v(&mut img).is_err());
        assert!(rotate_cw(&mut img).is_err());
        assert!(resize_canvas(&mut img, 16, 16, 0, 0, Color::BLANK).is_err());
        assert_eq!(img, before);
    }

    #[test]
    fn test_rotate_keeps_mip_tail() {
        // 4x2 gray + 2x1 + 1x1
        let data: Vec<u8> = (0..11).collect();
        let mut img = Image::from_data_with_mipmaps(data, 4, 2, PixelFormat::Grayscale, 3).unwrap();
        rotate_cw(&mut img).unwrap();
        assert_eq!(img.dimensions(), (2, 4));
        assert_eq!(img.mipmaps(), 3);
        assert_eq!(&img.data()[8..], &[8, 9, 10]);
    }
}
