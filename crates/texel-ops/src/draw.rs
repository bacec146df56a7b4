//! Shape drawing into the base level.
//!
//! Shapes are rasterized on the CPU in the image's own format. Every pixel
//! is clipped individually, so shapes may extend past the image edges. The
//! color is written as is, without blending.
//!
//! ```rust
//! use texel_core::{Color, Image, PixelFormat};
//! use texel_ops::draw::{clear, draw_line};
//!
//! let mut img = Image::new(8, 8, PixelFormat::R5G6B5);
//! clear(&mut img, Color::BLACK)?;
//! draw_line(&mut img, 0, 0, 7, 7, Color::WHITE)?;
//! assert_eq!(img.pixel(3, 3)?, Color::WHITE);
//! # Ok::<(), texel_ops::OpsError>(())
//! ```

use texel_core::{CodecConfig, Color, Image, Rect};

use crate::{guard, OpsResult, Status};

/// Pre-encoded pixel writer for one image and color.
///
/// Coordinates are `i64` so that shapes built from far-away `i32` input
/// never overflow before clipping.
struct Pen {
    bytes: Vec<u8>,
    width: i64,
    height: i64,
    painted: bool,
}

impl Pen {
    fn new(image: &Image, color: Color, op: &'static str) -> OpsResult<Option<Self>> {
        let Some(codec) = guard::editable(image, op)? else {
            return Ok(None);
        };
        guard::warn_base_level_only(image, op);
        let mut bytes = vec![0u8; codec.bytes_per_pixel()];
        codec.write(&mut bytes, color, &CodecConfig::default());
        Ok(Some(Self {
            bytes,
            width: image.width() as i64,
            height: image.height() as i64,
            painted: false,
        }))
    }

    #[inline]
    fn plot(&mut self, data: &mut [u8], x: i64, y: i64) {
        if x < 0 || y < 0 || x >= self.width || y >= self.height {
            return;
        }
        let bpp = self.bytes.len();
        let offset = (y as usize * self.width as usize + x as usize) * bpp;
        data[offset..offset + bpp].copy_from_slice(&self.bytes);
        self.painted = true;
    }

    /// Fills the half-open span `[x0, x1) x [y0, y1)`, clipped to the image.
    fn fill(&mut self, data: &mut [u8], x0: i64, y0: i64, x1: i64, y1: i64) {
        let (x0, y0) = (x0.max(0), y0.max(0));
        let (x1, y1) = (x1.min(self.width), y1.min(self.height));
        for y in y0..y1 {
            for x in x0..x1 {
                self.plot(data, x, y);
            }
        }
    }

    /// `true` if the box `[x0, x1] x [y0, y1]` (inclusive) misses the image.
    fn misses(&self, x0: i64, y0: i64, x1: i64, y1: i64) -> bool {
        x1 < 0 || y1 < 0 || x0 >= self.width || y0 >= self.height
    }

    fn status(&self) -> Status {
        Status::from_changed(self.painted)
    }
}

/// Fills the whole base level with `color`.
pub fn clear(image: &mut Image, color: Color) -> OpsResult<Status> {
    let Some(pen) = Pen::new(image, color, "clear")? else {
        return Ok(Status::Skipped);
    };
    for px in image.base_level_mut().chunks_exact_mut(pen.bytes.len()) {
        px.copy_from_slice(&pen.bytes);
    }
    Ok(Status::Applied)
}

/// Sets one pixel; coordinates outside the image are ignored.
pub fn draw_pixel(image: &mut Image, x: i32, y: i32, color: Color) -> OpsResult<Status> {
    let Some(mut pen) = Pen::new(image, color, "draw_pixel")? else {
        return Ok(Status::Skipped);
    };
    pen.plot(image.base_level_mut(), x as i64, y as i64);
    Ok(pen.status())
}

/// Draws a one pixel wide line with Bresenham's algorithm, both ends
/// included.
pub fn draw_line(image: &mut Image, start_x: i32, start_y: i32, end_x: i32, end_y: i32, color: Color) -> OpsResult<Status> {
    let Some(mut pen) = Pen::new(image, color, "draw_line")? else {
        return Ok(Status::Skipped);
    };
    let (sx, sy, ex, ey) = (start_x as i64, start_y as i64, end_x as i64, end_y as i64);
    if pen.misses(sx.min(ex), sy.min(ey), sx.max(ex), sy.max(ey)) {
        return Ok(Status::Skipped);
    }
    let data = image.base_level_mut();

    let (dx, dy) = (ex - sx, ey - sy);
    // Step along the major axis `u`, occasionally stepping the minor axis `v`.
    let x_major = dy.abs() < dx.abs();
    let (du, dv, start_u, start_v, end_u) = match (x_major, x_major && dx > 0 || !x_major && dy > 0) {
        (true, true) => (dx, dy, sx, sy, ex),
        (true, false) => (-dx, -dy, ex, ey, sx),
        (false, true) => (dy, dx, sy, sx, ey),
        (false, false) => (-dy, -dx, ey, ex, sy),
    };
    let a = 2 * dv.abs();
    let b = a - 2 * du.abs();
    let mut p = a - du.abs();
    let step_v = if dv < 0 { -1 } else { 1 };

    let mut put = |pen: &mut Pen, u: i64, v: i64| {
        if x_major { pen.plot(data, u, v) } else { pen.plot(data, v, u) }
    };

    put(&mut pen, start_u, start_v);
    let mut v = start_v;
    for u in start_u + 1..=end_u {
        if p >= 0 {
            v += step_v;
            p += b;
        } else {
            p += a;
        }
        put(&mut pen, u, v);
    }
    Ok(pen.status())
}

/// Draws a circle outline with the midpoint algorithm.
pub fn draw_circle(image: &mut Image, center_x: i32, center_y: i32, radius: i32, color: Color) -> OpsResult<Status> {
    let Some(mut pen) = Pen::new(image, color, "draw_circle")? else {
        return Ok(Status::Skipped);
    };
    let (cx, cy, r) = (center_x as i64, center_y as i64, radius as i64);
    if r < 0 || pen.misses(cx - r, cy - r, cx + r, cy + r) {
        return Ok(Status::Skipped);
    }
    let data = image.base_level_mut();

    let (mut x, mut y) = (0i64, r);
    let mut d = 3 - 2 * r;
    while y >= x {
        for (px, py) in [(x, y), (-x, y), (x, -y), (-x, -y), (y, x), (-y, x), (y, -x), (-y, -x)] {
            pen.plot(data, cx + px, cy + py);
        }
        x += 1;
        if d > 0 {
            y -= 1;
            d += 4 * (x - y) + 10;
        } else {
            d += 4 * x + 6;
        }
    }
    Ok(pen.status())
}

/// Fills `rect`, clipped to the image.
pub fn draw_rectangle(image: &mut Image, rect: Rect, color: Color) -> OpsResult<Status> {
    let Some(mut pen) = Pen::new(image, color, "draw_rectangle")? else {
        return Ok(Status::Skipped);
    };
    let (x, y) = (rect.x as i64, rect.y as i64);
    pen.fill(image.base_level_mut(), x, y, x + rect.width as i64, y + rect.height as i64);
    Ok(pen.status())
}

/// Draws the border of `rect`, `thickness` pixels wide on the inside.
pub fn draw_rectangle_lines(image: &mut Image, rect: Rect, thickness: i32, color: Color) -> OpsResult<Status> {
    let Some(mut pen) = Pen::new(image, color, "draw_rectangle_lines")? else {
        return Ok(Status::Skipped);
    };
    let data = image.base_level_mut();
    let (x0, y0) = (rect.x as i64, rect.y as i64);
    let (x1, y1) = (x0 + rect.width as i64, y0 + rect.height as i64);
    let t = thickness.max(1) as i64;

    pen.fill(data, x0, y0, x1, y0 + t);
    pen.fill(data, x0, y1 - t, x1, y1);
    pen.fill(data, x0, y0 + t, x0 + t, y1 - t);
    pen.fill(data, x1 - t, y0 + t, x1, y1 - t);
    Ok(pen.status())
}
