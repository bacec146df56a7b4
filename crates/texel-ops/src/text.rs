//! Text rendering from pre-rasterized glyphs.
//!
//! Glyph bitmaps come from a [`GlyphSource`] (a font loaded elsewhere). Text
//! is laid out at the font's base size, each glyph is composited with
//! [`blit`], and the result is scaled up when a larger size is requested.
//!
//! # Layout
//!
//! - `\n` starts a new line `base + base / 2` pixels lower
//! - space and tab advance the pen without drawing
//! - each glyph advances by its `advance_x` (or bitmap width when zero)
//!   plus `spacing`
//! - codepoints missing from the font use [`GlyphSource::fallback_codepoint`]
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image};
//! use texel_ops::text::{image_from_text, Glyph, GlyphMap};
//!
//! let mut font = GlyphMap::new(4);
//! font.insert('I', Glyph::new(Image::filled(1, 4, Color::WHITE), 0, 0, 2));
//!
//! let img = image_from_text(&font, "II", 4, 1, Color::RED, false)?;
//! assert_eq!(img.dimensions(), (5, 4));
//! assert_eq!(img.pixel(0, 0)?, Color::RED);
//! # Ok::<(), texel_ops::OpsError>(())
//! ```

use std::collections::HashMap;

use texel_core::{Color, Image, Rect};
use tracing::{debug, trace};

use crate::{composite::blit, resize, OpsResult, Status};

/// One pre-rasterized character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// Glyph bitmap, any uncompressed format
    pub image: Image,
    /// Horizontal draw offset from the pen position
    pub offset_x: i32,
    /// Vertical draw offset from the line top
    pub offset_y: i32,
    /// Pen advance; 0 means use the bitmap width
    pub advance_x: i32,
}

impl Glyph {
    /// Creates a glyph.
    pub fn new(image: Image, offset_x: i32, offset_y: i32, advance_x: i32) -> Self {
        Self {
            image,
            offset_x,
            offset_y,
            advance_x,
        }
    }

    /// Horizontal pen advance before spacing.
    #[inline]
    pub fn advance(&self) -> i32 {
        if self.advance_x != 0 {
            self.advance_x
        } else {
            self.image.width() as i32
        }
    }
}

/// Supplies glyph bitmaps per codepoint.
pub trait GlyphSource {
    /// Glyph for `codepoint`, if the font has one.
    fn glyph(&self, codepoint: char) -> Option<&Glyph>;

    /// Pixel height the glyphs were rasterized at.
    fn base_size(&self) -> u32;

    /// Codepoint drawn in place of missing ones.
    fn fallback_codepoint(&self) -> char {
        '?'
    }
}

/// In-memory [`GlyphSource`] keyed by codepoint.
#[derive(Debug, Clone)]
pub struct GlyphMap {
    base_size: u32,
    fallback: char,
    glyphs: HashMap<char, Glyph>,
}

impl GlyphMap {
    /// Empty font with the given base size and `?` as fallback.
    pub fn new(base_size: u32) -> Self {
        Self {
            base_size,
            fallback: '?',
            glyphs: HashMap::new(),
        }
    }

    /// Sets the fallback codepoint.
    pub fn with_fallback(mut self, codepoint: char) -> Self {
        self.fallback = codepoint;
        self
    }

    /// Adds or replaces a glyph.
    pub fn insert(&mut self, codepoint: char, glyph: Glyph) {
        self.glyphs.insert(codepoint, glyph);
    }

    /// Number of glyphs.
    pub fn len(&self) -> usize {
        self.glyphs.len()
    }

    /// `true` if no glyph is stored.
    pub fn is_empty(&self) -> bool {
        self.glyphs.is_empty()
    }
}

impl GlyphSource for GlyphMap {
    fn glyph(&self, codepoint: char) -> Option<&Glyph> {
        self.glyphs.get(&codepoint)
    }

    fn base_size(&self) -> u32 {
        self.base_size
    }

    fn fallback_codepoint(&self) -> char {
        self.fallback
    }
}

fn lookup<F: GlyphSource + ?Sized>(font: &F, c: char) -> Option<&Glyph> {
    font.glyph(c).or_else(|| font.glyph(font.fallback_codepoint()))
}

fn line_height(base: u32) -> u32 {
    base + base / 2
}

/// Size of `text` at the font's base size.
///
/// A line is as wide as its glyph advances plus `spacing` between glyphs.
/// The height is one base size plus one line step per `\n`.
pub fn measure_text<F: GlyphSource + ?Sized>(font: &F, text: &str, spacing: i32) -> (u32, u32) {
    let base = font.base_size();
    let mut width = 0i32;
    let mut lines = 0u32;
    for line in text.split('\n') {
        lines += 1;
        let (mut w, mut count) = (0i32, 0i32);
        for c in line.chars() {
            w += lookup(font, c).map_or(0, Glyph::advance);
            count += 1;
        }
        if count > 0 {
            w += (count - 1) * spacing;
        }
        width = width.max(w);
    }
    let height = base + (lines - 1) * line_height(base);
    (width.max(0) as u32, height)
}

/// Renders `text` into a new RGBA image tinted with `tint`.
///
/// Glyphs are composited at the base size; if `font_size` is larger the
/// image is scaled by `font_size / height`, nearest neighbor unless
/// `filtered`. Empty or zero-width text gives an empty image.
pub fn image_from_text<F: GlyphSource + ?Sized>(
    font: &F,
    text: &str,
    font_size: u32,
    spacing: i32,
    tint: Color,
    filtered: bool,
) -> OpsResult<Image> {
    let (width, height) = measure_text(font, text, spacing);
    if width == 0 || height == 0 {
        return Ok(Image::default());
    }
    debug!(width, height, font_size, chars = text.chars().count(), "Rendering text");

    let mut canvas = Image::filled(width, height, Color::BLANK);
    let step = line_height(font.base_size()) as i32;
    let (mut x, mut y) = (0i32, 0i32);

    for c in text.chars() {
        if c == '\n' {
            y += step;
            x = 0;
            continue;
        }
        let Some(glyph) = lookup(font, c) else {
            continue;
        };
        if c != ' ' && c != '\t' && glyph.image.is_valid() {
            let (gw, gh) = glyph.image.dimensions();
            let dst = Rect::new(x + glyph.offset_x, y + glyph.offset_y, gw as i32, gh as i32);
            let status = blit(&mut canvas, &glyph.image, glyph.image.bounds(), dst, tint)?;
            trace!(glyph = %c, applied = status.is_applied(), "Placed glyph");
        }
        x += glyph.advance() + spacing;
    }

    if font_size > height {
        let scale = font_size as f32 / height as f32;
        let new_w = ((width as f32 * scale) as u32).max(1);
        let status = if filtered {
            resize::resize(&mut canvas, new_w, font_size)?
        } else {
            resize::resize_nn(&mut canvas, new_w, font_size)?
        };
        debug!(new_w, font_size, applied = status.is_applied(), "Scaled text");
    }
    Ok(canvas)
}

/// Renders `text` and composites it onto `dst` with its top-left corner at
/// `(x, y)`.
#[allow(clippy::too_many_arguments)]
pub fn draw_text<F: GlyphSource + ?Sized>(
    dst: &mut Image,
    font: &F,
    text: &str,
    x: i32,
    y: i32,
    font_size: u32,
    spacing: i32,
    tint: Color,
) -> OpsResult<Status> {
    let rendered = image_from_text(font, text, font_size, spacing, tint, false)?;
    if !rendered.is_valid() {
        return Ok(Status::Skipped);
    }
    let (w, h) = rendered.dimensions();
    blit(dst, &rendered, rendered.bounds(), Rect::new(x, y, w as i32, h as i32), Color::WHITE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn font() -> GlyphMap {
        let mut font = GlyphMap::new(4);
        font.insert('A', Glyph::new(Image::filled(3, 4, Color::WHITE), 0, 0, 4));
        font.insert('.', Glyph::new(Image::filled(1, 1, Color::WHITE), 0, 3, 0));
        font.insert(' ', Glyph::new(Image::default(), 0, 0, 2));
        font.insert('?', Glyph::new(Image::filled(2, 2, Color::WHITE), 0, 0, 3));
        font
    }

    #[test]
    fn test_measure() {
        let f = font();
        assert_eq!(measure_text(&f, "A", 0), (4, 4));
        assert_eq!(measure_text(&f, "AA", 1), (9, 4));
        assert_eq!(measure_text(&f, "A.", 0), (5, 4));
        assert_eq!(measure_text(&f, "A A", 0), (10, 4));
        assert_eq!(measure_text(&f, "A\nAA", 0), (8, 10));
    }

    #[test]
    fn test_measure_fallback() {
        let f = font();
        assert_eq!(measure_text(&f, "Z", 0), (3, 4));
        let bare = GlyphMap::new(4).with_fallback('#');
        assert_eq!(measure_text(&bare, "Z", 0), (0, 4));
    }

    #[test]
    fn test_image_from_text() {
        let f = font();
        let img = image_from_text(&f, "A.", 4, 0, Color::BLUE, false).unwrap();
        assert_eq!(img.dimensions(), (5, 4));
        assert_eq!(img.pixel(2, 3).unwrap(), Color::BLUE);
        assert_eq!(img.pixel(3, 0).unwrap(), Color::BLANK);
        assert_eq!(img.pixel(4, 3).unwrap(), Color::BLUE);
        assert_eq!(img.pixel(4, 2).unwrap(), Color::BLANK);
    }

    #[test]
    fn test_image_from_text_newline() {
        let f = font();
        let img = image_from_text(&f, ".\n.", 4, 0, Color::WHITE, false).unwrap();
        assert_eq!(img.dimensions(), (1, 10));
        assert_eq!(img.pixel(0, 3).unwrap(), Color::WHITE);
        assert_eq!(img.pixel(0, 9).unwrap(), Color::WHITE);
        assert_eq!(img.pixel(0, 5).unwrap(), Color::BLANK);
    }

    #[test]
    fn test_image_from_text_scaled() {
        let f = font();
        let img = image_from_text(&f, "A", 8, 0, Color::WHITE, false).unwrap();
        assert_eq!(img.dimensions(), (8, 8));
        assert_eq!(img.pixel(5, 7).unwrap(), Color::WHITE);
        assert_eq!(img.pixel(7, 0).unwrap(), Color::BLANK);
    }

    #[test]
    fn test_empty_text() {
        let f = font();
        assert!(!image_from_text(&f, "", 4, 0, Color::WHITE, false).unwrap().is_valid());
        let mut dst = Image::filled(2, 2, Color::BLACK);
        assert_eq!(draw_text(&mut dst, &f, "", 0, 0, 4, 0, Color::WHITE).unwrap(), Status::Skipped);
    }

    #[test]
    fn test_draw_text() {
        let f = font();
        let mut dst = Image::filled(8, 8, Color::BLACK);
        draw_text(&mut dst, &f, "A", 2, 2, 4, 0, Color::RED).unwrap();
        assert_eq!(dst.pixel(2, 2).unwrap(), Color::RED);
        assert_eq!(dst.pixel(4, 5).unwrap(), Color::RED);
        assert_eq!(dst.pixel(5, 2).unwrap(), Color::BLACK);
        assert_eq!(dst.pixel(1, 1).unwrap(), Color::BLACK);
    }
}
