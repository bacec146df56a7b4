//! 8-bit RGBA color and the normalized float pixel.
//!
//! [`Color`] is the format-independent "human" pixel used by algorithms that
//! work per pixel regardless of storage (dithering, palettes, blending).
//! [`NormalizedPixel`] is the float intermediate for format-to-format
//! conversion and never appears in stored buffers.
//!
//! # Alpha blending
//!
//! [`Color::alpha_blend`] is straight-alpha "over" in integer fixed point
//! (x256), the per-pixel kernel of the compositor:
//!
//! ```rust
//! use texel_core::Color;
//!
//! let dst = Color::new(0, 0, 255, 255);
//! let src = Color::new(255, 0, 0, 255);
//! assert_eq!(Color::alpha_blend(dst, src, Color::WHITE), src);
//! assert_eq!(Color::alpha_blend(dst, Color::BLANK, Color::WHITE), dst);
//! ```

/// RGBA pixel in [0, 1] per channel.
pub type NormalizedPixel = [f32; 4];

/// Luma of a normalized RGB triple.
#[inline]
pub fn luma(r: f32, g: f32, b: f32) -> f32 {
    // Integer per-mille weights sum to exactly 1000, so white stays 1.0.
    (r * 299.0 + g * 587.0 + b * 114.0) / 1000.0
}

/// 4 x 8-bit RGBA color.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Color {
    /// Red
    pub r: u8,
    /// Green
    pub g: u8,
    /// Blue
    pub b: u8,
    /// Alpha
    pub a: u8,
}

impl Color {
    /// Fully transparent black.
    pub const BLANK: Self = Self::new(0, 0, 0, 0);
    /// Opaque white.
    pub const WHITE: Self = Self::new(255, 255, 255, 255);
    /// Opaque black.
    pub const BLACK: Self = Self::new(0, 0, 0, 255);
    /// Opaque red.
    pub const RED: Self = Self::new(255, 0, 0, 255);
    /// Opaque green.
    pub const GREEN: Self = Self::new(0, 255, 0, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::new(0, 0, 255, 255);
    /// Opaque yellow.
    pub const YELLOW: Self = Self::new(255, 255, 0, 255);
    /// Opaque magenta.
    pub const MAGENTA: Self = Self::new(255, 0, 255, 255);
    /// Opaque mid gray.
    pub const GRAY: Self = Self::new(128, 128, 128, 255);

    /// Creates a color from its four channels.
    #[inline]
    pub const fn new(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// Creates an opaque color.
    #[inline]
    pub const fn rgb(r: u8, g: u8, b: u8) -> Self {
        Self::new(r, g, b, 255)
    }

    /// Same color with alpha set to `alpha` in [0, 1].
    pub fn fade(self, alpha: f32) -> Self {
        let alpha = alpha.clamp(0.0, 1.0);
        Self {
            a: (alpha * 255.0) as u8,
            ..self
        }
    }

    /// Channels as floats in [0, 1].
    #[inline]
    pub fn normalize(self) -> NormalizedPixel {
        [
            self.r as f32 / 255.0,
            self.g as f32 / 255.0,
            self.b as f32 / 255.0,
            self.a as f32 / 255.0,
        ]
    }

    /// Inverse of [`normalize`](Self::normalize); out of range input saturates,
    /// fractions truncate.
    #[inline]
    pub fn from_normalized(v: NormalizedPixel) -> Self {
        Self {
            r: (v[0] * 255.0) as u8,
            g: (v[1] * 255.0) as u8,
            b: (v[2] * 255.0) as u8,
            a: (v[3] * 255.0) as u8,
        }
    }

    /// Blends `src` over `dst` after multiplying `src` by `tint`.
    ///
    /// Fixed point with a 256 scale. The tint multiply uses `tint + 1` so a
    /// 255 tint channel is exact. Fully transparent sources leave `dst`
    /// untouched and fully opaque sources replace it.
    pub fn alpha_blend(dst: Self, src: Self, tint: Self) -> Self {
        let scale = |c: u8, t: u8| ((c as u32 * (t as u32 + 1)) >> 8) as u8;
        let src = Self {
            r: scale(src.r, tint.r),
            g: scale(src.g, tint.g),
            b: scale(src.b, tint.b),
            a: scale(src.a, tint.a),
        };

        match src.a {
            0 => dst,
            255 => src,
            _ => {
                let alpha = src.a as u32 + 1;
                let inv = 256 - alpha;
                let out_a = (alpha * 256 + dst.a as u32 * inv) >> 8;
                if out_a == 0 {
                    return Self { a: 0, ..dst };
                }
                let mix = |s: u8, d: u8| -> u8 {
                    let v = ((s as u32 * alpha * 256 + d as u32 * dst.a as u32 * inv) / out_a) >> 8;
                    v.min(255) as u8
                };
                Self {
                    r: mix(src.r, dst.r),
                    g: mix(src.g, dst.g),
                    b: mix(src.b, dst.b),
                    a: out_a.min(255) as u8,
                }
            }
        }
    }

    /// Luma as a normalized value.
    #[inline]
    pub fn luma(self) -> f32 {
        let [r, g, b, _] = self.normalize();
        luma(r, g, b)
    }
}

impl From<[u8; 4]> for Color {
    fn from(c: [u8; 4]) -> Self {
        Self::new(c[0], c[1], c[2], c[3])
    }
}

impl From<Color> for [u8; 4] {
    fn from(c: Color) -> Self {
        [c.r, c.g, c.b, c.a]
    }
}
