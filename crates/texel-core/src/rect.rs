//! Rectangles in pixel units.
//!
//! Coordinates are signed: callers routinely pass rectangles that start left
//! of or above an image, and every operation clamps before indexing.
//!
//! # Coordinate System
//!
//! ```text
//! (0,0) ────────► X
//!   │
//!   │   ┌──────────┐
//!   │   │  Region  │
//!   │   └──────────┘
//!   ▼
//!   Y
//! ```
//!
//! # Clamping
//!
//! [`Rect::clamp_to`] implements the shared rule: a negative origin shrinks
//! the size by the same amount, and a far edge past the image truncates.
//!
//! ```rust
//! use texel_core::Rect;
//!
//! let r = Rect::new(-2, 1, 6, 10).clamp_to(4, 4).unwrap();
//! assert_eq!(r, Rect::new(0, 1, 4, 3));
//! assert!(Rect::new(5, 0, 2, 2).clamp_to(4, 4).is_none());
//! ```

/// A rectangle with origin `(x, y)` and size `width` x `height`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Rect {
    /// Left edge (inclusive)
    pub x: i32,
    /// Top edge (inclusive)
    pub y: i32,
    /// Width in pixels
    pub width: i32,
    /// Height in pixels
    pub height: i32,
}

impl Rect {
    /// Creates a rectangle.
    #[inline]
    pub const fn new(x: i32, y: i32, width: i32, height: i32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin covering `width` x `height`.
    #[inline]
    pub const fn from_size(width: u32, height: u32) -> Self {
        Self::new(0, 0, width as i32, height as i32)
    }

    /// Creates a rectangle from float coordinates, truncating each toward zero.
    #[inline]
    pub fn from_f32(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self::new(x as i32, y as i32, width as i32, height as i32)
    }

    /// Exclusive right edge, saturating at `i32::MAX`.
    #[inline]
    pub const fn right(&self) -> i32 {
        self.x.saturating_add(self.width)
    }

    /// Exclusive bottom edge, saturating at `i32::MAX`.
    #[inline]
    pub const fn bottom(&self) -> i32 {
        self.y.saturating_add(self.height)
    }

    /// Returns `true` if the rectangle covers no pixels.
    #[inline]
    pub const fn is_empty(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }

    /// Number of covered pixels (0 when empty).
    #[inline]
    pub fn area(&self) -> usize {
        if self.is_empty() {
            0
        } else {
            self.width as usize * self.height as usize
        }
    }

    /// Returns `true` if `(px, py)` lies inside.
    #[inline]
    pub const fn contains(&self, px: i32, py: i32) -> bool {
        px >= self.x && px < self.right() && py >= self.y && py < self.bottom()
    }

    /// Size as a `(width, height)` pair of pixel counts.
    #[inline]
    pub fn size(&self) -> (u32, u32) {
        (self.width.max(0) as u32, self.height.max(0) as u32)
    }

    /// Intersection of two rectangles, `None` if they do not overlap.
    pub fn intersect(&self, other: &Rect) -> Option<Rect> {
        let x = self.x.max(other.x);
        let y = self.y.max(other.y);
        let right = self.right().min(other.right());
        let bottom = self.bottom().min(other.bottom());
        let r = Rect::new(x, y, right.saturating_sub(x), bottom.saturating_sub(y));
        (!r.is_empty()).then_some(r)
    }

    /// Clamps to an image of `width` x `height`.
    ///
    /// A negative origin moves to 0 and the size shrinks by the same amount;
    /// a far edge past the image truncates the size. Returns `None` when
    /// nothing of the rectangle remains inside the image.
    pub fn clamp_to(&self, width: u32, height: u32) -> Option<Rect> {
        let bounds = Rect::from_size(width, height);
        self.intersect(&bounds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_f32_truncates() {
        assert_eq!(Rect::from_f32(1.9, -0.5, 3.99, 2.0), Rect::new(1, 0, 3, 2));
    }

    #[test]
    fn test_intersect() {
        let a = Rect::new(0, 0, 10, 10);
        let b = Rect::new(5, 5, 10, 10);
        assert_eq!(a.intersect(&b), Some(Rect::new(5, 5, 5, 5)));
        assert_eq!(a.intersect(&Rect::new(10, 0, 2, 2)), None);
    }

    #[test]
    fn test_clamp_negative_origin() {
        let r = Rect::new(-3, -1, 5, 5).clamp_to(10, 10).unwrap();
        assert_eq!(r, Rect::new(0, 0, 2, 4));
    }

    #[test]
    fn test_clamp_overflow() {
        let r = Rect::new(6, 7, 10, 10).clamp_to(8, 8).unwrap();
        assert_eq!(r, Rect::new(6, 7, 2, 1));
    }

    #[test]
    fn test_clamp_outside() {
        assert!(Rect::new(-5, 0, 5, 5).clamp_to(8, 8).is_none());
        assert!(Rect::new(0, 8, 5, 5).clamp_to(8, 8).is_none());
        assert!(Rect::new(0, 0, 0, 5).clamp_to(8, 8).is_none());
    }

    #[test]
    fn test_far_away_rect_does_not_overflow() {
        let far = Rect::from_f32(3.0e9, 0.0, 4.0, 4.0);
        assert_eq!(far.x, i32::MAX);
        assert_eq!(far.right(), i32::MAX);
        assert!(far.clamp_to(8, 8).is_none());

        let edge = Rect::new(i32::MAX - 1, i32::MAX - 1, 2, 2);
        assert_eq!(edge.bottom(), i32::MAX);
        assert!(edge.clamp_to(8, 8).is_none());

        let wide = Rect::new(i32::MIN, 0, i32::MAX, 4);
        assert!(wide.intersect(&Rect::new(i32::MAX - 4, 0, 4, 4)).is_none());
    }

    #[test]
    fn test_contains_and_area() {
        let r = Rect::new(1, 1, 2, 3);
        assert!(r.contains(1, 3));
        assert!(!r.contains(3, 1));
        assert_eq!(r.area(), 6);
        assert_eq!(Rect::new(0, 0, -1, 4).area(), 0);
    }
}
