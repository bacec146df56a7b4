//! # texel-ops
//!
//! In-place manipulation of [`texel_core::Image`] buffers.
//!
//! Every mutator takes `&mut Image` and returns [`OpsResult<Status>`]:
//! [`Status::Applied`] when the image changed, [`Status::Skipped`] for a
//! guarded no-op (empty image, nothing to do), and an [`OpsError`] when the
//! request is refused. A refused request leaves the image untouched.
//!
//! # Modules
//!
//! - [`transform`] - Crop, flips, rotations, canvas resizing
//! - [`resize`] - Filtered and nearest-neighbor scaling
//! - [`color`] - Format conversion, color and alpha adjustments, dithering
//! - [`composite`] - Rectangle blits with alpha blending
//! - [`draw`] - Pixels, lines, circles, rectangles
//! - [`text`] - Text from pre-rasterized glyphs
//! - [`mipmap`] - Mip chain generation
//! - [`guard`] - Precondition checks shared by all of the above
//!
//! # Example
//!
//! ```rust
//! use texel_core::{Color, Image, PixelFormat, Rect};
//! use texel_ops::{color, composite, mipmap, transform, Status};
//!
//! let mut img = Image::filled(6, 5, Color::BLUE);
//! transform::to_pot(&mut img, Color::BLANK)?;
//! assert_eq!(img.dimensions(), (8, 8));
//!
//! let stamp = Image::filled(2, 2, Color::YELLOW);
//! composite::blit(&mut img, &stamp, stamp.bounds(), Rect::new(3, 3, 2, 2), Color::WHITE)?;
//!
//! color::convert(&mut img, PixelFormat::R5G5B5A1)?;
//! assert_eq!(mipmap::generate_mipmaps(&mut img)?, Status::Applied);
//! assert_eq!(img.mipmaps(), 4);
//! # Ok::<(), texel_ops::OpsError>(())
//! ```
//!
//! # Mip levels
//!
//! Operations act on the base level. Flips and rotations keep the stored
//! levels; operations that change size or format drop or rebuild them. A
//! warning is logged whenever levels are left stale.

#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

mod error;
pub mod color;
pub mod composite;
pub mod draw;
pub mod guard;
pub mod mipmap;
pub mod resize;
pub mod text;
pub mod transform;

pub use error::{OpsError, OpsResult, Status};
pub use resize::Filter;
pub use text::{Glyph, GlyphMap, GlyphSource};
