//! CLI command implementations

pub mod adjust;
pub mod canvas;
pub mod convert;
pub mod crop;
pub mod dither;
pub mod flip;
pub mod info;
pub mod mipmaps;
pub mod premultiply;
pub mod resize;
pub mod rotate;

use crate::RawInput;
use anyhow::{bail, Context, Result};
use std::path::Path;
use texel_core::{mip_chain_size, Color, Image};
use texel_ops::Status;
use tracing::debug;

/// Load a raw buffer described by `raw`.
///
/// The header is skipped and bytes past the last stored level are ignored.
pub fn load_raw(raw: &RawInput) -> Result<Image> {
    let bytes = std::fs::read(&raw.input)
        .with_context(|| format!("Failed to load: {}", raw.input.display()))?;
    let size = mip_chain_size(raw.width, raw.height, raw.format, raw.mipmaps);
    let end = raw.header_size.saturating_add(size);
    let Some(payload) = bytes.get(raw.header_size..end) else {
        bail!(
            "{}: expected {} bytes ({} header + {} pixel data), file has {}",
            raw.input.display(),
            end,
            raw.header_size,
            size,
            bytes.len()
        );
    };
    debug!(path = %raw.input.display(), bytes = size, trailing = bytes.len() - end, "Loaded raw buffer");
    Image::from_data_with_mipmaps(payload.to_vec(), raw.width, raw.height, raw.format, raw.mipmaps)
        .with_context(|| format!("Invalid layout for {}", raw.input.display()))
}

/// Save all levels of `image` as raw bytes
pub fn save_raw(path: &Path, image: &Image) -> Result<()> {
    std::fs::write(path, image.data())
        .with_context(|| format!("Failed to save: {}", path.display()))
}

/// Parse `r,g,b[,a]` with components 0-255; alpha defaults to 255.
pub fn parse_color(s: &str) -> Result<Color> {
    let parts: Vec<u8> = s
        .split(',')
        .map(|p| p.trim().parse::<u8>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid color '{}': expected r,g,b[,a] in 0-255", s))?;
    match parts[..] {
        [r, g, b] => Ok(Color::new(r, g, b, 255)),
        [r, g, b, a] => Ok(Color::new(r, g, b, a)),
        _ => bail!("Invalid color '{}': expected 3 or 4 components", s),
    }
}

/// Print what an operation did, when verbose
pub fn report(verbose: bool, op: &str, status: Status) {
    if verbose {
        match status {
            Status::Applied => println!("  {}: applied", op),
            Status::Skipped => println!("  {}: nothing to do", op),
        }
    }
}

/// Describe an image layout on one line
pub fn describe(image: &Image) -> String {
    let (w, h) = image.dimensions();
    if image.mipmaps() > 1 {
        format!("{}x{} {} ({} levels)", w, h, image.format(), image.mipmaps())
    } else {
        format!("{}x{} {}", w, h, image.format())
    }
}

/// Format file size for display
pub fn format_size(bytes: u64) -> String {
    const KB: u64 = 1024;
    const MB: u64 = KB * 1024;

    if bytes >= MB {
        format!("{:.2} MB", bytes as f64 / MB as f64)
    } else if bytes >= KB {
        format!("{:.2} KB", bytes as f64 / KB as f64)
    } else {
        format!("{} B", bytes)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_color() {
        assert_eq!(parse_color("1,2,3").unwrap(), Color::new(1, 2, 3, 255));
        assert_eq!(parse_color(" 0, 0 ,0,0").unwrap(), Color::BLANK);
        assert!(parse_color("1,2").is_err());
        assert!(parse_color("1,2,3,4,5").is_err());
        assert!(parse_color("256,0,0").is_err());
        assert!(parse_color("red").is_err());
    }

    #[test]
    fn test_format_size() {
        assert_eq!(format_size(512), "512 B");
        assert_eq!(format_size(2048), "2.00 KB");
    }
}
