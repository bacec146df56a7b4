//! Info command

use crate::InfoArgs;
use anyhow::Result;
use texel_core::{pixel_data_size, PixelFormat};
use texel_ops::color::{alpha_border, palette};

pub fn run(args: InfoArgs, verbose: bool) -> Result<()> {
    let image = super::load_raw(&args.raw)?;
    let format = image.format();
    let (w, h) = image.dimensions();

    println!("{}", args.raw.input.display());
    println!("  Dimensions: {}x{}", w, h);
    println!("  Format:     {} ({} bits per pixel)", format, format.bits_per_pixel());
    println!("  Channels:   {}", channel_summary(format));
    println!("  Levels:     {}", image.mipmaps());
    println!("  Data size:  {}", super::format_size(image.data().len() as u64));

    if verbose || image.mipmaps() > 1 {
        for level in 0..image.mipmaps() {
            let (lw, lh) = image.mip_level_dims(level);
            println!(
                "    [{}] {}x{} {}",
                level,
                lw,
                lh,
                super::format_size(pixel_data_size(lw, lh, format) as u64)
            );
        }
    }

    if !format.is_decodable() {
        println!("  Pixels:     not decodable, statistics unavailable");
        return Ok(());
    }

    match alpha_border(&image, args.border_threshold)? {
        Some(r) if r == image.bounds() => println!("  Visible:    full image"),
        Some(r) => println!("  Visible:    {}x{} at ({}, {})", r.width, r.height, r.x, r.y),
        None => println!("  Visible:    none (fully transparent)"),
    }

    if let Some(max) = args.palette {
        let colors = palette(&image, max)?;
        println!("  Palette:    {} color(s)", colors.len());
        for c in colors {
            println!("    #{:02x}{:02x}{:02x}{:02x}", c.r, c.g, c.b, c.a);
        }
    }

    Ok(())
}

fn channel_summary(format: PixelFormat) -> String {
    match format.bytes_per_pixel() {
        Some(bpp) => format!(
            "{} ({} bytes per pixel{})",
            format.channels(),
            bpp,
            if format.has_alpha() { ", alpha" } else { "" }
        ),
        None => "block-compressed".to_string(),
    }
}
