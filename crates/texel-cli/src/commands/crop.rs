//! Crop command

use crate::CropArgs;
use anyhow::Result;
use texel_core::Rect;
use texel_ops::transform::crop;

pub fn run(args: CropArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;
    let rect = Rect::new(args.x, args.y, args.crop_width, args.crop_height);

    if verbose {
        println!(
            "Cropping {}x{} @ ({},{}) from {}",
            rect.width,
            rect.height,
            rect.x,
            rect.y,
            super::describe(&image)
        );
    }

    let status = crop(&mut image, rect)?;
    super::report(verbose, "crop", status);

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Output: {}", super::describe(&image));
    }

    Ok(())
}
