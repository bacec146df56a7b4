//! Resize command

use crate::ResizeArgs;
use anyhow::Result;
use texel_ops::resize::{resize, resize_nn};

pub fn run(args: ResizeArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;
    let (w, h) = image.dimensions();

    if verbose {
        let filter = if args.nearest { "nearest" } else { "cubic" };
        println!("Resizing {}x{} -> {}x{} ({})", w, h, args.to_width, args.to_height, filter);
    }

    let status = if args.nearest {
        resize_nn(&mut image, args.to_width, args.to_height)?
    } else {
        resize(&mut image, args.to_width, args.to_height)?
    };
    super::report(verbose, "resize", status);

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
