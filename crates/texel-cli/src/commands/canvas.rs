//! Canvas command

use crate::CanvasArgs;
use anyhow::{bail, Result};
use texel_ops::transform::{resize_canvas, to_pot};

pub fn run(args: CanvasArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;
    let fill = super::parse_color(&args.fill)?;

    let status = match (args.pot, args.to_width, args.to_height) {
        (true, _, _) => {
            if verbose {
                println!("Padding {} to power of two", super::describe(&image));
            }
            to_pot(&mut image, fill)?
        }
        (false, Some(width), Some(height)) => {
            if verbose {
                println!(
                    "Canvas {} -> {}x{} offset ({},{})",
                    super::describe(&image),
                    width,
                    height,
                    args.offset_x,
                    args.offset_y
                );
            }
            resize_canvas(&mut image, width, height, args.offset_x, args.offset_y, fill)?
        }
        _ => bail!("Canvas size needs both --to-width and --to-height, or --pot"),
    };
    super::report(verbose, "canvas", status);

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Output: {}", super::describe(&image));
    }

    Ok(())
}
