//! Rotate command

use crate::RotateArgs;
use anyhow::{bail, Result};
use texel_ops::transform::{rotate_180, rotate_ccw, rotate_cw};

pub fn run(args: RotateArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Rotating {} by {} degrees", super::describe(&image), args.angle);
    }

    let status = match args.angle.rem_euclid(360) {
        0 => {
            if verbose {
                println!("  Angle is a multiple of 360, copying input");
            }
            texel_ops::Status::Skipped
        }
        90 => rotate_cw(&mut image)?,
        180 => rotate_180(&mut image)?,
        270 => rotate_ccw(&mut image)?,
        _ => bail!("Angle must be a multiple of 90, got {}", args.angle),
    };
    super::report(verbose, "rotate", status);

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Output: {}", super::describe(&image));
    }

    Ok(())
}
