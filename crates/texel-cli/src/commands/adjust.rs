//! Adjust command

use crate::AdjustArgs;
use anyhow::{bail, Result};
use texel_ops::color::{brightness, contrast, grayscale, invert, tint};

pub fn run(args: AdjustArgs, verbose: bool) -> Result<()> {
    let tint_color = args.tint.as_deref().map(super::parse_color).transpose()?;
    if tint_color.is_none() && !args.invert && !args.grayscale && args.contrast.is_none() && args.brightness.is_none() {
        bail!("No adjustment given: use --tint, --invert, --grayscale, --contrast or --brightness");
    }

    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Adjusting {}", super::describe(&image));
    }

    // Fixed order: grayscale, invert, contrast, brightness, tint.
    if args.grayscale {
        super::report(verbose, "grayscale", grayscale(&mut image)?);
    }
    if args.invert {
        super::report(verbose, "invert", invert(&mut image)?);
    }
    if let Some(c) = args.contrast {
        super::report(verbose, "contrast", contrast(&mut image, c)?);
    }
    if let Some(b) = args.brightness {
        super::report(verbose, "brightness", brightness(&mut image, b)?);
    }
    if let Some(color) = tint_color {
        super::report(verbose, "tint", tint(&mut image, color)?);
    }

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
