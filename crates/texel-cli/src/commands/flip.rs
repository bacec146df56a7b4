//! Flip command

use crate::FlipArgs;
use anyhow::{bail, Result};
use texel_ops::transform::{flip_h, flip_v};

pub fn run(args: FlipArgs, verbose: bool) -> Result<()> {
    if !args.horizontal && !args.vertical {
        bail!("Nothing to flip: pass --horizontal and/or --vertical");
    }
    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Flipping {}", super::describe(&image));
    }

    if args.horizontal {
        super::report(verbose, "flip horizontal", flip_h(&mut image)?);
    }
    if args.vertical {
        super::report(verbose, "flip vertical", flip_v(&mut image)?);
    }

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Done.");
    }

    Ok(())
}
