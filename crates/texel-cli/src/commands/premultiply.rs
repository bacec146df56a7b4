//! Premultiply command

use crate::PremultiplyArgs;
use anyhow::Result;
use texel_ops::color::alpha_premultiply;

pub fn run(args: PremultiplyArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Premultiplying {}", super::describe(&image));
    }

    let status = alpha_premultiply(&mut image)?;
    super::report(verbose, "premultiply", status);

    super::save_raw(&args.output, &image)?;
    Ok(())
}
