//! Mipmaps command

use crate::MipmapsArgs;
use anyhow::Result;
use texel_ops::mipmap::generate_mipmaps;

pub fn run(args: MipmapsArgs, verbose: bool) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Generating mipmaps for {}", super::describe(&image));
    }

    let status = generate_mipmaps(&mut image)?;
    super::report(verbose, "mipmaps", status);

    super::save_raw(&args.output, &image)?;

    if verbose {
        for level in 0..image.mipmaps() {
            let (w, h) = image.mip_level_dims(level);
            println!("  [{}] {}x{}", level, w, h);
        }
    }

    Ok(())
}
