//! Convert command

use crate::ConvertArgs;
use anyhow::Result;
use texel_core::CodecConfig;
use texel_ops::color::convert_with;

pub fn run(args: ConvertArgs, verbose: bool, config: &CodecConfig) -> Result<()> {
    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Converting {} -> {}", super::describe(&image), args.to);
    }

    let status = convert_with(&mut image, args.to, config)?;
    super::report(verbose, "convert", status);
    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Wrote {} ({})", args.output.display(), super::format_size(image.data().len() as u64));
    }

    Ok(())
}
