//! Dither command

use crate::DitherArgs;
use anyhow::{bail, Context, Result};
use texel_ops::color::dither;

pub fn run(args: DitherArgs, verbose: bool) -> Result<()> {
    let [r, g, b, a] = parse_bits(&args.bits)?;
    let mut image = super::load_raw(&args.raw)?;

    if verbose {
        println!("Dithering {} to {}{}{}{} bits", super::describe(&image), r, g, b, a);
    }

    let status = dither(&mut image, r, g, b, a)?;
    super::report(verbose, "dither", status);

    super::save_raw(&args.output, &image)?;

    if verbose {
        println!("Wrote {} as 16-bit pixels", args.output.display());
    }

    Ok(())
}

/// Parse `r,g,b,a` bit depths
fn parse_bits(s: &str) -> Result<[u32; 4]> {
    let bits: Vec<u32> = s
        .split(',')
        .map(|p| p.trim().parse::<u32>())
        .collect::<std::result::Result<_, _>>()
        .with_context(|| format!("Invalid bit depths '{}'", s))?;
    match bits[..] {
        [r, g, b, a] => Ok([r, g, b, a]),
        [r, g, b] => Ok([r, g, b, 0]),
        _ => bail!("Expected r,g,b[,a] bit depths, got '{}'", s),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_bits() {
        assert_eq!(parse_bits("5,6,5,0").unwrap(), [5, 6, 5, 0]);
        assert_eq!(parse_bits("5, 6, 5").unwrap(), [5, 6, 5, 0]);
        assert!(parse_bits("4,4").is_err());
        assert!(parse_bits("a,b,c").is_err());
    }
}
