//! texel - raw pixel buffer CLI
//!
//! Inspects and edits headerless raw image buffers with the texel engine.

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use texel_core::{CodecConfig, PixelFormat, DEFAULT_ALPHA_THRESHOLD};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "texel")]
#[command(author, version, about = "Raw pixel buffer manipulation")]
#[command(long_about = "
Edits raw (headerless) pixel buffers. The layout of every input is given on
the command line: size, pixel format, optional header to skip and number of
stored mip levels. Outputs are written as raw bytes, all levels back to back.

Examples:
  texel info tex.raw -W 256 -H 256 -f rgba --mipmaps 9
  texel convert tex.raw -W 256 -H 256 -f rgba --to rgb565 -o tex565.raw
  texel flip tex.raw -W 64 -H 64 -f gray --vertical -o flipped.raw
  texel rotate tex.raw -W 64 -H 32 -f rgba --angle 90 -o rotated.raw
  texel resize tex.raw -W 64 -H 64 -f rgba --to-width 128 --to-height 128 -o big.raw
  texel canvas tex.raw -W 60 -H 60 -f rgba --to-width 64 --to-height 64 --fill 0,0,0,0 -o pot.raw
  texel dither tex.raw -W 64 -H 64 -f rgba --bits 4,4,4,4 -o dithered.raw
  texel adjust tex.raw -W 64 -H 64 -f rgb --brightness 20 --contrast 10 -o out.raw
")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// R5G5B5A1 alpha cut-off (0-255): alpha above it becomes opaque
    #[arg(long, global = true, default_value_t = DEFAULT_ALPHA_THRESHOLD)]
    alpha_threshold: u8,
}

#[derive(Subcommand)]
enum Commands {
    /// Display buffer layout, sizes and palette
    #[command(visible_alias = "i")]
    Info(InfoArgs),

    /// Convert to another uncompressed pixel format
    #[command(visible_alias = "c")]
    Convert(ConvertArgs),

    /// Flip horizontally and/or vertically
    Flip(FlipArgs),

    /// Rotate by a multiple of 90 degrees
    Rotate(RotateArgs),

    /// Resize with a cubic filter or nearest neighbor
    #[command(visible_alias = "r")]
    Resize(ResizeArgs),

    /// Crop to a rectangle
    Crop(CropArgs),

    /// Pad or cut the canvas around the pixels
    Canvas(CanvasArgs),

    /// Generate the full mip chain
    #[command(visible_alias = "mip")]
    Mipmaps(MipmapsArgs),

    /// Premultiply color by alpha
    Premultiply(PremultiplyArgs),

    /// Floyd-Steinberg dither to a 16-bit layout
    Dither(DitherArgs),

    /// Tint, invert, grayscale, contrast and brightness
    Adjust(AdjustArgs),
}

/// Layout of a raw input buffer.
#[derive(Args, Debug, Clone)]
struct RawInput {
    /// Input raw buffer
    input: PathBuf,

    /// Width in pixels
    #[arg(short = 'W', long)]
    width: u32,

    /// Height in pixels
    #[arg(short = 'H', long)]
    height: u32,

    /// Pixel format: gray, ga, rgb565, rgb, rgba5551, rgba4444, rgba, r32f, rgb32f, rgba32f
    #[arg(short, long, default_value = "rgba")]
    format: PixelFormat,

    /// Bytes to skip at the start of the file
    #[arg(long, default_value_t = 0)]
    header_size: usize,

    /// Number of stored mip levels
    #[arg(long, default_value_t = 1)]
    mipmaps: u32,
}

#[derive(Args)]
struct InfoArgs {
    #[command(flatten)]
    raw: RawInput,

    /// List up to N unique visible colors
    #[arg(long)]
    palette: Option<usize>,

    /// Alpha threshold (0.0-1.0) for the visible bounding box
    #[arg(long, default_value_t = 0.0)]
    border_threshold: f32,
}

#[derive(Args)]
struct ConvertArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Target pixel format
    #[arg(short, long)]
    to: PixelFormat,
}

#[derive(Args)]
struct FlipArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Mirror columns
    #[arg(long)]
    horizontal: bool,

    /// Mirror rows
    #[arg(long)]
    vertical: bool,
}

#[derive(Args)]
struct RotateArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Clockwise angle: 90, 180, 270 (or -90)
    #[arg(short, long, allow_negative_numbers = true)]
    angle: i32,
}

#[derive(Args)]
struct ResizeArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Target width
    #[arg(long)]
    to_width: u32,

    /// Target height
    #[arg(long)]
    to_height: u32,

    /// Nearest neighbor instead of the cubic filter
    #[arg(long)]
    nearest: bool,
}

#[derive(Args)]
struct CropArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// X offset
    #[arg(short, allow_negative_numbers = true)]
    x: i32,

    /// Y offset
    #[arg(short, allow_negative_numbers = true)]
    y: i32,

    /// Crop width
    #[arg(long)]
    crop_width: i32,

    /// Crop height
    #[arg(long)]
    crop_height: i32,
}

#[derive(Args)]
struct CanvasArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// New canvas width
    #[arg(long, required_unless_present = "pot")]
    to_width: Option<u32>,

    /// New canvas height
    #[arg(long, required_unless_present = "pot")]
    to_height: Option<u32>,

    /// Horizontal placement of the pixels
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset_x: i32,

    /// Vertical placement of the pixels
    #[arg(long, default_value_t = 0, allow_negative_numbers = true)]
    offset_y: i32,

    /// Fill color for uncovered area: r,g,b[,a]
    #[arg(long, default_value = "0,0,0,0")]
    fill: String,

    /// Pad to the next power of two instead of --to-width/--to-height
    #[arg(long, conflicts_with_all = ["to_width", "to_height", "offset_x", "offset_y"])]
    pot: bool,
}

#[derive(Args)]
struct MipmapsArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct PremultiplyArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,
}

#[derive(Args)]
struct DitherArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Bits per channel: r,g,b,a
    #[arg(short, long, default_value = "5,6,5,0")]
    bits: String,
}

#[derive(Args)]
struct AdjustArgs {
    #[command(flatten)]
    raw: RawInput,

    /// Output raw buffer
    #[arg(short, long)]
    output: PathBuf,

    /// Multiply by a color: r,g,b[,a]
    #[arg(long)]
    tint: Option<String>,

    /// Invert RGB
    #[arg(long)]
    invert: bool,

    /// Convert to grayscale
    #[arg(long)]
    grayscale: bool,

    /// Contrast (-100 to 100)
    #[arg(long, allow_negative_numbers = true)]
    contrast: Option<f32>,

    /// Brightness (-255 to 255)
    #[arg(long, allow_negative_numbers = true)]
    brightness: Option<i32>,
}

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_env("TEXEL_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    let config = CodecConfig::default().with_alpha_threshold(cli.alpha_threshold);

    match cli.command {
        Commands::Info(args) => commands::info::run(args, cli.verbose),
        Commands::Convert(args) => commands::convert::run(args, cli.verbose, &config),
        Commands::Flip(args) => commands::flip::run(args, cli.verbose),
        Commands::Rotate(args) => commands::rotate::run(args, cli.verbose),
        Commands::Resize(args) => commands::resize::run(args, cli.verbose),
        Commands::Crop(args) => commands::crop::run(args, cli.verbose),
        Commands::Canvas(args) => commands::canvas::run(args, cli.verbose),
        Commands::Mipmaps(args) => commands::mipmaps::run(args, cli.verbose),
        Commands::Premultiply(args) => commands::premultiply::run(args, cli.verbose),
        Commands::Dither(args) => commands::dither::run(args, cli.verbose),
        Commands::Adjust(args) => commands::adjust::run(args, cli.verbose),
    }
}
