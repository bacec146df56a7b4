//! End-to-end tests of the `texel` binary on raw buffers.

use std::path::Path;
use std::process::{Command, Output};
use tempfile::tempdir;

fn texel(args: &[&str]) -> Output {
    Command::new(env!("CARGO_BIN_EXE_texel"))
        .args(args)
        .env("TEXEL_LOG", "off")
        .output()
        .expect("failed to run texel")
}

fn path_str(p: &Path) -> &str {
    p.to_str().unwrap()
}

/// 2x2 RGBA: red, green / blue, white
fn quad() -> Vec<u8> {
    vec![
        255, 0, 0, 255, 0, 255, 0, 255, //
        0, 0, 255, 255, 255, 255, 255, 255,
    ]
}

#[test]
fn test_info() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    std::fs::write(&input, quad()).unwrap();

    let out = texel(&["info", path_str(&input), "-W", "2", "-H", "2", "--palette", "8"]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let stdout = String::from_utf8_lossy(&out.stdout);
    assert!(stdout.contains("2x2"));
    assert!(stdout.contains("R8G8B8A8"));
    assert!(stdout.contains("4 color(s)"));
}

#[test]
fn test_convert_rgb565() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, quad()).unwrap();

    let out = texel(&[
        "convert", path_str(&input), "-W", "2", "-H", "2", "-f", "rgba", "--to", "rgb565", "-o", path_str(&output),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 8);
    // Red and white in native-endian 5:6:5
    assert_eq!(u16::from_ne_bytes([bytes[0], bytes[1]]), 0xF800);
    assert_eq!(u16::from_ne_bytes([bytes[6], bytes[7]]), 0xFFFF);
}

#[test]
fn test_header_skipped() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    let mut bytes = vec![0xAB; 16];
    bytes.extend(quad());
    std::fs::write(&input, bytes).unwrap();

    let out = texel(&[
        "flip", path_str(&input), "-W", "2", "-H", "2", "--header-size", "16", "--vertical", "-o", path_str(&output),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let flipped = std::fs::read(&output).unwrap();
    assert_eq!(&flipped[..8], &quad()[8..]);
    assert_eq!(&flipped[8..], &quad()[..8]);
}

#[test]
fn test_rotate_roundtrip() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let mid = dir.path().join("mid.raw");
    let output = dir.path().join("out.raw");
    let data: Vec<u8> = (0..6).collect();
    std::fs::write(&input, &data).unwrap();

    let out = texel(&["rotate", path_str(&input), "-W", "3", "-H", "2", "-f", "gray", "-a", "90", "-o", path_str(&mid)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let out = texel(&["rotate", path_str(&mid), "-W", "2", "-H", "3", "-f", "gray", "-a", "-90", "-o", path_str(&output)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(std::fs::read(&output).unwrap(), data);
}

#[test]
fn test_mipmaps_size() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, vec![200u8; 8 * 4]).unwrap();

    let out = texel(&["mipmaps", path_str(&input), "-W", "8", "-H", "4", "-f", "gray", "-o", path_str(&output)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    // 8x4 + 4x2 + 2x1 + 1x1
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 32 + 8 + 2 + 1);
    assert!(bytes.iter().all(|&v| v == 200));
}

#[test]
fn test_canvas_pot() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, vec![9u8; 3 * 3]).unwrap();

    let out = texel(&[
        "canvas", path_str(&input), "-W", "3", "-H", "3", "-f", "gray", "--pot", "--fill", "0,0,0", "-o", path_str(&output),
    ]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 16);
    assert_eq!(&bytes[..4], &[9, 9, 9, 0]);
    assert_eq!(&bytes[12..], &[0, 0, 0, 0]);
}

#[test]
fn test_dither_output_size() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, quad()).unwrap();

    let out = texel(&["dither", path_str(&input), "-W", "2", "-H", "2", "--bits", "4,4,4,4", "-o", path_str(&output)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    let bytes = std::fs::read(&output).unwrap();
    assert_eq!(bytes.len(), 8);
    // Opaque red packs to 0xF00F
    assert_eq!(u16::from_ne_bytes([bytes[0], bytes[1]]), 0xF00F);
}

#[test]
fn test_adjust_invert() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, [0u8, 100, 255]).unwrap();

    let out = texel(&["adjust", path_str(&input), "-W", "1", "-H", "1", "-f", "rgb", "--invert", "-o", path_str(&output)]);
    assert!(out.status.success(), "{}", String::from_utf8_lossy(&out.stderr));
    assert_eq!(std::fs::read(&output).unwrap(), vec![255, 155, 0]);
}

#[test]
fn test_short_file_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, [1u8, 2, 3]).unwrap();

    let out = texel(&["premultiply", path_str(&input), "-W", "2", "-H", "2", "-o", path_str(&output)]);
    assert!(!out.status.success());
    assert!(!output.exists());
}

#[test]
fn test_compressed_edit_rejected() {
    let dir = tempdir().unwrap();
    let input = dir.path().join("in.raw");
    let output = dir.path().join("out.raw");
    std::fs::write(&input, [0u8; 8]).unwrap();

    let out = texel(&["flip", path_str(&input), "-W", "4", "-H", "4", "-f", "DXT1_RGB", "--vertical", "-o", path_str(&output)]);
    assert!(!out.status.success());
}
