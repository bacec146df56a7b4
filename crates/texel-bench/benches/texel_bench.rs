//! Benchmarks for texel operations.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use std::hint::black_box;

use texel_core::{codec, Color, Image, PixelFormat, Rect};
use texel_ops::{color, composite, mipmap, resize, transform};

/// Opaque-ish test pattern with a varying alpha ramp.
fn pattern(size: u32, alpha: bool) -> Image {
    let colors: Vec<Color> = (0..size * size)
        .map(|i| {
            let (x, y) = (i % size, i / size);
            let a = if alpha { (x * 255 / size.max(1)) as u8 } else { 255 };
            Color::new(x as u8, y as u8, (x ^ y) as u8, a)
        })
        .collect();
    let img = Image::from_colors(&colors, size, size).expect("pattern");
    if alpha {
        img
    } else {
        let mut rgb = img;
        color::convert(&mut rgb, PixelFormat::R8G8B8).expect("rgb");
        rgb
    }
}

/// Benchmark blit: the row-copy path versus per-pixel blending.
fn bench_blit(c: &mut Criterion) {
    let mut group = c.benchmark_group("blit");

    for size in [64u32, 256, 1024] {
        group.throughput(Throughput::Elements((size * size) as u64));
        let rect = Rect::from_size(size, size);

        let opaque = pattern(size, false);
        let mut dst = Image::new(size, size, PixelFormat::R8G8B8);
        group.bench_with_input(BenchmarkId::new("copy_rows", size), &opaque, |b, src| {
            b.iter(|| composite::blit(&mut dst, black_box(src), rect, rect, Color::WHITE))
        });

        let blended = pattern(size, true);
        let mut dst = Image::filled(size, size, Color::GRAY);
        group.bench_with_input(BenchmarkId::new("alpha_blend", size), &blended, |b, src| {
            b.iter(|| composite::blit(&mut dst, black_box(src), rect, rect, Color::WHITE))
        });
    }

    group.finish();
}

/// Benchmark cubic and nearest-neighbor resizing.
fn bench_resize(c: &mut Criterion) {
    let mut group = c.benchmark_group("resize");
    let src = pattern(512, true);

    for target in [256u32, 1024] {
        group.bench_with_input(BenchmarkId::new("cubic", target), &target, |b, &t| {
            b.iter(|| {
                let mut img = src.clone();
                resize::resize(&mut img, t, t).map(|_| img)
            })
        });
        group.bench_with_input(BenchmarkId::new("nearest", target), &target, |b, &t| {
            b.iter(|| {
                let mut img = src.clone();
                resize::resize_nn(&mut img, t, t).map(|_| img)
            })
        });
    }

    group.finish();
}

/// Benchmark format conversion and normalized decoding.
fn bench_convert(c: &mut Criterion) {
    let mut group = c.benchmark_group("convert");
    let src = pattern(512, true);
    group.throughput(Throughput::Elements(512 * 512));

    for format in [PixelFormat::R5G6B5, PixelFormat::R4G4B4A4, PixelFormat::R32G32B32A32] {
        group.bench_with_input(BenchmarkId::new("rgba8_to", format), &format, |b, &f| {
            b.iter(|| {
                let mut img = src.clone();
                color::convert(&mut img, f).map(|_| img)
            })
        });
    }

    group.bench_function("to_normalized", |b| b.iter(|| codec::to_normalized(black_box(&src))));

    group.bench_function("dither_565", |b| {
        b.iter(|| {
            let mut img = src.clone();
            color::dither(&mut img, 5, 6, 5, 0).map(|_| img)
        })
    });

    group.finish();
}

/// Benchmark mip chain generation and quarter turns.
fn bench_mipmaps(c: &mut Criterion) {
    let mut group = c.benchmark_group("mipmaps");
    let src = pattern(512, true);

    group.bench_function("generate_512", |b| {
        b.iter(|| {
            let mut img = src.clone();
            mipmap::generate_mipmaps(&mut img).map(|_| img)
        })
    });

    group.bench_function("rotate_cw_512", |b| {
        b.iter(|| {
            let mut img = src.clone();
            transform::rotate_cw(&mut img).map(|_| img)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_blit, bench_resize, bench_convert, bench_mipmaps);
criterion_main!(benches);
