// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// End-to-end tests of the path-based preprocessing entry points.

use std::path::{Path, PathBuf};

use image::{DynamicImage, GrayImage, Luma, Rgb, RgbImage};
use scanprep_core::ScanprepError;
use scanprep_document::{
    CharacterIsolator, DocumentSharpener, ImageEncoder, isolate_characters, sharpen_document,
};
use tempfile::TempDir;

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .with_test_writer()
        .try_init();
}

/// Colour sample resembling the documented asset: two tall dark strokes and
/// some small blotches on a light, slightly uneven background.
fn sample_scan() -> DynamicImage {
    let (width, height) = (260u32, 250u32);
    let mut img = RgbImage::from_fn(width, height, |x, y| {
        let shade = 225 + ((x / 16 + y / 16) % 2) as u8 * 8;
        Rgb([shade, shade, shade - 5])
    });
    let mut paint = |x0: u32, y0: u32, w: u32, h: u32| {
        for y in y0..y0 + h {
            for x in x0..x0 + w {
                img.put_pixel(x, y, Rgb([25, 20, 30]));
            }
        }
    };
    paint(20, 40, 70, 170);
    paint(170, 40, 70, 170);
    paint(120, 20, 8, 8);
    paint(125, 220, 12, 6);
    DynamicImage::ImageRgb8(img)
}

fn write_png(dir: &TempDir, name: &str, image: &DynamicImage) -> PathBuf {
    let path = dir.path().join(name);
    image.save(&path).expect("write fixture");
    path
}

fn png_bytes(image: &DynamicImage) -> Vec<u8> {
    let mut bytes = Vec::new();
    image
        .write_to(&mut std::io::Cursor::new(&mut bytes), image::ImageFormat::Png)
        .expect("encode fixture");
    bytes
}

fn decode(bytes: &[u8]) -> GrayImage {
    image::load_from_memory(bytes).expect("decode output").to_luma8()
}

struct FailingEncoder;

impl ImageEncoder for FailingEncoder {
    fn encode(&self, _image: &GrayImage) -> scanprep_core::error::Result<Vec<u8>> {
        Err(ScanprepError::Encode("forced failure".into()))
    }
}

// -- Character isolation ------------------------------------------------------

#[test]
fn isolation_returns_png_of_input_size() {
    init_tracing();
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "before.png", &sample_scan());

    let bytes = isolate_characters(&path).expect("isolate");
    assert!(!bytes.is_empty());

    let out = decode(&bytes);
    assert_eq!(out.dimensions(), (260, 250));
    assert!(out.pixels().any(|p| p.0[0] == 255));
    assert!(out.pixels().all(|p| p.0[0] == 0 || p.0[0] == 255));
}

#[test]
fn isolation_is_deterministic() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "before.png", &sample_scan());

    let first = isolate_characters(&path).expect("first");
    let second = isolate_characters(&path).expect("second");
    assert_eq!(first, second);
}

#[test]
fn isolation_output_is_within_opening() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "before.png", &sample_scan());

    let isolator = CharacterIsolator::new();
    let bytes = isolator.isolate(&path).expect("isolate");
    let stages = isolator
        .isolate_image(&image::open(&path).expect("reopen"))
        .expect("stages");

    let out = decode(&bytes);
    assert_eq!(out, stages.output);
    for (x, y, p) in out.enumerate_pixels() {
        if p.0[0] != 0 {
            assert_ne!(stages.opening.get_pixel(x, y).0[0], 0);
        }
    }
}

#[test]
fn isolation_of_blank_page_is_an_error() {
    let dir = TempDir::new().expect("tempdir");
    for (name, level) in [("white.png", 255u8), ("black.png", 0u8)] {
        let blank = DynamicImage::ImageLuma8(GrayImage::from_pixel(150, 150, Luma([level])));
        let path = write_png(&dir, name, &blank);

        let err = isolate_characters(&path).expect_err("no characters");
        assert!(
            matches!(err, ScanprepError::InsufficientFeatures { .. }),
            "{} gave {:?}",
            name,
            err
        );
    }
}

#[test]
fn isolation_of_missing_file_is_decode_error() {
    let err = isolate_characters(Path::new("/nonexistent/scanprep/before.png"))
        .expect_err("missing file");
    assert!(matches!(err, ScanprepError::ImageDecode(_)));
}

#[test]
fn isolation_encoder_failure_contract() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "before.png", &sample_scan());
    let isolator = CharacterIsolator::with_encoder(FailingEncoder);

    assert_eq!(isolator.isolate(&path).expect("empty on failure"), Vec::<u8>::new());
    assert!(matches!(
        isolator.try_isolate(&path),
        Err(ScanprepError::Encode(_))
    ));
}

// -- Document sharpening ------------------------------------------------------

#[test]
fn sharpening_keeps_dimensions() {
    init_tracing();
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "scan.png", &sample_scan());

    let out = decode(&sharpen_document(&path).expect("sharpen"));
    assert_eq!(out.dimensions(), (260, 250));
}

#[test]
fn sharpening_flat_page_is_identity() {
    let dir = TempDir::new().expect("tempdir");
    let flat = DynamicImage::ImageLuma8(GrayImage::from_pixel(64, 48, Luma([181u8])));
    let path = write_png(&dir, "flat.png", &flat);

    let out = decode(&sharpen_document(&path).expect("sharpen"));
    assert_eq!(out, GrayImage::from_pixel(64, 48, Luma([181u8])));
}

#[test]
fn sharpening_is_deterministic() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "scan.png", &sample_scan());
    assert_eq!(
        sharpen_document(&path).expect("first"),
        sharpen_document(&path).expect("second")
    );
}

#[test]
fn sharpening_encoder_failure_contract() {
    let dir = TempDir::new().expect("tempdir");
    let path = write_png(&dir, "scan.png", &sample_scan());
    let sharpener = DocumentSharpener::with_encoder(FailingEncoder);

    assert!(sharpener.sharpen(&path).expect("empty on failure").is_empty());
    assert!(matches!(
        sharpener.try_sharpen(&path),
        Err(ScanprepError::Encode(_))
    ));
}

#[test]
fn sharpening_undecodable_file_is_decode_error() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("scan.png");
    std::fs::write(&path, b"not a png at all").expect("write");

    let err = sharpen_document(&path).expect_err("garbage");
    assert!(matches!(err, ScanprepError::ImageDecode(_)));
}

#[test]
fn format_is_detected_from_contents_not_extension() {
    let dir = TempDir::new().expect("tempdir");
    let page = DynamicImage::ImageLuma8(GrayImage::from_fn(20, 20, |x, _| {
        Luma([if x < 10 { 60 } else { 200 }])
    }));
    let bytes = png_bytes(&page);
    let expected = decode(&sharpen_document(write_png(&dir, "scan.png", &page)).expect("png"));

    for name in ["scan", "scan.tmp", "scan.jpg"] {
        let path = dir.path().join(name);
        std::fs::write(&path, &bytes).expect("write");

        let out = sharpen_document(&path)
            .unwrap_or_else(|err| panic!("{} gave {:?}", name, err));
        assert_eq!(decode(&out), expected, "{}", name);
    }
}

#[test]
fn isolation_accepts_extensionless_path() {
    let dir = TempDir::new().expect("tempdir");
    let path = dir.path().join("before");
    std::fs::write(&path, png_bytes(&sample_scan())).expect("write");

    let out = decode(&isolate_characters(&path).expect("isolate"));
    assert_eq!(out.dimensions(), (260, 250));
}
