// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document sharpening — light 3x3 edge enhancement of a grayscale scan with
// no resizing, denoising or thresholding.

use std::path::Path;

use image::{DynamicImage, GrayImage, Luma};
use scanprep_core::config::SHARPEN_KERNEL;
use scanprep_core::error::Result;
use tracing::{debug, info, instrument};

use crate::image::encode::{ImageEncoder, PngEncoder, encode_or_empty};
use crate::image::processor::ImageProcessor;

/// Sharpens document scans with the fixed kernel
/// `[[0,-1,0],[-1,5,-1],[0,-1,0]]`.
#[derive(Debug, Clone, Default)]
pub struct DocumentSharpener<E = PngEncoder> {
    encoder: E,
}

impl DocumentSharpener<PngEncoder> {
    pub fn new() -> Self {
        Self::with_encoder(PngEncoder)
    }
}

impl<E: ImageEncoder> DocumentSharpener<E> {
    pub fn with_encoder(encoder: E) -> Self {
        Self { encoder }
    }

    /// Sharpen the image at `path` and return PNG bytes, or an empty buffer if
    /// encoding fails.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn sharpen(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let sharpened = self.run(&ImageProcessor::open(path)?);
        Ok(encode_or_empty(&self.encoder, &sharpened))
    }

    /// Like [`sharpen`](Self::sharpen), but an encoder failure is returned as
    /// an error.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn try_sharpen(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let sharpened = self.run(&ImageProcessor::open(path)?);
        self.encoder.encode(&sharpened)
    }

    /// Sharpen an encoded image held in memory.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn sharpen_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let sharpened = self.run(&ImageProcessor::from_bytes(data)?);
        Ok(encode_or_empty(&self.encoder, &sharpened))
    }

    /// Sharpen a decoded image, returning the grayscale result.
    pub fn sharpen_image(&self, image: &DynamicImage) -> Result<GrayImage> {
        Ok(self.run(&ImageProcessor::from_dynamic(image.clone())?))
    }

    fn run(&self, processor: &ImageProcessor) -> GrayImage {
        let gray = processor.to_luma();
        let sharpened = convolve3x3(&gray, &SHARPEN_KERNEL);
        info!(
            width = sharpened.width(),
            height = sharpened.height(),
            "Document sharpened"
        );
        sharpened
    }
}

/// Correlate `gray` with an integer 3x3 kernel, saturating to `[0, 255]`.
///
/// Out-of-range neighbours are mirrored about the edge pixel without repeating
/// it (`gfedcb|abcdefgh|gfedcba`), OpenCV's default border for `filter2D`.
pub fn convolve3x3(gray: &GrayImage, kernel: &[[i32; 3]; 3]) -> GrayImage {
    let (width, height) = gray.dimensions();
    debug!(width, height, "Applying 3x3 kernel");

    GrayImage::from_fn(width, height, |x, y| {
        let mut acc = 0i32;
        for (ky, row) in kernel.iter().enumerate() {
            let sy = reflect_101(y as i64 + ky as i64 - 1, height);
            for (kx, &weight) in row.iter().enumerate() {
                if weight == 0 {
                    continue;
                }
                let sx = reflect_101(x as i64 + kx as i64 - 1, width);
                acc += weight * gray.get_pixel(sx, sy).0[0] as i32;
            }
        }
        Luma([acc.clamp(0, 255) as u8])
    })
}

/// Map a possibly out-of-range coordinate into `0..len` by reflect-101.
fn reflect_101(pos: i64, len: u32) -> u32 {
    let len = len as i64;
    if len == 1 {
        return 0;
    }
    let period = 2 * (len - 1);
    let mut p = pos.rem_euclid(period);
    if p >= len {
        p = period - p;
    }
    p as u32
}
