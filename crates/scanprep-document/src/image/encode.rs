// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Output encoding for processed rasters.

use image::GrayImage;
use scanprep_core::error::{Result, ScanprepError};
use tracing::warn;

/// Encodes a finished grayscale raster into a byte buffer.
///
/// Both processors are generic over this trait so the encoding step can be
/// swapped out, e.g. to force an encoder failure in tests.
pub trait ImageEncoder: Send + Sync {
    fn encode(&self, image: &GrayImage) -> Result<Vec<u8>>;
}

/// 8-bit grayscale PNG encoder backed by the `image` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct PngEncoder;

impl ImageEncoder for PngEncoder {
    fn encode(&self, image: &GrayImage) -> Result<Vec<u8>> {
        let mut buffer = Vec::new();
        let encoder = image::codecs::png::PngEncoder::new(&mut buffer);
        image.write_with_encoder(encoder).map_err(|err| {
            ScanprepError::Encode(format!("PNG encoding failed: {}", err))
        })?;
        Ok(buffer)
    }
}

/// Encode `image`, collapsing an encoder failure into an empty buffer.
///
/// Other errors cannot occur here; callers that need the failure reason use
/// the encoder directly.
pub(crate) fn encode_or_empty<E: ImageEncoder>(encoder: &E, image: &GrayImage) -> Vec<u8> {
    match encoder.encode(image) {
        Ok(bytes) => bytes,
        Err(err) => {
            warn!(error = %err, "Encoding failed; returning empty output");
            Vec::new()
        }
    }
}
