// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image processor — decoding from disk or memory and conversion to the single
// luma channel both preprocessing routines start from.

use std::io::{BufRead, Cursor, Seek};

use image::metadata::Orientation;
use image::{DynamicImage, GrayImage, ImageDecoder, ImageReader, Luma, Rgb};
use scanprep_core::error::{Result, ScanprepError};
use scanprep_core::ImageDimensions;
use tracing::{debug, info, instrument};

/// A decoded input image awaiting preprocessing.
///
/// ```ignore
/// let gray = ImageProcessor::open("scan.png")?.to_luma();
/// ```
pub struct ImageProcessor {
    /// The decoded image, in whatever colour layout the file used.
    image: DynamicImage,
}

impl ImageProcessor {
    // -- Construction ---------------------------------------------------------

    /// Load an image from a file path.
    ///
    /// The format is sniffed from the file contents, so the extension does not
    /// need to match. EXIF orientation is applied.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn open(path: impl AsRef<std::path::Path>) -> Result<Self> {
        let path = path.as_ref();
        let reader = ImageReader::open(path).map_err(|err| {
            ScanprepError::ImageDecode(format!("failed to open {}: {}", path.display(), err))
        })?;
        let img = decode_oriented(reader).map_err(|detail| {
            ScanprepError::ImageDecode(format!("failed to decode {}: {}", path.display(), detail))
        })?;
        let dims = ImageDimensions::new(img.width(), img.height());
        info!(
            width = dims.width,
            height = dims.height,
            pixels = dims.area(),
            "Image loaded"
        );
        Self::checked(img)
    }

    /// Create a processor from raw encoded bytes (PNG, JPEG, etc.).
    #[instrument(skip(data), fields(data_len = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let img = decode_oriented(ImageReader::new(Cursor::new(data))).map_err(|detail| {
            ScanprepError::ImageDecode(format!("failed to decode image: {}", detail))
        })?;
        debug!(
            width = img.width(),
            height = img.height(),
            "Image decoded from bytes"
        );
        Self::checked(img)
    }

    /// Wrap an already-decoded `DynamicImage`.
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        Self::checked(image)
    }

    fn checked(image: DynamicImage) -> Result<Self> {
        if image.width() == 0 || image.height() == 0 {
            return Err(ScanprepError::ImageDecode(format!(
                "image has no pixels ({}x{})",
                image.width(),
                image.height()
            )));
        }
        Ok(Self { image })
    }

    // -- Accessors ------------------------------------------------------------

    pub fn dimensions(&self) -> ImageDimensions {
        ImageDimensions::new(self.image.width(), self.image.height())
    }

    // -- Conversion -----------------------------------------------------------

    /// Single-channel luma of the image. See [`luma_bt601`].
    pub fn to_luma(&self) -> GrayImage {
        luma_bt601(&self.image)
    }
}

/// Decode with a content-sniffed format and rotate/flip upright according to
/// the decoder's orientation metadata.
fn decode_oriented<R: BufRead + Seek>(
    reader: ImageReader<R>,
) -> std::result::Result<DynamicImage, String> {
    let reader = reader
        .with_guessed_format()
        .map_err(|err| format!("failed to read image header: {err}"))?;
    let mut decoder = reader.into_decoder().map_err(|err| err.to_string())?;
    let orientation = decoder.orientation().unwrap_or(Orientation::NoTransforms);
    let mut img = DynamicImage::from_decoder(decoder).map_err(|err| err.to_string())?;
    if orientation != Orientation::NoTransforms {
        debug!(?orientation, "Applying EXIF orientation");
        img.apply_orientation(orientation);
    }
    Ok(img)
}

/// Convert an image to 8-bit luma with the ITU-R BT.601 weights.
///
/// Uses 14-bit fixed point, `(4899 R + 9617 G + 1868 B + 8192) >> 14`, so
/// results agree bit-for-bit with OpenCV's `COLOR_BGR2GRAY`. The `image`
/// crate's own `to_luma8` uses Rec. 709 weights and would shift every
/// threshold downstream. Alpha is discarded.
pub fn luma_bt601(image: &DynamicImage) -> GrayImage {
    if let DynamicImage::ImageLuma8(gray) = image {
        return gray.clone();
    }

    let rgb = image.to_rgb8();
    GrayImage::from_fn(rgb.width(), rgb.height(), |x, y| {
        let Rgb([r, g, b]) = *rgb.get_pixel(x, y);
        let luma = (r as u32 * 4899 + g as u32 * 9617 + b as u32 * 1868 + 8192) >> 14;
        Luma([luma as u8])
    })
}
