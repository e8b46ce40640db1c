// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Character isolation — separates character-sized strokes from a noisy
// background and masks everything outside their convex hull.

use std::path::Path;

use image::{DynamicImage, GrayImage};
use scanprep_core::error::{Result, ScanprepError};
use scanprep_core::{BoundingRect, IsolationParams};
use tracing::{debug, info, instrument};

use crate::image::encode::{ImageEncoder, PngEncoder, encode_or_empty};
use crate::image::processor::ImageProcessor;
use crate::scan::contours::{
    apply_mask, external_contours, fill_hull, filter_by_size, merged_hull,
};
use crate::scan::distance::{chamfer_distance, normalize_to_u8, value_range};
use crate::scan::morphology::{dilate_square, open_ellipse};
use crate::scan::threshold::{Polarity, otsu_binarize};

/// Intermediate rasters of one isolation run. All share the input's size.
#[derive(Debug, Clone)]
pub struct IsolationStages {
    /// Inverted Otsu binarization of the input (dark strokes are 255).
    pub binary: GrayImage,
    /// Otsu binarization of the normalised distance field after opening.
    pub opening: GrayImage,
    /// Filled convex hull of the kept contours, after dilation.
    pub hull_mask: GrayImage,
    /// `opening` restricted to `hull_mask`.
    pub output: GrayImage,
    /// Bounding boxes of the contours accepted as characters.
    pub characters: Vec<BoundingRect>,
}

/// Isolates characters from a noisy background ahead of OCR.
///
/// Tuned for one known sample scan (large characters on an unclear
/// background); other inputs are processed but may not isolate anything
/// meaningful. The chain is:
///
/// 1. BT.601 grayscale
/// 2. Inverted Otsu binarization
/// 3. Chamfer (5x5, L2) distance transform
/// 4. Min-max normalisation to 8 bits, then Otsu binarization
/// 5. Opening with a 7x7 ellipse
/// 6. External contours, keeping those at least 35x100 px
/// 7. Convex hull of the kept contours, filled and dilated twice (3x3)
/// 8. Opening AND hull mask, encoded as PNG
#[derive(Debug, Clone)]
pub struct CharacterIsolator<E = PngEncoder> {
    params: IsolationParams,
    encoder: E,
}

impl CharacterIsolator<PngEncoder> {
    pub fn new() -> Self {
        Self::with_encoder(PngEncoder)
    }
}

impl Default for CharacterIsolator<PngEncoder> {
    fn default() -> Self {
        Self::new()
    }
}

impl<E: ImageEncoder> CharacterIsolator<E> {
    /// Isolator that hands its final raster to `encoder`.
    pub fn with_encoder(encoder: E) -> Self {
        Self {
            params: IsolationParams::default(),
            encoder,
        }
    }

    pub fn params(&self) -> &IsolationParams {
        &self.params
    }

    // -- Path / byte entry points ---------------------------------------------

    /// Isolate the characters of the image at `path` and return PNG bytes.
    ///
    /// An encoder failure yields `Ok` with an empty buffer; decode failures and
    /// inputs without any character-sized contour are errors.
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn isolate(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let stages = self.run(&ImageProcessor::open(path)?)?;
        Ok(encode_or_empty(&self.encoder, &stages.output))
    }

    /// Like [`isolate`](Self::isolate), but an encoder failure is returned as
    /// [`ScanprepError::Encode`].
    #[instrument(skip_all, fields(path = %path.as_ref().display()))]
    pub fn try_isolate(&self, path: impl AsRef<Path>) -> Result<Vec<u8>> {
        let stages = self.run(&ImageProcessor::open(path)?)?;
        self.encoder.encode(&stages.output)
    }

    /// Isolate characters from an encoded image held in memory.
    #[instrument(skip(self, data), fields(data_len = data.len()))]
    pub fn isolate_bytes(&self, data: &[u8]) -> Result<Vec<u8>> {
        let stages = self.run(&ImageProcessor::from_bytes(data)?)?;
        Ok(encode_or_empty(&self.encoder, &stages.output))
    }

    // -- Raster pipeline ------------------------------------------------------

    /// Run the full chain on a decoded image, keeping every intermediate.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn isolate_image(&self, image: &DynamicImage) -> Result<IsolationStages> {
        self.run(&ImageProcessor::from_dynamic(image.clone())?)
    }

    fn run(&self, processor: &ImageProcessor) -> Result<IsolationStages> {
        let dims = processor.dimensions();
        let gray = processor.to_luma();

        // Steps 1-2: strokes become foreground.
        let (level, binary) = otsu_binarize(&gray, Polarity::Inverted);
        debug!(level, "Inverted Otsu binarization");

        // Steps 3-4: distance to background, back to 8 bits, re-binarized.
        let distance = chamfer_distance(&binary);
        let (min_dist, max_dist) = value_range(&distance);
        debug!(min_dist, max_dist, "Distance transform computed");
        let normalized = normalize_to_u8(&distance);
        let (dist_level, dist_binary) = otsu_binarize(&normalized, Polarity::Normal);
        debug!(dist_level, "Distance field binarized");

        // Step 5: break thin bridges between touching strokes.
        let opening = open_ellipse(&dist_binary, self.params.opening_kernel_size);

        // Step 6: character-sized external contours only.
        let contours = external_contours(&opening);
        let found = contours.len();
        let kept = filter_by_size(
            contours,
            self.params.min_char_width,
            self.params.min_char_height,
        );
        debug!(found, kept = kept.len(), "Contours filtered by size");

        if kept.is_empty() {
            return Err(ScanprepError::InsufficientFeatures {
                found,
                min_width: self.params.min_char_width,
                min_height: self.params.min_char_height,
            });
        }

        // Step 7: one mask covering all characters.
        let hull = merged_hull(kept.iter().map(|(contour, _)| contour));
        debug!(hull_points = hull.len(), "Convex hull computed");
        let hull_mask = dilate_square(
            &fill_hull(dims, &hull),
            self.params.mask_dilate_iterations,
        );

        // Step 8.
        let output = apply_mask(&opening, &hull_mask);
        let characters: Vec<BoundingRect> = kept.into_iter().map(|(_, rect)| rect).collect();

        info!(
            characters = characters.len(),
            width = dims.width,
            height = dims.height,
            "Characters isolated"
        );

        Ok(IsolationStages {
            binary,
            opening,
            hull_mask,
            output,
            characters,
        })
    }
}
