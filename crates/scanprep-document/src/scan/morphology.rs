// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Morphological operators: opening with an elliptical structuring element and
// square dilation of binary masks.

use image::{GrayImage, Luma};
use imageproc::distance_transform::Norm;
use imageproc::morphology::{Mask, dilate, grayscale_open};

/// Rasterise an elliptical structuring element inscribed in a `size` x `size`
/// square, row by row, the way OpenCV's `MORPH_ELLIPSE` does.
///
/// Each row `i` spans `c ± round(c * sqrt(1 - (i - r)^2 / r^2))` around the
/// centre column `c`, where `r = c = size / 2`. Set pixels are 255.
pub fn ellipse_element(size: u32) -> GrayImage {
    let radius = (size / 2) as i64;
    let centre = radius;
    let inv_r2 = if radius > 0 {
        1.0 / (radius * radius) as f64
    } else {
        0.0
    };

    let mut element = GrayImage::new(size, size);
    for row in 0..size as i64 {
        let dy = row - radius;
        if dy.abs() > radius {
            continue;
        }
        let dx = (centre as f64 * (((radius * radius - dy * dy) as f64) * inv_r2).sqrt())
            .round() as i64;
        let start = (centre - dx).max(0);
        let end = (centre + dx + 1).min(size as i64);
        for col in start..end {
            element.put_pixel(col as u32, row as u32, Luma([255u8]));
        }
    }
    element
}

/// Morphological opening (erosion then dilation) of `image` with the
/// `size` x `size` elliptical element.
///
/// Pixels outside the image are ignored by both the min and the max, so
/// foreground touching the border is not eroded by the border itself.
pub fn open_ellipse(image: &GrayImage, size: u32) -> GrayImage {
    let element = ellipse_element(size);
    let centre = (size / 2).min(u8::MAX as u32) as u8;
    let mask = Mask::from_image(&element, centre, centre);
    grayscale_open(image, &mask)
}

/// Dilate a binary mask `iterations` times with a 3x3 square element.
///
/// Repeated 3x3 dilation is the same as a single L-infinity dilation whose
/// radius is the iteration count.
pub fn dilate_square(mask: &GrayImage, iterations: u8) -> GrayImage {
    if iterations == 0 {
        return mask.clone();
    }
    dilate(mask, Norm::LInf, iterations)
}
