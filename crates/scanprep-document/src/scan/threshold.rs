// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Global binarization with an automatically selected (Otsu) level.

use image::{GrayImage, Luma};
use imageproc::contrast::otsu_level;

/// Which side of the threshold becomes foreground (255).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Polarity {
    /// Pixels brighter than the level become 255.
    Normal,
    /// Pixels at or below the level become 255.
    Inverted,
}

/// Binarize `gray` at its Otsu level.
///
/// The level maximises the between-class variance of the two intensity groups
/// `<= t` and `> t`. Returns the level together with the 0/255 image.
pub fn otsu_binarize(gray: &GrayImage, polarity: Polarity) -> (u8, GrayImage) {
    let level = otsu_level(gray);
    (level, binarize(gray, level, polarity))
}

/// Binarize `gray` at a fixed `level`: a pixel is above the level when its
/// value is strictly greater than it.
pub fn binarize(gray: &GrayImage, level: u8, polarity: Polarity) -> GrayImage {
    let (on, off) = match polarity {
        Polarity::Normal => (255u8, 0u8),
        Polarity::Inverted => (0u8, 255u8),
    };

    let mut output = gray.clone();
    for pixel in output.pixels_mut() {
        *pixel = Luma([if pixel.0[0] > level { on } else { off }]);
    }
    output
}
