// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Distance transform with a 5x5 chamfer approximation of the L2 metric, and
// the min-max normalisation back to 8 bits.

use image::{GrayImage, ImageBuffer, Luma};
use scanprep_core::config::CHAMFER_WEIGHTS;

/// Per-pixel distance field.
pub type DistanceMap = ImageBuffer<Luma<f32>, Vec<f32>>;

/// Fractional bits of the fixed-point distances accumulated by
/// [`chamfer_distance`].
const FIXED_SHIFT: u32 = 16;

/// A chamfer weight rounded to 16.16 fixed point.
fn fixed_weight(weight: f32) -> u32 {
    (weight as f64 * (1u32 << FIXED_SHIFT) as f64).round() as u32
}

/// Distance of every non-zero pixel of `binary` to the nearest zero pixel.
///
/// Two raster passes (forward, then backward) propagate distances through the
/// 5x5 chamfer mask given by [`CHAMFER_WEIGHTS`]. The weights are rounded to
/// 16.16 fixed point and summed as integers (1.4 becomes 91750 / 65536), which
/// is how OpenCV's `DIST_MASK_5` transform accumulates them. Zero pixels get
/// distance 0. Pixels outside the image never count as background, so an
/// image without any zero pixel is left at `f32::INFINITY` everywhere.
pub fn chamfer_distance(binary: &GrayImage) -> DistanceMap {
    let (width, height) = binary.dimensions();
    let (w, h) = (width as i64, height as i64);
    let (a, b, c) = CHAMFER_WEIGHTS;
    let (a, b, c) = (fixed_weight(a), fixed_weight(b), fixed_weight(c));

    // Half of the mask: neighbours already visited by a forward raster scan.
    // The backward pass uses the mirrored offsets.
    let forward: [(i64, i64, u32); 8] = [
        (-2, -1, c),
        (-2, 1, c),
        (-1, -2, c),
        (-1, -1, b),
        (-1, 0, a),
        (-1, 1, b),
        (-1, 2, c),
        (0, -1, a),
    ];

    // u32::MAX marks "no background reached yet".
    let mut dist: Vec<u32> = binary
        .pixels()
        .map(|p| if p.0[0] == 0 { 0 } else { u32::MAX })
        .collect();

    let relax = |dist: &mut [u32], x: i64, y: i64, sign: i64| {
        let idx = (y * w + x) as usize;
        if dist[idx] == 0 {
            return;
        }
        let mut best = dist[idx];
        for &(dy, dx, weight) in &forward {
            let (ny, nx) = (y + sign * dy, x + sign * dx);
            if ny < 0 || ny >= h || nx < 0 || nx >= w {
                continue;
            }
            let candidate = dist[(ny * w + nx) as usize].saturating_add(weight);
            if candidate < best {
                best = candidate;
            }
        }
        dist[idx] = best;
    };

    for y in 0..h {
        for x in 0..w {
            relax(&mut dist[..], x, y, 1);
        }
    }
    for y in (0..h).rev() {
        for x in (0..w).rev() {
            relax(&mut dist[..], x, y, -1);
        }
    }

    let scale = 1.0 / (1u32 << FIXED_SHIFT) as f32;
    let field: Vec<f32> = dist
        .into_iter()
        .map(|t| if t == u32::MAX { f32::INFINITY } else { t as f32 * scale })
        .collect();
    DistanceMap::from_raw(width, height, field)
        .unwrap_or_else(|| DistanceMap::new(width, height))
}

/// Smallest and largest value in the map.
pub fn value_range(map: &DistanceMap) -> (f32, f32) {
    map.pixels().fold((f32::INFINITY, f32::NEG_INFINITY), |(lo, hi), p| {
        (lo.min(p.0[0]), hi.max(p.0[0]))
    })
}

/// Min-max normalise the map to [0, 1], scale by 255 and truncate to `u8`.
///
/// The affine factors are derived in `f64` and applied in `f32`, matching
/// OpenCV's `normalize` into a float image. A flat map (including one that is
/// unbounded everywhere) becomes all zeros.
pub fn normalize_to_u8(map: &DistanceMap) -> GrayImage {
    let (lo, hi) = value_range(map);
    let span = hi as f64 - lo as f64;
    if !span.is_finite() || span <= f64::EPSILON {
        return GrayImage::new(map.width(), map.height());
    }

    let alpha = 1.0 / span;
    let beta = -(lo as f64) * alpha;
    let (alpha, beta) = (alpha as f32, beta as f32);
    GrayImage::from_fn(map.width(), map.height(), |x, y| {
        let unit = map.get_pixel(x, y).0[0] * alpha + beta;
        Luma([(unit * 255.0) as u8])
    })
}
