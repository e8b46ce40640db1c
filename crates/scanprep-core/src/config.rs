// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Fixed preprocessing constants. These are not a runtime configuration
// surface: the public processors always run with the defaults below.

use serde::{Deserialize, Serialize};

/// 3x3 sharpening kernel applied by the document sharpener. Sums to 1, so
/// flat regions pass through unchanged.
pub const SHARPEN_KERNEL: [[i32; 3]; 3] = [[0, -1, 0], [-1, 5, -1], [0, -1, 0]];

/// Step weights `(a, b, c)` of the 5x5 chamfer mask approximating the L2
/// metric: `a` for axial steps, `b` for diagonal steps and `c` for knight's
/// moves.
pub const CHAMFER_WEIGHTS: (f32, f32, f32) = (1.0, 1.4, 2.1969);

/// Parameters of the character isolation chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct IsolationParams {
    /// Contours with a narrower bounding box are treated as noise.
    pub min_char_width: u32,
    /// Contours with a shorter bounding box are treated as noise.
    pub min_char_height: u32,
    /// Side of the elliptical structuring element used for the opening.
    pub opening_kernel_size: u32,
    /// Number of 3x3 dilations applied to the convex hull mask.
    pub mask_dilate_iterations: u8,
}

impl Default for IsolationParams {
    fn default() -> Self {
        Self {
            min_char_width: 35,
            min_char_height: 100,
            opening_kernel_size: 7,
            mask_dilate_iterations: 2,
        }
    }
}
