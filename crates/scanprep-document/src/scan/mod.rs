// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scan preprocessing — character isolation and document sharpening, plus the
// thresholding, distance, morphology and contour primitives they are built on.

pub mod contours;
pub mod distance;
pub mod isolate;
pub mod morphology;
pub mod sharpen;
pub mod threshold;

pub use isolate::{CharacterIsolator, IsolationStages};
pub use sharpen::DocumentSharpener;
