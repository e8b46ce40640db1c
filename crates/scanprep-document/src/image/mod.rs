// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Image module — decoding, grayscale conversion, and output encoding.

pub mod encode;
pub mod processor;

pub use encode::{ImageEncoder, PngEncoder};
pub use processor::ImageProcessor;
