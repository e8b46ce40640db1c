// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// scanprep-document — OCR preprocessing of scanned images.
//
// Provides character isolation (separating character-sized strokes from a
// noisy background) and light document sharpening. Both read an image, apply
// a fixed transform chain, and return PNG bytes.

pub mod image;
pub mod scan;

use std::path::Path;

use scanprep_core::error::Result;

// Re-export the primary structs so callers can use `scanprep_document::CharacterIsolator` etc.
pub use crate::image::encode::{ImageEncoder, PngEncoder};
pub use crate::image::processor::ImageProcessor;
pub use scan::isolate::{CharacterIsolator, IsolationStages};
pub use scan::sharpen::DocumentSharpener;

/// Isolate the characters of the image at `path`; PNG bytes, or an empty
/// buffer if encoding fails.
pub fn isolate_characters(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    CharacterIsolator::new().isolate(path)
}

/// Sharpen the document scan at `path`; PNG bytes, or an empty buffer if
/// encoding fails.
pub fn sharpen_document(path: impl AsRef<Path>) -> Result<Vec<u8>> {
    DocumentSharpener::new().sharpen(path)
}
