// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for scanprep.

use thiserror::Error;

/// Top-level error type for all preprocessing operations.
#[derive(Debug, Error)]
pub enum ScanprepError {
    /// The input could not be read or is not a decodable raster image.
    #[error("image decode failed: {0}")]
    ImageDecode(String),

    /// No contour survived the character size filter.
    #[error(
        "insufficient features: {found} contour(s) found, none at least {min_width}x{min_height} px"
    )]
    InsufficientFeatures {
        found: usize,
        min_width: u32,
        min_height: u32,
    },

    /// The output raster could not be encoded.
    #[error("image encoding failed: {0}")]
    Encode(String),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanprepError>;
