// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for applications that show preprocessing
// failures to the person who supplied the scan.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::ScanprepError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The encoder failed; retrying may help.
    Transient,
    /// The user must supply a different or better image.
    ActionRequired,
    /// The input can never be processed as-is.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// Plain English summary (shown as a heading).
    pub message: String,
    /// What the user should try (shown as body text).
    pub suggestion: String,
    /// Whether repeating the same call could succeed.
    pub retriable: bool,
    pub severity: Severity,
}

/// Convert a `ScanprepError` into a `HumanError`.
pub fn humanize_error(err: &ScanprepError) -> HumanError {
    match err {
        ScanprepError::ImageDecode(detail) => humanize_decode_error(detail),

        ScanprepError::InsufficientFeatures {
            min_width,
            min_height,
            ..
        } => HumanError {
            message: "We couldn't find any characters in this image.".into(),
            suggestion: format!(
                "Make sure the writing is clearly visible and large enough (at least {min_width} by {min_height} pixels per character), then try again."
            ),
            retriable: false,
            severity: Severity::ActionRequired,
        },

        ScanprepError::Encode(detail) => HumanError {
            message: "We couldn't save the cleaned-up image.".into(),
            suggestion: format!("Try again. ({detail})"),
            retriable: true,
            severity: Severity::Transient,
        },
    }
}

/// Parse decoder details into human-readable messages.
fn humanize_decode_error(detail: &str) -> HumanError {
    let lower = detail.to_ascii_lowercase();

    if lower.contains("no such file") || lower.contains("not found") {
        HumanError {
            message: "We couldn't find that image.".into(),
            suggestion: "Check the file name and location, then try again.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("permission denied") {
        HumanError {
            message: "We aren't allowed to open that image.".into(),
            suggestion: "Check the file's permissions, or copy it somewhere you can read it.".into(),
            retriable: false,
            severity: Severity::ActionRequired,
        }
    } else if lower.contains("unsupported")
        || lower.contains("could not be determined")
        || lower.contains("not recognized")
    {
        HumanError {
            message: "This type of image isn't supported.".into(),
            suggestion: "Try saving the scan as a PNG or JPEG first.".into(),
            retriable: false,
            severity: Severity::Permanent,
        }
    } else {
        HumanError {
            message: "This image looks damaged.".into(),
            suggestion: format!("Try scanning or exporting the page again. (Detail: {detail})"),
            retriable: false,
            severity: Severity::Permanent,
        }
    }
}
