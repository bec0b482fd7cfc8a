// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Human-readable error messages for command-line users.
//
// Every technical error is mapped to plain English with a clear suggestion.

use crate::error::ScanError;

/// Severity of an error from the user's perspective.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Severity {
    /// The user must change an argument, file or setting.
    ActionRequired,
    /// Retrying with the same input will fail the same way.
    Permanent,
}

/// A human-readable error with plain English message and actionable suggestion.
#[derive(Debug, Clone)]
pub struct HumanError {
    /// One-line summary.
    pub message: String,
    /// What the user should try.
    pub suggestion: String,
    pub severity: Severity,
}

/// Convert a `ScanError` into a `HumanError`.
pub fn humanize_error(err: &ScanError) -> HumanError {
    match err {
        ScanError::NoCandidates(detail) => HumanError {
            message: "No corner candidates were found in the image.".into(),
            suggestion: format!(
                "Photograph the document against a contrasting background, or lower the detector threshold. ({detail})"
            ),
            severity: Severity::ActionRequired,
        },

        ScanError::InvalidInput(detail) => HumanError {
            message: "The input could not be used for scanning.".into(),
            suggestion: format!("Check the image and try again. ({detail})"),
            severity: Severity::Permanent,
        },

        ScanError::BufferSize { expected, actual } => HumanError {
            message: "The pixel data does not match the image width.".into(),
            suggestion: format!(
                "Supply RGBA8 data whose length is a multiple of {expected} bytes (got {actual})."
            ),
            severity: Severity::Permanent,
        },

        ScanError::InvalidConfig(detail) => HumanError {
            message: "A scan setting is out of range.".into(),
            suggestion: format!("Fix the setting and run again. ({detail})"),
            severity: Severity::ActionRequired,
        },

        ScanError::ImageError(detail) => HumanError {
            message: "The image could not be read or written.".into(),
            suggestion: format!("Use a PNG or JPEG file. ({detail})"),
            severity: Severity::ActionRequired,
        },

        ScanError::Io(io) => HumanError {
            message: "A file could not be accessed.".into(),
            suggestion: format!("Check the path and its permissions. ({io})"),
            severity: Severity::ActionRequired,
        },

        ScanError::Serialization(detail) => HumanError {
            message: "The configuration or report is not valid JSON.".into(),
            suggestion: format!("Compare the file with `cornerscan default-config`. ({detail})"),
            severity: Severity::ActionRequired,
        },
    }
}
