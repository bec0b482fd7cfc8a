// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Unified error types for Cornerscan.

use thiserror::Error;

/// Top-level error type for all Cornerscan operations.
///
/// Out-of-range probe samples and the absence of a verified quadrilateral are
/// not errors: the former count as non-hits, the latter is reported through
/// the fallback candidate's provenance.
#[derive(Debug, Error)]
pub enum ScanError {
    // -- Input contract --
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("no corner candidates: {0}")]
    NoCandidates(String),

    #[error("pixel buffer size mismatch: expected a multiple of {expected} bytes, got {actual}")]
    BufferSize { expected: usize, actual: usize },

    #[error("invalid configuration: {0}")]
    InvalidConfig(String),

    // -- Image I/O --
    #[error("image processing failed: {0}")]
    ImageError(String),

    // -- Storage / persistence --
    #[error("file I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Alias used throughout the codebase.
pub type Result<T> = std::result::Result<T, ScanError>;
