// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Cornerscan — Core types, configuration and error definitions shared across
// all crates.

pub mod config;
pub mod error;
pub mod human_errors;
pub mod types;

pub use config::{MAX_DETECTOR_BORDER, MAX_PROBE_DISTANCE, ScanConfig};
pub use error::ScanError;
pub use types::*;
