// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Scanning pipeline — keypoint detection, the end-to-end document scanner,
// and diagnostic overlay rendering.

pub mod detect;
pub mod overlay;
pub mod scanner;

pub use detect::{FastDetector, KeypointDetector};
pub use overlay::render_overlay;
pub use scanner::{DocumentScanner, ScanOutcome, ScanReport};
