// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// cornerscan-document — Document corner resolution for photographed pages.
//
// Provides the quadrilateral corner engine (candidate ranking, edge probing,
// combinatorial search, polygon area), image preparation (contrast, high-pass,
// brightness, blur, Canny edges), keypoint detection, overlay rendering, and
// an end-to-end scanner tying them together.

pub mod image;
pub mod quad;
pub mod scan;

// Re-export the primary entry points so callers can use `cornerscan_document::DocumentScanner` etc.
pub use crate::image::processor::ImageProcessor;
pub use quad::area::quad_area;
pub use quad::probe::probe_edge;
pub use quad::rank::rank_corners;
pub use quad::search::{QuadSearch, SearchTrace};
pub use scan::detect::{FastDetector, KeypointDetector};
pub use scan::overlay::render_overlay;
pub use scan::scanner::{DocumentScanner, ScanOutcome, ScanReport};
