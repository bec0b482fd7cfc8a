// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Document scanner — edge map, keypoints, corner ranking and quadrilateral
// search in one call.

use cornerscan_core::error::{Result, ScanError};
use cornerscan_core::{PixelView, Point, QuadrilateralCandidate, RankedCorners, ScanConfig};
use image::DynamicImage;
use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use crate::image::processor::ImageProcessor;
use crate::quad::rank::rank_corners;
use crate::quad::search::QuadSearch;
use crate::scan::detect::{FastDetector, KeypointDetector};

/// How much to trust the accepted quadrilateral.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ScanOutcome {
    /// All four edges were confirmed against the edge map.
    Verified,
    /// No combination verified; the rank-0 corners were used as-is.
    Fallback,
    /// The accepted quadrilateral covers less than the configured minimum
    /// fraction of the image.
    Degenerate,
}

/// Everything a scan produced, for rendering and logging.
#[derive(Debug, Clone, Serialize)]
pub struct ScanReport {
    pub width: u32,
    pub height: u32,
    /// Raw detector output.
    pub candidates: Vec<Point>,
    pub ranked: RankedCorners,
    /// Every attempted quadrilateral, ending with the accepted one.
    pub trace: Vec<QuadrilateralCandidate>,
    pub accepted: QuadrilateralCandidate,
    pub area: f64,
    pub outcome: ScanOutcome,
}

/// Locates the four corners of a photographed document.
pub struct DocumentScanner {
    config: ScanConfig,
    detector: Box<dyn KeypointDetector + Send + Sync>,
}

impl DocumentScanner {
    /// Create a scanner using the FAST keypoint detector.
    pub fn new(config: ScanConfig) -> Result<Self> {
        config.validate()?;
        let detector = Box::new(FastDetector::new(config.detector.clone()));
        Ok(Self { config, detector })
    }

    /// Replace the keypoint detector.
    pub fn with_detector(mut self, detector: impl KeypointDetector + Send + Sync + 'static) -> Self {
        self.detector = Box::new(detector);
        self
    }

    pub fn config(&self) -> &ScanConfig {
        &self.config
    }

    /// Prepare an edge map from a photograph, detect keypoints on it, and
    /// resolve the document corners.
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    pub fn scan_image(&self, image: &DynamicImage) -> Result<ScanReport> {
        let edges = ImageProcessor::from_dynamic(image.clone()).edge_map(&self.config.preprocess);

        let candidates = self.detector.detect(&edges.as_dynamic().to_luma8());
        if candidates.is_empty() {
            return Err(ScanError::NoCandidates(
                "no corner candidates detected in image".into(),
            ));
        }
        info!(candidates = candidates.len(), "Corner candidates detected");

        let rgba = edges.to_rgba_image();
        let view = PixelView::new(rgba.as_raw(), rgba.width())?;
        self.scan_edges(view, &candidates)
    }

    /// Resolve corners from an already edge-highlighted RGBA8 buffer and
    /// externally detected candidates.
    #[instrument(skip_all, fields(width = view.width(), height = view.height(), candidates = candidates.len()))]
    pub fn scan_edges(&self, view: PixelView<'_>, candidates: &[Point]) -> Result<ScanReport> {
        let search = &self.config.search;
        let ranked = rank_corners(candidates, search.point_limit_per_corner)?;
        let trace = QuadSearch::from_config(search).run(&view, &ranked);

        let accepted = trace.accepted().clone();
        let image_area = view.width() as f64 * view.height() as f64;
        let min_area = search.min_area_fraction * image_area;

        let outcome = if accepted.area < min_area {
            warn!(
                area = accepted.area,
                min_area, "Accepted quadrilateral is degenerate"
            );
            ScanOutcome::Degenerate
        } else if accepted.is_fallback() {
            ScanOutcome::Fallback
        } else {
            ScanOutcome::Verified
        };

        debug!(
            attempts = trace.len(),
            top_left = %accepted.top_left,
            top_right = %accepted.top_right,
            bottom_right = %accepted.bottom_right,
            bottom_left = %accepted.bottom_left,
            "Document corners resolved"
        );
        info!(?outcome, area = accepted.area, "Scan complete");

        Ok(ScanReport {
            width: view.width(),
            height: view.height(),
            candidates: candidates.to_vec(),
            ranked,
            area: accepted.area,
            accepted,
            trace: trace.into_candidates(),
            outcome,
        })
    }
}
