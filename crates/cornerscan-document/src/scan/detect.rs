// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Keypoint detection — produces candidate corner points for the quadrilateral
// search from an edge map.

use cornerscan_core::Point;
use cornerscan_core::config::DetectorConfig;
use image::GrayImage;
use imageproc::corners::{Corner, corners_fast9};
use tracing::{debug, instrument};

/// Source of candidate corner points.
///
/// The corner engine only consumes positions; any detector that yields
/// integer pixel coordinates can be plugged into the scanner.
pub trait KeypointDetector {
    fn detect(&self, image: &GrayImage) -> Vec<Point>;
}

/// FAST-9 keypoints, minus a border margin, capped to the strongest few.
#[derive(Debug, Clone)]
pub struct FastDetector {
    config: DetectorConfig,
}

impl FastDetector {
    pub fn new(config: DetectorConfig) -> Self {
        Self { config }
    }
}

impl Default for FastDetector {
    fn default() -> Self {
        Self::new(DetectorConfig::default())
    }
}

impl KeypointDetector for FastDetector {
    #[instrument(skip_all, fields(width = image.width(), height = image.height()))]
    fn detect(&self, image: &GrayImage) -> Vec<Point> {
        let (width, height) = image.dimensions();
        let border = self.config.border;
        let inside = |c: &Corner| {
            c.x >= border
                && c.y >= border
                && c.x.saturating_add(border) < width
                && c.y.saturating_add(border) < height
        };

        let mut corners: Vec<Corner> = corners_fast9(image, self.config.fast_threshold)
            .into_iter()
            .filter(inside)
            .collect();
        let found = corners.len();

        corners.sort_by(|a, b| {
            b.score
                .total_cmp(&a.score)
                .then(a.y.cmp(&b.y))
                .then(a.x.cmp(&b.x))
        });
        corners.truncate(self.config.max_candidates);

        debug!(found, kept = corners.len(), "FAST keypoints detected");
        corners
            .into_iter()
            .map(|c| Point::new(c.x as i32, c.y as i32))
            .collect()
    }
}
