// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Edge proximity probe — walks diagonal rings outward from a point looking for
// a bright (edge) pixel in an edge-highlighted buffer.

use cornerscan_core::{EdgeProbeResult, EdgeProbeSample, MAX_PROBE_DISTANCE, PixelView, Point};
use tracing::{trace, warn};

/// Luma limit a sample must strictly exceed for `threshold_percent`.
pub fn luma_limit(threshold_percent: u8) -> f64 {
    255.0 * threshold_percent as f64 / 100.0
}

/// Probe for an edge within `max_distance` radii of `point`.
///
/// At radius `i` the four diagonal offsets `(x ± i, y ± i)` are sampled and the
/// mean of their R, G, B channels compared against
/// `255 * threshold_percent / 100`. The walk stops at the first radius where
/// any sample exceeds the limit. Samples outside the buffer count as non-hits.
///
/// At most [`MAX_PROBE_DISTANCE`] radii are walked. Offsets saturate at the
/// `i32` limits, which lie outside any buffer.
pub fn probe_edge(
    view: &PixelView<'_>,
    point: Point,
    max_distance: u32,
    threshold_percent: u8,
) -> EdgeProbeResult {
    let limit = luma_limit(threshold_percent);
    if max_distance > MAX_PROBE_DISTANCE {
        warn!(max_distance, cap = MAX_PROBE_DISTANCE, "Probe distance clamped");
    }
    let radii = max_distance.min(MAX_PROBE_DISTANCE) as i32;
    let mut samples = Vec::new();

    for i in 0..radii {
        let sample = EdgeProbeSample {
            pos_x: point.x.saturating_add(i),
            neg_x: point.x.saturating_sub(i),
            pos_y: point.y.saturating_add(i),
            neg_y: point.y.saturating_sub(i),
        };
        samples.push(sample);

        let hit = sample
            .positions()
            .iter()
            .any(|p| view.luma(p.x, p.y).is_some_and(|luma| luma > limit));
        if hit {
            trace!(point = %point, radius = i, "Edge hit");
            return EdgeProbeResult {
                point,
                hit_edge: true,
                samples,
            };
        }
    }

    EdgeProbeResult {
        point,
        hit_edge: false,
        samples,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// A black RGBA buffer with the listed pixels set to `value`.
    fn buffer(width: u32, height: u32, lit: &[(u32, u32)], value: u8) -> Vec<u8> {
        let mut data = vec![0u8; (width * height * 4) as usize];
        for pixel in data.chunks_exact_mut(4) {
            pixel[3] = 255;
        }
        for &(x, y) in lit {
            let idx = ((y * width + x) * 4) as usize;
            data[idx..idx + 3].fill(value);
        }
        data
    }

    #[test]
    fn hit_at_radius_zero() {
        let data = buffer(10, 10, &[(5, 5)], 255);
        let view = PixelView::new(&data, 10).unwrap();

        let result = probe_edge(&view, Point::new(5, 5), 1, 50);
        assert!(result.hit_edge);
        assert_eq!(result.point, Point::new(5, 5));
        assert_eq!(
            result.samples,
            vec![EdgeProbeSample {
                pos_x: 5,
                neg_x: 5,
                pos_y: 5,
                neg_y: 5
            }]
        );
    }

    #[test]
    fn hit_on_diagonal_stops_walk() {
        let data = buffer(20, 20, &[(12, 8)], 255);
        let view = PixelView::new(&data, 20).unwrap();

        let result = probe_edge(&view, Point::new(10, 10), 6, 90);
        assert!(result.hit_edge);
        assert_eq!(result.samples.len(), 3);
        assert_eq!(result.samples[2].pos_x, 12);
        assert_eq!(result.samples[2].neg_y, 8);
    }

    #[test]
    fn miss_records_every_radius() {
        let data = buffer(20, 20, &[], 0);
        let view = PixelView::new(&data, 20).unwrap();

        let result = probe_edge(&view, Point::new(10, 10), 4, 90);
        assert!(!result.hit_edge);
        assert_eq!(result.samples.len(), 4);
        assert_eq!(result.samples[3].neg_x, 7);
    }

    #[test]
    fn off_diagonal_pixels_are_not_seen() {
        // Directly right of the point, never on a diagonal.
        let data = buffer(20, 20, &[(12, 10)], 255);
        let view = PixelView::new(&data, 20).unwrap();
        assert!(!probe_edge(&view, Point::new(10, 10), 4, 50).hit_edge);
    }

    #[test]
    fn out_of_range_samples_are_non_hits() {
        let data = buffer(4, 4, &[], 0);
        let view = PixelView::new(&data, 4).unwrap();

        for point in [Point::new(0, 0), Point::new(3, 3), Point::new(-5, 2), Point::new(9, 9)] {
            let result = probe_edge(&view, point, 6, 10);
            assert!(!result.hit_edge, "unexpected hit at {point}");
            assert_eq!(result.samples.len(), 6);
        }
    }

    #[test]
    fn hit_found_after_leaving_the_buffer_partially() {
        let data = buffer(4, 4, &[(2, 2)], 255);
        let view = PixelView::new(&data, 4).unwrap();

        let result = probe_edge(&view, Point::new(0, 0), 3, 50);
        assert!(result.hit_edge);
        assert_eq!(result.samples.len(), 3);
    }

    #[test]
    fn full_threshold_is_unreachable() {
        let data = buffer(5, 5, &[(2, 2)], 255);
        let view = PixelView::new(&data, 5).unwrap();
        assert!(!probe_edge(&view, Point::new(2, 2), 3, 100).hit_edge);
        assert!(probe_edge(&view, Point::new(2, 2), 3, 99).hit_edge);
    }

    #[test]
    fn raising_threshold_never_adds_hits() {
        let data = buffer(6, 6, &[(1, 1)], 128);
        let view = PixelView::new(&data, 6).unwrap();

        let mut previous = true;
        for threshold in 0..=100u8 {
            let hit = probe_edge(&view, Point::new(2, 2), 2, threshold).hit_edge;
            assert!(previous || !hit, "hit reappeared at threshold {threshold}");
            previous = hit;
        }
        // 128 > 255 * 50 / 100 = 127.5, but not above 51%.
        assert!(probe_edge(&view, Point::new(2, 2), 2, 50).hit_edge);
        assert!(!probe_edge(&view, Point::new(2, 2), 2, 51).hit_edge);
    }

    #[test]
    fn huge_distance_is_clamped() {
        let data = buffer(4, 4, &[], 0);
        let view = PixelView::new(&data, 4).unwrap();

        let result = probe_edge(&view, Point::new(1, 1), 2_147_483_649, 50);
        assert!(!result.hit_edge);
        assert_eq!(result.samples.len(), MAX_PROBE_DISTANCE as usize);

        let result = probe_edge(&view, Point::new(1, 1), u32::MAX, 50);
        assert_eq!(result.samples.len(), MAX_PROBE_DISTANCE as usize);
    }

    #[test]
    fn extreme_coordinates_saturate_as_misses() {
        let data = buffer(4, 4, &[], 255);
        let view = PixelView::new(&data, 4).unwrap();

        for point in [
            Point::new(i32::MAX, 0),
            Point::new(i32::MIN, 0),
            Point::new(0, i32::MAX),
            Point::new(i32::MIN, i32::MIN),
        ] {
            let result = probe_edge(&view, point, 3, 50);
            assert!(!result.hit_edge, "unexpected hit at {point}");
            assert_eq!(result.samples.len(), 3);
        }

        let last = probe_edge(&view, Point::new(i32::MAX, i32::MIN), 3, 50).samples[2];
        assert_eq!(last.pos_x, i32::MAX);
        assert_eq!(last.neg_x, i32::MAX - 2);
        assert_eq!(last.neg_y, i32::MIN);
        assert_eq!(last.pos_y, i32::MIN + 2);
    }

    #[test]
    fn alpha_channel_is_ignored() {
        let mut data = buffer(3, 3, &[], 0);
        // Fully opaque, but black: alpha alone must not trigger a hit.
        data[(4 * 4) + 3] = 255;
        let view = PixelView::new(&data, 3).unwrap();
        assert!(!probe_edge(&view, Point::new(1, 1), 1, 0).hit_edge);
    }
}
