// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Diagnostic overlay — draws candidates, ranked corners, attempted and
// accepted quadrilaterals, and probe samples over an image.

use cornerscan_core::{Point, QuadrilateralCandidate};
use image::{Rgba, RgbaImage};
use imageproc::drawing::{draw_filled_rect_mut, draw_line_segment_mut};
use imageproc::rect::Rect;
use tracing::{debug, instrument};

use crate::scan::scanner::ScanReport;

const CANDIDATE: Rgba<u8> = Rgba([255, 255, 0, 255]);
const BEST: Rgba<u8> = Rgba([255, 0, 0, 255]);
const REJECTED: Rgba<u8> = Rgba([96, 96, 96, 255]);
const VERIFIED: Rgba<u8> = Rgba([0, 255, 0, 255]);
const FALLBACK: Rgba<u8> = Rgba([255, 140, 0, 255]);
const SAMPLE: Rgba<u8> = Rgba([0, 128, 255, 255]);

/// Render the scan diagnostics over a copy of `base`.
///
/// Yellow squares mark every detected candidate and red squares the rank-0
/// point of each corner role. Rejected quadrilaterals are outlined in grey;
/// the accepted one is green when verified by the search and orange when it
/// is the fallback, with its edge midpoints in green and probe samples as
/// blue pixels.
#[instrument(skip_all, fields(attempts = report.trace.len()))]
pub fn render_overlay(base: &RgbaImage, report: &ScanReport) -> RgbaImage {
    let mut canvas = base.clone();

    let rejected = &report.trace[..report.trace.len().saturating_sub(1)];
    for candidate in rejected {
        outline(&mut canvas, candidate, REJECTED);
    }

    let accepted = &report.accepted;
    let colour = if accepted.is_fallback() { FALLBACK } else { VERIFIED };
    outline(&mut canvas, accepted, colour);
    for probe in &accepted.probes {
        for sample in &probe.samples {
            for p in sample.positions() {
                put_clipped(&mut canvas, p, SAMPLE);
            }
        }
    }

    for point in &report.candidates {
        marker(&mut canvas, *point, CANDIDATE);
    }
    for point in report.ranked.best() {
        marker(&mut canvas, point, BEST);
    }
    for probe in &accepted.probes {
        marker(&mut canvas, probe.point, VERIFIED);
    }

    debug!(
        width = canvas.width(),
        height = canvas.height(),
        "Overlay rendered"
    );
    canvas
}

fn outline(canvas: &mut RgbaImage, candidate: &QuadrilateralCandidate, colour: Rgba<u8>) {
    for (a, b) in candidate.edges() {
        draw_line_segment_mut(
            canvas,
            (a.x as f32, a.y as f32),
            (b.x as f32, b.y as f32),
            colour,
        );
    }
}

/// 4x4 square centred on `p`; clipped by imageproc at the image border.
fn marker(canvas: &mut RgbaImage, p: Point, colour: Rgba<u8>) {
    let corner = Rect::at(p.x.saturating_sub(2), p.y.saturating_sub(2));
    draw_filled_rect_mut(canvas, corner.of_size(4, 4), colour);
}

fn put_clipped(canvas: &mut RgbaImage, p: Point, colour: Rgba<u8>) {
    if p.x >= 0 && p.y >= 0 && (p.x as u32) < canvas.width() && (p.y as u32) < canvas.height() {
        canvas.put_pixel(p.x as u32, p.y as u32, colour);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scan::scanner::{DocumentScanner, ScanOutcome};
    use cornerscan_core::{PixelView, ScanConfig};

    fn scan(img: &RgbaImage, points: &[(i32, i32)]) -> ScanReport {
        let points: Vec<Point> = points.iter().copied().map(Point::from).collect();
        let view = PixelView::new(img.as_raw(), img.width()).unwrap();
        DocumentScanner::new(ScanConfig::default())
            .unwrap()
            .scan_edges(view, &points)
            .unwrap()
    }

    #[test]
    fn fallback_outline_is_orange_and_best_corners_red() {
        let base = RgbaImage::from_pixel(60, 60, Rgba([0, 0, 0, 255]));
        let report = scan(&base, &[(10, 10), (50, 10), (50, 50), (10, 50), (30, 30)]);
        assert_eq!(report.outcome, ScanOutcome::Fallback);

        let out = render_overlay(&base, &report);
        assert_eq!(out.dimensions(), base.dimensions());
        // Marker squares cover the ranked corners.
        assert_eq!(*out.get_pixel(10, 10), BEST);
        // Midway along the accepted top edge, away from markers.
        assert_eq!(*out.get_pixel(30, 10), FALLBACK);
        // Interior candidate marker.
        assert_eq!(*out.get_pixel(30, 30), CANDIDATE);
        // Base is left untouched.
        assert_eq!(*base.get_pixel(30, 10), Rgba([0, 0, 0, 255]));
    }

    #[test]
    fn verified_outline_is_green() {
        let mut base = RgbaImage::from_pixel(60, 60, Rgba([0, 0, 0, 255]));
        for i in 10..=50 {
            for (x, y) in [(i, 10), (i, 50), (10, i), (50, i)] {
                base.put_pixel(x, y, Rgba([255, 255, 255, 255]));
            }
        }
        let report = scan(&base, &[(10, 10), (50, 10), (50, 50), (10, 50)]);
        assert_eq!(report.outcome, ScanOutcome::Verified);

        let out = render_overlay(&base, &report);
        assert_eq!(*out.get_pixel(20, 10), VERIFIED);
        assert_eq!(*out.get_pixel(30, 10), VERIFIED);
    }

    #[test]
    fn markers_at_the_border_are_clipped() {
        let base = RgbaImage::from_pixel(20, 20, Rgba([0, 0, 0, 255]));
        let report = scan(&base, &[(0, 0), (19, 0), (19, 19), (0, 19)]);
        let out = render_overlay(&base, &report);
        assert_eq!(*out.get_pixel(0, 0), BEST);
        assert_eq!(*out.get_pixel(19, 19), BEST);
    }
}
