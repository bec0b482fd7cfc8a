// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Core domain types for the Cornerscan corner finder.

use serde::{Deserialize, Serialize};

use crate::error::{Result, ScanError};

/// Integer pixel coordinate. Signed so that probe offsets and midpoints near
/// the image border can be represented before bounds checking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Linear interpolation towards `other` at parameter `t`, rounded half up
    /// to the nearest integer coordinate.
    pub fn lerp(self, other: Point, t: f64) -> Point {
        let round = |a: i32, b: i32| -> i32 {
            let v = a as f64 + t * (b as f64 - a as f64);
            (v + 0.5).floor() as i32
        };
        Point {
            x: round(self.x, other.x),
            y: round(self.y, other.y),
        }
    }

    /// Midpoint of the segment `self`–`other`.
    pub fn midpoint(self, other: Point) -> Point {
        self.lerp(other, 0.5)
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({}, {})", self.x, self.y)
    }
}

impl From<(i32, i32)> for Point {
    fn from((x, y): (i32, i32)) -> Self {
        Self { x, y }
    }
}

/// Which document corner a ranked list competes for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CornerRole {
    TopLeft,
    TopRight,
    BottomRight,
    BottomLeft,
}

impl CornerRole {
    /// All roles in polygon order (clockwise on screen). Index `i` in this
    /// array is bit `i` of a search advance mask.
    pub const ALL: [CornerRole; 4] = [
        CornerRole::TopLeft,
        CornerRole::TopRight,
        CornerRole::BottomRight,
        CornerRole::BottomLeft,
    ];

    /// Directional score of a point for this role.
    pub fn score(self, p: Point) -> i64 {
        let (x, y) = (p.x as i64, p.y as i64);
        match self {
            Self::TopLeft | Self::BottomRight => x + y,
            Self::TopRight | Self::BottomLeft => x - y,
        }
    }

    /// Whether the best point has the largest score (otherwise the smallest).
    pub fn prefers_largest(self) -> bool {
        matches!(self, Self::TopRight | Self::BottomRight)
    }

    /// Best-first total order for this role: score in the preferred
    /// direction, then ascending `x`, then ascending `y`.
    pub fn compare(self, a: &Point, b: &Point) -> std::cmp::Ordering {
        let by_score = if self.prefers_largest() {
            self.score(*b).cmp(&self.score(*a))
        } else {
            self.score(*a).cmp(&self.score(*b))
        };
        by_score.then(a.x.cmp(&b.x)).then(a.y.cmp(&b.y))
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::TopLeft => "top-left",
            Self::TopRight => "top-right",
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
        }
    }
}

/// Four best-first candidate lists, one per corner role.
///
/// Only constructible with every list non-empty. Lists may share points.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RankedCorners {
    top_left: Vec<Point>,
    top_right: Vec<Point>,
    bottom_left: Vec<Point>,
    bottom_right: Vec<Point>,
}

impl RankedCorners {
    /// Assemble ranked lists, rejecting any empty list.
    pub fn from_lists(
        top_left: Vec<Point>,
        top_right: Vec<Point>,
        bottom_left: Vec<Point>,
        bottom_right: Vec<Point>,
    ) -> Result<Self> {
        if top_left.is_empty()
            || top_right.is_empty()
            || bottom_left.is_empty()
            || bottom_right.is_empty()
        {
            return Err(ScanError::NoCandidates(
                "every ranked corner list needs at least one point".into(),
            ));
        }
        Ok(Self {
            top_left,
            top_right,
            bottom_left,
            bottom_right,
        })
    }

    pub fn top_left(&self) -> &[Point] {
        &self.top_left
    }

    pub fn top_right(&self) -> &[Point] {
        &self.top_right
    }

    pub fn bottom_left(&self) -> &[Point] {
        &self.bottom_left
    }

    pub fn bottom_right(&self) -> &[Point] {
        &self.bottom_right
    }

    /// The ranked list for `role`.
    pub fn for_role(&self, role: CornerRole) -> &[Point] {
        match role {
            CornerRole::TopLeft => &self.top_left,
            CornerRole::TopRight => &self.top_right,
            CornerRole::BottomRight => &self.bottom_right,
            CornerRole::BottomLeft => &self.bottom_left,
        }
    }

    /// Usable search depth: the length of the shortest list (always >= 1).
    pub fn depth(&self) -> usize {
        CornerRole::ALL
            .iter()
            .map(|role| self.for_role(*role).len())
            .min()
            .unwrap_or(0)
    }

    /// The rank-0 point of every role, in polygon order.
    pub fn best(&self) -> [Point; 4] {
        CornerRole::ALL.map(|role| self.for_role(role)[0])
    }
}

/// The four coordinates examined at one probe radius.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProbeSample {
    pub pos_x: i32,
    pub neg_x: i32,
    pub pos_y: i32,
    pub neg_y: i32,
}

impl EdgeProbeSample {
    /// The four diagonal sample positions: top-left, top-right, bottom-right,
    /// bottom-left.
    pub fn positions(&self) -> [Point; 4] {
        [
            Point::new(self.neg_x, self.neg_y),
            Point::new(self.pos_x, self.neg_y),
            Point::new(self.pos_x, self.pos_y),
            Point::new(self.neg_x, self.pos_y),
        ]
    }
}

/// Outcome of probing one point for a nearby edge.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EdgeProbeResult {
    pub point: Point,
    pub hit_edge: bool,
    /// One entry per radius tried, stopping at the first hit.
    pub samples: Vec<EdgeProbeSample>,
}

/// Why a fallback quadrilateral was emitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum FallbackReason {
    /// Fewer than two ranked points per role; nothing to search.
    TooFewCandidates,
    /// Every combination was tried and none hit four edges.
    NoVerifiedQuadrilateral,
}

/// Provenance of a quadrilateral candidate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CandidateSource {
    /// Built by the combinatorial search from base rank `base_rank`, with each
    /// set bit of `advance_mask` moving that role (in `CornerRole::ALL` order)
    /// to rank `base_rank + 1`.
    Search { base_rank: usize, advance_mask: u8 },
    /// Unconditional rank-0 quadrilateral.
    Fallback(FallbackReason),
}

/// One attempted (or accepted) document quadrilateral.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuadrilateralCandidate {
    pub top_left: Point,
    pub top_right: Point,
    pub bottom_right: Point,
    pub bottom_left: Point,
    /// All four edge midpoints hit an edge, or this is the fallback.
    pub verified: bool,
    /// Polygon area in square pixels; informational only.
    pub area: f64,
    /// Probe results for the edge midpoints (top, right, bottom, left). Empty
    /// for fallback candidates.
    pub probes: Vec<EdgeProbeResult>,
    pub source: CandidateSource,
}

impl QuadrilateralCandidate {
    /// Corners in polygon order: top-left, top-right, bottom-right, bottom-left.
    pub fn corners(&self) -> [Point; 4] {
        [
            self.top_left,
            self.top_right,
            self.bottom_right,
            self.bottom_left,
        ]
    }

    /// The four edges in probe order: top, right, bottom, left.
    pub fn edges(&self) -> [(Point, Point); 4] {
        let c = self.corners();
        [(c[0], c[1]), (c[1], c[2]), (c[2], c[3]), (c[3], c[0])]
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self.source, CandidateSource::Fallback(_))
    }
}

/// Read-only view over a row-major RGBA8 pixel buffer.
///
/// The byte offset of pixel `(x, y)` is `y * width * 4 + x * 4`; channels are
/// R, G, B, A. Height is derived from the buffer length.
#[derive(Debug, Clone, Copy)]
pub struct PixelView<'a> {
    data: &'a [u8],
    width: u32,
    height: u32,
}

impl<'a> PixelView<'a> {
    pub fn new(data: &'a [u8], width: u32) -> Result<Self> {
        if width == 0 {
            return Err(ScanError::InvalidInput("pixel buffer width is zero".into()));
        }
        let stride = width as usize * 4;
        if data.is_empty() || data.len() % stride != 0 {
            return Err(ScanError::BufferSize {
                expected: stride,
                actual: data.len(),
            });
        }
        let height = u32::try_from(data.len() / stride).map_err(|_| {
            ScanError::InvalidInput("pixel buffer is taller than u32::MAX rows".into())
        })?;
        Ok(Self {
            data,
            width,
            height,
        })
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn contains(&self, x: i32, y: i32) -> bool {
        x >= 0 && y >= 0 && (x as u32) < self.width && (y as u32) < self.height
    }

    /// Mean of the R, G and B channels at `(x, y)`, or `None` outside the
    /// buffer.
    pub fn luma(&self, x: i32, y: i32) -> Option<f64> {
        if !self.contains(x, y) {
            return None;
        }
        let idx = y as usize * self.width as usize * 4 + x as usize * 4;
        let px = &self.data[idx..idx + 3];
        Some((px[0] as f64 + px[1] as f64 + px[2] as f64) / 3.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn midpoint_rounds_half_up() {
        assert_eq!(Point::new(5, 3).midpoint(Point::new(90, 10)), Point::new(48, 7));
        assert_eq!(Point::new(-3, 0).midpoint(Point::new(0, 0)), Point::new(-1, 0));
        assert_eq!(Point::new(10, 10).midpoint(Point::new(10, 80)), Point::new(10, 45));
    }

    #[test]
    fn role_order_breaks_ties_by_position() {
        // Same x+y score; the smaller x wins regardless of direction.
        let a = Point::new(2, 8);
        let b = Point::new(8, 2);
        assert_eq!(
            CornerRole::TopLeft.compare(&a, &b),
            std::cmp::Ordering::Less
        );
        assert_eq!(
            CornerRole::BottomRight.compare(&a, &b),
            std::cmp::Ordering::Less
        );
        assert_eq!(
            CornerRole::TopRight.compare(&Point::new(9, 1), &a),
            std::cmp::Ordering::Less
        );
    }

    #[test]
    fn ranked_corners_reject_empty_lists() {
        let p = vec![Point::new(1, 1)];
        let err = RankedCorners::from_lists(p.clone(), p.clone(), Vec::new(), p).unwrap_err();
        assert!(matches!(err, ScanError::NoCandidates(_)));
    }

    #[test]
    fn ranked_depth_is_shortest_list() {
        let ranked = RankedCorners::from_lists(
            vec![Point::new(0, 0), Point::new(1, 1)],
            vec![Point::new(5, 0)],
            vec![Point::new(0, 5), Point::new(1, 4)],
            vec![Point::new(5, 5), Point::new(4, 4)],
        )
        .unwrap();
        assert_eq!(ranked.depth(), 1);
        assert_eq!(
            ranked.best(),
            [
                Point::new(0, 0),
                Point::new(5, 0),
                Point::new(5, 5),
                Point::new(0, 5)
            ]
        );
    }

    #[test]
    fn pixel_view_validates_stride() {
        assert!(PixelView::new(&[0u8; 16], 2).is_ok());
        assert!(matches!(
            PixelView::new(&[0u8; 15], 2),
            Err(ScanError::BufferSize { expected: 8, actual: 15 })
        ));
        assert!(PixelView::new(&[], 2).is_err());
        assert!(PixelView::new(&[0u8; 8], 0).is_err());
    }

    #[test]
    fn pixel_view_luma_ignores_alpha_and_bounds() {
        let data = [30u8, 60, 90, 0, 255, 255, 255, 255];
        let view = PixelView::new(&data, 2).unwrap();
        assert_eq!(view.height(), 1);
        assert_eq!(view.luma(0, 0), Some(60.0));
        assert_eq!(view.luma(1, 0), Some(255.0));
        assert_eq!(view.luma(2, 0), None);
        assert_eq!(view.luma(0, -1), None);
        assert_eq!(view.luma(0, 1), None);
    }
}
