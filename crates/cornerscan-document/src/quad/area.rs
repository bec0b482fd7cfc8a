// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Polygon area of a candidate quadrilateral.

use cornerscan_core::Point;

/// Area of the quadrilateral `p1 → p2 → p3 → p4 → p1` via the shoelace
/// formula. Orientation-independent; self-intersecting inputs give the
/// absolute signed sum, not the covered area.
pub fn quad_area(p1: Point, p2: Point, p3: Point, p4: Point) -> f64 {
    polygon_area(&[p1, p2, p3, p4])
}

/// Shoelace area of a closed polygon, computed in integer arithmetic.
pub fn polygon_area(vertices: &[Point]) -> f64 {
    let n = vertices.len();
    let mut twice: i128 = 0;
    for i in 0..n {
        let a = vertices[i];
        let b = vertices[(i + 1) % n];
        twice += (b.x as i128 + a.x as i128) * (b.y as i128 - a.y as i128);
    }
    twice.abs() as f64 / 2.0
}
