// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral corner engine — ranks keypoints per corner role, probes edge
// midpoints against an edge-highlighted buffer, and searches for a
// quadrilateral whose four sides sit on real edges.

pub mod area;
pub mod probe;
pub mod rank;
pub mod search;

pub use area::quad_area;
pub use probe::probe_edge;
pub use rank::rank_corners;
pub use search::{QuadSearch, SearchTrace};
