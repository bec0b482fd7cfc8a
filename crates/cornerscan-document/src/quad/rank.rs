// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Corner candidate ranking — one best-first short-list per corner role.

use cornerscan_core::error::{Result, ScanError};
use cornerscan_core::{CornerRole, Point, RankedCorners};
use tracing::{debug, instrument};

/// Rank `points` for each corner role and keep the best `limit` of each.
///
/// | Role         | Score   | Best first |
/// |--------------|---------|------------|
/// | top-left     | `x + y` | smallest   |
/// | top-right    | `x - y` | largest    |
/// | bottom-left  | `x - y` | smallest   |
/// | bottom-right | `x + y` | largest    |
///
/// Equal scores are ordered by ascending `x`, then ascending `y`, so the
/// result is fully deterministic. Every list has length `min(limit, points.len())`.
#[instrument(skip(points), fields(candidates = points.len()))]
pub fn rank_corners(points: &[Point], limit: usize) -> Result<RankedCorners> {
    if points.is_empty() {
        return Err(ScanError::NoCandidates(
            "cannot rank corners without at least one candidate point".into(),
        ));
    }
    if limit == 0 {
        return Err(ScanError::InvalidConfig(
            "point limit per corner must be at least 1".into(),
        ));
    }

    let ranked_for = |role: CornerRole| -> Vec<Point> {
        let mut list = points.to_vec();
        list.sort_by(|a, b| role.compare(a, b));
        list.truncate(limit);
        list
    };

    let ranked = RankedCorners::from_lists(
        ranked_for(CornerRole::TopLeft),
        ranked_for(CornerRole::TopRight),
        ranked_for(CornerRole::BottomLeft),
        ranked_for(CornerRole::BottomRight),
    )?;

    let [tl, tr, br, bl] = ranked.best();
    debug!(
        depth = ranked.depth(),
        top_left = %tl,
        top_right = %tr,
        bottom_right = %br,
        bottom_left = %bl,
        "Corner candidates ranked"
    );
    Ok(ranked)
}
