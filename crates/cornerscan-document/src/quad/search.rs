// SPDX-License-Identifier: PMPL-1.0-or-later
// Copyright (c) 2026 Jonathan D.A. Jewell (hyperpolymath) <jonathan.jewell@open.ac.uk>
//
// Quadrilateral search — synchronized beam expansion over the four ranked
// corner lists, accepting the first quadrilateral whose four edge midpoints
// all sit near an image edge.

use cornerscan_core::config::CornerSearchConfig;
use cornerscan_core::{
    CandidateSource, CornerRole, FallbackReason, PixelView, Point, QuadrilateralCandidate,
    RankedCorners,
};
use tracing::{debug, info, instrument, trace, warn};

use super::area::quad_area;
use super::probe::probe_edge;

/// Combinations tried per base rank: every subset of the four roles.
const ADVANCE_MASKS: u8 = 16;

/// Probe settings for a quadrilateral search.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuadSearch {
    pub max_distance: u32,
    pub threshold_percent: u8,
}

impl Default for QuadSearch {
    fn default() -> Self {
        Self::from_config(&CornerSearchConfig::default())
    }
}

impl QuadSearch {
    pub fn new(max_distance: u32, threshold_percent: u8) -> Self {
        Self {
            max_distance,
            threshold_percent,
        }
    }

    pub fn from_config(config: &CornerSearchConfig) -> Self {
        Self::new(config.max_distance, config.threshold_percent)
    }

    /// Upper bound on candidates evaluated for ranked lists of depth `k`.
    pub fn max_evaluations(k: usize) -> usize {
        k.saturating_sub(1) * ADVANCE_MASKS as usize + 1
    }

    /// Search for a verified quadrilateral.
    ///
    /// With `K = ranked.depth()`, base ranks `0..K-1` are visited in order;
    /// for each, the 16 advance masks are tried in ascending order, bit `i`
    /// moving role `CornerRole::ALL[i]` from rank `p` to rank `p + 1`. The
    /// first candidate whose four edge midpoints all hit an edge ends the
    /// search. If none does, or `K <= 1`, the rank-0 quadrilateral is appended
    /// as an unconditional fallback.
    #[instrument(skip_all, fields(depth = ranked.depth(), max_distance = self.max_distance, threshold = self.threshold_percent))]
    pub fn run(&self, view: &PixelView<'_>, ranked: &RankedCorners) -> SearchTrace {
        let depth = ranked.depth();
        let mut attempts = Vec::new();

        if depth <= 1 {
            debug!(depth, "Too few ranked candidates to search; using rank 0");
            attempts.push(fallback(ranked, FallbackReason::TooFewCandidates));
            return SearchTrace { attempts };
        }

        for base_rank in 0..depth - 1 {
            for advance_mask in 0..ADVANCE_MASKS {
                let corners = CornerRole::ALL.map(|role| {
                    let bit = role_bit(role);
                    let rank = base_rank + usize::from(advance_mask >> bit & 1);
                    ranked.for_role(role)[rank]
                });
                let source = CandidateSource::Search {
                    base_rank,
                    advance_mask,
                };
                let candidate = self.evaluate(view, corners, source);

                if candidate.verified {
                    info!(
                        base_rank,
                        advance_mask,
                        attempts = attempts.len() + 1,
                        area = candidate.area,
                        "Verified document quadrilateral found"
                    );
                    attempts.push(candidate);
                    return SearchTrace { attempts };
                }
                attempts.push(candidate);
            }
        }

        warn!(
            attempts = attempts.len(),
            "No quadrilateral verified against image edges; falling back to rank 0"
        );
        attempts.push(fallback(ranked, FallbackReason::NoVerifiedQuadrilateral));
        SearchTrace { attempts }
    }

    /// Probe all four edge midpoints of one quadrilateral.
    fn evaluate(
        &self,
        view: &PixelView<'_>,
        [top_left, top_right, bottom_right, bottom_left]: [Point; 4],
        source: CandidateSource,
    ) -> QuadrilateralCandidate {
        let mut candidate = QuadrilateralCandidate {
            top_left,
            top_right,
            bottom_right,
            bottom_left,
            verified: false,
            area: quad_area(top_left, top_right, bottom_right, bottom_left),
            probes: Vec::with_capacity(4),
            source,
        };
        for (a, b) in candidate.edges() {
            let probe = probe_edge(view, a.midpoint(b), self.max_distance, self.threshold_percent);
            candidate.probes.push(probe);
        }
        candidate.verified = candidate.probes.iter().all(|probe| probe.hit_edge);

        trace!(
            ?source,
            verified = candidate.verified,
            hits = candidate.probes.iter().filter(|probe| probe.hit_edge).count(),
            area = candidate.area,
            "Quadrilateral evaluated"
        );
        candidate
    }
}

fn role_bit(role: CornerRole) -> u8 {
    match role {
        CornerRole::TopLeft => 0,
        CornerRole::TopRight => 1,
        CornerRole::BottomRight => 2,
        CornerRole::BottomLeft => 3,
    }
}

/// The rank-0 quadrilateral, accepted without probing.
fn fallback(ranked: &RankedCorners, reason: FallbackReason) -> QuadrilateralCandidate {
    let [top_left, top_right, bottom_right, bottom_left] = ranked.best();
    QuadrilateralCandidate {
        top_left,
        top_right,
        bottom_right,
        bottom_left,
        verified: true,
        area: quad_area(top_left, top_right, bottom_right, bottom_left),
        probes: Vec::new(),
        source: CandidateSource::Fallback(reason),
    }
}

/// Every quadrilateral a search evaluated, in order. Never empty; the last
/// entry is the accepted (verified or fallback) candidate.
#[derive(Debug, Clone, PartialEq)]
pub struct SearchTrace {
    attempts: Vec<QuadrilateralCandidate>,
}

impl SearchTrace {
    pub fn candidates(&self) -> &[QuadrilateralCandidate] {
        &self.attempts
    }

    /// The accepted candidate.
    pub fn accepted(&self) -> &QuadrilateralCandidate {
        // Construction always pushes at least one candidate.
        &self.attempts[self.attempts.len() - 1]
    }

    /// Attempts that were rejected before the accepted one.
    pub fn rejected(&self) -> &[QuadrilateralCandidate] {
        &self.attempts[..self.attempts.len() - 1]
    }

    pub fn len(&self) -> usize {
        self.attempts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attempts.is_empty()
    }

    pub fn into_candidates(self) -> Vec<QuadrilateralCandidate> {
        self.attempts
    }
}
