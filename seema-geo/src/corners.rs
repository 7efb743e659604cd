//! Boundary corner reduction.
//!
//! Cadastral boundary rings arrive densely sampled; AR anchor placement
//! wants the opposite: the 2-4 vertices that carry the parcel's shape.
//! Reduction walks four steps: deduplicate near-coincident vertices, score
//! every remaining vertex by its turning angle, keep the strongest ones
//! above an adaptive threshold, then sanity-check that the survivors are
//! spread around the ring rather than bunched on one feature.

use std::cmp::Ordering;

use log::debug;

use crate::core::math::{bearing_deg, haversine_distance_m, normalize_turn_deg};
use crate::core::{CornerPick, CornerSet, GeoPoint, Ring};
use crate::error::{Result, SeemaError};

/// Configuration for corner reduction.
#[derive(Clone, Debug)]
pub struct CornerConfig {
    /// Vertices closer than this to the previously kept vertex are dropped
    /// as duplicates (meters). Default: 0.01 (1 cm).
    pub dedup_min_separation_m: f64,

    /// Turning angles at or below this are never salient (degrees).
    /// Default: 5°.
    pub significance_min_deg: f64,

    /// Number of strongest vertices that feed the adaptive threshold.
    /// Default: 8.
    pub candidate_pool: usize,

    /// Lower bound of the adaptive threshold (degrees). Default: 10°.
    pub threshold_floor_deg: f64,

    /// Fraction of the strongest turn used as one adaptive bound.
    /// Default: 0.3.
    pub max_strength_ratio: f64,

    /// Multiple of the mean pool strength used as the other adaptive bound.
    /// Default: 2.0.
    pub avg_strength_factor: f64,

    /// Minimum corners emitted. Default: 2.
    pub min_corners: usize,

    /// Maximum corners emitted. Default: 4.
    pub max_corners: usize,
}

impl Default for CornerConfig {
    fn default() -> Self {
        Self {
            dedup_min_separation_m: 0.01,
            significance_min_deg: 5.0,
            candidate_pool: 8,
            threshold_floor_deg: 10.0,
            max_strength_ratio: 0.3,
            avg_strength_factor: 2.0,
            min_corners: 2,
            max_corners: 4,
        }
    }
}

impl CornerConfig {
    /// Create a configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style setter for the dedup separation.
    pub fn with_dedup_min_separation(mut self, meters: f64) -> Self {
        self.dedup_min_separation_m = meters;
        self
    }

    /// Builder-style setter for the significance floor.
    pub fn with_significance_min_deg(mut self, degrees: f64) -> Self {
        self.significance_min_deg = degrees;
        self
    }

    /// Builder-style setter for the adaptive threshold floor.
    pub fn with_threshold_floor_deg(mut self, degrees: f64) -> Self {
        self.threshold_floor_deg = degrees;
        self
    }
}

/// Reduce a boundary ring to its 2-4 key corners.
///
/// The output is always a subsequence of the deduplicated input ring in its
/// original traversal order.
///
/// # Errors
/// [`SeemaError::InsufficientPoints`] when fewer than 3 distinct vertices
/// remain after deduplication.
pub fn reduce_to_corners(ring: &Ring, config: &CornerConfig) -> Result<CornerSet> {
    let points = deduplicate(ring, config.dedup_min_separation_m);
    let n = points.len();

    if n < 3 {
        return Err(SeemaError::InsufficientPoints { found: n });
    }
    if n <= config.max_corners {
        return Ok(CornerSet::new(points, CornerPick::Passthrough));
    }

    let strengths = turn_strengths(&points);

    // Strongest vertices first; stable on ties by ring index.
    let mut by_strength: Vec<usize> = (0..n).collect();
    by_strength.sort_by(|&a, &b| {
        strengths[b]
            .partial_cmp(&strengths[a])
            .unwrap_or(Ordering::Equal)
    });
    let pool: Vec<usize> = by_strength
        .into_iter()
        .take(config.candidate_pool)
        .collect();

    let max_strength = strengths[pool[0]];
    let avg_strength = pool.iter().map(|&i| strengths[i]).sum::<f64>() / pool.len() as f64;
    let threshold = config.threshold_floor_deg.max(
        (config.max_strength_ratio * max_strength).min(config.avg_strength_factor * avg_strength),
    );

    let mut selected: Vec<usize> = pool
        .iter()
        .copied()
        .filter(|&i| strengths[i] > config.significance_min_deg && strengths[i] >= threshold)
        .take(config.max_corners)
        .collect();

    if selected.len() < config.min_corners {
        debug!(
            "only {} vertices passed threshold {:.1}°, forcing the {} strongest",
            selected.len(),
            threshold,
            config.min_corners
        );
        selected = pool.iter().copied().take(config.min_corners).collect();
    }

    // Output order is ring order, never score order.
    selected.sort_unstable();

    if poorly_distributed(&selected, n) {
        let target = selected
            .len()
            .clamp(config.min_corners, config.max_corners);
        debug!(
            "{} selected corners cluster on the ring, re-picking {} evenly spaced",
            selected.len(),
            target
        );
        let evenly: Vec<GeoPoint> = (0..target)
            .map(|i| {
                let idx = (i as f64 * n as f64 / target as f64).round() as usize % n;
                points[idx]
            })
            .collect();
        return Ok(CornerSet::new(evenly, CornerPick::EvenSpacing));
    }

    let corners: Vec<GeoPoint> = selected.iter().map(|&i| points[i]).collect();
    Ok(CornerSet::new(corners, CornerPick::TurnAngle))
}

/// Drop vertices within `min_separation_m` of the previously kept vertex,
/// then drop a closing vertex that duplicates the first.
fn deduplicate(ring: &Ring, min_separation_m: f64) -> Vec<GeoPoint> {
    let mut out: Vec<GeoPoint> = Vec::with_capacity(ring.len());
    for p in ring.iter() {
        if let Some(prev) = out.last() {
            if haversine_distance_m(prev, p) < min_separation_m {
                continue;
            }
        }
        out.push(*p);
    }

    if out.len() > 1 {
        let (first, last) = (out[0], out[out.len() - 1]);
        if haversine_distance_m(&first, &last) < min_separation_m {
            out.pop();
        }
    }
    out
}

/// Turning-angle strength at every vertex, with wrap-around neighbors.
///
/// The turn is the signed change of bearing through the vertex, normalized
/// to (-180°, 180°]; only its magnitude feeds the scoring.
fn turn_strengths(points: &[GeoPoint]) -> Vec<f64> {
    let n = points.len();
    (0..n)
        .map(|i| {
            let prev = &points[(i + n - 1) % n];
            let next = &points[(i + 1) % n];
            let inbound = bearing_deg(prev, &points[i]);
            let outbound = bearing_deg(&points[i], next);
            normalize_turn_deg(outbound - inbound).abs()
        })
        .collect()
}

/// Whether any circularly-adjacent pair of selected ring indices falls
/// under the minimum gap `ring_len / (count * 2)`.
fn poorly_distributed(selected: &[usize], ring_len: usize) -> bool {
    if selected.len() < 2 {
        return false;
    }
    let min_gap = ring_len as f64 / (selected.len() as f64 * 2.0);
    for k in 0..selected.len() {
        let gap = if k + 1 < selected.len() {
            selected[k + 1] - selected[k]
        } else {
            ring_len - selected[k] + selected[0]
        };
        if (gap as f64) < min_gap {
            return true;
        }
    }
    false
}
