//! Local density estimation and the adaptive linking threshold

use log::debug;

use super::distance::haversine_distance;
use super::kdtree::KDTree;

/// Default neighbour rank used for core distances
pub const DEFAULT_K: usize = 3;

/// Default multiplier applied to the core distance percentile
pub const DEFAULT_SIZE_MULTIPLIER: f64 = 1.8;

/// Percentile of core distances the threshold is taken from
pub const THRESHOLD_PERCENTILE: f64 = 0.75;

/// Threshold in meters used when no positive core distance is defined
pub const FALLBACK_THRESHOLD: f64 = 100.0;

/// Returns the neighbour rank actually used for `n` points
///
/// Sets that are too small to have `k` neighbours per point fall back to
/// `max(1, n / 3)`.
pub fn adjusted_k(k: usize, n: usize) -> usize {
    let k = k.max(1);
    if n <= k { (n / 3).max(1) } else { k }
}

/// Calculates the core distance of every coordinate in the tree
///
/// The core distance is the great-circle distance in meters to the farthest
/// of the point's `adjusted_k(k, n)` nearest neighbours, or `f64::INFINITY`
/// when the point does not have that many neighbours.
pub fn core_distances(tree: &KDTree<'_>, k: usize) -> Vec<f64> {
    let coords = tree.coords;
    let k = adjusted_k(k, coords.len());

    (0..coords.len())
        .map(|i| {
            let neighbours = tree.k_nearest(i, k);
            if neighbours.len() < k {
                return f64::INFINITY;
            }
            neighbours
                .iter()
                .map(|n| haversine_distance(&coords[i], &coords[n.id]))
                .fold(0.0, f64::max)
        })
        .collect()
}

/// Derives the maximum linking distance from the distribution of core distances
///
/// Takes the finite core distances, picks the value at rank
/// `floor(0.75 * (n - 1))` and scales it by `size_multiplier`. When that
/// value is zero (most points stacked on identical coordinates) the rank is
/// taken over the positive core distances instead. Returns
/// [`FALLBACK_THRESHOLD`] when no positive core distance exists, and
/// saturates to `f64::MAX` when the product overflows.
pub fn adaptive_threshold(core: &[f64], size_multiplier: f64) -> f64 {
    let mut finite: Vec<f64> = core.iter().copied().filter(|d| d.is_finite()).collect();
    finite.sort_by(f64::total_cmp);

    let mut base = percentile(&finite);
    if base == Some(0.0) {
        let first_positive = finite.partition_point(|&d| d <= 0.0);
        base = percentile(&finite[first_positive..]);
        debug!("75th percentile core distance is zero, using positive ones: {base:?}");
    }

    let threshold = match base {
        Some(base) => base * size_multiplier,
        None => {
            debug!("no positive core distances, using fallback threshold {FALLBACK_THRESHOLD} m");
            return FALLBACK_THRESHOLD;
        }
    };

    if threshold.is_nan() || threshold <= 0.0 {
        debug!("degenerate threshold {threshold}, using fallback {FALLBACK_THRESHOLD} m");
        FALLBACK_THRESHOLD
    } else {
        threshold.min(f64::MAX)
    }
}

/// Value at rank `floor(0.75 * (n - 1))` of sorted distances
fn percentile(sorted: &[f64]) -> Option<f64> {
    let last = sorted.len().checked_sub(1)?;
    let rank = (THRESHOLD_PERCENTILE * last as f64).floor() as usize;
    sorted.get(rank).copied()
}
