//! Marker geometry for finished clusters: representative centroid and display radius

use super::distance::haversine_distance;
use super::point::{BoundingBox, Cluster, Coord, Point};

/// Clusters up to this size get an inverse-distance weighted centroid
pub const IDW_MAX_MEMBERS: usize = 5;

/// Smallest base radius as a fraction of the threshold
pub const MIN_RADIUS_FRACTION: f64 = 0.1;

/// Largest base radius as a fraction of the threshold
pub const MAX_RADIUS_FRACTION: f64 = 0.8;

/// Member count at which the base radius reaches its maximum
pub const RADIUS_SATURATION_COUNT: f64 = 100.0;

/// Calculates the representative position of a group of coordinates
///
/// Starts from the center of the bounding box. Small groups are refined with
/// an inverse-distance weighted mean anchored at that center (weight
/// `1 / distance`, or `1` for a member sitting exactly on it), and the result
/// is clamped back into the bounding box.
///
/// Returns `None` for an empty group.
pub fn centroid(coords: &[Coord]) -> Option<Coord> {
    let bounds = BoundingBox::of(coords)?;
    let center = bounds.center();
    if coords.len() > IDW_MAX_MEMBERS {
        return Some(center);
    }

    let mut sum = [0.0; 2];
    let mut total = 0.0;
    for c in coords {
        let d = haversine_distance(c, &center);
        let w = if d > 0.0 { 1.0 / d } else { 1.0 };
        for j in 0..2 {
            sum[j] += w * c.0[j];
        }
        total += w;
    }

    Some(bounds.clamp(Coord([sum[0] / total, sum[1] / total])))
}

/// Display radius before overlap correction, log-scaled by member count
///
/// Ranges from `0.1 * threshold` for a single member to `0.8 * threshold`
/// at [`RADIUS_SATURATION_COUNT`] members and above.
pub fn base_radius(count: usize, threshold: f64) -> f64 {
    let min = MIN_RADIUS_FRACTION * threshold;
    let max = MAX_RADIUS_FRACTION * threshold;
    if count <= 1 {
        return min;
    }

    let t = ((count as f64).ln() / RADIUS_SATURATION_COUNT.ln()).clamp(0.0, 1.0);
    min + (max - min) * t
}

/// Builds a cluster from member indices into `points`
///
/// Returns `None` for an empty member list.
pub fn build_cluster(
    c: usize,
    points: &[Point],
    members: &[usize],
    radius: f64,
) -> Option<Cluster> {
    let first = points.get(*members.first()?)?;
    let coords: Vec<Coord> = members.iter().map(|&i| points[i].coord).collect();

    Some(Cluster {
        c,
        ids: members.iter().map(|&i| points[i].id.clone()).collect(),
        centroid: centroid(&coords)?,
        count: members.len(),
        thumbnail: first.thumbnail.clone(),
        radius,
    })
}

/// Shrinks radii so that no two cluster markers overlap
///
/// Whenever two centroids are closer than the sum of their radii, both radii
/// are cut to at most half the distance between them. Radii only ever
/// decrease, so one pass over all pairs is enough. Coincident centroids end
/// up with zero radius.
pub fn resolve_overlaps(clusters: &mut [Cluster]) {
    for i in 0..clusters.len() {
        for j in (i + 1)..clusters.len() {
            let d = haversine_distance(&clusters[i].centroid, &clusters[j].centroid);
            if clusters[i].radius + clusters[j].radius > d {
                let half = d / 2.0;
                clusters[i].radius = clusters[i].radius.min(half);
                clusters[j].radius = clusters[j].radius.min(half);
            }
        }
    }
}

/// Turns member groups into finished density clusters
pub fn finalize_clusters(points: &[Point], groups: &[Vec<usize>], threshold: f64) -> Vec<Cluster> {
    let mut clusters: Vec<Cluster> = groups
        .iter()
        .enumerate()
        .filter_map(|(c, members)| {
            build_cluster(c, points, members, base_radius(members.len(), threshold))
        })
        .collect();
    resolve_overlaps(&mut clusters);
    clusters
}
