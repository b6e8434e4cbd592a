//! Density clustering pipeline
//!
//! Approximate HDBSCAN over geographic points:
//!
//! ```text
//! points -> k-d tree -> core distances -> threshold (75th percentile * multiplier)
//!        -> mutual reachability graph -> MST (Kruskal)
//!        -> cut at threshold -> components -> clusters / noise
//!        -> centroids + radii
//! ```
//!
//! The threshold comes from the spacing of the points themselves, not from the
//! map zoom, so cluster granularity stays stable while zooming.

use log::{debug, warn};

use super::core_distance::{
    DEFAULT_K, DEFAULT_SIZE_MULTIPLIER, FALLBACK_THRESHOLD, adaptive_threshold, core_distances,
};
use super::extract::{classify, extract_components};
use super::geometry::finalize_clusters;
use super::kdtree::new_kd_tree;
use super::mst::{minimum_spanning_tree, mutual_reachability_edges};
use super::point::{Clustering, Coord, Point};
use crate::error::{Error, Result};

/// Default minimum number of members of a cluster
pub const DEFAULT_MIN_CLUSTER_SIZE: usize = 2;

/// Parameters of the density clustering pipeline
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityParams {
    /// Neighbour rank used for core distances
    pub k: usize,
    /// Multiplier applied to the 75th percentile of core distances
    pub size_multiplier: f64,
    /// Smallest component that is reported as a cluster
    pub min_cluster_size: usize,
}

impl Default for DensityParams {
    fn default() -> Self {
        Self {
            k: DEFAULT_K,
            size_multiplier: DEFAULT_SIZE_MULTIPLIER,
            min_cluster_size: DEFAULT_MIN_CLUSTER_SIZE,
        }
    }
}

impl DensityParams {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_k(mut self, k: usize) -> Self {
        self.k = k;
        self
    }

    pub fn with_size_multiplier(mut self, size_multiplier: f64) -> Self {
        self.size_multiplier = size_multiplier;
        self
    }

    pub fn with_min_cluster_size(mut self, min_cluster_size: usize) -> Self {
        self.min_cluster_size = min_cluster_size;
        self
    }

    pub fn validate(&self) -> Result<()> {
        if self.k == 0 {
            return Err(Error::InvalidParameter {
                name: "k",
                message: "must be at least 1",
            });
        }
        if !self.size_multiplier.is_finite() || self.size_multiplier <= 0.0 {
            return Err(Error::InvalidParameter {
                name: "size_multiplier",
                message: "must be a positive number",
            });
        }
        if self.min_cluster_size == 0 {
            return Err(Error::InvalidParameter {
                name: "min_cluster_size",
                message: "must be at least 1",
            });
        }
        Ok(())
    }

    /// Clusters `points` with these parameters
    ///
    /// Never fails: invalid parameters return every point as noise, and points
    /// with invalid coordinates are always noise.
    pub fn cluster(&self, points: &[Point]) -> Clustering {
        if let Err(err) = self.validate() {
            warn!("{err}, rendering all {} points as noise", points.len());
            return Clustering::all_noise(points, FALLBACK_THRESHOLD);
        }

        let (valid, invalid): (Vec<usize>, Vec<usize>) =
            (0..points.len()).partition(|&i| points[i].coord.is_valid());
        if !invalid.is_empty() {
            warn!("{} points with invalid coordinates treated as noise", invalid.len());
        }
        if valid.len() < 2 {
            return Clustering::all_noise(points, FALLBACK_THRESHOLD);
        }

        let coords: Vec<Coord> = valid.iter().map(|&i| points[i].coord).collect();
        let ids: Vec<&str> = valid.iter().map(|&i| points[i].id.as_str()).collect();

        let tree = new_kd_tree(&coords);
        let core = core_distances(&tree, self.k);
        let threshold = adaptive_threshold(&core, self.size_multiplier);
        debug!(
            "{} points, tree height {}, linking threshold {threshold:.1} m",
            coords.len(),
            tree.height()
        );

        let edges = mutual_reachability_edges(&coords, &core);
        let mst = minimum_spanning_tree(edges, &ids);
        let components = extract_components(coords.len(), &mst, threshold);
        let (groups, noise) = classify(components, self.min_cluster_size, coords.len());

        // back from positions among valid points to input indices
        let groups: Vec<Vec<usize>> = groups
            .into_iter()
            .map(|g| g.into_iter().map(|l| valid[l]).collect())
            .collect();
        let mut noise: Vec<usize> = noise.into_iter().map(|l| valid[l]).chain(invalid).collect();
        noise.sort_unstable();

        let clusters = finalize_clusters(points, &groups, threshold);
        debug!("{} clusters, {} noise points", clusters.len(), noise.len());

        Clustering {
            clusters,
            noise: noise.into_iter().map(|i| points[i].clone()).collect(),
            threshold,
        }
    }
}

/// Clusters points with the density pipeline
///
/// # Arguments
///
/// * `points` - Points to cluster, may be empty
/// * `k` - Neighbour rank for core distances (default 3)
/// * `size_multiplier` - Threshold multiplier (default 1.8)
/// * `min_cluster_size` - Minimum members of a cluster (default 2)
///
/// # Returns
///
/// Clusters and the points left over as noise. Every input point appears in
/// exactly one of them.
pub fn cluster(
    points: &[Point],
    k: usize,
    size_multiplier: f64,
    min_cluster_size: usize,
) -> Clustering {
    DensityParams {
        k,
        size_multiplier,
        min_cluster_size,
    }
    .cluster(points)
}
