//! Explicitly selected clustering strategies behind one interface
//!
//! The density pipeline and the viewport grid give different kinds of
//! clusters (density-adaptive components vs fixed cells). Neither is treated
//! as an approximation of the other: the caller picks one, or picks
//! [`AutoParams`] to gate the quadratic density pipeline by input size.

use log::{debug, warn};

use super::core_distance::FALLBACK_THRESHOLD;
use super::density::DensityParams;
use super::grid::{GridParams, Viewport};
use super::point::{Clustering, Point};

/// Largest input the density pipeline runs on by default in [`AutoParams`]
pub const DEFAULT_MAX_DENSITY_POINTS: usize = 500;

/// Common interface of the clustering strategies
pub trait ClusterStrategy {
    /// Partitions `points` into clusters and noise
    fn cluster(&self, points: &[Point]) -> Clustering;
}

impl ClusterStrategy for DensityParams {
    fn cluster(&self, points: &[Point]) -> Clustering {
        DensityParams::cluster(self, points)
    }
}

impl ClusterStrategy for GridParams {
    fn cluster(&self, points: &[Point]) -> Clustering {
        GridParams::cluster(self, points)
    }
}

/// Density clustering for small inputs, grid bucketing above a size limit
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AutoParams {
    pub density: DensityParams,
    /// Grid viewport; the bounding box of the points when not set
    pub viewport: Option<Viewport>,
    /// Inputs larger than this use the grid
    pub max_density_points: usize,
}

impl Default for AutoParams {
    fn default() -> Self {
        Self {
            density: DensityParams::default(),
            viewport: None,
            max_density_points: DEFAULT_MAX_DENSITY_POINTS,
        }
    }
}

impl ClusterStrategy for AutoParams {
    fn cluster(&self, points: &[Point]) -> Clustering {
        if points.len() <= self.max_density_points {
            return self.density.cluster(points);
        }

        debug!(
            "{} points over the density limit {}, falling back to grid",
            points.len(),
            self.max_density_points
        );
        match self.viewport.or_else(|| Viewport::bounding(points)) {
            Some(viewport) => GridParams::new(viewport).cluster(points),
            None => {
                warn!("no valid coordinates to build a grid from");
                Clustering::all_noise(points, FALLBACK_THRESHOLD)
            }
        }
    }
}

/// Strategy selected by the caller
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Strategy {
    Density(DensityParams),
    Grid(GridParams),
    Auto(AutoParams),
}

impl Default for Strategy {
    fn default() -> Self {
        Strategy::Density(DensityParams::default())
    }
}

impl ClusterStrategy for Strategy {
    fn cluster(&self, points: &[Point]) -> Clustering {
        match self {
            Strategy::Density(params) => params.cluster(points),
            Strategy::Grid(params) => params.cluster(points),
            Strategy::Auto(params) => params.cluster(points),
        }
    }
}
