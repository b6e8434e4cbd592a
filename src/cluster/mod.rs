//! Package cluster implements density-based clustering of (lat, lon) map markers
//!
//! The density path runs an approximate HDBSCAN over a K-D tree; the grid path
//! buckets points into fixed viewport cells. Both sit behind [`ClusterStrategy`].
pub mod core_distance;
pub mod density;
pub mod distance;
pub mod extract;
pub mod geometry;
pub mod grid;
pub mod kdtree;
pub mod mst;
pub mod point;
pub mod strategy;
pub mod thumbnail;
pub mod union_find;

#[cfg(test)]
mod geometry_test;
#[cfg(test)]
mod mst_test;
#[cfg(test)]
mod union_find_test;

pub use core_distance::{DEFAULT_K, DEFAULT_SIZE_MULTIPLIER, FALLBACK_THRESHOLD};
pub use density::{DEFAULT_MIN_CLUSTER_SIZE, DensityParams, cluster};
pub use distance::{fast_approximate_distance, haversine_distance};
pub use grid::{GRID_COLUMNS, GRID_ROWS, GridParams, Viewport};
pub use kdtree::{KDTree, Neighbor, new_kd_tree};
pub use point::{BoundingBox, Cluster, Clustering, Coord, Point, PointList};
pub use strategy::{AutoParams, ClusterStrategy, DEFAULT_MAX_DENSITY_POINTS, Strategy};
pub use thumbnail::{ImageProvider, resolve_thumbnails};
