//! Density-based clustering of geographic map markers
//!
//! Groups listing markers into clusters as the map viewport changes. The
//! engine is pure and synchronous: every call builds its own index, graph and
//! union-find state and drops them before returning.
//!
//! ```rust
//! use rust_geocluster::{Point, cluster};
//!
//! let points = vec![
//!     Point::new("a", 40.71280, -74.00600),
//!     Point::new("b", 40.71285, -74.00605),
//!     Point::new("c", 40.79000, -73.95000),
//! ];
//! let result = cluster(&points, 3, 1.8, 2);
//! assert_eq!(result.clustered_count() + result.noise.len(), points.len());
//! ```

#![forbid(unsafe_code)]

pub mod cluster;
pub mod error;

pub use cluster::{
    AutoParams, Cluster, ClusterStrategy, Clustering, Coord, DensityParams, GridParams,
    ImageProvider, Point, PointList, Strategy, Viewport, cluster, resolve_thumbnails,
};
pub use error::{Error, Result};
