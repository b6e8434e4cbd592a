//! Coarse grid bucketing over a viewport
//!
//! Splits the viewport into [`GRID_COLUMNS`] x [`GRID_ROWS`] cells measured in
//! meters from its south-west corner and reports one cluster per non-empty
//! cell. Used for very wide or very crowded viewports where the density
//! pipeline is too expensive or too noisy.

use log::debug;

use super::distance::{DEGREE_RAD, METERS_PER_DEGREE};
use super::geometry::{build_cluster, resolve_overlaps};
use super::point::{BoundingBox, Clustering, Coord, Point};
use crate::error::{Error, Result};

pub const GRID_COLUMNS: usize = 3;
pub const GRID_ROWS: usize = 6;

/// Cluster radius as a fraction of the smaller cell dimension
pub const CELL_RADIUS_FRACTION: f64 = 0.4;

/// Visible map area given by its south-west and north-east corners
///
/// A viewport whose east edge has a smaller longitude than its west edge
/// crosses the antimeridian.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Viewport {
    south_west: Coord,
    north_east: Coord,
}

impl Viewport {
    pub fn new(south_west: Coord, north_east: Coord) -> Result<Self> {
        if !south_west.is_valid() || !north_east.is_valid() {
            return Err(Error::InvalidViewport(format!(
                "corners {south_west:?} / {north_east:?} out of range"
            )));
        }
        if south_west.lat() > north_east.lat() {
            return Err(Error::InvalidViewport(format!(
                "south edge {} above north edge {}",
                south_west.lat(),
                north_east.lat()
            )));
        }
        Ok(Viewport {
            south_west,
            north_east,
        })
    }

    /// Smallest viewport holding every valid coordinate among `points`
    pub fn bounding(points: &[Point]) -> Option<Self> {
        let bounds = BoundingBox::of(points.iter().map(|p| &p.coord).filter(|c| c.is_valid()))?;
        Some(Viewport {
            south_west: bounds.min,
            north_east: bounds.max,
        })
    }

    pub fn south_west(&self) -> Coord {
        self.south_west
    }

    pub fn north_east(&self) -> Coord {
        self.north_east
    }

    /// Longitude span in degrees, eastwards from the west edge
    fn lon_span(&self) -> f64 {
        let raw = self.north_east.lon() - self.south_west.lon();
        if raw >= 0.0 { raw } else { raw + 360.0 }
    }

    /// Length of a degree of longitude along the south edge
    fn meters_per_degree_east(&self) -> f64 {
        METERS_PER_DEGREE * (self.south_west.lat() * DEGREE_RAD).cos().max(0.0)
    }

    /// Width along the south edge in meters
    pub fn width_meters(&self) -> f64 {
        self.lon_span() * self.meters_per_degree_east()
    }

    /// Height along the west edge in meters
    pub fn height_meters(&self) -> f64 {
        (self.north_east.lat() - self.south_west.lat()) * METERS_PER_DEGREE
    }

    /// Offset of `c` from the south-west corner in meters, `None` outside the viewport
    pub fn offset_meters(&self, c: &Coord) -> Option<(f64, f64)> {
        if !c.is_valid() || c.lat() < self.south_west.lat() || c.lat() > self.north_east.lat() {
            return None;
        }
        let east = (c.lon() - self.south_west.lon()).rem_euclid(360.0);
        if east > self.lon_span() {
            return None;
        }
        Some((
            east * self.meters_per_degree_east(),
            (c.lat() - self.south_west.lat()) * METERS_PER_DEGREE,
        ))
    }
}

/// Parameters of the grid strategy
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GridParams {
    pub viewport: Viewport,
}

impl GridParams {
    pub fn new(viewport: Viewport) -> Self {
        GridParams { viewport }
    }

    /// Returns `(row, column)` of the cell holding `c`, rows counted northwards
    pub fn cell_of(&self, c: &Coord) -> Option<(usize, usize)> {
        let (x, y) = self.viewport.offset_meters(c)?;
        Some((
            bucket(y, self.viewport.height_meters(), GRID_ROWS),
            bucket(x, self.viewport.width_meters(), GRID_COLUMNS),
        ))
    }

    /// Buckets `points` into grid cells
    ///
    /// Cells are reported row by row from the south-west corner, members in
    /// input order. Points outside the viewport are noise.
    pub fn cluster(&self, points: &[Point]) -> Clustering {
        let mut cells: Vec<Vec<usize>> = vec![Vec::new(); GRID_ROWS * GRID_COLUMNS];
        let mut noise = Vec::new();

        for (i, p) in points.iter().enumerate() {
            match self.cell_of(&p.coord) {
                Some((row, col)) => cells[row * GRID_COLUMNS + col].push(i),
                None => noise.push(p.clone()),
            }
        }

        let cell = (self.viewport.width_meters() / GRID_COLUMNS as f64)
            .min(self.viewport.height_meters() / GRID_ROWS as f64);
        let radius = CELL_RADIUS_FRACTION * cell;

        let mut clusters: Vec<_> = cells
            .iter()
            .filter(|members| !members.is_empty())
            .enumerate()
            .filter_map(|(c, members)| build_cluster(c, points, members, radius))
            .collect();
        resolve_overlaps(&mut clusters);
        debug!(
            "grid: {} occupied cells, {} points outside the viewport",
            clusters.len(),
            noise.len()
        );

        Clustering {
            clusters,
            noise,
            threshold: cell,
        }
    }
}

fn bucket(offset: f64, extent: f64, cells: usize) -> usize {
    if extent <= 0.0 {
        return 0;
    }
    let size = extent / cells as f64;
    ((offset / size).floor() as usize).min(cells - 1)
}
