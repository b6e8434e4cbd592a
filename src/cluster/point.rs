//! Geographic primitives shared by every clustering stage

/// Index of latitude inside [`Coord`]
pub const LAT: usize = 0;
/// Index of longitude inside [`Coord`]
pub const LON: usize = 1;

/// Coord represents a geographic coordinate (latitude, longitude) in WGS84 degrees
///
/// The coordinate is stored as `[latitude, longitude]` where:
/// - `[0]` is latitude
/// - `[1]` is longitude
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coord(pub [f64; 2]);

impl Coord {
    pub fn new(lat: f64, lon: f64) -> Self {
        Coord([lat, lon])
    }

    pub fn lat(&self) -> f64 {
        self.0[LAT]
    }

    pub fn lon(&self) -> f64 {
        self.0[LON]
    }

    /// Checks that both components are finite and inside the WGS84 ranges
    pub fn is_valid(&self) -> bool {
        self.lat().is_finite()
            && self.lon().is_finite()
            && (-90.0..=90.0).contains(&self.lat())
            && (-180.0..=180.0).contains(&self.lon())
    }

    /// Checks if this coordinate is less than or equal to another one on both axes
    /// (a <= b)
    pub fn less_eq(&self, b: &Coord) -> bool {
        self.0[LAT] <= b.0[LAT] && self.0[LON] <= b.0[LON]
    }

    /// Checks if this coordinate is greater than or equal to another one on both axes
    /// (a >= b)
    pub fn greater_eq(&self, b: &Coord) -> bool {
        self.0[LAT] >= b.0[LAT] && self.0[LON] >= b.0[LON]
    }
}

/// Point is a single map marker handed in by the caller
#[derive(Debug, Clone, PartialEq)]
pub struct Point {
    /// Stable unique identifier
    pub id: String,
    pub coord: Coord,
    /// Optional thumbnail reference (usually an image URL)
    pub thumbnail: Option<String>,
    /// Display label
    pub label: String,
}

impl Point {
    pub fn new(id: impl Into<String>, lat: f64, lon: f64) -> Self {
        Point {
            id: id.into(),
            coord: Coord::new(lat, lon),
            thumbnail: None,
            label: String::new(),
        }
    }

    pub fn with_thumbnail(mut self, thumbnail: impl Into<String>) -> Self {
        self.thumbnail = Some(thumbnail.into());
        self
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = label.into();
        self
    }
}

/// PointList is a collection of Points
pub type PointList = Vec<Point>;

/// Axis-aligned bounding box in degrees
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Bottom-left (south-west) corner
    pub min: Coord,
    /// Top-right (north-east) corner
    pub max: Coord,
}

impl BoundingBox {
    /// Calculates the bounds of the given coordinates
    ///
    /// Returns `None` if there are no coordinates
    pub fn of<'a>(coords: impl IntoIterator<Item = &'a Coord>) -> Option<BoundingBox> {
        let mut coords = coords.into_iter();
        let first = *coords.next()?;
        let mut min = first;
        let mut max = first;

        for pt in coords {
            for j in 0..2 {
                if pt.0[j] < min.0[j] {
                    min.0[j] = pt.0[j];
                }
                if pt.0[j] > max.0[j] {
                    max.0[j] = pt.0[j];
                }
            }
        }

        Some(BoundingBox { min, max })
    }

    pub fn center(&self) -> Coord {
        Coord([
            (self.min.0[LAT] + self.max.0[LAT]) / 2.0,
            (self.min.0[LON] + self.max.0[LON]) / 2.0,
        ])
    }

    pub fn contains(&self, c: &Coord) -> bool {
        c.greater_eq(&self.min) && c.less_eq(&self.max)
    }

    /// Moves `c` onto the nearest coordinate inside the box
    pub fn clamp(&self, c: Coord) -> Coord {
        let mut out = c;
        for j in 0..2 {
            out.0[j] = out.0[j].clamp(self.min.0[j], self.max.0[j]);
        }
        out
    }
}

/// Cluster represents one group of points produced by a clustering strategy
#[derive(Debug, Clone, PartialEq)]
pub struct Cluster {
    /// Cluster ID, sequential within one clustering result
    pub c: usize,
    /// Identifiers of member points in input order
    pub ids: Vec<String>,
    /// Representative marker position
    pub centroid: Coord,
    /// Number of members, always `ids.len()`
    pub count: usize,
    /// Thumbnail of the first member, if it has one
    pub thumbnail: Option<String>,
    /// Display radius in meters
    pub radius: f64,
}

/// Clustering is the output of one clustering call
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Clustering {
    pub clusters: Vec<Cluster>,
    /// Points that were not absorbed by any cluster, in input order
    pub noise: Vec<Point>,
    /// Distance scale in meters the result was computed with
    ///
    /// For the density strategy this is the maximum linking distance, for the
    /// grid strategy the smaller cell dimension.
    pub threshold: f64,
}

impl Clustering {
    /// Result where every input point is rendered on its own
    pub fn all_noise(points: &[Point], threshold: f64) -> Self {
        Clustering {
            clusters: Vec::new(),
            noise: points.to_vec(),
            threshold,
        }
    }

    /// Number of points that belong to some cluster
    pub fn clustered_count(&self) -> usize {
        self.clusters.iter().map(|c| c.count).sum()
    }
}
