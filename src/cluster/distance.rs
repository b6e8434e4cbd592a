use std::f64::consts::PI;

use super::point::Coord;

/// Coefficient to translate from degrees to radians
pub const DEGREE_RAD: f64 = PI / 180.0;

/// Mean Earth radius in meters
pub const EARTH_R: f64 = 6_371_008.8;

/// Length of one degree of latitude (and of longitude on the equator) in meters
pub const METERS_PER_DEGREE: f64 = EARTH_R * DEGREE_RAD;

/// Calculates great-circle distance between two coordinates
///
/// # Returns
///
/// Distance in meters
pub fn haversine_distance(a: &Coord, b: &Coord) -> f64 {
    let lat1 = a.lat() * DEGREE_RAD;
    let lat2 = b.lat() * DEGREE_RAD;
    let d_lat = lat2 - lat1;
    let d_lon = (b.lon() - a.lon()) * DEGREE_RAD;

    let s_lat = (d_lat / 2.0).sin();
    let s_lon = (d_lon / 2.0).sin();
    let h = s_lat * s_lat + lat1.cos() * lat2.cos() * s_lon * s_lon;

    2.0 * EARTH_R * h.sqrt().min(1.0).asin()
}

/// Calculates sine approximated to parabola
///
/// Taken from: <http://forum.devmaster.net/t/fast-and-accurate-sine-cosine/9648>
///
/// `x` is wrapped into `[-PI, PI]` first.
pub fn fast_sine(x: f64) -> f64 {
    const B: f64 = 4.0 / PI;
    const C: f64 = -4.0 / (PI * PI);
    const P: f64 = 0.225;

    let x = if (-PI..=PI).contains(&x) {
        x
    } else {
        (x + PI).rem_euclid(2.0 * PI) - PI
    };

    let y = B * x + C * x * x.abs();
    P * (y * y.abs() - y) + y
}

/// Calculates cosine from sine
pub fn fast_cos(x: f64) -> f64 {
    fast_sine(x + PI / 2.0)
}

/// Meters per degree of longitude at the given latitude, using the fast cosine
pub fn meters_per_degree_lon(lat: f64) -> f64 {
    METERS_PER_DEGREE * fast_cos(lat * DEGREE_RAD).max(0.0)
}

/// Calculates planar (equirectangular) distance, scaled at `a`'s latitude
///
/// Cheap replacement for [`haversine_distance`] inside nearest-neighbour
/// search. All distances measured from the same `a` share one scale, so
/// neighbour rankings agree with haversine for spans of a few kilometers.
/// Longitude differences are not wrapped around the antimeridian.
///
/// # Returns
///
/// Distance in meters
pub fn fast_approximate_distance(a: &Coord, b: &Coord) -> f64 {
    let dy = (b.lat() - a.lat()) * METERS_PER_DEGREE;
    let dx = (b.lon() - a.lon()) * meters_per_degree_lon(a.lat());

    (dx * dx + dy * dy).sqrt()
}
