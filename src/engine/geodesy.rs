//! Spherical-earth helpers. Distances are in kilometres, the unit used for
//! checkpoint radii and for `dt * speed`.

use crate::engine::models::Coordinate;

/// Mean earth radius in km.
pub const EARTH_RADIUS_KM: f64 = 6371.0;

/// Great-circle distance between two coordinates in km (haversine).
pub fn distance_on_surface(start: &Coordinate, end: &Coordinate) -> f64 {
    let start_lat = start.lat.to_radians();
    let end_lat = end.lat.to_radians();
    let d_lat = (end.lat - start.lat).to_radians();
    let d_lon = (end.lon - start.lon).to_radians();

    let a = (d_lat / 2.0).sin().powi(2) +
            start_lat.cos() * end_lat.cos() * (d_lon / 2.0).sin().powi(2);
    // Rounding can push `a` just past 1 for antipodal points
    let a = a.clamp(0.0, 1.0);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());
    EARTH_RADIUS_KM * c
}

/// Initial compass bearing (0 = North, clockwise) from `start` to `end`.
pub fn bearing(start: &Coordinate, end: &Coordinate) -> f64 {
    let start_lat = start.lat.to_radians();
    let end_lat = end.lat.to_radians();
    let d_lon = (end.lon - start.lon).to_radians();

    let y = d_lon.sin() * end_lat.cos();
    let x = start_lat.cos() * end_lat.sin() - start_lat.sin() * end_lat.cos() * d_lon.cos();
    normalize_heading(y.atan2(x).to_degrees())
}

/// Point reached after travelling `distance_km` along the great circle
/// leaving `start` on the given compass bearing.
pub fn destination(start: &Coordinate, distance_km: f64, bearing_deg: f64) -> Coordinate {
    let angular_dist = distance_km / EARTH_RADIUS_KM;
    let bearing_rad = bearing_deg.to_radians();

    let start_lat = start.lat.to_radians();
    let start_lon = start.lon.to_radians();

    let end_lat = (start_lat.sin() * angular_dist.cos() +
                   start_lat.cos() * angular_dist.sin() * bearing_rad.cos()).asin();

    let end_lon = start_lon + (bearing_rad.sin() * angular_dist.sin() * start_lat.cos())
        .atan2(angular_dist.cos() - start_lat.sin() * end_lat.sin());

    Coordinate {
        lat: end_lat.to_degrees(),
        lon: wrap_longitude(end_lon.to_degrees()),
    }
}

/// Wraps an angle into [0, 360).
pub fn normalize_heading(deg: f64) -> f64 {
    let h = deg.rem_euclid(360.0);
    // rem_euclid rounds tiny negatives up to 360.0
    if h >= 360.0 { 0.0 } else { h }
}

/// Wraps a longitude into [-180, 180).
pub fn wrap_longitude(lon: f64) -> f64 {
    (lon + 180.0).rem_euclid(360.0) - 180.0
}

/// Compass bearing (North = 0, clockwise) to the host's heading convention
/// (East = 0, counter-clockwise).
pub fn compass_to_math(bearing_deg: f64) -> f64 {
    normalize_heading(90.0 - bearing_deg)
}

pub fn math_to_compass(heading_deg: f64) -> f64 {
    normalize_heading(90.0 - heading_deg)
}
