//! Great-circle distance
//!
//! Haversine on a spherical Earth (R = 6371 km). Good to ~0.5% which is
//! far below the zone radii in use.

const EARTH_RADIUS_KM: f64 = 6371.0;

/// Distance in meters between two WGS-84 coordinate pairs.
pub fn distance_meters(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    let d_lat = (lat2 - lat1).to_radians();
    let d_lon = (lon2 - lon1).to_radians();

    let a = (d_lat / 2.0).sin().powi(2)
        + lat1.to_radians().cos() * lat2.to_radians().cos() * (d_lon / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_KM * c * 1000.0
}
