//! Angle and distance helpers for geodetic math.
//!
//! All public angle parameters and results are in degrees; radians appear
//! only inside function bodies. Distances are in meters. Bearings follow
//! the surveying convention: 0° = true north, increasing clockwise.

use super::point::GeoPoint;

/// Mean Earth radius in meters, used by the Haversine distance.
pub const EARTH_MEAN_RADIUS_M: f64 = 6_371_000.0;

/// WGS84 equatorial radius in meters, used by the flat-Earth ENU projection
/// so that projection and alignment share one length scale.
pub const WGS84_EQUATORIAL_RADIUS_M: f64 = 6_378_137.0;

/// Meters per degree of latitude, used for search bounding boxes.
pub const LAT_METERS_PER_DEG: f64 = 110_540.0;

/// Meters per degree of longitude at the equator; scale by cos(latitude)
/// for other latitudes.
pub const LON_METERS_PER_DEG_EQUATOR: f64 = 111_320.0;

/// Square-degrees to square-meters conversion for display-grade polygon
/// areas, roughly (110 km per degree)². The longitude axis additionally
/// shrinks by cos(latitude); [`crate::projection::polygon_area_m2`] applies
/// that correction. Coarse by construction, display use only.
pub const DEG2_TO_M2: f64 = 12_100_000_000.0;

/// Convert degrees to radians.
#[inline]
pub fn deg_to_rad(deg: f64) -> f64 {
    deg.to_radians()
}

/// Convert radians to degrees.
#[inline]
pub fn rad_to_deg(rad: f64) -> f64 {
    rad.to_degrees()
}

/// Normalize a bearing into [0, 360).
#[inline]
pub fn normalize_bearing_deg(deg: f64) -> f64 {
    let b = deg.rem_euclid(360.0);
    if b == 360.0 {
        0.0
    } else {
        b
    }
}

/// Normalize a signed turn angle into (-180, 180].
///
/// # Example
/// ```
/// use seema_geo::core::math::normalize_turn_deg;
///
/// assert_eq!(normalize_turn_deg(270.0), -90.0);
/// assert_eq!(normalize_turn_deg(-180.0), 180.0);
/// assert_eq!(normalize_turn_deg(90.0), 90.0);
/// ```
#[inline]
pub fn normalize_turn_deg(deg: f64) -> f64 {
    let mut a = deg % 360.0;
    if a <= -180.0 {
        a += 360.0;
    } else if a > 180.0 {
        a -= 360.0;
    }
    a
}

/// Forward azimuth from `from` to `to` along the great circle, in degrees
/// [0, 360).
pub fn bearing_deg(from: &GeoPoint, to: &GeoPoint) -> f64 {
    let lat1 = deg_to_rad(from.latitude_deg);
    let lat2 = deg_to_rad(to.latitude_deg);
    let dlon = deg_to_rad(to.longitude_deg - from.longitude_deg);

    let y = dlon.sin() * lat2.cos();
    let x = lat1.cos() * lat2.sin() - lat1.sin() * lat2.cos() * dlon.cos();
    normalize_bearing_deg(rad_to_deg(y.atan2(x)))
}

/// Great-circle distance between two geodetic points in meters, using the
/// Haversine formula on a sphere of [`EARTH_MEAN_RADIUS_M`].
pub fn haversine_distance_m(a: &GeoPoint, b: &GeoPoint) -> f64 {
    let lat1 = deg_to_rad(a.latitude_deg);
    let lat2 = deg_to_rad(b.latitude_deg);
    let dlat = deg_to_rad(b.latitude_deg - a.latitude_deg);
    let dlon = deg_to_rad(b.longitude_deg - a.longitude_deg);

    let h = (dlat / 2.0).sin().powi(2) + lat1.cos() * lat2.cos() * (dlon / 2.0).sin().powi(2);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_MEAN_RADIUS_M * c
}
