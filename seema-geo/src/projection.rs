//! Geodetic ↔ local tangent-plane (ENU) conversion, centroids and areas.
//!
//! The ENU conversion is a flat-Earth tangent approximation, not full
//! ellipsoidal geodesy: error grows with distance from the origin and the
//! approximation is intended for offsets up to a few hundred meters, the
//! working envelope of an AR parcel overlay. The WGS84 equatorial radius is
//! used (not the mean radius) so the projection and the alignment math
//! share one length scale.

use crate::core::math::{deg_to_rad, rad_to_deg, DEG2_TO_M2, WGS84_EQUATORIAL_RADIUS_M};
use crate::core::{EnuPoint, GeoPoint, Ring};

/// Project a geodetic point into the East-North-Up frame centered on
/// `origin`.
///
/// Valid within roughly 300 m of the origin. A missing altitude on either
/// point is treated as 0.
pub fn to_enu(point: &GeoPoint, origin: &GeoPoint) -> EnuPoint {
    let lat_rad = deg_to_rad(point.latitude_deg);
    let lon_rad = deg_to_rad(point.longitude_deg);
    let origin_lat_rad = deg_to_rad(origin.latitude_deg);
    let origin_lon_rad = deg_to_rad(origin.longitude_deg);

    EnuPoint {
        east_m: WGS84_EQUATORIAL_RADIUS_M * origin_lat_rad.cos() * (lon_rad - origin_lon_rad),
        north_m: WGS84_EQUATORIAL_RADIUS_M * (lat_rad - origin_lat_rad),
        up_m: point.altitude_m.unwrap_or(0.0) - origin.altitude_m.unwrap_or(0.0),
    }
}

/// Invert [`to_enu`]: recover the geodetic point whose ENU offset about
/// `origin` is `p`.
///
/// The returned altitude is `origin` altitude (0 when absent) plus the up
/// offset, so `from_enu(to_enu(x, o), o)` reproduces `x` exactly when `x`
/// carries an altitude.
pub fn from_enu(p: &EnuPoint, origin: &GeoPoint) -> GeoPoint {
    let origin_lat_rad = deg_to_rad(origin.latitude_deg);
    let origin_lon_rad = deg_to_rad(origin.longitude_deg);

    let lat_rad = origin_lat_rad + p.north_m / WGS84_EQUATORIAL_RADIUS_M;
    let lon_rad = origin_lon_rad + p.east_m / (WGS84_EQUATORIAL_RADIUS_M * origin_lat_rad.cos());

    GeoPoint {
        latitude_deg: rad_to_deg(lat_rad),
        longitude_deg: rad_to_deg(lon_rad),
        altitude_m: Some(origin.altitude_m.unwrap_or(0.0) + p.up_m),
    }
}

/// Arithmetic mean of the ring vertices.
///
/// Not area-weighted: biased toward vertex-dense stretches and toward the
/// concave side of non-convex rings. Good enough as an ENU origin and as
/// the nearest-candidate proxy in subject selection. Empty rings yield the
/// zero point.
pub fn ring_centroid(ring: &Ring) -> GeoPoint {
    if ring.is_empty() {
        return GeoPoint::new(0.0, 0.0);
    }

    let n = ring.len() as f64;
    let mut sum_lat = 0.0;
    let mut sum_lon = 0.0;
    for p in ring.iter() {
        sum_lat += p.latitude_deg;
        sum_lon += p.longitude_deg;
    }
    GeoPoint::new(sum_lat / n, sum_lon / n)
}

/// Signed shoelace area of the ring over raw (longitude, latitude) pairs,
/// in square degrees. Positive for counter-clockwise traversal.
pub fn ring_signed_area_deg2(ring: &Ring) -> f64 {
    let pts = &ring.points;
    if pts.len() < 3 {
        return 0.0;
    }

    let mut sum = 0.0;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        sum += pts[j].longitude_deg * pts[i].latitude_deg
            - pts[i].longitude_deg * pts[j].latitude_deg;
        j = i;
    }
    sum / 2.0
}

/// Approximate ring area in square meters for display purposes.
///
/// Shoelace area in square degrees scaled by [`DEG2_TO_M2`] and by the
/// cosine of the centroid latitude (longitude degrees shrink away from the
/// equator). Coarse by construction; within a few percent at parcel scale,
/// and not geodesically exact anywhere.
pub fn polygon_area_m2(ring: &Ring) -> f64 {
    let centroid_lat_rad = deg_to_rad(ring_centroid(ring).latitude_deg);
    ring_signed_area_deg2(ring).abs() * DEG2_TO_M2 * centroid_lat_rad.cos()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::{LAT_METERS_PER_DEG, LON_METERS_PER_DEG_EQUATOR};
    use approx::assert_relative_eq;

    fn wellington() -> GeoPoint {
        GeoPoint::new(-41.29, 174.78)
    }

    /// Square ring of the given side length in meters, corner at `sw`.
    fn square_ring(sw: GeoPoint, side_m: f64) -> Ring {
        let dlat = side_m / LAT_METERS_PER_DEG;
        let dlon = side_m / (LON_METERS_PER_DEG_EQUATOR * deg_to_rad(sw.latitude_deg).cos());
        Ring::new(vec![
            GeoPoint::new(sw.latitude_deg, sw.longitude_deg),
            GeoPoint::new(sw.latitude_deg, sw.longitude_deg + dlon),
            GeoPoint::new(sw.latitude_deg + dlat, sw.longitude_deg + dlon),
            GeoPoint::new(sw.latitude_deg + dlat, sw.longitude_deg),
        ])
    }

    #[test]
    fn test_enu_axis_signs() {
        let origin = wellington();

        let north = GeoPoint::new(origin.latitude_deg + 0.001, origin.longitude_deg);
        let enu = to_enu(&north, &origin);
        assert!(enu.north_m > 0.0);
        assert_relative_eq!(enu.east_m, 0.0, epsilon = 1e-9);

        let east = GeoPoint::new(origin.latitude_deg, origin.longitude_deg + 0.001);
        let enu = to_enu(&east, &origin);
        assert!(enu.east_m > 0.0);
        assert_relative_eq!(enu.north_m, 0.0, epsilon = 1e-9);
    }

    #[test]
    fn test_enu_magnitude_near_origin() {
        // 0.001° of latitude ≈ 111.3 m with the equatorial radius.
        let origin = wellington();
        let north = GeoPoint::new(origin.latitude_deg + 0.001, origin.longitude_deg);
        let enu = to_enu(&north, &origin);
        assert_relative_eq!(
            enu.north_m,
            WGS84_EQUATORIAL_RADIUS_M * deg_to_rad(0.001),
            epsilon = 1e-9
        );
    }

    #[test]
    fn test_enu_round_trip_within_one_kilometer() {
        let origin = GeoPoint::with_altitude(-41.29, 174.78, 25.0);
        let offsets = [
            (0.0, 0.0),
            (0.002, 0.003),
            (-0.004, 0.006),
            (0.008, -0.004),
            (-0.009, -0.009),
        ];
        for (dlat, dlon) in offsets {
            let p = GeoPoint::with_altitude(
                origin.latitude_deg + dlat,
                origin.longitude_deg + dlon,
                31.5,
            );
            let back = from_enu(&to_enu(&p, &origin), &origin);
            assert_relative_eq!(back.latitude_deg, p.latitude_deg, epsilon = 1e-6);
            assert_relative_eq!(back.longitude_deg, p.longitude_deg, epsilon = 1e-6);
            assert_relative_eq!(back.altitude_m.unwrap(), 31.5, epsilon = 1e-9);
        }
    }

    #[test]
    fn test_enu_missing_altitude_defaults_to_zero() {
        let origin = wellington();
        let p = GeoPoint::with_altitude(-41.291, 174.781, 12.0);
        assert_relative_eq!(to_enu(&p, &origin).up_m, 12.0, epsilon = 1e-12);

        let q = GeoPoint::new(-41.291, 174.781);
        assert_relative_eq!(to_enu(&q, &origin).up_m, 0.0, epsilon = 1e-12);
    }

    #[test]
    fn test_ring_centroid_square() {
        let ring = square_ring(GeoPoint::new(-41.0, 174.0), 100.0);
        let c = ring_centroid(&ring);
        let expected_lat = -41.0 + 50.0 / LAT_METERS_PER_DEG;
        assert_relative_eq!(c.latitude_deg, expected_lat, epsilon = 1e-9);
    }

    #[test]
    fn test_ring_centroid_empty() {
        let c = ring_centroid(&Ring::default());
        assert_eq!(c, GeoPoint::new(0.0, 0.0));
    }

    #[test]
    fn test_signed_area_orientation() {
        // square_ring traverses counter-clockwise (east, then north).
        let ccw = square_ring(GeoPoint::new(-41.0, 174.0), 100.0);
        assert!(ring_signed_area_deg2(&ccw) > 0.0);

        let mut cw_points = ccw.points.clone();
        cw_points.reverse();
        let cw = Ring::new(cw_points);
        assert_relative_eq!(
            ring_signed_area_deg2(&cw),
            -ring_signed_area_deg2(&ccw),
            epsilon = 1e-18
        );
    }

    #[test]
    fn test_square_area_near_latitude_minus_41() {
        // 100 m × 100 m near 41°S should read within 5% of 10,000 m².
        let ring = square_ring(GeoPoint::new(-41.0, 174.0), 100.0);
        let area = polygon_area_m2(&ring);
        assert!(
            (area - 10_000.0).abs() / 10_000.0 < 0.05,
            "area {area} outside 5% of 10,000"
        );
    }

    #[test]
    fn test_square_area_near_equator() {
        let ring = square_ring(GeoPoint::new(0.5, 10.0), 100.0);
        let area = polygon_area_m2(&ring);
        assert!(
            (area - 10_000.0).abs() / 10_000.0 < 0.05,
            "area {area} outside 5% of 10,000"
        );
    }

    #[test]
    fn test_degenerate_ring_area_is_zero() {
        let two = Ring::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(0.0, 1.0)]);
        assert_relative_eq!(ring_signed_area_deg2(&two), 0.0);
        assert_relative_eq!(polygon_area_m2(&two), 0.0);
    }
}
