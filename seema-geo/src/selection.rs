//! Subject parcel selection.
//!
//! Given the candidate polygons returned by a spatial query and the query
//! point itself, pick "the" subject parcel: the first candidate whose outer
//! ring contains the point, or failing that the candidate whose centroid is
//! nearest in raw degree units.

use log::debug;

use crate::core::{GeoPoint, Polygon, Ring};
use crate::error::{Result, SeemaError};
use crate::projection::ring_centroid;

/// Edges flatter than this in latitude use the epsilon itself as the
/// ray-cast denominator instead of dividing by a value near zero.
const FLAT_EDGE_EPSILON: f64 = 1e-12;

/// Even-odd point-in-ring test, ray-casting along the latitude axis.
///
/// An edge whose latitude span is below [`FLAT_EDGE_EPSILON`] substitutes
/// the epsilon as denominator, so a ray grazing a horizontal edge never
/// divides by zero. Rings with fewer than 3 vertices contain nothing.
pub fn ring_contains(ring: &Ring, point: &GeoPoint) -> bool {
    let pts = &ring.points;
    if pts.len() < 3 {
        return false;
    }

    let px = point.longitude_deg;
    let py = point.latitude_deg;

    let mut inside = false;
    let mut j = pts.len() - 1;
    for i in 0..pts.len() {
        let (xi, yi) = (pts[i].longitude_deg, pts[i].latitude_deg);
        let (xj, yj) = (pts[j].longitude_deg, pts[j].latitude_deg);

        if (yi > py) != (yj > py) {
            let mut dy = yj - yi;
            if dy.abs() < FLAT_EDGE_EPSILON {
                dy = FLAT_EDGE_EPSILON;
            }
            let intersect_lon = (xj - xi) * (py - yi) / dy + xi;
            if px < intersect_lon {
                inside = !inside;
            }
        }
        j = i;
    }
    inside
}

/// Squared centroid distance in raw degree units.
///
/// Intentionally not geodesic: at city-block scale the nearest-candidate
/// ranking is insensitive to the latitude distortion, and the comparison
/// stays cheap and exact.
fn centroid_distance_sq_deg2(polygon: &Polygon, point: &GeoPoint) -> f64 {
    let c = ring_centroid(&polygon.outer);
    let dlat = c.latitude_deg - point.latitude_deg;
    let dlon = c.longitude_deg - point.longitude_deg;
    dlat * dlat + dlon * dlon
}

/// Select the subject parcel among `candidates` relative to `query_point`,
/// returning its index.
///
/// The first candidate containing the point wins. If none contains it, the
/// candidate with the smallest squared centroid distance wins, ties broken
/// by input order. Empty input fails with [`SeemaError::NoCandidates`].
pub fn select_subject<P: AsRef<Polygon>>(candidates: &[P], query_point: &GeoPoint) -> Result<usize> {
    if candidates.is_empty() {
        return Err(SeemaError::NoCandidates);
    }

    for (i, candidate) in candidates.iter().enumerate() {
        if ring_contains(&candidate.as_ref().outer, query_point) {
            return Ok(i);
        }
    }

    let mut best = 0;
    let mut best_d = f64::INFINITY;
    for (i, candidate) in candidates.iter().enumerate() {
        let d = centroid_distance_sq_deg2(candidate.as_ref(), query_point);
        if d < best_d {
            best_d = d;
            best = i;
        }
    }
    debug!(
        "query point inside none of {} candidates, falling back to nearest centroid (candidate {})",
        candidates.len(),
        best
    );
    Ok(best)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn square(sw_lat: f64, sw_lon: f64, side_deg: f64) -> Polygon {
        Polygon::new(Ring::new(vec![
            GeoPoint::new(sw_lat, sw_lon),
            GeoPoint::new(sw_lat, sw_lon + side_deg),
            GeoPoint::new(sw_lat + side_deg, sw_lon + side_deg),
            GeoPoint::new(sw_lat + side_deg, sw_lon),
        ]))
    }

    #[test]
    fn test_ring_contains_square() {
        let poly = square(0.0, 0.0, 1.0);
        assert!(ring_contains(&poly.outer, &GeoPoint::new(0.5, 0.5)));
        assert!(!ring_contains(&poly.outer, &GeoPoint::new(1.5, 0.5)));
        assert!(!ring_contains(&poly.outer, &GeoPoint::new(0.5, -0.1)));
    }

    #[test]
    fn test_ring_contains_ray_through_horizontal_edge() {
        // Query latitude equal to the square's bottom edge: the grazing ray
        // must neither divide by zero nor report containment.
        let poly = square(0.0, 0.0, 1.0);
        assert!(!ring_contains(&poly.outer, &GeoPoint::new(0.0, -0.5)));
        // Just above the edge, inside.
        assert!(ring_contains(&poly.outer, &GeoPoint::new(1e-9, 0.5)));
    }

    #[test]
    fn test_ring_contains_concave() {
        // L-shaped ring; the notch is outside.
        let l_shape = Ring::new(vec![
            GeoPoint::new(0.0, 0.0),
            GeoPoint::new(0.0, 2.0),
            GeoPoint::new(1.0, 2.0),
            GeoPoint::new(1.0, 1.0),
            GeoPoint::new(2.0, 1.0),
            GeoPoint::new(2.0, 0.0),
        ]);
        assert!(ring_contains(&l_shape, &GeoPoint::new(0.5, 1.5)));
        assert!(ring_contains(&l_shape, &GeoPoint::new(1.5, 0.5)));
        assert!(!ring_contains(&l_shape, &GeoPoint::new(1.5, 1.5)));
    }

    #[test]
    fn test_ring_contains_needs_three_points() {
        let segment = Ring::new(vec![GeoPoint::new(0.0, 0.0), GeoPoint::new(1.0, 1.0)]);
        assert!(!ring_contains(&segment, &GeoPoint::new(0.5, 0.5)));
    }

    #[test]
    fn test_select_empty_fails() {
        let none: Vec<Polygon> = Vec::new();
        assert!(matches!(
            select_subject(&none, &GeoPoint::new(0.0, 0.0)),
            Err(SeemaError::NoCandidates)
        ));
    }

    #[test]
    fn test_select_single_candidate_regardless_of_point() {
        let candidates = vec![square(0.0, 0.0, 1.0)];
        // Far outside, still the only choice.
        let idx = select_subject(&candidates, &GeoPoint::new(50.0, 50.0)).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_select_containing_polygon_wins() {
        let candidates = vec![
            square(0.0, 0.0, 1.0),
            square(2.0, 2.0, 1.0),
            square(4.0, 4.0, 1.0),
        ];
        let idx = select_subject(&candidates, &GeoPoint::new(2.5, 2.5)).unwrap();
        assert_eq!(idx, 1);
    }

    #[test]
    fn test_select_first_containing_wins_on_overlap() {
        // Overlapping candidates: input order breaks the tie.
        let candidates = vec![square(0.0, 0.0, 2.0), square(1.0, 1.0, 2.0)];
        let idx = select_subject(&candidates, &GeoPoint::new(1.5, 1.5)).unwrap();
        assert_eq!(idx, 0);
    }

    #[test]
    fn test_select_nearest_centroid_when_outside_all() {
        // Centroids at (0.5, 0.5), (3.5, 3.5), (10.5, 10.5); query (3.0, 3.0)
        // is outside all three, nearest to the middle candidate.
        let candidates = vec![
            square(0.0, 0.0, 1.0),
            square(3.25, 3.25, 0.5),
            square(10.0, 10.0, 1.0),
        ];
        let query = GeoPoint::new(3.0, 3.0);
        assert!(!ring_contains(&candidates[1].outer, &query));
        let idx = select_subject(&candidates, &query).unwrap();
        assert_eq!(idx, 1);
    }
}
