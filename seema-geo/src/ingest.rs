//! GeoJSON ingestion boundary.
//!
//! The cadastral WFS service answers with a GeoJSON FeatureCollection whose
//! positions are `[longitude, latitude(, altitude)]`, the opposite axis
//! order from the internal (latitude, longitude) model. The swap happens
//! here and nowhere else. Network transport itself is the fetch layer's
//! concern; this module only turns its response text into [`Parcel`]s.

use serde::Deserialize;
use serde_json::Value;

use crate::core::math::{LAT_METERS_PER_DEG, LON_METERS_PER_DEG_EQUATOR};
use crate::core::{GeoPoint, Parcel, Polygon, Ring};
use crate::error::{Result, SeemaError};

/// Feature property holding the human-readable parcel name in cadastral
/// layers (e.g. "Lot 2 DP 12345").
const LABEL_PROPERTY: &str = "appellation";

#[derive(Debug, Deserialize)]
struct FeatureCollectionDoc {
    #[serde(default)]
    features: Vec<FeatureDoc>,
}

#[derive(Debug, Deserialize)]
struct FeatureDoc {
    geometry: Option<GeometryDoc>,
    #[serde(default)]
    properties: serde_json::Map<String, Value>,
}

#[derive(Debug, Deserialize)]
struct GeometryDoc {
    #[serde(rename = "type")]
    geometry_type: String,
    coordinates: Value,
}

/// GeoJSON position: `[longitude, latitude]`, optionally with altitude.
type Position = Vec<f64>;

/// Parse a GeoJSON FeatureCollection into parcel candidates.
///
/// `Polygon` features yield one candidate each; every part of a
/// `MultiPolygon` becomes its own candidate sharing the feature's label,
/// so point-containment selection can resolve a multi-part parcel to the
/// part actually under the query point. Features without geometry are
/// skipped.
///
/// # Errors
/// - [`SeemaError::Json`] when the document is not valid JSON or the
///   coordinates do not match the declared geometry type.
/// - [`SeemaError::UnsupportedGeometry`] for geometry types other than
///   Polygon/MultiPolygon.
/// - [`SeemaError::DegenerateRing`] / [`SeemaError::MalformedPosition`]
///   for structurally broken rings.
pub fn parse_feature_collection(geojson: &str) -> Result<Vec<Parcel>> {
    let doc: FeatureCollectionDoc = serde_json::from_str(geojson)?;

    let mut parcels = Vec::new();
    for feature in doc.features {
        let Some(geometry) = feature.geometry else {
            continue;
        };
        let label = feature
            .properties
            .get(LABEL_PROPERTY)
            .and_then(Value::as_str)
            .map(str::to_owned);

        match geometry.geometry_type.as_str() {
            "Polygon" => {
                let rings: Vec<Vec<Position>> = serde_json::from_value(geometry.coordinates)?;
                parcels.push(Parcel::new(label, polygon_from_rings(rings)?));
            }
            "MultiPolygon" => {
                let parts: Vec<Vec<Vec<Position>>> = serde_json::from_value(geometry.coordinates)?;
                for rings in parts {
                    parcels.push(Parcel::new(label.clone(), polygon_from_rings(rings)?));
                }
            }
            other => return Err(SeemaError::UnsupportedGeometry(other.to_owned())),
        }
    }
    Ok(parcels)
}

/// First ring is the outer boundary, the rest are holes.
fn polygon_from_rings(rings: Vec<Vec<Position>>) -> Result<Polygon> {
    let mut iter = rings.into_iter();
    let outer = match iter.next() {
        Some(positions) => ring_from_positions(positions)?,
        None => return Err(SeemaError::DegenerateRing(0)),
    };
    let holes = iter
        .map(ring_from_positions)
        .collect::<Result<Vec<Ring>>>()?;
    Ok(Polygon::with_holes(outer, holes))
}

/// Swap GeoJSON's (lon, lat) order into the internal (lat, lon) model and
/// drop the explicit closing position GeoJSON rings carry.
fn ring_from_positions(positions: Vec<Position>) -> Result<Ring> {
    let mut points = Vec::with_capacity(positions.len());
    for position in &positions {
        if position.len() < 2 {
            return Err(SeemaError::MalformedPosition(position.len()));
        }
        let mut point = GeoPoint::new(position[1], position[0]);
        if let Some(&altitude) = position.get(2) {
            point.altitude_m = Some(altitude);
        }
        points.push(point);
    }

    // GeoJSON closes rings explicitly; the internal model closes implicitly.
    if points.len() > 1 && points.first() == points.last() {
        points.pop();
    }

    if points.len() < 3 {
        return Err(SeemaError::DegenerateRing(points.len()));
    }
    Ok(Ring::new(points))
}

/// Geographic bounding box, degrees.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct BoundingBox {
    /// Southern edge.
    pub min_latitude_deg: f64,
    /// Western edge.
    pub min_longitude_deg: f64,
    /// Northern edge.
    pub max_latitude_deg: f64,
    /// Eastern edge.
    pub max_longitude_deg: f64,
}

/// Translate a search radius around a center point into the bounding box
/// the WFS query takes: dLat = r / 110,540 and dLon = r / (111,320 ·
/// cos(lat)).
pub fn search_bbox(center: &GeoPoint, radius_m: f64) -> BoundingBox {
    let dlat = radius_m / LAT_METERS_PER_DEG;
    let dlon = radius_m / (LON_METERS_PER_DEG_EQUATOR * center.latitude_deg.to_radians().cos());
    BoundingBox {
        min_latitude_deg: center.latitude_deg - dlat,
        min_longitude_deg: center.longitude_deg - dlon,
        max_latitude_deg: center.latitude_deg + dlat,
        max_longitude_deg: center.longitude_deg + dlon,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_parse_polygon_swaps_axes_and_reads_label() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"appellation": "Lot 2 DP 12345", "id": 42},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [174.780, -41.290],
                        [174.781, -41.290],
                        [174.781, -41.289],
                        [174.780, -41.289],
                        [174.780, -41.290]
                    ]]
                }
            }]
        }"#;
        let parcels = parse_feature_collection(geojson).unwrap();
        assert_eq!(parcels.len(), 1);
        assert_eq!(parcels[0].label.as_deref(), Some("Lot 2 DP 12345"));

        let outer = &parcels[0].polygon.outer;
        // Closing position dropped, axes swapped.
        assert_eq!(outer.len(), 4);
        assert_relative_eq!(outer.points[0].latitude_deg, -41.290);
        assert_relative_eq!(outer.points[0].longitude_deg, 174.780);
    }

    #[test]
    fn test_parse_multipolygon_flattens_parts() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {"appellation": "Sec 1 SO 555"},
                "geometry": {
                    "type": "MultiPolygon",
                    "coordinates": [
                        [[[0.0, 0.0], [1.0, 0.0], [1.0, 1.0], [0.0, 0.0]]],
                        [[[5.0, 5.0], [6.0, 5.0], [6.0, 6.0], [5.0, 5.0]]]
                    ]
                }
            }]
        }"#;
        let parcels = parse_feature_collection(geojson).unwrap();
        assert_eq!(parcels.len(), 2);
        assert_eq!(parcels[0].label, parcels[1].label);
        assert_eq!(parcels[1].polygon.outer.points[0].latitude_deg, 5.0);
    }

    #[test]
    fn test_parse_polygon_with_hole() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [
                        [[0.0, 0.0], [10.0, 0.0], [10.0, 10.0], [0.0, 10.0], [0.0, 0.0]],
                        [[4.0, 4.0], [6.0, 4.0], [6.0, 6.0], [4.0, 6.0], [4.0, 4.0]]
                    ]
                }
            }]
        }"#;
        let parcels = parse_feature_collection(geojson).unwrap();
        assert_eq!(parcels[0].polygon.holes.len(), 1);
        assert_eq!(parcels[0].polygon.holes[0].len(), 4);
        assert_eq!(parcels[0].label, None);
    }

    #[test]
    fn test_parse_altitude_carried_through() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[
                        [174.780, -41.290, 12.5],
                        [174.781, -41.290, 12.5],
                        [174.781, -41.289, 12.5],
                        [174.780, -41.290, 12.5]
                    ]]
                }
            }]
        }"#;
        let parcels = parse_feature_collection(geojson).unwrap();
        assert_eq!(parcels[0].polygon.outer.points[0].altitude_m, Some(12.5));
    }

    #[test]
    fn test_unsupported_geometry_is_rejected() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {"type": "LineString", "coordinates": [[0.0, 0.0], [1.0, 1.0]]}
            }]
        }"#;
        match parse_feature_collection(geojson) {
            Err(SeemaError::UnsupportedGeometry(name)) => assert_eq!(name, "LineString"),
            other => panic!("expected UnsupportedGeometry, got {other:?}"),
        }
    }

    #[test]
    fn test_degenerate_ring_is_rejected() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{
                "type": "Feature",
                "properties": {},
                "geometry": {
                    "type": "Polygon",
                    "coordinates": [[[0.0, 0.0], [1.0, 1.0], [0.0, 0.0]]]
                }
            }]
        }"#;
        match parse_feature_collection(geojson) {
            Err(SeemaError::DegenerateRing(found)) => assert_eq!(found, 2),
            other => panic!("expected DegenerateRing, got {other:?}"),
        }
    }

    #[test]
    fn test_feature_without_geometry_is_skipped() {
        let geojson = r#"{
            "type": "FeatureCollection",
            "features": [{"type": "Feature", "properties": {}, "geometry": null}]
        }"#;
        assert!(parse_feature_collection(geojson).unwrap().is_empty());
    }

    #[test]
    fn test_invalid_json_is_an_error() {
        assert!(matches!(
            parse_feature_collection("not geojson"),
            Err(SeemaError::Json(_))
        ));
    }

    #[test]
    fn test_search_bbox_at_minus_41() {
        let center = GeoPoint::new(-41.29, 174.78);
        let bbox = search_bbox(&center, 300.0);

        let dlat = 300.0 / 110_540.0;
        let dlon = 300.0 / (111_320.0 * (-41.29f64).to_radians().cos());
        assert_relative_eq!(bbox.max_latitude_deg - center.latitude_deg, dlat);
        assert_relative_eq!(bbox.max_longitude_deg - center.longitude_deg, dlon);
        assert_relative_eq!(
            bbox.max_latitude_deg - bbox.min_latitude_deg,
            2.0 * dlat,
            epsilon = 1e-12
        );
        // Sanity: roughly 0.0027° of latitude for 300 m.
        assert_relative_eq!(dlat, 0.002714, epsilon = 1e-6);
    }
}
