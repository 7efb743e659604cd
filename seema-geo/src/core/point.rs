//! Geodetic and Cartesian point types.
//!
//! Three frames appear in the pipeline:
//! - geodetic (latitude/longitude degrees, altitude meters): the fetch
//!   layer's frame,
//! - ENU (east/north/up meters about a geodetic origin): the rendering
//!   sink's frame,
//! - local (x/y horizontal, z up, device units): the AR session's frame,
//!   only seen by manual alignment.

use serde::{Deserialize, Serialize};

/// A geodetic position on the WGS84 ellipsoid.
///
/// Latitude and longitude are in degrees, altitude in meters above the
/// ellipsoid when known. Valid latitudes are [-90, 90] and longitudes
/// [-180, 180]; construction does not enforce this, [`GeoPoint::is_valid`]
/// checks it.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct GeoPoint {
    /// Latitude in degrees, positive north.
    pub latitude_deg: f64,
    /// Longitude in degrees, positive east.
    pub longitude_deg: f64,
    /// Height above the ellipsoid in meters, when known.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub altitude_m: Option<f64>,
}

impl GeoPoint {
    /// Create a point with no altitude.
    #[inline]
    pub fn new(latitude_deg: f64, longitude_deg: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m: None,
        }
    }

    /// Create a point carrying an altitude.
    #[inline]
    pub fn with_altitude(latitude_deg: f64, longitude_deg: f64, altitude_m: f64) -> Self {
        Self {
            latitude_deg,
            longitude_deg,
            altitude_m: Some(altitude_m),
        }
    }

    /// Check the coordinate-range invariant: latitude in [-90, 90],
    /// longitude in [-180, 180], both finite.
    #[inline]
    pub fn is_valid(&self) -> bool {
        self.latitude_deg.is_finite()
            && self.longitude_deg.is_finite()
            && (-90.0..=90.0).contains(&self.latitude_deg)
            && (-180.0..=180.0).contains(&self.longitude_deg)
    }
}

/// Cartesian offset in a local East-North-Up tangent frame, in meters.
///
/// Only meaningful together with the geodetic origin it was derived from;
/// never persisted on its own.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct EnuPoint {
    /// Offset east of the origin in meters.
    pub east_m: f64,
    /// Offset north of the origin in meters.
    pub north_m: f64,
    /// Offset above the origin in meters.
    pub up_m: f64,
}

impl EnuPoint {
    /// Create an ENU offset.
    #[inline]
    pub fn new(east_m: f64, north_m: f64, up_m: f64) -> Self {
        Self {
            east_m,
            north_m,
            up_m,
        }
    }

    /// Horizontal (east-north plane) distance to another ENU point.
    #[inline]
    pub fn horizontal_distance(&self, other: &EnuPoint) -> f64 {
        let de = self.east_m - other.east_m;
        let dn = self.north_m - other.north_m;
        (de * de + dn * dn).sqrt()
    }
}

/// A point in the device/session local frame: x/y horizontal, z up.
///
/// Units are whatever the AR session reports, nominally meters.
#[derive(Clone, Copy, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct LocalPoint {
    /// Horizontal x component.
    pub x: f64,
    /// Horizontal y component.
    pub y: f64,
    /// Vertical component, positive up.
    pub z: f64,
}

impl LocalPoint {
    /// Create a local-frame point.
    #[inline]
    pub fn new(x: f64, y: f64, z: f64) -> Self {
        Self { x, y, z }
    }
}
