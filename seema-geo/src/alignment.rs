//! Manual-alignment similarity transform.
//!
//! When geo-anchoring is unavailable, the user taps two points in the
//! device's local frame and pairs them with two chosen boundary corners.
//! Those two correspondences fix a 2.5D similarity transform exactly:
//! rotation about the vertical axis, uniform horizontal scale, east/north
//! translation. Closed form, no iteration, no least-squares refinement.

use serde::{Deserialize, Serialize};

use crate::core::{EnuPoint, GeoPoint, LocalPoint};
use crate::error::{CorrespondenceFrame, Result, SeemaError};
use crate::projection::to_enu;

/// Minimum separation between the two correspondence points in either
/// frame (meters / local units); closer pairs cannot fix orientation and
/// scale reliably.
pub const MIN_CORRESPONDENCE_SEPARATION: f64 = 0.01;

/// Two point correspondences between the local frame and the geodetic
/// frame: `local_a` is paired with `geo_a`, `local_b` with `geo_b`.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AlignmentCorrespondence {
    /// First tapped local-frame point; the transform anchors on this one.
    pub local_a: LocalPoint,
    /// Second tapped local-frame point; fixes orientation and scale only.
    pub local_b: LocalPoint,
    /// Boundary corner paired with `local_a`.
    pub geo_a: GeoPoint,
    /// Boundary corner paired with `local_b`.
    pub geo_b: GeoPoint,
}

/// A 2.5D similarity transform from the local frame into the ENU frame:
/// rotation about the up axis, uniform horizontal scale, east/north
/// translation. No vertical rotation, scale or translation component.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct SimilarityTransform {
    /// Rotation about the vertical axis in radians, counter-clockwise
    /// (east toward north) positive.
    pub rotation_rad: f64,
    /// Uniform horizontal scale factor.
    pub scale: f64,
    /// Translation along east in meters.
    pub translation_east_m: f64,
    /// Translation along north in meters.
    pub translation_north_m: f64,
}

impl SimilarityTransform {
    /// Rotation in degrees, for display.
    #[inline]
    pub fn rotation_deg(&self) -> f64 {
        self.rotation_rad.to_degrees()
    }

    /// Map a local-frame point into the ENU frame. The vertical component
    /// passes through untouched.
    #[inline]
    pub fn apply(&self, p: &LocalPoint) -> EnuPoint {
        let (sin, cos) = self.rotation_rad.sin_cos();
        EnuPoint {
            east_m: self.scale * (p.x * cos - p.y * sin) + self.translation_east_m,
            north_m: self.scale * (p.x * sin + p.y * cos) + self.translation_north_m,
            up_m: p.z,
        }
    }
}

/// Compute the similarity transform mapping the correspondence's local
/// frame onto the ENU frame about `enu_origin` (typically the subject
/// parcel's centroid).
///
/// The translation is solved so the transform reproduces ENU(`geo_a`)
/// exactly at `local_a`; point B only establishes orientation and scale,
/// and any residual at B is left uncorrected.
///
/// # Errors
/// [`SeemaError::DegenerateCorrespondence`] when the pair separation in
/// either frame is below [`MIN_CORRESPONDENCE_SEPARATION`].
pub fn compute_alignment(
    correspondence: &AlignmentCorrespondence,
    enu_origin: &GeoPoint,
) -> Result<SimilarityTransform> {
    let enu_a = to_enu(&correspondence.geo_a, enu_origin);
    let enu_b = to_enu(&correspondence.geo_b, enu_origin);

    let local_de = correspondence.local_b.x - correspondence.local_a.x;
    let local_dn = correspondence.local_b.y - correspondence.local_a.y;
    let local_len = (local_de * local_de + local_dn * local_dn).sqrt();
    if local_len < MIN_CORRESPONDENCE_SEPARATION {
        return Err(SeemaError::DegenerateCorrespondence {
            frame: CorrespondenceFrame::Local,
            separation: local_len,
        });
    }

    let enu_de = enu_b.east_m - enu_a.east_m;
    let enu_dn = enu_b.north_m - enu_a.north_m;
    let enu_len = (enu_de * enu_de + enu_dn * enu_dn).sqrt();
    if enu_len < MIN_CORRESPONDENCE_SEPARATION {
        return Err(SeemaError::DegenerateCorrespondence {
            frame: CorrespondenceFrame::Enu,
            separation: enu_len,
        });
    }

    let scale = enu_len / local_len;
    let raw_rotation = enu_dn.atan2(enu_de) - local_dn.atan2(local_de);
    // Fold into (-π, π] without branching on the wrap points.
    let rotation_rad = raw_rotation.sin().atan2(raw_rotation.cos());

    let (sin, cos) = rotation_rad.sin_cos();
    let ax = correspondence.local_a.x;
    let ay = correspondence.local_a.y;
    let translation_east_m = enu_a.east_m - scale * (ax * cos - ay * sin);
    let translation_north_m = enu_a.north_m - scale * (ax * sin + ay * cos);

    Ok(SimilarityTransform {
        rotation_rad,
        scale,
        translation_east_m,
        translation_north_m,
    })
}
