//! Pipeline composition and the placement fallback policy.
//!
//! Each stage is a pure function returning a discriminated result; this
//! module sequences them synchronously and packages what the rendering
//! sink consumes. The choice between placement tiers is an ordered policy
//! table evaluated against the AR session's capability signal; the stages
//! themselves are agnostic to which tier is active.
//!
//! ```text
//!  GeoJSON text        query point
//!       │                   │
//!       ▼                   ▼
//!  ┌─────────┐        ┌───────────┐       ┌───────────────┐
//!  │ ingest  │──────▶ │ selection │─────▶ │    corners    │
//!  └─────────┘ Parcels└───────────┘subject└───────┬───────┘
//!                                                 │ CornerSet
//!                                                 ▼
//!                                         ┌───────────────┐
//!                                         │  projection   │──▶ scene sink
//!                                         └───────────────┘
//!
//!  Manual tier only: two tapped local points + two chosen corners
//!                                         ┌───────────────┐
//!                                         │   alignment   │──▶ scene sink
//!                                         └───────────────┘
//! ```

use log::{debug, info};
use serde::{Deserialize, Serialize};

use crate::alignment::{compute_alignment, AlignmentCorrespondence, SimilarityTransform};
use crate::core::{CornerSet, EnuPoint, GeoPoint, Parcel, Ring};
use crate::corners::{reduce_to_corners, CornerConfig};
use crate::error::Result;
use crate::projection::{polygon_area_m2, ring_centroid, to_enu};
use crate::selection::select_subject;

/// How the overlay is placed in the scene.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum PlacementMethod {
    /// Corners become geo-anchors; the platform tracks them directly.
    GeoAnchored,
    /// A user-supplied two-point correspondence aligns the boundary.
    ManualAlignment,
    /// An unanchored indicative box; no tracking input at all.
    FallbackBox,
}

impl PlacementMethod {
    /// Stable name for logs and overlay metadata.
    pub fn name(self) -> &'static str {
        match self {
            PlacementMethod::GeoAnchored => "geo_anchored",
            PlacementMethod::ManualAlignment => "manual_alignment",
            PlacementMethod::FallbackBox => "fallback_box",
        }
    }

    /// The accuracy tier this method can deliver.
    pub fn accuracy(self) -> AccuracyTier {
        match self {
            PlacementMethod::GeoAnchored => AccuracyTier::High,
            PlacementMethod::ManualAlignment => AccuracyTier::Approximate,
            PlacementMethod::FallbackBox => AccuracyTier::Indicative,
        }
    }

    fn is_available(self, capabilities: &SessionCapabilities) -> bool {
        match self {
            PlacementMethod::GeoAnchored => capabilities.geo_tracking,
            PlacementMethod::ManualAlignment => capabilities.world_tracking,
            PlacementMethod::FallbackBox => true,
        }
    }
}

/// Expected placement fidelity, surfaced to the user.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum AccuracyTier {
    /// True-to-life position and scale.
    High,
    /// Correct shape and scale, position as good as the user's taps.
    Approximate,
    /// Shape only; position and scale are nominal.
    Indicative,
}

/// Capability signal from the AR session collaborator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct SessionCapabilities {
    /// Platform geo-tracking (VPS coverage, compass-grade heading) is up.
    pub geo_tracking: bool,
    /// Plain world tracking is up, so tapped points are meaningful.
    pub world_tracking: bool,
}

/// Ordered fallback policy: the first available method wins.
const PLACEMENT_POLICY: [PlacementMethod; 3] = [
    PlacementMethod::GeoAnchored,
    PlacementMethod::ManualAlignment,
    PlacementMethod::FallbackBox,
];

/// Pick the placement method for the given session capabilities.
pub fn decide_method(capabilities: &SessionCapabilities) -> PlacementMethod {
    let method = PLACEMENT_POLICY
        .into_iter()
        .find(|m| m.is_available(capabilities))
        .unwrap_or(PlacementMethod::FallbackBox);
    debug!(
        "placement policy chose {} (geo_tracking={}, world_tracking={})",
        method.name(),
        capabilities.geo_tracking,
        capabilities.world_tracking
    );
    method
}

/// Descriptive metadata attached to every overlay handed to the sink.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct OverlayMetadata {
    /// Subject parcel appellation, when the feed carried one.
    pub label: Option<String>,
    /// Display-grade parcel area in square meters.
    pub area_m2: f64,
    /// Number of key corners in the overlay.
    pub corner_count: usize,
    /// Candidates returned by the query besides the subject.
    pub neighbor_count: usize,
    /// Placement method in effect.
    pub method: PlacementMethod,
    /// Accuracy tier the method delivers.
    pub accuracy: AccuracyTier,
    /// Caller-supplied capture timestamp, milliseconds since the Unix
    /// epoch. Supplied from outside so the pipeline stays clock-free.
    pub timestamp_ms: u64,
}

/// Geo-anchored overlay: key corners plus the origin they anchor around.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct BoundaryOverlay {
    /// Key corners of the subject boundary, ring order.
    pub corners: CornerSet,
    /// ENU origin for the sink's projection pass (subject centroid).
    pub origin: GeoPoint,
    /// All boundary rings of the subject (outer first, then holes), for
    /// line rendering.
    pub rings: Vec<Ring>,
    /// Overlay metadata.
    pub metadata: OverlayMetadata,
}

/// Manually aligned overlay: a similarity transform plus the rings to
/// project through it.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ManualOverlay {
    /// Local-frame → ENU similarity transform.
    pub transform: SimilarityTransform,
    /// ENU origin the transform's target frame is centered on.
    pub origin: GeoPoint,
    /// All boundary rings of the subject (outer first, then holes).
    pub rings: Vec<Ring>,
    /// Overlay metadata.
    pub metadata: OverlayMetadata,
}

/// Run the geo-anchored pipeline: select the subject among `parcels`,
/// reduce its boundary to key corners, and package the overlay.
///
/// `timestamp_ms` stamps the metadata; the caller owns the clock.
pub fn build_overlay(
    parcels: &[Parcel],
    query_point: &GeoPoint,
    corner_config: &CornerConfig,
    timestamp_ms: u64,
) -> Result<BoundaryOverlay> {
    let (subject, neighbor_count) = pick_subject(parcels, query_point)?;
    let corners = reduce_to_corners(&subject.polygon.outer, corner_config)?;
    let origin = ring_centroid(&subject.polygon.outer);
    let area_m2 = polygon_area_m2(&subject.polygon.outer);

    info!(
        "overlay: {} corners for {} ({:.0} m², {} neighbors)",
        corners.len(),
        subject.label.as_deref().unwrap_or("unlabelled parcel"),
        area_m2,
        neighbor_count
    );

    let method = PlacementMethod::GeoAnchored;
    Ok(BoundaryOverlay {
        corners: corners.clone(),
        origin,
        rings: subject_rings(subject),
        metadata: OverlayMetadata {
            label: subject.label.clone(),
            area_m2,
            corner_count: corners.len(),
            neighbor_count,
            method,
            accuracy: method.accuracy(),
            timestamp_ms,
        },
    })
}

/// Run the manual-alignment pipeline: select the subject, then fit the
/// similarity transform from the user's two-point correspondence.
///
/// The corner count recorded in the metadata is the number of key corners
/// of the subject boundary, matching what the user picked from.
pub fn build_manual_overlay(
    parcels: &[Parcel],
    query_point: &GeoPoint,
    correspondence: &AlignmentCorrespondence,
    corner_config: &CornerConfig,
    timestamp_ms: u64,
) -> Result<ManualOverlay> {
    let (subject, neighbor_count) = pick_subject(parcels, query_point)?;
    let corners = reduce_to_corners(&subject.polygon.outer, corner_config)?;
    let origin = ring_centroid(&subject.polygon.outer);
    let transform = compute_alignment(correspondence, &origin)?;
    let area_m2 = polygon_area_m2(&subject.polygon.outer);

    info!(
        "manual overlay: rotation {:.1}°, scale {:.3} for {}",
        transform.rotation_deg(),
        transform.scale,
        subject.label.as_deref().unwrap_or("unlabelled parcel")
    );

    let method = PlacementMethod::ManualAlignment;
    Ok(ManualOverlay {
        transform,
        origin,
        rings: subject_rings(subject),
        metadata: OverlayMetadata {
            label: subject.label.clone(),
            area_m2,
            corner_count: corners.len(),
            neighbor_count,
            method,
            accuracy: method.accuracy(),
            timestamp_ms,
        },
    })
}

/// Project a boundary ring into the ENU frame about `origin`, the pass
/// the rendering sink applies to every ring it draws.
pub fn ring_to_enu(ring: &Ring, origin: &GeoPoint) -> Vec<EnuPoint> {
    ring.iter().map(|p| to_enu(p, origin)).collect()
}

fn pick_subject<'a>(parcels: &'a [Parcel], query_point: &GeoPoint) -> Result<(&'a Parcel, usize)> {
    let idx = select_subject(parcels, query_point)?;
    Ok((&parcels[idx], parcels.len() - 1))
}

fn subject_rings(subject: &Parcel) -> Vec<Ring> {
    let mut rings = Vec::with_capacity(1 + subject.polygon.holes.len());
    rings.push(subject.polygon.outer.clone());
    rings.extend(subject.polygon.holes.iter().cloned());
    rings
}
