//! Boundary ring and polygon containers.

use serde::{Deserialize, Serialize};

use super::point::GeoPoint;

/// An ordered boundary ring, implicitly closed: the last vertex connects
/// back to the first, which need not be repeated. At least 3 distinct
/// vertices are required for the ring to be geometrically meaningful.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Ring {
    /// Ring vertices in traversal order.
    pub points: Vec<GeoPoint>,
}

impl Ring {
    /// Create a ring from vertices in traversal order.
    #[inline]
    pub fn new(points: Vec<GeoPoint>) -> Self {
        Self { points }
    }

    /// Number of vertices.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the ring has no vertices.
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    /// Iterate over the vertices.
    pub fn iter(&self) -> impl Iterator<Item = &GeoPoint> {
        self.points.iter()
    }
}

/// A parcel boundary polygon: one outer ring plus any hole rings.
///
/// Holes are retained only so the rendering sink can draw them; every
/// algorithm in this crate operates on the outer ring.
#[derive(Clone, Debug, PartialEq, Default, Serialize, Deserialize)]
pub struct Polygon {
    /// The outer boundary ring.
    pub outer: Ring,
    /// Hole rings, pass-through for rendering.
    #[serde(default)]
    pub holes: Vec<Ring>,
}

impl Polygon {
    /// Create a polygon with no holes.
    #[inline]
    pub fn new(outer: Ring) -> Self {
        Self {
            outer,
            holes: Vec::new(),
        }
    }

    /// Create a polygon with holes.
    #[inline]
    pub fn with_holes(outer: Ring, holes: Vec<Ring>) -> Self {
        Self { outer, holes }
    }
}

impl AsRef<Polygon> for Polygon {
    #[inline]
    fn as_ref(&self) -> &Polygon {
        self
    }
}

/// How a corner set was chosen.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum CornerPick {
    /// The deduplicated ring already had few enough vertices.
    Passthrough,
    /// Corners chosen by turn-angle salience.
    TurnAngle,
    /// Salient corners clustered; vertices were re-picked evenly by ring index.
    EvenSpacing,
}

/// A lossy reduction of a boundary ring to its 2-4 key corners.
///
/// The corners are a subsequence of the deduplicated source ring and keep
/// its traversal order; they are never re-sorted by angle or score.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct CornerSet {
    points: Vec<GeoPoint>,
    /// How the corners were chosen.
    pub pick: CornerPick,
}

impl CornerSet {
    /// Create a corner set. Callers are expected to respect the 2-4 bound;
    /// [`crate::corners::reduce_to_corners`] always does.
    #[inline]
    pub fn new(points: Vec<GeoPoint>, pick: CornerPick) -> Self {
        Self { points, pick }
    }

    /// The corner points, in source-ring traversal order.
    #[inline]
    pub fn points(&self) -> &[GeoPoint] {
        &self.points
    }

    /// Number of corners.
    #[inline]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Whether the set is empty (never true for reducer output).
    #[inline]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

/// A candidate parcel as ingested from the cadastral service: a boundary
/// polygon plus the feature's appellation label when present.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Parcel {
    /// Human-readable parcel appellation, e.g. "Lot 2 DP 12345".
    pub label: Option<String>,
    /// Boundary geometry.
    pub polygon: Polygon,
}

impl Parcel {
    /// Create a parcel.
    #[inline]
    pub fn new(label: Option<String>, polygon: Polygon) -> Self {
        Self { label, polygon }
    }
}

impl AsRef<Polygon> for Parcel {
    #[inline]
    fn as_ref(&self) -> &Polygon {
        &self.polygon
    }
}
